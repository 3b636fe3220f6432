use crate::model::{PricePoint, PriceRange, RatedResponse, ResponseLabel};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How responses are matched to price points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchingMode {
    /// Every response is matched against every price point, so each
    /// response adds `price_points.len()` entries to its bucket.
    Legacy,
    /// Each response is matched to the price point the respondent rated.
    #[default]
    PerRespondent,
}

/// Matched price points for a single label. `indices` and `prices` are parallel.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LabelBucket {
    pub indices: Vec<usize>,
    pub prices: Vec<PricePoint>,
}

impl LabelBucket {
    fn push(&mut self, index: usize, price: PricePoint) {
        self.indices.push(index);
        self.prices.push(price);
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Mean matched price, `0.0` when the bucket is empty.
    pub fn average(&self) -> f64 {
        average(&self.prices)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VanWestendorpResult {
    /// `(too_cheap average, too_expensive average)`.
    pub optimal_range: PriceRange,
    pub too_expensive: LabelBucket,
    pub too_cheap: LabelBucket,
    pub just_right: LabelBucket,
    pub not_cheap: LabelBucket,
    pub not_expensive: LabelBucket,
}

/// Per price point label counts, for plotting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceCounts {
    pub index: usize,
    pub price: PricePoint,
    pub too_expensive: usize,
    pub too_cheap: usize,
    pub just_right: usize,
    pub not_cheap: usize,
    pub not_expensive: usize,
}

/// One point of the cumulative curves, shares in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub price: PricePoint,
    /// Share of too-cheap matches at or above this price.
    pub too_cheap: f64,
    /// Share of too-expensive matches at or below this price.
    pub too_expensive: f64,
    /// Share of not-cheap matches at or below this price.
    pub not_cheap: f64,
    /// Share of not-expensive matches at or above this price.
    pub not_expensive: f64,
}

impl VanWestendorpResult {
    pub fn bucket(&self, label: ResponseLabel) -> &LabelBucket {
        match label {
            ResponseLabel::TooExpensive => &self.too_expensive,
            ResponseLabel::TooCheap => &self.too_cheap,
            ResponseLabel::JustRight => &self.just_right,
            ResponseLabel::NotCheap => &self.not_cheap,
            ResponseLabel::NotExpensive => &self.not_expensive,
        }
    }

    fn bucket_mut(&mut self, label: ResponseLabel) -> &mut LabelBucket {
        match label {
            ResponseLabel::TooExpensive => &mut self.too_expensive,
            ResponseLabel::TooCheap => &mut self.too_cheap,
            ResponseLabel::JustRight => &mut self.just_right,
            ResponseLabel::NotCheap => &mut self.not_cheap,
            ResponseLabel::NotExpensive => &mut self.not_expensive,
        }
    }

    fn finish(mut self) -> Self {
        self.optimal_range = PriceRange(self.too_cheap.average(), self.too_expensive.average());
        self
    }

    /// Counts matches of every label at each position of `price_points`.
    pub fn counts_by_price(&self, price_points: &[PricePoint]) -> Vec<PriceCounts> {
        let count_at = |bucket: &LabelBucket, index: usize| {
            bucket.indices.iter().filter(|&&i| i == index).count()
        };

        price_points
            .iter()
            .enumerate()
            .map(|(index, &price)| PriceCounts {
                index,
                price,
                too_expensive: count_at(&self.too_expensive, index),
                too_cheap: count_at(&self.too_cheap, index),
                just_right: count_at(&self.just_right, index),
                not_cheap: count_at(&self.not_cheap, index),
                not_expensive: count_at(&self.not_expensive, index),
            })
            .collect()
    }

    /// Cumulative curves over the price axis, in ascending price order.
    pub fn cumulative_curves(&self, price_points: &[PricePoint]) -> Vec<CurvePoint> {
        let mut axis = price_points.to_vec();
        axis.sort_by(|a, b| a.total_cmp(b));
        axis.dedup();

        axis.into_iter()
            .map(|price| CurvePoint {
                price,
                too_cheap: share(&self.too_cheap.prices, |p| p >= price),
                too_expensive: share(&self.too_expensive.prices, |p| p <= price),
                not_cheap: share(&self.not_cheap.prices, |p| p <= price),
                not_expensive: share(&self.not_expensive.prices, |p| p >= price),
            })
            .collect()
    }
}

/// Literal legacy analysis: every label is matched against every price point.
pub fn analyze_van_westendorp(
    price_points: &[PricePoint],
    responses: &[ResponseLabel],
) -> VanWestendorpResult {
    let mut result = VanWestendorpResult::default();

    for &label in responses {
        for (index, &price) in price_points.iter().enumerate() {
            result.bucket_mut(label).push(index, price);
        }
    }

    debug!(
        "Van Westendorp (legacy): {} responses x {} price points",
        responses.len(),
        price_points.len()
    );
    result.finish()
}

/// One response, one price: each label lands on the price point the
/// respondent rated. Out-of-range indices are skipped.
pub fn analyze_van_westendorp_per_respondent(
    price_points: &[PricePoint],
    responses: &[RatedResponse],
) -> VanWestendorpResult {
    let mut result = VanWestendorpResult::default();

    for response in responses {
        match price_points.get(response.price_index) {
            Some(&price) => result.bucket_mut(response.label).push(response.price_index, price),
            None => debug!(
                "Skipping response with price index {} outside {} price points",
                response.price_index,
                price_points.len()
            ),
        }
    }

    result.finish()
}

/// Arithmetic mean, `0.0` for an empty slice.
pub fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn share(prices: &[f64], include: impl Fn(f64) -> bool) -> f64 {
    if prices.is_empty() {
        return 0.0;
    }
    prices.iter().filter(|&&p| include(p)).count() as f64 / prices.len() as f64
}
