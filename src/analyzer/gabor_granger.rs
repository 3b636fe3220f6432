use crate::model::PricePoint;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandPoint {
    pub index: usize,
    pub price: PricePoint,
    pub demand: u64,
}

impl DemandPoint {
    pub fn revenue(&self) -> f64 {
        self.price * self.demand as f64
    }
}

/// Demand per price point position. Duplicate prices keep separate entries.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GaborGrangerResult {
    pub points: Vec<DemandPoint>,
}

/// Counts, for each position in `price_points`, the responses equal to that
/// position. Responses outside `0..price_points.len()` match nothing.
pub fn analyze_gabor_granger(price_points: &[PricePoint], responses: &[usize]) -> GaborGrangerResult {
    let mut counts = vec![0u64; price_points.len()];
    for &response in responses {
        if let Some(count) = counts.get_mut(response) {
            *count += 1;
        }
    }

    let points = price_points
        .iter()
        .zip(counts)
        .enumerate()
        .map(|(index, (&price, demand))| DemandPoint { index, price, demand })
        .collect();

    GaborGrangerResult { points }
}

impl GaborGrangerResult {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn total_demand(&self) -> u64 {
        self.points.iter().map(|p| p.demand).sum()
    }

    /// Price -> demand keyed by price value. A repeated price keeps the slot of
    /// its first occurrence and the demand of its last.
    pub fn collapsed(&self) -> Vec<(PricePoint, u64)> {
        // f64 keys are not Hash and the first-occurrence order must hold; a
        // linear scan is fine for survey-sized price lists.
        let mut map: Vec<(PricePoint, u64)> = Vec::with_capacity(self.points.len());
        for point in &self.points {
            match map.iter_mut().find(|(price, _)| *price == point.price) {
                Some(entry) => entry.1 = point.demand,
                None => map.push((point.price, point.demand)),
            }
        }
        map
    }

    pub fn revenue_curve(&self) -> Vec<(PricePoint, f64)> {
        self.points.iter().map(|p| (p.price, p.revenue())).collect()
    }

    /// Point with the highest `price * demand`; ties go to the earliest position.
    pub fn revenue_maximising_point(&self) -> Option<&DemandPoint> {
        self.points.iter().fold(None, |best: Option<&DemandPoint>, point| match best {
            Some(current) if current.revenue() >= point.revenue() => Some(current),
            _ => Some(point),
        })
    }
}
