// Demand meter: scores feature/tagline/price combinations with a pluggable rater.
use crate::model::{DemandRow, PricePoint, SimulationError};
use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Scores below this mark a summary as needing improvement.
pub const IMPROVEMENT_THRESHOLD: f64 = 70.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combination {
    pub feature: String,
    pub tagline: String,
    pub price: PricePoint,
}

/// Produces one respondent's demand rating for a combination.
pub trait DemandRater {
    fn rate(&mut self, combination: &Combination) -> f64;
}

/// Uniform integer ratings in `low..=high`, independent of the combination.
pub struct UniformRater<R: Rng> {
    rng: R,
    low: u32,
    high: u32,
}

impl UniformRater<ThreadRng> {
    pub fn new(low: u32, high: u32) -> Result<Self, SimulationError> {
        Self::with_rng(rand::rng(), low, high)
    }
}

impl UniformRater<StdRng> {
    pub fn seeded(seed: u64, low: u32, high: u32) -> Result<Self, SimulationError> {
        Self::with_rng(StdRng::seed_from_u64(seed), low, high)
    }
}

impl<R: Rng> UniformRater<R> {
    pub fn with_rng(rng: R, low: u32, high: u32) -> Result<Self, SimulationError> {
        if low > high {
            return Err(SimulationError::EmptyBand { low, high });
        }
        Ok(Self { rng, low, high })
    }
}

impl<R: Rng> DemandRater for UniformRater<R> {
    fn rate(&mut self, _combination: &Combination) -> f64 {
        self.rng.random_range(self.low..=self.high) as f64
    }
}

/// Always returns the same rating.
pub struct FixedRater(pub f64);

impl DemandRater for FixedRater {
    fn rate(&mut self, _combination: &Combination) -> f64 {
        self.0
    }
}

/// Every feature x tagline x price, in that nesting order.
pub fn combinations(features: &[String], taglines: &[String], prices: &[PricePoint]) -> Vec<Combination> {
    let mut combos = Vec::with_capacity(features.len() * taglines.len() * prices.len());
    for feature in features {
        for tagline in taglines {
            for &price in prices {
                combos.push(Combination {
                    feature: feature.clone(),
                    tagline: tagline.clone(),
                    price,
                });
            }
        }
    }
    combos
}

/// Averages `respondents` ratings into one demand score.
pub fn simulate_demand<D: DemandRater + ?Sized>(
    combination: &Combination,
    respondents: usize,
    rater: &mut D,
) -> Result<DemandRow, SimulationError> {
    if respondents == 0 {
        return Err(SimulationError::NoRespondents {
            feature: combination.feature.clone(),
            tagline: combination.tagline.clone(),
            price: combination.price,
        });
    }

    let total: f64 = (0..respondents).map(|_| rater.rate(combination)).sum();
    Ok(DemandRow {
        feature: combination.feature.clone(),
        tagline: combination.tagline.clone(),
        price: combination.price,
        demand_score: total / respondents as f64,
    })
}

/// Scores every combination; failures are logged and left out.
pub fn run_simulation<D: DemandRater + ?Sized>(
    combos: &[Combination],
    respondents: usize,
    rater: &mut D,
) -> Vec<DemandRow> {
    let mut rows = Vec::with_capacity(combos.len());
    for (i, combo) in combos.iter().enumerate() {
        match simulate_demand(combo, respondents, rater) {
            Ok(row) => {
                info!(
                    "[{}/{}] {} | {} | {:.2} -> {:.1}",
                    i + 1,
                    combos.len(),
                    row.feature,
                    row.tagline,
                    row.price,
                    row.demand_score
                );
                rows.push(row);
            }
            Err(e) => warn!("Simulation failed: {}", e),
        }
    }

    if rows.is_empty() {
        warn!("No valid results returned from demand simulation.");
    }
    rows
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandSummary {
    pub best: DemandRow,
    pub lowest_score: f64,
    pub needs_improvement: bool,
}

/// Best combination (first on ties) and whether any score falls below the threshold.
pub fn summarize(rows: &[DemandRow]) -> Option<DemandSummary> {
    let best = rows.iter().fold(None, |best: Option<&DemandRow>, row| match best {
        Some(current) if current.demand_score >= row.demand_score => Some(current),
        _ => Some(row),
    })?;
    let lowest_score = rows
        .iter()
        .map(|r| r.demand_score)
        .fold(f64::INFINITY, f64::min);

    Some(DemandSummary {
        best: best.clone(),
        lowest_score,
        needs_improvement: lowest_score < IMPROVEMENT_THRESHOLD,
    })
}
