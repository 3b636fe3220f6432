// Core structs: ResponseLabel, RatedResponse, PriceRange, DemandRow
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A candidate price for a single product or offer.
pub type PricePoint = f64;

/// How a respondent rated a price point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseLabel {
    TooExpensive,
    TooCheap,
    JustRight,
    NotCheap,
    NotExpensive,
}

impl ResponseLabel {
    pub const ALL: [ResponseLabel; 5] = [
        ResponseLabel::TooExpensive,
        ResponseLabel::TooCheap,
        ResponseLabel::JustRight,
        ResponseLabel::NotCheap,
        ResponseLabel::NotExpensive,
    ];

    /// Survey wording shown to respondents.
    pub fn as_survey_text(&self) -> &'static str {
        match self {
            ResponseLabel::TooExpensive => "Too expensive",
            ResponseLabel::TooCheap => "Too cheap",
            ResponseLabel::JustRight => "Just right",
            ResponseLabel::NotCheap => "Not cheap",
            ResponseLabel::NotExpensive => "Not expensive",
        }
    }
}

/// A label tied to the price point the respondent actually rated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatedResponse {
    pub label: ResponseLabel,
    pub price_index: usize,
}

/// `(low, high)` pair. `low` is not guaranteed to be smaller than `high`,
/// and `0.0` on either side means "no data".
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceRange(pub f64, pub f64);

impl PriceRange {
    pub fn low(&self) -> f64 {
        self.0
    }

    pub fn high(&self) -> f64 {
        self.1
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0.0 && self.1 == 0.0
    }
}

/// One scored feature/tagline/price combination from the demand meter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandRow {
    pub feature: String,
    pub tagline: String,
    pub price: PricePoint,
    pub demand_score: f64,
}

#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("price token {token:?} is not a number")]
    TypeConversion { token: String },
    #[error("price {0} must be a positive finite number")]
    InvalidPrice(f64),
}

#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    #[error("no respondents to simulate for {feature} / {tagline} / {price}")]
    NoRespondents {
        feature: String,
        tagline: String,
        price: PricePoint,
    },
    #[error("rating band {low}..={high} is empty")]
    EmptyBand { low: u32, high: u32 },
}

#[derive(Debug, Error, PartialEq)]
pub enum PollError {
    #[error("poll question is empty")]
    EmptyQuestion,
    #[error("poll needs at least one non-blank option")]
    NoOptions,
}
