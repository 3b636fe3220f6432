use crate::analyzer::gabor_granger::{analyze_gabor_granger, GaborGrangerResult};
use crate::analyzer::van_westendorp::{
    analyze_van_westendorp, analyze_van_westendorp_per_respondent, CurvePoint, MatchingMode,
    PriceCounts, VanWestendorpResult,
};
use crate::model::{PricePoint, RatedResponse, ResponseLabel};
use serde::{Deserialize, Serialize};

/// Trait defining the interface for a price sensitivity analyzer.
pub trait Analyzer {
    fn van_westendorp(&self, price_points: &[PricePoint], responses: &[RatedResponse]) -> VanWestendorpResult;
    fn gabor_granger(&self, price_points: &[PricePoint], responses: &[usize]) -> GaborGrangerResult;
    /// Runs both methods over one batch of survey answers.
    fn analyze(&self, input: &SurveyInput) -> AnalysisResult;
}

/// Everything collected for a single product or offer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurveyInput {
    pub price_points: Vec<PricePoint>,
    pub van_westendorp: Vec<RatedResponse>,
    pub gabor_granger: Vec<usize>,
}

/// Structure representing the overall analysis result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub mode: MatchingMode,
    pub van_westendorp: VanWestendorpResult,
    /// Label counts at each price point.
    pub counts_by_price: Vec<PriceCounts>,
    /// Cumulative Van Westendorp curves in ascending price order.
    pub curves: Vec<CurvePoint>,
    pub gabor_granger: GaborGrangerResult,
}

/// Implementation of the price sensitivity analyzer.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyzerImpl {
    pub mode: MatchingMode,
}

impl AnalyzerImpl {
    pub fn new(mode: MatchingMode) -> Self {
        Self { mode }
    }
}

impl Analyzer for AnalyzerImpl {
    /// Legacy mode only looks at the labels; the rated price index is ignored.
    fn van_westendorp(&self, price_points: &[PricePoint], responses: &[RatedResponse]) -> VanWestendorpResult {
        match self.mode {
            MatchingMode::Legacy => {
                let labels: Vec<ResponseLabel> = responses.iter().map(|r| r.label).collect();
                analyze_van_westendorp(price_points, &labels)
            }
            MatchingMode::PerRespondent => analyze_van_westendorp_per_respondent(price_points, responses),
        }
    }

    fn gabor_granger(&self, price_points: &[PricePoint], responses: &[usize]) -> GaborGrangerResult {
        analyze_gabor_granger(price_points, responses)
    }

    fn analyze(&self, input: &SurveyInput) -> AnalysisResult {
        let van_westendorp = self.van_westendorp(&input.price_points, &input.van_westendorp);
        let counts_by_price = van_westendorp.counts_by_price(&input.price_points);
        let curves = van_westendorp.cumulative_curves(&input.price_points);
        let gabor_granger = self.gabor_granger(&input.price_points, &input.gabor_granger);

        AnalysisResult {
            mode: self.mode,
            van_westendorp,
            counts_by_price,
            curves,
            gabor_granger,
        }
    }
}
