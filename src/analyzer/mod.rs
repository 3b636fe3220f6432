// Analyzer module: aggregates submodules for the two price sensitivity methods.

pub mod price_analysis;
pub mod van_westendorp;
pub mod gabor_granger;

// Re-export the main Analyzer implementation for ease of use.
pub use price_analysis::{AnalysisResult, Analyzer, AnalyzerImpl, SurveyInput};
pub use van_westendorp::MatchingMode;
