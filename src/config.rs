use crate::analyzer::{MatchingMode, SurveyInput};
use crate::model::{InputError, RatedResponse};
use crate::normalizer::{parse_label, parse_price_points};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A raw Van Westendorp answer as collected by the survey.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseConfig {
    pub label: String,
    pub price_index: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BatchConfig {
    pub name: String,
    /// Comma-separated, e.g. `"9.99, 19.99, 29.99"`.
    pub price_points: String,
    #[serde(default)]
    pub van_westendorp: Vec<ResponseConfig>,
    #[serde(default)]
    pub gabor_granger: Vec<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    pub features: Vec<String>,
    pub taglines: Vec<String>,
    pub prices: String,
    pub respondents: usize,
    #[serde(default = "default_low")]
    pub low: u32,
    #[serde(default = "default_high")]
    pub high: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PollConfig {
    pub question: String,
    pub options: Vec<String>,
    #[serde(default)]
    pub votes: Vec<usize>,
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub matching: MatchingMode,
    #[serde(default)]
    pub batches: Vec<BatchConfig>,
    pub simulation: Option<SimulationConfig>,
    #[serde(default)]
    pub polls: Vec<PollConfig>,
    #[serde(default = "default_report_dir")]
    pub report_dir: PathBuf,
}

fn default_low() -> u32 {
    60
}

fn default_high() -> u32 {
    90
}

fn default_report_dir() -> PathBuf {
    PathBuf::from("reports")
}

pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}

impl BatchConfig {
    /// Validates the price text and drops answers with unrecognized labels.
    pub fn to_survey_input(&self) -> Result<SurveyInput, InputError> {
        let price_points = parse_price_points(&self.price_points)?;
        let van_westendorp = self
            .van_westendorp
            .iter()
            .filter_map(|raw| match parse_label(&raw.label) {
                Some(label) => Some(RatedResponse {
                    label,
                    price_index: raw.price_index,
                }),
                None => {
                    debug!("[{}] Skipping unrecognized label {:?}", self.name, raw.label);
                    None
                }
            })
            .collect();

        Ok(SurveyInput {
            price_points,
            van_westendorp,
            gabor_granger: self.gabor_granger.clone(),
        })
    }
}
