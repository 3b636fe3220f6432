// Serialized batch reports for the presentation layer.
use crate::analyzer::AnalysisResult;
use crate::polling::PollTally;
use crate::simulation::DemandSummary;
use crate::model::DemandRow;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportBody {
    PriceSensitivity(AnalysisResult),
    DemandMeter {
        rows: Vec<DemandRow>,
        summary: Option<DemandSummary>,
    },
    Poll {
        question: String,
        tally: PollTally,
    },
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub name: String,
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub body: ReportBody,
}

impl Report {
    pub fn new(name: impl Into<String>, body: ReportBody) -> Self {
        Self {
            name: name.into(),
            generated_at: Utc::now(),
            body,
        }
    }
}

/// Lowercase file stem with every non-alphanumeric character replaced by `_`,
/// so it can never leave the report directory.
pub fn file_stem(name: &str) -> String {
    let stem: String = name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    if stem.is_empty() { "report".to_string() } else { stem }
}

/// Returns a file stem for `name` not yet in `taken`, suffixing `_2`, `_3`, ...
/// on collision.
pub fn unique_stem(taken: &mut HashSet<String>, name: &str) -> String {
    let base = file_stem(name);
    let mut stem = base.clone();
    let mut n = 1;
    while taken.contains(&stem) {
        n += 1;
        stem = format!("{}_{}", base, n);
    }
    if n > 1 {
        warn!("Report name {:?} collides, writing it as {}", name, stem);
    }
    taken.insert(stem.clone());
    stem
}

/// Writes `<dir>/<file_stem(name)>.json`, creating `dir` if needed. Returns the file path.
pub fn write_report(dir: &Path, report: &Report) -> Result<PathBuf, ReportError> {
    write_report_as(dir, &report.name, report)
}

/// Like [`write_report`] but the file is named after `stem` instead of the report name.
pub fn write_report_as(dir: &Path, stem: &str, report: &Report) -> Result<PathBuf, ReportError> {
    fs::create_dir_all(dir)?;
    let filename = dir.join(format!("{}.json", file_stem(stem)));
    fs::write(&filename, serde_json::to_string_pretty(report)?)?;
    Ok(filename)
}
