use price_sense::analyzer::{Analyzer, AnalyzerImpl};
use price_sense::config::{load_config, AppConfig, BatchConfig, PollConfig, SimulationConfig};
use price_sense::normalizer::parse_price_points;
use price_sense::polling::Poll;
use price_sense::report::{unique_stem, write_report_as, Report, ReportBody};
use price_sense::simulation::{combinations, run_simulation, summarize, UniformRater};
use futures::future::join_all;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "config.json".to_string());
    let config: Arc<AppConfig> = match load_config(&path) {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            error!("Config load error ({}): {}", path, e);
            return;
        }
    };

    let analyzer = AnalyzerImpl::new(config.matching);
    info!(
        "Batches to analyze: {} (matching: {:?})",
        config.batches.len(),
        config.matching
    );

    // Report file names must be unique across the whole run
    let mut taken = HashSet::new();

    // Batches are independent, analyze them concurrently on the blocking pool
    let tasks: Vec<_> = config
        .batches
        .iter()
        .map(|batch| {
            let stem = unique_stem(&mut taken, &batch.name);
            process_batch(batch.clone(), stem, analyzer, config.report_dir.clone())
        })
        .collect();
    join_all(tasks).await;

    if let Some(simulation) = &config.simulation {
        let stem = unique_stem(&mut taken, "demand_meter");
        process_simulation(simulation, &stem, &config.report_dir);
    }

    for poll in &config.polls {
        let stem = unique_stem(&mut taken, &format!("poll_{}", poll.question));
        process_poll(poll, &stem, &config.report_dir);
    }

    info!("Done.");
}

async fn process_batch(batch: BatchConfig, stem: String, analyzer: AnalyzerImpl, report_dir: PathBuf) {
    let name = batch.name.clone();
    if let Err(e) =
        tokio::task::spawn_blocking(move || analyze_batch(&batch, &stem, analyzer, &report_dir)).await
    {
        error!("[{}] Analysis task failed: {}", name, e);
    }
}

/// Validates a batch, runs both analyses and writes the report.
fn analyze_batch(batch: &BatchConfig, stem: &str, analyzer: AnalyzerImpl, report_dir: &Path) {
    info!("Processing batch: {}", batch.name);

    let input = match batch.to_survey_input() {
        Ok(input) => input,
        Err(e) => {
            warn!("[{}] Invalid input: {}", batch.name, e);
            return;
        }
    };
    if input.price_points.is_empty() {
        warn!("[{}] No price points, results will be empty.", batch.name);
    }

    let result = analyzer.analyze(&input);
    let range = result.van_westendorp.optimal_range;
    if range.is_empty() {
        info!("[{}] Van Westendorp: no data", batch.name);
    } else {
        info!(
            "[{}] Van Westendorp optimal range: {:.2} - {:.2}",
            batch.name,
            range.low(),
            range.high()
        );
    }
    for point in &result.gabor_granger.points {
        info!("[{}] At {:.2} the demand is {}", batch.name, point.price, point.demand);
    }
    if let Some(best) = result.gabor_granger.revenue_maximising_point() {
        info!(
            "[{}] Revenue peaks at {:.2} ({:.2})",
            batch.name,
            best.price,
            best.revenue()
        );
    }

    save(report_dir, stem, Report::new(&batch.name, ReportBody::PriceSensitivity(result)));
}

fn process_simulation(simulation: &SimulationConfig, stem: &str, report_dir: &Path) {
    let prices = match parse_price_points(&simulation.prices) {
        Ok(p) => p,
        Err(e) => {
            warn!("Invalid simulation prices: {}", e);
            return;
        }
    };
    let mut rater = match UniformRater::new(simulation.low, simulation.high) {
        Ok(r) => r,
        Err(e) => {
            warn!("Invalid simulation band: {}", e);
            return;
        }
    };

    let combos = combinations(&simulation.features, &simulation.taglines, &prices);
    info!("Simulating {} combinations...", combos.len());
    let rows = run_simulation(&combos, simulation.respondents, &mut rater);
    let summary = summarize(&rows);
    if let Some(s) = &summary {
        info!(
            "Best combination: {} | {} | {:.2} ({:.1})",
            s.best.feature, s.best.tagline, s.best.price, s.best.demand_score
        );
        if s.needs_improvement {
            info!("Lowest score {:.1}: consider revising features, taglines or prices.", s.lowest_score);
        }
    }

    save(report_dir, stem, Report::new("demand_meter", ReportBody::DemandMeter { rows, summary }));
}

fn process_poll(poll_cfg: &PollConfig, stem: &str, report_dir: &Path) {
    let poll = match Poll::new(poll_cfg.question.clone(), poll_cfg.options.clone()) {
        Ok(p) => p,
        Err(e) => {
            warn!("Skipping poll {:?}: {}", poll_cfg.question, e);
            return;
        }
    };
    let tally = poll.tally(&poll_cfg.votes);
    match tally.most_popular() {
        Some(top) => info!("Poll {:?}: most popular is {} ({} votes)", poll.question, top.option, top.votes),
        None => info!("Poll {:?}: no votes yet", poll.question),
    }

    let name = format!("poll_{}", poll.question);
    save(report_dir, stem, Report::new(name, ReportBody::Poll { question: poll.question, tally }));
}

fn save(report_dir: &Path, stem: &str, report: Report) {
    match write_report_as(report_dir, stem, &report) {
        Ok(path) => info!("Saved report: {}", path.display()),
        Err(e) => warn!("Failed to save report {}: {}", report.name, e),
    }
}
