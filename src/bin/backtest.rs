use std::fs;
use std::path::PathBuf;

use prop_lines::backtest::{self, DEFAULT_MIN_HISTORY, load_records};
use prop_lines::config::ModelConfig;

#[derive(Debug, serde::Deserialize)]
struct RunSpec {
    csv: PathBuf,
    #[serde(default = "default_lines")]
    lines: Vec<f64>,
    #[serde(default)]
    config: Option<ModelConfig>,
    #[serde(default = "default_min_history")]
    min_history: usize,
}

fn default_lines() -> Vec<f64> {
    vec![8.5, 9.5, 10.5, 11.5, 12.5, 13.5]
}

fn default_min_history() -> usize {
    DEFAULT_MIN_HISTORY
}

fn main() -> anyhow::Result<()> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("tests/fixtures/backtest_run.json"));

    let raw = fs::read_to_string(&path)?;
    let spec: RunSpec = serde_json::from_str(&raw)?;
    let cfg = spec.config.unwrap_or_default();
    cfg.validate()?;

    // This binary is intentionally simple: it replays one historical CSV
    // through the live estimator and prints accuracy metrics. It is meant
    // for quick manual tuning iterations, not for automated calibration.
    let records = load_records(&spec.csv)?;
    let report = backtest::replay(&records, &spec.lines, &cfg, spec.min_history);

    println!(
        "replayed {} rows ({} skipped as warmup)",
        report.samples, report.skipped_warmup
    );
    println!();
    println!(
        "{:>6}  {:>7}  {:>7}  {:>9}  {:>10}  {:>9}",
        "line", "samples", "brier", "hit_rate", "avg_p_over", "over_rate"
    );
    for m in &report.per_line {
        println!(
            "{:>6.2}  {:>7}  {:>7.4}  {:>8.1}%  {:>9.1}%  {:>8.1}%",
            m.line,
            m.samples,
            m.brier,
            m.hit_rate * 100.0,
            m.avg_p_over * 100.0,
            m.over_rate * 100.0
        );
    }

    println!();
    println!("reliability (predicted vs realized over-rate):");
    for bin in &report.bins {
        if bin.count == 0 {
            continue;
        }
        println!(
            "  [{:.1}, {:.1})  n={:<5}  pred {:>5.1}%  actual {:>5.1}%",
            bin.bucket_start,
            bin.bucket_end,
            bin.count,
            bin.avg_pred * 100.0,
            bin.actual_rate * 100.0
        );
    }
    Ok(())
}
