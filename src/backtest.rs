use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::config::ModelConfig;
use crate::expectation::compute_expectation;
use crate::lines::p_over_mixture;

pub const DEFAULT_MIN_HISTORY: usize = 2;

/// One historical match row: realized per-side counts for the metric
/// under test. Dates are ISO-style strings; lexicographic order is
/// chronological for them, same convention as the fixture feeds.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchRecord {
    pub date: String,
    pub home: String,
    pub away: String,
    pub home_value: f64,
    pub away_value: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct LineMetrics {
    pub line: f64,
    pub samples: usize,
    pub brier: f64,
    pub hit_rate: f64,
    pub avg_p_over: f64,
    pub over_rate: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct ReliabilityBin {
    pub bucket_start: f64,
    pub bucket_end: f64,
    pub count: usize,
    pub avg_pred: f64,
    pub actual_rate: f64,
}

/// Per-row trace of the replay, mostly for inspection and tests.
#[derive(Debug, Clone)]
pub struct RowOutcome {
    pub date: String,
    pub home: String,
    pub away: String,
    pub mu_total: f64,
    pub sigma_total: f64,
    pub actual_total: f64,
}

#[derive(Debug, Clone)]
pub struct BacktestReport {
    pub samples: usize,
    pub skipped_warmup: usize,
    pub per_line: Vec<LineMetrics>,
    pub bins: Vec<ReliabilityBin>,
    pub rows: Vec<RowOutcome>,
}

pub fn load_records(path: &Path) -> Result<Vec<MatchRecord>> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut reader = csv::Reader::from_reader(file);
    let mut out = Vec::new();
    for record in reader.deserialize() {
        let row: MatchRecord =
            record.with_context(|| format!("parse match row in {}", path.display()))?;
        out.push(row);
    }
    Ok(out)
}

/// Replays historical rows through the estimator in date order. Each row
/// is predicted from strictly earlier rows only: a row's own values are
/// appended to the team histories after its prediction, so lookahead is
/// impossible by construction. Rows where either side has fewer than
/// `min_history` prior matches are skipped as warmup.
pub fn replay(
    records: &[MatchRecord],
    lines: &[f64],
    cfg: &ModelConfig,
    min_history: usize,
) -> BacktestReport {
    let mut ordered: Vec<&MatchRecord> = records.iter().collect();
    // Stable sort keeps input order within a date.
    ordered.sort_by(|a, b| a.date.cmp(&b.date));

    let mut history: HashMap<&str, Vec<f64>> = HashMap::new();
    let mut per_line: Vec<LineAccum> = lines.iter().map(|&line| LineAccum::new(line)).collect();
    let mut predictions: Vec<(f64, bool)> = Vec::new();
    let mut rows = Vec::new();
    let mut samples = 0usize;
    let mut skipped_warmup = 0usize;

    for rec in ordered {
        let home_hist = history.get(rec.home.as_str()).map_or(&[][..], Vec::as_slice);
        let away_hist = history.get(rec.away.as_str()).map_or(&[][..], Vec::as_slice);

        if home_hist.len() >= min_history && away_hist.len() >= min_history {
            let exp = compute_expectation(home_hist, away_hist, cfg);
            let actual = rec.home_value + rec.away_value;
            for accum in &mut per_line {
                let p = p_over_mixture(exp.mu_total, exp.sigma_total, accum.line, cfg.poisson_weight);
                let went_over = actual > accum.line;
                accum.push(p, went_over);
                predictions.push((p, went_over));
            }
            rows.push(RowOutcome {
                date: rec.date.clone(),
                home: rec.home.clone(),
                away: rec.away.clone(),
                mu_total: exp.mu_total,
                sigma_total: exp.sigma_total,
                actual_total: actual,
            });
            samples += 1;
        } else {
            skipped_warmup += 1;
        }

        history
            .entry(rec.home.as_str())
            .or_default()
            .push(rec.home_value);
        history
            .entry(rec.away.as_str())
            .or_default()
            .push(rec.away_value);
    }

    BacktestReport {
        samples,
        skipped_warmup,
        per_line: per_line.into_iter().map(LineAccum::finish).collect(),
        bins: reliability_bins(&predictions, 10),
        rows,
    }
}

struct LineAccum {
    line: f64,
    samples: usize,
    brier_sum: f64,
    hits: usize,
    p_sum: f64,
    overs: usize,
}

impl LineAccum {
    fn new(line: f64) -> Self {
        Self {
            line,
            samples: 0,
            brier_sum: 0.0,
            hits: 0,
            p_sum: 0.0,
            overs: 0,
        }
    }

    fn push(&mut self, p: f64, went_over: bool) {
        let y = if went_over { 1.0 } else { 0.0 };
        self.samples += 1;
        self.brier_sum += (p - y).powi(2);
        if (p >= 0.5) == went_over {
            self.hits += 1;
        }
        self.p_sum += p;
        if went_over {
            self.overs += 1;
        }
    }

    fn finish(self) -> LineMetrics {
        let n = self.samples.max(1) as f64;
        LineMetrics {
            line: self.line,
            samples: self.samples,
            brier: self.brier_sum / n,
            hit_rate: self.hits as f64 / n,
            avg_p_over: self.p_sum / n,
            over_rate: self.overs as f64 / n,
        }
    }
}

fn reliability_bins(predictions: &[(f64, bool)], bins: usize) -> Vec<ReliabilityBin> {
    let bins = bins.max(2);
    let mut counts = vec![0usize; bins];
    let mut pred_sum = vec![0.0_f64; bins];
    let mut actual_sum = vec![0.0_f64; bins];

    for &(p, went_over) in predictions {
        let p = p.clamp(0.0, 1.0);
        let idx = ((p * bins as f64).floor() as usize).min(bins - 1);
        counts[idx] += 1;
        pred_sum[idx] += p;
        if went_over {
            actual_sum[idx] += 1.0;
        }
    }

    let mut out = Vec::with_capacity(bins);
    for i in 0..bins {
        let count = counts[i];
        let (avg_pred, actual_rate) = if count > 0 {
            (pred_sum[i] / count as f64, actual_sum[i] / count as f64)
        } else {
            (0.0, 0.0)
        };
        out.push(ReliabilityBin {
            bucket_start: i as f64 / bins as f64,
            bucket_end: (i + 1) as f64 / bins as f64,
            count,
            avg_pred,
            actual_rate,
        });
    }
    out
}
