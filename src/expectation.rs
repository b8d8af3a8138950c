use crate::config::ModelConfig;
use crate::shrinkage::shrink_estimate;
use crate::smoothing::{ewma, population_stdev, series_mean};

const RECENT_WEIGHT: f64 = 0.7;
const OVERALL_WEIGHT: f64 = 0.3;
// Assumed coefficient of variation when a side has at most one match of
// history and the sample spread is meaningless.
const SINGLE_MATCH_CV: f64 = 0.25;

/// Match-level expectation for one metric. Ephemeral: recomputed on every
/// query, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchExpectation {
    pub mu_home: f64,
    pub mu_away: f64,
    pub mu_total: f64,
    pub sigma_total: f64,
}

/// Combines both sides into a total mean and total dispersion.
///
/// The sides are treated as independent, so the total variance is the
/// plain sum of the per-side variances (no covariance term).
pub fn compute_expectation(home: &[f64], away: &[f64], cfg: &ModelConfig) -> MatchExpectation {
    let (mu_home, sigma_home) = side_estimate(home, cfg);
    let (mu_away, sigma_away) = side_estimate(away, cfg);
    MatchExpectation {
        mu_home,
        mu_away,
        mu_total: mu_home + mu_away,
        sigma_total: (sigma_home * sigma_home + sigma_away * sigma_away).sqrt(),
    }
}

/// Point estimate and dispersion for one side: recency-weighted EWMA
/// blended with the overall mean, shrunk toward the overall mean by
/// sample size, with a floored standard deviation.
fn side_estimate(series: &[f64], cfg: &ModelConfig) -> (f64, f64) {
    let recent = ewma(series, cfg.span);
    let overall = series_mean(series);
    let blended = RECENT_WEIGHT * recent + OVERALL_WEIGHT * overall;
    let mu = shrink_estimate(blended, overall, series.len(), cfg.alpha);
    let sigma = if series.len() > 1 {
        population_stdev(series).max(cfg.sigma_floor)
    } else {
        (mu * SINGLE_MATCH_CV).max(cfg.sigma_floor)
    };
    (mu, sigma)
}
