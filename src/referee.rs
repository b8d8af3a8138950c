use crate::dataset::MetricKind;
use crate::expectation::MatchExpectation;
use crate::smoothing::series_mean;

// Fraction of the gap between the referee's historical average and the
// baseline that is applied to the total.
const PULL: f64 = 0.5;

/// Baseline the referee average is compared against. The source model
/// uses half the unadjusted total, i.e. it reads the referee's match
/// average as a per-side quantity. That equivalence was never validated
/// against outcomes; it lives in this one function so it can be changed
/// without touching the adjustment itself.
fn per_side_baseline(mu_total: f64) -> f64 {
    mu_total / 2.0
}

/// Shifts a match total toward the referee's historical average.
/// Returns the adjusted total and the applied delta; an empty history
/// leaves the total untouched.
pub fn referee_adjust(mu_total: f64, referee_values: &[f64]) -> (f64, f64) {
    if referee_values.is_empty() {
        return (mu_total, 0.0);
    }
    let referee_mean = series_mean(referee_values);
    let delta = (referee_mean - per_side_baseline(mu_total)) * PULL;
    (mu_total + delta, delta)
}

/// Applies the referee adjustment to a match expectation. A no-op for
/// metrics outside the referee-eligible set and for empty histories.
pub fn apply_referee(
    expectation: &MatchExpectation,
    metric: MetricKind,
    referee_values: &[f64],
) -> (MatchExpectation, f64) {
    if !metric.referee_adjustable() {
        return (*expectation, 0.0);
    }
    let (mu_total, delta) = referee_adjust(expectation.mu_total, referee_values);
    (
        MatchExpectation {
            mu_total,
            ..*expectation
        },
        delta,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_history_is_a_no_op() {
        assert_eq!(referee_adjust(20.0, &[]), (20.0, 0.0));
        assert_eq!(referee_adjust(0.0, &[]), (0.0, 0.0));
    }

    #[test]
    fn strict_referee_raises_the_total() {
        // mean 15.5 vs baseline 10 -> delta (15.5-10)*0.5 = 2.75
        let (adjusted, delta) = referee_adjust(20.0, &[15.0, 16.0]);
        assert_eq!(delta, 2.75);
        assert_eq!(adjusted, 22.75);
    }

    #[test]
    fn lenient_referee_lowers_the_total() {
        let (adjusted, delta) = referee_adjust(24.0, &[10.0]);
        assert_eq!(delta, -1.0);
        assert_eq!(adjusted, 23.0);
    }

    #[test]
    fn shot_metrics_are_never_adjusted() {
        let exp = MatchExpectation {
            mu_home: 10.0,
            mu_away: 10.0,
            mu_total: 20.0,
            sigma_total: 2.0,
        };
        let (out, delta) = apply_referee(&exp, MetricKind::Shots, &[15.0, 16.0]);
        assert_eq!(out, exp);
        assert_eq!(delta, 0.0);

        let (out, delta) = apply_referee(&exp, MetricKind::Fouls, &[15.0, 16.0]);
        assert_eq!(out.mu_total, 22.75);
        assert_eq!(delta, 2.75);
        // Per-side means and dispersion are left as computed.
        assert_eq!(out.mu_home, exp.mu_home);
        assert_eq!(out.sigma_total, exp.sigma_total);
    }
}
