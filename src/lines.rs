use statrs::distribution::{ContinuousCDF, DiscreteCDF, Normal, Poisson};

// Keeps the continuity-corrected normal tail well-defined when the
// dispersion estimate is tiny.
const MIN_NORMAL_SCALE: f64 = 0.1;

/// One evaluated over/under line. `p_under` is `1 - p_over` by
/// construction; fair odds are absent (not zero, not infinite) when the
/// corresponding probability is zero. EV fields stay `None` until book
/// odds are attached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineEval {
    pub line: f64,
    pub p_over: f64,
    pub p_under: f64,
    pub fair_odds_over: Option<f64>,
    pub fair_odds_under: Option<f64>,
    pub ev_over: Option<f64>,
    pub ev_under: Option<f64>,
}

/// P(count > line) as a mixture of a discrete Poisson tail and a
/// continuity-corrected normal tail. Total on all inputs: a tail whose
/// distribution cannot be constructed contributes 0.0 instead of failing.
pub fn p_over_mixture(mu: f64, sigma: f64, line: f64, poisson_weight: f64) -> f64 {
    let p_pois = poisson_tail(mu, line.floor());
    let p_norm = normal_tail(mu, sigma, line + 0.5);
    (poisson_weight * p_pois + (1.0 - poisson_weight) * p_norm).clamp(0.0, 1.0)
}

// P(X > k) under Poisson(max(mu, 0)). statrs rejects lambda <= 0; that
// degenerate rate has no mass above any k >= 0 anyway, so the tail is 0.
fn poisson_tail(mu: f64, k: f64) -> f64 {
    let Ok(pois) = Poisson::new(mu.max(0.0)) else {
        return 0.0;
    };
    if k < 0.0 {
        return 1.0;
    }
    1.0 - pois.cdf(k as u64)
}

fn normal_tail(mu: f64, sigma: f64, x: f64) -> f64 {
    let Ok(norm) = Normal::new(mu, sigma.max(MIN_NORMAL_SCALE)) else {
        return 0.0;
    };
    1.0 - norm.cdf(x)
}

/// Breakeven decimal odds for a probability; `None` when the probability
/// is zero (undefined, never coerced to infinity).
pub fn fair_odds(p: f64) -> Option<f64> {
    (p > 0.0).then(|| 1.0 / p)
}

/// Expected profit/loss per unit stake at the given decimal odds.
pub fn expected_value(p: f64, decimal_odds: f64) -> f64 {
    p * (decimal_odds - 1.0) - (1.0 - p)
}

/// Evaluates every line against a match expectation, preserving the input
/// order (the recommender's tie-break depends on it).
pub fn evaluate_lines(
    mu_total: f64,
    sigma_total: f64,
    lines: &[f64],
    poisson_weight: f64,
) -> Vec<LineEval> {
    lines
        .iter()
        .map(|&line| {
            let p_over = p_over_mixture(mu_total, sigma_total, line, poisson_weight);
            let p_under = 1.0 - p_over;
            LineEval {
                line,
                p_over,
                p_under,
                fair_odds_over: fair_odds(p_over),
                fair_odds_under: fair_odds(p_under),
                ev_over: None,
                ev_under: None,
            }
        })
        .collect()
}

/// Attaches expected value against supplied book odds, per side. Odds are
/// optional per side; the EV field stays `None` where no quote was given.
pub fn attach_ev(eval: &mut LineEval, book_over: Option<f64>, book_under: Option<f64>) {
    eval.ev_over = book_over.map(|odds| expected_value(eval.p_over, odds));
    eval.ev_under = book_under.map(|odds| expected_value(eval.p_under, odds));
}
