/// Exponentially weighted moving average in recurrence form:
/// `e[0] = v[0]; e[i] = alpha*v[i] + (1-alpha)*e[i-1]` with
/// `alpha = 2/(span+1)`. Returns the final value.
///
/// An empty series returns 0.0 — callers treat that as "no history",
/// not as an observed zero.
pub fn ewma(values: &[f64], span: u32) -> f64 {
    let Some((first, rest)) = values.split_first() else {
        return 0.0;
    };
    let alpha = 2.0 / (span.max(1) as f64 + 1.0);
    let mut smoothed = *first;
    for v in rest {
        smoothed = alpha * v + (1.0 - alpha) * smoothed;
    }
    smoothed
}

/// Arithmetic mean; 0.0 for an empty series (same "no history" default).
pub fn series_mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divide by N, not N-1). Returns 0.0 for
/// fewer than two observations; the expectation model applies its own
/// floor on top so a short history never yields zero uncertainty.
pub fn population_stdev(values: &[f64]) -> f64 {
    if values.len() <= 1 {
        return 0.0;
    }
    let mean = series_mean(values);
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    var.sqrt()
}
