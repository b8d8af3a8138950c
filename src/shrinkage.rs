/// Credibility blend of a noisy per-team estimate toward a long-run prior.
///
/// `alpha` is the prior's pseudo-count: the weight on the estimate is
/// `w = n/(n+alpha)`, so a team needs roughly `alpha` observations before
/// its own history outweighs the prior. With no observations the prior is
/// returned unchanged.
pub fn shrink_estimate(estimate: f64, prior: f64, n: usize, alpha: f64) -> f64 {
    if n == 0 {
        return prior;
    }
    let w = n as f64 / (n as f64 + alpha);
    w * estimate + (1.0 - w) * prior
}
