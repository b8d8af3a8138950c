use prop_lines::config::ModelConfig;
use prop_lines::expectation::compute_expectation;
use prop_lines::shrinkage::shrink_estimate;

const HOME: [f64; 6] = [10.0, 12.0, 11.0, 13.0, 14.0, 12.0];
const AWAY: [f64; 6] = [8.0, 9.0, 10.0, 9.0, 11.0, 10.0];

#[test]
fn regression_fixture_six_match_histories() {
    // Expected values computed once from the closed-form pipeline with
    // span 6, alpha 10; they must reproduce on every run.
    let cfg = ModelConfig::default();
    let e = compute_expectation(&HOME, &AWAY, &cfg);
    assert!((e.mu_home - 12.020460224906287).abs() < 1e-12);
    assert!((e.mu_away - 9.529417430237402).abs() < 1e-12);
    assert!((e.mu_total - 21.54987765514369).abs() < 1e-12);
    assert!((e.sigma_total - 1.607275126832159).abs() < 1e-12);
}

#[test]
fn recomputation_is_pure() {
    let cfg = ModelConfig::default();
    let a = compute_expectation(&HOME, &AWAY, &cfg);
    let b = compute_expectation(&HOME, &AWAY, &cfg);
    assert_eq!(a, b);
}

#[test]
fn empty_home_side_contributes_exactly_zero() {
    let cfg = ModelConfig::default();
    let e = compute_expectation(&[], &AWAY, &cfg);
    assert_eq!(e.mu_home, 0.0);
    assert_eq!(e.mu_total, e.mu_away);

    let away_only = compute_expectation(&AWAY, &[], &cfg);
    assert_eq!(away_only.mu_home, e.mu_away);
}

#[test]
fn shrinkage_with_no_data_returns_prior_for_any_estimate() {
    for estimate in [-5.0, 0.0, 3.25, 1e9] {
        assert_eq!(shrink_estimate(estimate, 7.5, 0, 10.0), 7.5);
    }
}

#[test]
fn dispersion_floor_holds_for_degenerate_histories() {
    let cfg = ModelConfig::default();
    for series in [&[][..], &[0.0][..], &[5.0][..]] {
        let e = compute_expectation(series, series, &cfg);
        // Both sides floored: sigma_total = floor * sqrt(2) at minimum.
        assert!(e.sigma_total >= cfg.sigma_floor, "series {series:?}");
    }
}

#[test]
fn single_match_history_uses_scaled_mu_when_above_floor() {
    let cfg = ModelConfig::default();
    // One large observation: mu*0.25 exceeds the 0.6 floor, so sigma
    // grows with the estimate instead of pinning to the floor.
    let small = compute_expectation(&[2.0], &[], &cfg);
    let large = compute_expectation(&[40.0], &[], &cfg);
    assert!(large.sigma_total > small.sigma_total);
}
