use prop_lines::dataset::MetricKind;
use prop_lines::expectation::MatchExpectation;
use prop_lines::lines::{attach_ev, evaluate_lines, expected_value, p_over_mixture};
use prop_lines::recommend::{Signal, recommend};
use prop_lines::referee::{apply_referee, referee_adjust};

#[test]
fn over_and_under_are_exact_complements() {
    let evals = evaluate_lines(21.5, 2.1, &[19.5, 20.5, 21.5, 22.5], 0.6);
    for e in &evals {
        assert_eq!(e.p_under, 1.0 - e.p_over);
        assert!((e.p_over + e.p_under - 1.0).abs() < 1e-12);
    }
}

#[test]
fn probability_falls_as_the_line_rises() {
    let evals = evaluate_lines(10.0, 2.0, &[9.5, 10.5], 0.6);
    assert!(evals[0].p_over > evals[1].p_over);
    for e in &evals {
        assert!(e.p_over > 0.0 && e.p_over < 1.0);
    }
}

#[test]
fn ev_against_even_book_odds() {
    // p 0.6 at decimal odds 2.0: 0.6*1.0 - 0.4 = 0.2 per unit stake.
    assert!((expected_value(0.6, 2.0) - 0.2).abs() < 1e-12);

    let mut eval = evaluate_lines(10.0, 2.0, &[10.5], 0.6).remove(0);
    attach_ev(&mut eval, Some(2.0), Some(2.0));
    let ev_over = eval.ev_over.unwrap();
    let ev_under = eval.ev_under.unwrap();
    // With identical odds both sides, the EVs mirror around zero.
    assert!((ev_over + ev_under).abs() < 1e-12);
}

#[test]
fn referee_shift_matches_hand_computed_delta() {
    let (adjusted, delta) = referee_adjust(20.0, &[15.0, 16.0]);
    assert_eq!(delta, 2.75);
    assert_eq!(adjusted, 22.75);

    let exp = MatchExpectation {
        mu_home: 10.0,
        mu_away: 10.0,
        mu_total: 20.0,
        sigma_total: 2.0,
    };
    let (shifted, _) = apply_referee(&exp, MetricKind::Fouls, &[15.0, 16.0]);
    let base = evaluate_lines(exp.mu_total, exp.sigma_total, &[22.5], 0.6);
    let adj = evaluate_lines(shifted.mu_total, shifted.sigma_total, &[22.5], 0.6);
    assert!(adj[0].p_over > base[0].p_over);
}

#[test]
fn empty_referee_history_changes_nothing() {
    for mu in [0.0, 12.0, 27.5] {
        assert_eq!(referee_adjust(mu, &[]), (mu, 0.0));
    }
}

#[test]
fn extreme_expectations_keep_odds_well_defined() {
    // A total far below the line: p_over collapses, fair over odds
    // disappear rather than blowing up.
    let evals = evaluate_lines(0.0, 0.5, &[30.5], 0.6);
    let e = &evals[0];
    assert_eq!(e.p_over, 0.0);
    assert_eq!(e.fair_odds_over, None);
    assert_eq!(e.fair_odds_under, Some(1.0));
}

#[test]
fn recommendation_follows_ev_when_quotes_exist() {
    let mut evals = evaluate_lines(21.5, 2.1, &[20.5, 21.5, 22.5], 0.6);
    // Only the middle line is quoted.
    attach_ev(&mut evals[1], Some(2.1), Some(1.9));
    let rec = recommend(&evals).unwrap();
    assert_eq!(rec.best_over.line, 21.5);
    assert_eq!(rec.best_under.line, 21.5);

    // Without quotes the sides split to the extremes.
    let plain = evaluate_lines(21.5, 2.1, &[20.5, 21.5, 22.5], 0.6);
    let rec = recommend(&plain).unwrap();
    assert_eq!(rec.best_over.line, 20.5);
    assert_eq!(rec.best_under.line, 22.5);
}

#[test]
fn signal_label_spans_the_bands() {
    let cases = [
        (0.80, "very strong"),
        (0.65, "strong"),
        (0.56, "good"),
        (0.52, "weak"),
        (0.40, "neutral/not recommended"),
    ];
    for (p, label) in cases {
        assert_eq!(Signal::from_prob(p).label(), label, "p={p}");
    }
}

#[test]
fn pure_poisson_and_pure_normal_bracket_the_mixture() {
    let mu = 10.0;
    let sigma = 2.0;
    let line = 10.5;
    let pois = p_over_mixture(mu, sigma, line, 1.0);
    let norm = p_over_mixture(mu, sigma, line, 0.0);
    let mixed = p_over_mixture(mu, sigma, line, 0.6);
    let (lo, hi) = if pois < norm { (pois, norm) } else { (norm, pois) };
    assert!(mixed >= lo - 1e-12 && mixed <= hi + 1e-12);
}
