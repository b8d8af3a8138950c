use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Result, anyhow, bail};

use prop_lines::config::ModelConfig;
use prop_lines::dataset::{Dataset, MetricKind};
use prop_lines::expectation::compute_expectation;
use prop_lines::ingest;
use prop_lines::lines::{LineEval, attach_ev, evaluate_lines};
use prop_lines::recommend::{Signal, recommend};
use prop_lines::referee::apply_referee;

const DEFAULT_LINES: &[f64] = &[8.5, 9.5, 10.5, 11.5, 12.5, 13.5];

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() < 4 {
        eprintln!("usage: prop_lines <data_dir> <metric> <home> <away> [referee]");
        eprintln!("  metric: shots | sot | fouls | fouls-secondary");
        eprintln!("  model overrides: MODEL_SPAN, SHRINK_ALPHA, POISSON_WEIGHT, SIGMA_FLOOR, LINES");
        eprintln!("  book odds per line: BOOK_OVER_10_5=1.85 BOOK_UNDER_10_5=1.95 ...");
        bail!("missing arguments");
    }

    let dir = PathBuf::from(&args[0]);
    let metric = MetricKind::parse(&args[1]).ok_or_else(|| {
        anyhow!(
            "unknown metric {:?} (expected shots|sot|fouls|fouls-secondary)",
            args[1]
        )
    })?;
    let home = args[2].trim();
    let away = args[3].trim();
    let referee = args.get(4).map(|s| s.trim()).filter(|s| !s.is_empty());

    let cfg = config_from_env();
    cfg.validate()?;
    let lines = lines_from_env();

    let dataset = Arc::new(ingest::load_dataset(&dir)?);
    let metric = fall_back_to_secondary(&dataset, metric, home, away);
    for team in [home, away] {
        if dataset.series(team, metric).is_empty() {
            eprintln!(
                "warning: no {} history for {:?} ({} teams loaded)",
                metric.label(),
                team,
                dataset.teams().len()
            );
        }
    }

    let expectation = compute_expectation(
        dataset.series(home, metric),
        dataset.series(away, metric),
        &cfg,
    );
    let (expectation, referee_delta) = match referee {
        Some(name) => apply_referee(&expectation, metric, dataset.referee_series(name)),
        None => (expectation, 0.0),
    };

    let mut evals = evaluate_lines(
        expectation.mu_total,
        expectation.sigma_total,
        &lines,
        cfg.poisson_weight,
    );
    for eval in &mut evals {
        let over = book_odds("BOOK_OVER", eval.line);
        let under = book_odds("BOOK_UNDER", eval.line);
        attach_ev(eval, over, under);
    }

    println!("{home} vs {away} ({})", metric.label());
    println!(
        "mu_total {:.2} (home {:.2} | away {:.2})  sigma {:.2}",
        expectation.mu_total, expectation.mu_home, expectation.mu_away, expectation.sigma_total
    );
    if let Some(name) = referee {
        println!(
            "referee {name}: adj {:+.2} over {} matches",
            referee_delta,
            dataset.referee_series(name).len()
        );
    }
    println!();
    println!(
        "{:>6}  {:>7}  {:>7}  {:>9}  {:>10}  {:>8}  {:>8}",
        "line", "p_over", "p_under", "fair_over", "fair_under", "ev_over", "ev_under"
    );
    for e in &evals {
        println!(
            "{:>6.2}  {:>6.1}%  {:>6.1}%  {:>9}  {:>10}  {:>8}  {:>8}",
            e.line,
            e.p_over * 100.0,
            e.p_under * 100.0,
            fmt_opt(e.fair_odds_over),
            fmt_opt(e.fair_odds_under),
            fmt_opt(e.ev_over),
            fmt_opt(e.ev_under),
        );
    }

    if let Some(rec) = recommend(&evals) {
        println!();
        print_pick("best over ", rec.best_over, rec.best_over.p_over, rec.best_over.ev_over);
        print_pick(
            "best under",
            rec.best_under,
            rec.best_under.p_under,
            rec.best_under.ev_under,
        );
    }
    Ok(())
}

fn print_pick(tag: &str, eval: LineEval, p: f64, ev: Option<f64>) {
    let signal = Signal::from_prob(p).label();
    match ev {
        Some(ev) => println!(
            "{tag} -> line {:.2}  p {:.1}%  ev {:+.3}  [{signal}]",
            eval.line,
            p * 100.0,
            ev
        ),
        None => println!(
            "{tag} -> line {:.2}  p {:.1}%  [{signal}]",
            eval.line,
            p * 100.0
        ),
    }
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(v) => format!("{v:.2}"),
        None => "-".to_string(),
    }
}

// The primary fouls table wins; teams known only to the secondary-league
// table fall through to it, matching the source app's metric pick.
fn fall_back_to_secondary(
    dataset: &Dataset,
    metric: MetricKind,
    home: &str,
    away: &str,
) -> MetricKind {
    if metric == MetricKind::Fouls
        && dataset.series(home, MetricKind::Fouls).is_empty()
        && dataset.series(away, MetricKind::Fouls).is_empty()
        && dataset.metric_available(MetricKind::FoulsSecondary)
    {
        return MetricKind::FoulsSecondary;
    }
    metric
}

fn config_from_env() -> ModelConfig {
    let defaults = ModelConfig::default();
    ModelConfig {
        span: env::var("MODEL_SPAN")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(defaults.span),
        alpha: env_f64("SHRINK_ALPHA", defaults.alpha),
        poisson_weight: env_f64("POISSON_WEIGHT", defaults.poisson_weight),
        sigma_floor: env_f64("SIGMA_FLOOR", defaults.sigma_floor),
    }
}

fn env_f64(key: &str, default: f64) -> f64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse::<f64>().ok())
        .unwrap_or(default)
}

fn lines_from_env() -> Vec<f64> {
    let Ok(raw) = env::var("LINES") else {
        return DEFAULT_LINES.to_vec();
    };
    let mut out: Vec<f64> = raw
        .split(',')
        .filter_map(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .collect();
    if out.is_empty() {
        return DEFAULT_LINES.to_vec();
    }
    out.sort_by(|a, b| a.total_cmp(b));
    out.dedup();
    out
}

// BOOK_OVER_10_5=1.85 style: the line's dot becomes an underscore.
fn book_odds(prefix: &str, line: f64) -> Option<f64> {
    let key = format!("{prefix}_{}", format!("{line}").replace('.', "_"));
    env::var(key).ok().and_then(|v| v.parse::<f64>().ok())
}
