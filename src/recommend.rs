use crate::lines::LineEval;

/// Discrete confidence band for a probability. Band bounds are inclusive
/// at the bottom: 0.75 is already VeryStrong, 0.60 already Strong, etc.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    VeryStrong,
    Strong,
    Good,
    Weak,
    Neutral,
}

impl Signal {
    pub fn from_prob(p: f64) -> Self {
        if p >= 0.75 {
            Self::VeryStrong
        } else if p >= 0.60 {
            Self::Strong
        } else if p >= 0.55 {
            Self::Good
        } else if p >= 0.51 {
            Self::Weak
        } else {
            Self::Neutral
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::VeryStrong => "very strong",
            Self::Strong => "strong",
            Self::Good => "good",
            Self::Weak => "weak",
            Self::Neutral => "neutral/not recommended",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Recommendation {
    pub best_over: LineEval,
    pub best_under: LineEval,
}

/// Picks the best over and best under line independently (they may
/// differ). When at least one line carries an EV figure the pick is by
/// EV, falling back to raw probability for a side with no quotes at all;
/// otherwise by probability. Ties keep the first line in input order.
pub fn recommend(results: &[LineEval]) -> Option<Recommendation> {
    if results.is_empty() {
        return None;
    }
    let ev_available = results
        .iter()
        .any(|r| r.ev_over.is_some() || r.ev_under.is_some());

    let best_over = pick(results, ev_available, |r| r.ev_over, |r| r.p_over)?;
    let best_under = pick(results, ev_available, |r| r.ev_under, |r| r.p_under)?;
    Some(Recommendation {
        best_over: *best_over,
        best_under: *best_under,
    })
}

fn pick<'a>(
    results: &'a [LineEval],
    ev_available: bool,
    ev: impl Fn(&LineEval) -> Option<f64>,
    prob: impl Fn(&LineEval) -> f64,
) -> Option<&'a LineEval> {
    if ev_available {
        if let Some(best) = argmax(results, &ev) {
            return Some(best);
        }
    }
    argmax(results, |r| Some(prob(r)))
}

// Strict comparison keeps the first occurrence on ties.
fn argmax(results: &[LineEval], key: impl Fn(&LineEval) -> Option<f64>) -> Option<&LineEval> {
    let mut best: Option<(&LineEval, f64)> = None;
    for r in results {
        let Some(v) = key(r) else { continue };
        if best.map_or(true, |(_, bv)| v > bv) {
            best = Some((r, v));
        }
    }
    best.map(|(r, _)| r)
}
