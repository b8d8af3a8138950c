use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricKind {
    Shots,
    ShotsOnTarget,
    Fouls,
    /// Fouls from the secondary-league table, kept separate because its
    /// teams never overlap the primary league's.
    FoulsSecondary,
}

impl MetricKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "shots" | "tiri" => Some(Self::Shots),
            "sot" | "shots-on-target" | "shots_on_target" | "tiri_porta" => {
                Some(Self::ShotsOnTarget)
            }
            "fouls" | "falli" => Some(Self::Fouls),
            "fouls-secondary" | "fouls_secondary" | "falli_liga" => Some(Self::FoulsSecondary),
            _ => None,
        }
    }

    /// Referee tendency only moves foul counts; shot metrics are never
    /// adjusted.
    pub fn referee_adjustable(self) -> bool {
        matches!(self, Self::Fouls | Self::FoulsSecondary)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Shots => "shots",
            Self::ShotsOnTarget => "shots on target",
            Self::Fouls => "fouls",
            Self::FoulsSecondary => "fouls (secondary league)",
        }
    }
}

#[derive(Debug, Default, Clone)]
struct TeamHistory {
    shots: Vec<f64>,
    shots_on_target: Vec<f64>,
    fouls: Vec<f64>,
    fouls_secondary: Vec<f64>,
}

impl TeamHistory {
    fn metric(&self, metric: MetricKind) -> &[f64] {
        match metric {
            MetricKind::Shots => &self.shots,
            MetricKind::ShotsOnTarget => &self.shots_on_target,
            MetricKind::Fouls => &self.fouls,
            MetricKind::FoulsSecondary => &self.fouls_secondary,
        }
    }

    fn metric_mut(&mut self, metric: MetricKind) -> &mut Vec<f64> {
        match metric {
            MetricKind::Shots => &mut self.shots,
            MetricKind::ShotsOnTarget => &mut self.shots_on_target,
            MetricKind::Fouls => &mut self.fouls,
            MetricKind::FoulsSecondary => &mut self.fouls_secondary,
        }
    }
}

/// Accumulates per-team and per-referee observation series in insertion
/// order (oldest first), then freezes into an immutable `Dataset`.
///
/// Names are trimmed of surrounding whitespace but otherwise taken as-is;
/// non-finite values are dropped at this boundary rather than coerced.
#[derive(Debug, Default)]
pub struct DatasetBuilder {
    teams: HashMap<String, TeamHistory>,
    referees: HashMap<String, Vec<f64>>,
}

impl DatasetBuilder {
    pub fn push_team_value(&mut self, team: &str, metric: MetricKind, value: f64) {
        let team = team.trim();
        if team.is_empty() || !value.is_finite() {
            return;
        }
        self.teams
            .entry(team.to_string())
            .or_default()
            .metric_mut(metric)
            .push(value);
    }

    pub fn push_referee_value(&mut self, name: &str, value: f64) {
        let name = name.trim();
        if name.is_empty() || !value.is_finite() {
            return;
        }
        self.referees.entry(name.to_string()).or_default().push(value);
    }

    pub fn freeze(self) -> Dataset {
        Dataset {
            teams: self.teams,
            referees: self.referees,
        }
    }
}

/// Read-only historical observations for one loaded session. Built once,
/// shared by every query; a reload builds a fresh dataset instead of
/// mutating this one.
#[derive(Debug, Default)]
pub struct Dataset {
    teams: HashMap<String, TeamHistory>,
    referees: HashMap<String, Vec<f64>>,
}

impl Dataset {
    /// Chronological series for one (team, metric) pair; empty for an
    /// unknown team or a metric the team has no rows for.
    pub fn series(&self, team: &str, metric: MetricKind) -> &[f64] {
        self.teams
            .get(team.trim())
            .map(|h| h.metric(metric))
            .unwrap_or(&[])
    }

    /// League-wide series for one referee; empty when unknown.
    pub fn referee_series(&self, name: &str) -> &[f64] {
        self.referees
            .get(name.trim())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn teams(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self.teams.keys().map(String::as_str).collect();
        out.sort_unstable();
        out
    }

    pub fn referees(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self.referees.keys().map(String::as_str).collect();
        out.sort_unstable();
        out
    }

    pub fn metric_available(&self, metric: MetricKind) -> bool {
        self.teams.values().any(|h| !h.metric(metric).is_empty())
    }
}
