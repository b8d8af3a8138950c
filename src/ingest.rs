use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use csv::StringRecord;

use crate::dataset::{Dataset, DatasetBuilder, MetricKind};

pub const SHOTS_FILE: &str = "shots.csv";
pub const FOULS_FILE: &str = "fouls.csv";
pub const FOULS_SECONDARY_FILE: &str = "fouls_secondary.csv";

// Candidate headers cover both English exports and the Italian source
// spreadsheets these files were historically maintained in.
const TEAM_HEADERS: &[&str] = &["squadra", "team", "team name", "squad"];
const HOME_TEAM_HEADERS: &[&str] = &["home team", "squadra_casa", "squadra casa"];
const AWAY_TEAM_HEADERS: &[&str] = &["away team", "squadra_ospite", "squadra ospite"];
const SHOTS_HEADERS: &[&str] = &["tiri_tot", "tiri totali", "total shots", "shots", "tiri"];
const SOT_HEADERS: &[&str] = &["tiri in porta", "shots on target", "sot", "tiri_porta"];
const FOULS_HEADERS: &[&str] = &["falli", "fouls", "falli_commessi"];
const REFEREE_HEADERS: &[&str] = &["arbitro", "referee", "official"];
const REFEREE_AVG_HEADERS: &[&str] = &["media_arbitro", "avg_ref", "ref_avg"];
const DATE_HEADERS: &[&str] = &["data", "date", "match date"];

/// Loads the conventional trio of CSV files from a directory into an
/// immutable dataset. Every file is optional; a missing file only leaves
/// its metrics empty.
pub fn load_dataset(dir: &Path) -> Result<Dataset> {
    let mut builder = DatasetBuilder::default();
    if let Some((headers, rows)) = read_rows(&dir.join(SHOTS_FILE))? {
        ingest_shots(&mut builder, &headers, &rows);
    }
    if let Some((headers, rows)) = read_rows(&dir.join(FOULS_FILE))? {
        ingest_fouls(&mut builder, &headers, &rows, MetricKind::Fouls, true);
    }
    if let Some((headers, rows)) = read_rows(&dir.join(FOULS_SECONDARY_FILE))? {
        ingest_fouls(&mut builder, &headers, &rows, MetricKind::FoulsSecondary, false);
    }
    Ok(builder.freeze())
}

/// Two-pass tolerant header resolution: an exact case-insensitive match
/// wins over a substring match, and candidate order breaks remaining
/// ties. Returns the column index.
pub fn resolve_column(headers: &StringRecord, candidates: &[&str]) -> Option<usize> {
    for cand in candidates {
        for (idx, header) in headers.iter().enumerate() {
            if header.trim().eq_ignore_ascii_case(cand) {
                return Some(idx);
            }
        }
    }
    for cand in candidates {
        let want = cand.to_lowercase();
        for (idx, header) in headers.iter().enumerate() {
            if header.trim().to_lowercase().contains(&want) {
                return Some(idx);
            }
        }
    }
    None
}

/// Numeric cell parse in the same shape as the stat-table cells: empty
/// and placeholder cells are dropped (never coerced to zero), commas are
/// treated as thousands separators.
pub fn parse_value(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() || s == "-" {
        return None;
    }
    let s = s.replace(',', "");
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    for fmt in ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(raw.trim(), fmt) {
            return Some(d);
        }
    }
    None
}

fn cell<'a>(record: &'a StringRecord, idx: Option<usize>) -> Option<&'a str> {
    let raw = record.get(idx?)?.trim();
    if raw.is_empty() { None } else { Some(raw) }
}

/// Reads one CSV file into (headers, rows). Returns `Ok(None)` when the
/// file does not exist. When a date column is present the rows are
/// stable-sorted chronologically (undated rows first, keeping their
/// relative order); otherwise file order is taken as chronological.
fn read_rows(path: &Path) -> Result<Option<(StringRecord, Vec<StringRecord>)>> {
    if !path.exists() {
        return Ok(None);
    }
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(file);
    let headers = reader
        .headers()
        .with_context(|| format!("read headers from {}", path.display()))?
        .clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record.with_context(|| format!("read row from {}", path.display()))?);
    }

    if let Some(date_idx) = resolve_column(&headers, DATE_HEADERS) {
        rows.sort_by_key(|row| cell(row, Some(date_idx)).and_then(parse_date));
    }
    Ok(Some((headers, rows)))
}

// The shots file comes in two shapes: aggregated (one team column, one
// value per row) or match-level (home/away team columns with per-side
// value columns). Match-level wins when both team columns resolve, so an
// ambiguous "home team" header is never mistaken for the aggregated form.
fn ingest_shots(builder: &mut DatasetBuilder, headers: &StringRecord, rows: &[StringRecord]) {
    let home_col = resolve_column(headers, HOME_TEAM_HEADERS);
    let away_col = resolve_column(headers, AWAY_TEAM_HEADERS);
    if let (Some(home_col), Some(away_col)) = (home_col, away_col) {
        let home_val = side_value_column(headers, "home");
        let away_val = side_value_column(headers, "away");
        for row in rows {
            if let (Some(team), Some(value)) = (
                cell(row, Some(home_col)),
                cell(row, home_val).and_then(parse_value),
            ) {
                builder.push_team_value(team, MetricKind::Shots, value);
            }
            if let (Some(team), Some(value)) = (
                cell(row, Some(away_col)),
                cell(row, away_val).and_then(parse_value),
            ) {
                builder.push_team_value(team, MetricKind::Shots, value);
            }
        }
        return;
    }

    let Some(team_col) = resolve_column(headers, TEAM_HEADERS) else {
        return;
    };
    let shots_col = resolve_column(headers, SHOTS_HEADERS);
    let sot_col = resolve_column(headers, SOT_HEADERS);
    for row in rows {
        let Some(team) = cell(row, Some(team_col)) else {
            continue;
        };
        if let Some(value) = cell(row, shots_col).and_then(parse_value) {
            builder.push_team_value(team, MetricKind::Shots, value);
        }
        if let Some(value) = cell(row, sot_col).and_then(parse_value) {
            builder.push_team_value(team, MetricKind::ShotsOnTarget, value);
        }
    }
}

// Per-side value columns of match-level rows are recognized by keyword,
// e.g. "home shots" / "tiri casa".
fn side_value_column(headers: &StringRecord, side: &str) -> Option<usize> {
    for (idx, header) in headers.iter().enumerate() {
        let h = header.trim().to_lowercase();
        if h.contains(side) && (h.contains("shot") || h.contains("tiri")) {
            return Some(idx);
        }
    }
    None
}

fn ingest_fouls(
    builder: &mut DatasetBuilder,
    headers: &StringRecord,
    rows: &[StringRecord],
    metric: MetricKind,
    with_referees: bool,
) {
    let team_col = resolve_column(headers, TEAM_HEADERS);
    let fouls_col = resolve_column(headers, FOULS_HEADERS);
    let referee_col = if with_referees {
        resolve_column(headers, REFEREE_HEADERS)
    } else {
        None
    };
    let referee_avg_col = resolve_column(headers, REFEREE_AVG_HEADERS);

    for row in rows {
        if let (Some(team), Some(value)) = (
            cell(row, team_col),
            cell(row, fouls_col).and_then(parse_value),
        ) {
            builder.push_team_value(team, metric, value);
        }

        if let Some(name) = cell(row, referee_col) {
            // Prefer a dedicated referee-average column; fall back to the
            // row's foul count. Rows with neither are dropped.
            let value = cell(row, referee_avg_col)
                .and_then(parse_value)
                .or_else(|| cell(row, fouls_col).and_then(parse_value));
            if let Some(value) = value {
                builder.push_referee_value(name, value);
            }
        }
    }
}
