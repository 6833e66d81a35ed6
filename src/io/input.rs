use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};

use crate::error::DerError;
use crate::models::{Turn, TurnList};

/// Parse an RTTM file into per-recording turn lists (§6, §4.9).
///
/// Relevant fields by position: `[1] recording_id, [3] start (sec),
/// [4] duration (sec), [7] speaker_id`. `end = start + duration`; other
/// fields are ignored. Blank lines are skipped.
pub fn parse_rttm_file(path: &Path) -> Result<BTreeMap<String, TurnList>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read RTTM file: {}", path.display()))?;
    let file_name = path.display().to_string();
    Ok(parse_rttm_str(&content, &file_name)?)
}

pub fn parse_rttm_str(content: &str, file_name: &str) -> crate::error::Result<BTreeMap<String, TurnList>> {
    let mut out: BTreeMap<String, Vec<Turn>> = BTreeMap::new();
    for (idx, raw_line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 8 {
            return Err(parse_error(file_name, line_no, format!(
                "expected at least 8 whitespace-separated fields, found {}",
                fields.len()
            )));
        }
        let recording_id = fields[1].to_string();
        let start = parse_field(file_name, line_no, "start", fields[3])?;
        let dur = parse_field(file_name, line_no, "duration", fields[4])?;
        let speaker = fields[7].to_string();

        let turn = Turn::new(speaker, start, start + dur)?;
        out.entry(recording_id).or_default().push(turn);
    }
    Ok(out.into_iter().map(|(id, turns)| (id, TurnList::new(turns))).collect())
}

/// Parse a UEM file into per-recording scoring-domain turn lists.
///
/// Fields: `recording_id channel start end`. The speaker label on the
/// resulting turns is a placeholder (`"uem"`) — UEM turns carry no
/// speaker information; only their extents matter (see
/// [`crate::core::uem::uem_intervals`]).
pub fn parse_uem_file(path: &Path) -> Result<BTreeMap<String, TurnList>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read UEM file: {}", path.display()))?;
    let file_name = path.display().to_string();
    Ok(parse_uem_str(&content, &file_name)?)
}

pub fn parse_uem_str(content: &str, file_name: &str) -> crate::error::Result<BTreeMap<String, TurnList>> {
    let mut out: BTreeMap<String, Vec<Turn>> = BTreeMap::new();
    for (idx, raw_line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(parse_error(file_name, line_no, format!(
                "expected at least 4 whitespace-separated fields, found {}",
                fields.len()
            )));
        }
        let recording_id = fields[0].to_string();
        let start = parse_field(file_name, line_no, "start", fields[2])?;
        let end = parse_field(file_name, line_no, "end", fields[3])?;

        let turn = Turn::new("uem", start, end)?;
        out.entry(recording_id).or_default().push(turn);
    }
    Ok(out.into_iter().map(|(id, turns)| (id, TurnList::new(turns))).collect())
}

fn parse_field(file_name: &str, line_no: usize, label: &str, raw: &str) -> crate::error::Result<f64> {
    raw.parse::<f64>()
        .map_err(|_| parse_error(file_name, line_no, format!("invalid {label} value {raw:?}")))
}

fn parse_error(file_name: &str, line_no: usize, reason: String) -> DerError {
    DerError::ParseError {
        file: file_name.to_string(),
        line: line_no,
        reason,
    }
}
