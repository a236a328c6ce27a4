//! Row validation and normalization.
//!
//! This stage turns a raw string table (spreadsheet rows, CSV export, demo
//! data) into a clean set of `Job` records that are safe to chart.
//!
//! Design goals:
//! - **Strict schema** for required columns (clear errors, checked against
//!   the batch's field set, not per-row)
//! - **Row-level validation** (skip bad rows, but report what happened —
//!   manually edited spreadsheets routinely contain partial rows)
//! - **Deterministic behavior** (no hidden clock, no implicit coercion)

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::domain::{DEFAULT_STATUS, Job};
use crate::pipeline::PipelineError;

/// A header row plus string cells — the shape every collaborator
/// (spreadsheet API, CSV file, demo data) naturally produces.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }
}

/// A row-level problem encountered during validation. Non-fatal: the row is
/// dropped and the batch continues.
#[derive(Debug, Clone, PartialEq)]
pub struct RowWarning {
    /// 1-based sheet line (header is line 1).
    pub line: usize,
    pub name: Option<String>,
    pub message: String,
}

/// Validation output: normalized jobs + per-row warnings.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedJobs {
    pub jobs: Vec<Job>,
    pub warnings: Vec<RowWarning>,
    pub rows_read: usize,
    pub rows_used: usize,
}

/// Validate a raw batch against the required column set and coerce each row
/// to a [`Job`].
///
/// Fails with [`PipelineError::EmptyDataset`] on a zero-record batch and
/// [`PipelineError::MissingColumns`] when the batch's header lacks required
/// fields. Rows whose cells fail coercion are dropped with a recorded
/// warning; they never abort the batch.
pub fn validate(table: &RawTable, required: &[&str]) -> Result<ValidatedJobs, PipelineError> {
    if table.rows.is_empty() {
        return Err(PipelineError::EmptyDataset);
    }

    let header_map = build_header_map(&table.columns);

    let missing: Vec<String> = required
        .iter()
        .filter(|name| !header_map.contains_key(**name))
        .map(|name| name.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(PipelineError::MissingColumns(missing));
    }

    let mut jobs = Vec::with_capacity(table.rows.len());
    let mut warnings = Vec::new();
    let mut rows_read = 0usize;

    for (idx, row) in table.rows.iter().enumerate() {
        // +2: rows start after the header, and sheet lines are 1-based.
        let line = idx + 2;
        rows_read += 1;

        match parse_row(row, &header_map) {
            Ok(job) => jobs.push(job),
            Err((name, message)) => warnings.push(RowWarning { line, name, message }),
        }
    }

    let rows_used = jobs.len();
    Ok(ValidatedJobs {
        jobs,
        warnings,
        rows_read,
        rows_used,
    })
}

fn build_header_map(columns: &[String]) -> HashMap<String, usize> {
    columns
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 exports with a BOM prefix on
    // the first header. If we don't strip it, the schema check will
    // incorrectly report missing columns. Names stay case-sensitive.
    name.trim().trim_start_matches('\u{feff}').to_string()
}

fn parse_row(
    row: &[String],
    header_map: &HashMap<String, usize>,
) -> Result<Job, (Option<String>, String)> {
    let name = cell(row, header_map, "Job Name").to_string();
    if name.is_empty() {
        return Err((None, "Missing `Job Name` value.".to_string()));
    }
    let fail = |msg: String| (Some(name.clone()), msg);

    let start_date = parse_date(cell(row, header_map, "Start Date")).map_err(&fail)?;
    let end_date = parse_date(cell(row, header_map, "End Date")).map_err(&fail)?;
    if start_date > end_date {
        return Err(fail(format!(
            "`End Date` ({end_date}) is before `Start Date` ({start_date})."
        )));
    }

    let estimated_cost = parse_amount(cell(row, header_map, "Estimated Cost"), "Estimated Cost")
        .map_err(&fail)?;
    let estimated_duration =
        parse_count(cell(row, header_map, "Estimated Duration"), "Estimated Duration")
            .map_err(&fail)?;

    let status = match cell(row, header_map, "Status") {
        "" => DEFAULT_STATUS.to_string(),
        s => s.to_string(),
    };

    Ok(Job {
        name,
        start_date,
        end_date,
        estimated_cost,
        estimated_duration,
        status,
    })
}

fn cell<'a>(row: &'a [String], header_map: &HashMap<String, usize>, name: &str) -> &'a str {
    // The schema check guarantees the column exists; the row itself may be
    // short (flexible CSV / trailing blanks), which reads as an empty cell.
    header_map
        .get(name)
        .and_then(|idx| row.get(*idx))
        .map(|s| s.trim())
        .unwrap_or("")
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    // The template asks for ISO dates (`YYYY-MM-DD`), but manually edited
    // sheets often use `DD/MM/YYYY` or `DD-MM-YYYY`. We accept a small set of
    // common formats to reduce friction while keeping parsing deterministic.
    const FMTS: [&str; 4] = ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%Y/%m/%d"];
    for fmt in FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    Err(format!(
        "Invalid date '{s}'. Expected one of: YYYY-MM-DD, DD/MM/YYYY, DD-MM-YYYY, YYYY/MM/DD."
    ))
}

fn parse_amount(s: &str, column: &str) -> Result<f64, String> {
    // Spreadsheets format money; tolerate "$" and thousands separators.
    let cleaned: String = s.chars().filter(|c| *c != '$' && *c != ',').collect();
    let v = cleaned
        .parse::<f64>()
        .map_err(|_| format!("Invalid `{column}` value '{s}'."))?;
    if !v.is_finite() || v < 0.0 {
        return Err(format!("`{column}` must be a non-negative number (got '{s}')."));
    }
    Ok(v)
}

fn parse_count(s: &str, column: &str) -> Result<u32, String> {
    // Accept plain integers and numeric exports like "44.0".
    if let Ok(n) = s.parse::<u32>() {
        return Ok(n);
    }
    let v = s
        .parse::<f64>()
        .map_err(|_| format!("Invalid `{column}` value '{s}'."))?;
    if !v.is_finite() || v < 0.0 || v.fract() != 0.0 || v > u32::MAX as f64 {
        return Err(format!("`{column}` must be a non-negative whole number (got '{s}')."));
    }
    Ok(v as u32)
}
