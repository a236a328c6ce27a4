//! Load a raw table from a local CSV export.
//!
//! Cells stay as strings; all coercion belongs to the validator so CSV and
//! spreadsheet inputs go through the identical path.

use std::fs::File;
use std::path::Path;

use crate::error::{AppError, EXIT_INPUT};
use crate::pipeline::RawTable;

/// Read a CSV file into a raw string table (header row required).
pub fn load_table_csv(path: &Path) -> Result<RawTable, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(EXIT_INPUT, format!("Failed to open CSV '{}': {e}", path.display()))
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to read CSV headers: {e}")))?
        .iter()
        .map(|s| s.to_string())
        .collect();

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| {
            // records() starts after the header; CSV lines are 1-based.
            AppError::new(EXIT_INPUT, format!("CSV parse error on line {}: {e}", idx + 2))
        })?;
        rows.push(record.iter().map(|s| s.to_string()).collect());
    }

    Ok(RawTable::new(columns, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_headers_and_rows() {
        let dir = std::env::temp_dir();
        let path = dir.join("siteplan_table_test.csv");
        {
            let mut f = File::create(&path).unwrap();
            writeln!(f, "Job Name,Start Date,End Date,Estimated Cost,Estimated Duration,Status").unwrap();
            writeln!(f, "Framing,2024-03-01,2024-04-15,75000,45,Planned").unwrap();
            writeln!(f, "Roofing,2024-04-10,2024-05-05,45000,25,").unwrap();
        }

        let table = load_table_csv(&path).unwrap();
        assert_eq!(table.columns.len(), 6);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][0], "Framing");
        assert_eq!(table.rows[1][5], "");

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_file_is_a_clear_error() {
        let err = load_table_csv(Path::new("/nonexistent/jobs.csv")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
