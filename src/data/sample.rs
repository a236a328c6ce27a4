//! Built-in demo dataset.
//!
//! A realistic single-project schedule so the dashboard runs with no
//! credentials or files. Deliberately shaped exactly like a spreadsheet
//! export (string cells, template headers) so it exercises the same
//! validation path as live data.

use crate::domain::REQUIRED_COLUMNS;
use crate::pipeline::RawTable;

/// (name, start, end, cost, duration days, status)
const DEMO_JOBS: [(&str, &str, &str, &str, &str, &str); 15] = [
    ("Site Preparation", "2024-01-01", "2024-01-14", "15000", "13", "Completed"),
    ("Foundation Work", "2024-01-15", "2024-02-28", "50000", "44", "In Progress"),
    ("Framing", "2024-03-01", "2024-04-15", "75000", "45", "Planned"),
    ("Electrical Installation", "2024-04-01", "2024-05-15", "30000", "44", "Planned"),
    ("Roofing", "2024-04-10", "2024-05-05", "45000", "25", "Planned"),
    ("Plumbing", "2024-04-15", "2024-05-30", "25000", "45", "Planned"),
    ("HVAC Installation", "2024-05-01", "2024-06-10", "40000", "40", "Planned"),
    ("Drywall", "2024-05-01", "2024-06-15", "35000", "45", "Planned"),
    ("Insulation", "2024-05-15", "2024-06-05", "18000", "21", "Planned"),
    ("Flooring", "2024-06-10", "2024-07-20", "28000", "40", "Planned"),
    ("Interior Painting", "2024-07-01", "2024-08-15", "22000", "45", "Planned"),
    ("Kitchen Installation", "2024-07-15", "2024-08-30", "55000", "46", "Planned"),
    ("Bathroom Installation", "2024-08-01", "2024-09-15", "35000", "45", "Planned"),
    ("Final Inspections", "2024-09-10", "2024-09-20", "5000", "10", "Planned"),
    ("Landscaping", "2024-09-15", "2024-10-15", "20000", "30", "On Hold"),
];

/// The demo schedule as a raw table, ready for the validator.
pub fn demo_table() -> RawTable {
    let columns = REQUIRED_COLUMNS.iter().map(|s| s.to_string()).collect();
    let rows = DEMO_JOBS
        .iter()
        .map(|(name, start, end, cost, dur, status)| {
            vec![
                name.to_string(),
                start.to_string(),
                end.to_string(),
                cost.to_string(),
                dur.to_string(),
                status.to_string(),
            ]
        })
        .collect();
    RawTable::new(columns, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::validate;

    #[test]
    fn demo_data_validates_cleanly() {
        let out = validate(&demo_table(), &REQUIRED_COLUMNS).unwrap();
        assert_eq!(out.rows_used, 15);
        assert!(out.warnings.is_empty());
        // Rows arrive sorted by start date so chart ordering reads naturally.
        for pair in out.jobs.windows(2) {
            assert!(pair[0].start_date <= pair[1].start_date);
        }
    }
}
