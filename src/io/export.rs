//! Exports: spend-series CSV and the portable dashboard JSON.
//!
//! The CSV is meant to be easy to consume in spreadsheets or downstream
//! scripts. The JSON (`domain::DashboardFile`) captures one computed run —
//! KPIs, both series, clipped spans — so `siteplan plot` can re-render it
//! without re-fetching data.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::DashboardFile;
use crate::error::{AppError, EXIT_INPUT};
use crate::pipeline::BudgetAnalysis;

/// Write the daily + cumulative spend series to a CSV file.
pub fn write_series_csv(path: &Path, analysis: &BudgetAnalysis) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::new(EXIT_INPUT, format!("Failed to create export CSV '{}': {e}", path.display()))
    })?;

    writeln!(file, "date,new_spend,running_total")
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to write export CSV header: {e}")))?;

    // The two series are index-aligned: one cumulative point per daily entry.
    for (daily, cumulative) in analysis.daily.iter().zip(analysis.cumulative.iter()) {
        writeln!(
            file,
            "{},{:.2},{:.2}",
            daily.date, daily.new_spend, cumulative.running_total
        )
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

/// Write a dashboard JSON file.
pub fn write_dashboard_json(path: &Path, dashboard: &DashboardFile) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(EXIT_INPUT, format!("Failed to create dashboard JSON '{}': {e}", path.display()))
    })?;
    serde_json::to_writer_pretty(file, dashboard)
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to write dashboard JSON: {e}")))?;
    Ok(())
}

/// Read a dashboard JSON file.
pub fn read_dashboard_json(path: &Path) -> Result<DashboardFile, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(EXIT_INPUT, format!("Failed to open dashboard JSON '{}': {e}", path.display()))
    })?;
    let dashboard: DashboardFile = serde_json::from_reader(file)
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Invalid dashboard JSON: {e}")))?;
    Ok(dashboard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{KpiSnapshot, Window};
    use chrono::NaiveDate;

    #[test]
    fn dashboard_json_round_trips() {
        let path = std::env::temp_dir().join("siteplan_dashboard_test.json");
        let dashboard = DashboardFile {
            tool: "siteplan".to_string(),
            asof_date: NaiveDate::from_ymd_opt(2024, 2, 15).unwrap(),
            window: Window::new(2024, 2).unwrap(),
            total_budget: 1_000_000.0,
            kpis: KpiSnapshot {
                total_spend_to_date: 65_000.0,
                remaining_budget: 935_000.0,
                jobs_in_window: 0,
                spend_in_window: 0.0,
                budget_used_pct: 6.5,
            },
            daily: vec![],
            cumulative: vec![],
            clipped: vec![],
        };

        write_dashboard_json(&path, &dashboard).unwrap();
        let loaded = read_dashboard_json(&path).unwrap();
        assert_eq!(loaded.window, dashboard.window);
        assert_eq!(loaded.kpis, dashboard.kpis);

        let _ = std::fs::remove_file(&path);
    }
}
