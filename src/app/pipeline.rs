//! Shared dashboard pipeline used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! fetch -> validate -> clip -> aggregate
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use crate::data::SheetClient;
use crate::domain::{ClippedJob, DashConfig, DashboardFile, DataSource, REQUIRED_COLUMNS};
use crate::error::{AppError, EXIT_EMPTY, EXIT_INPUT};
use crate::pipeline::{
    BudgetAnalysis, PipelineError, RawTable, ValidatedJobs, aggregate, clip_to_window, validate,
};

/// All computed outputs of a single dashboard run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub table: RawTable,
    pub validated: ValidatedJobs,
    pub clipped: Vec<ClippedJob>,
    pub analysis: BudgetAnalysis,
}

/// Execute the full pipeline: fetch the raw table, then derive everything.
pub fn run_dashboard(config: &DashConfig) -> Result<RunOutput, AppError> {
    let table = fetch_table(&config.source)?;
    run_with_table(config, table)
}

/// Fetch the raw job table from the configured source.
pub fn fetch_table(source: &DataSource) -> Result<RawTable, AppError> {
    match source {
        DataSource::Demo => Ok(crate::data::demo_table()),
        DataSource::Csv(path) => crate::io::load_table_csv(path),
        DataSource::Sheet {
            spreadsheet_id,
            worksheet,
        } => {
            let client = SheetClient::from_env()?;
            client.fetch_table(spreadsheet_id, worksheet)
        }
    }
}

/// Run the pipeline stages over an already-fetched table.
///
/// This is what the TUI calls when month navigation or a budget change needs
/// a recompute without re-fetching.
pub fn run_with_table(config: &DashConfig, table: RawTable) -> Result<RunOutput, AppError> {
    let validated = validate(&table, &REQUIRED_COLUMNS).map_err(pipeline_app_error)?;
    let clipped = clip_to_window(&validated.jobs, config.window);
    let analysis = aggregate(
        &validated.jobs,
        config.total_budget,
        config.window,
        config.asof_date,
    )
    .map_err(pipeline_app_error)?;

    Ok(RunOutput {
        table,
        validated,
        clipped,
        analysis,
    })
}

/// Map pipeline failures to process exit codes: schema and budget problems
/// are caller errors (2), an empty dataset is a data problem (3).
pub fn pipeline_app_error(err: PipelineError) -> AppError {
    let code = match err {
        PipelineError::EmptyDataset => EXIT_EMPTY,
        PipelineError::MissingColumns(_) | PipelineError::InvalidBudget(_) => EXIT_INPUT,
    };
    AppError::new(code, err.to_string())
}

/// Assemble the exportable dashboard document for a completed run.
pub fn dashboard_file(config: &DashConfig, run: &RunOutput) -> DashboardFile {
    DashboardFile {
        tool: env!("CARGO_PKG_NAME").to_string(),
        asof_date: config.asof_date,
        window: config.window,
        total_budget: config.total_budget,
        kpis: run.analysis.kpis.clone(),
        daily: run.analysis.daily.clone(),
        cumulative: run.analysis.cumulative.clone(),
        clipped: run.clipped.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Window;
    use chrono::NaiveDate;

    fn demo_config() -> DashConfig {
        DashConfig {
            source: DataSource::Demo,
            window: Window::new(2024, 3).unwrap(),
            total_budget: 1_000_000.0,
            asof_date: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
            cache_ttl_secs: 300,
            plot: false,
            plot_width: 80,
            plot_height: 20,
            export_series: None,
            export_json: None,
        }
    }

    #[test]
    fn full_run_over_demo_data_succeeds() {
        let run = run_dashboard(&demo_config()).unwrap();
        assert_eq!(run.validated.jobs.len(), 15);
        assert!(run.validated.warnings.is_empty());
        // March 2024: only Framing starts in-window; Foundation Work ended in February.
        assert_eq!(run.clipped.len(), 1);
        assert_eq!(run.analysis.kpis.jobs_in_window, 1);
        assert_eq!(run.analysis.kpis.spend_in_window, 75_000.0);
    }

    #[test]
    fn empty_dataset_maps_to_exit_code_3() {
        let config = demo_config();
        let table = RawTable::new(vec!["Job Name".to_string()], vec![]);
        let err = run_with_table(&config, table).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn missing_columns_map_to_exit_code_2() {
        let config = demo_config();
        let table = RawTable::new(
            vec!["Job Name".to_string()],
            vec![vec!["Framing".to_string()]],
        );
        let err = run_with_table(&config, table).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("Missing required columns"));
    }

    #[test]
    fn negative_budget_maps_to_exit_code_2() {
        let mut config = demo_config();
        config.total_budget = -1.0;
        let err = run_with_table(&config, crate::data::demo_table()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn dashboard_file_mirrors_the_run() {
        let config = demo_config();
        let run = run_dashboard(&config).unwrap();
        let file = dashboard_file(&config, &run);
        assert_eq!(file.window, config.window);
        assert_eq!(file.kpis, run.analysis.kpis);
        assert_eq!(file.clipped.len(), run.clipped.len());
    }
}
