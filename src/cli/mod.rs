//! Command-line parsing for the job schedule dashboard.
//!
//! Argument parsing and command dispatch stay here, separate from the
//! pipeline code that actually validates, clips, and aggregates jobs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "siteplan", version, about = "Construction Job Schedule Dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the pipeline and print the dashboard (KPIs, Gantt, spend chart).
    Show(ShowArgs),
    /// Launch the interactive TUI.
    ///
    /// This uses the same underlying pipeline as `siteplan show`, but renders
    /// the results in a terminal UI using Ratatui.
    Tui(ShowArgs),
    /// Plot a previously exported dashboard JSON.
    Plot(PlotArgs),
}

/// Common options for the dashboard pipeline.
#[derive(Debug, Parser, Clone)]
pub struct ShowArgs {
    /// Google Sheets spreadsheet ID (requires SHEETS_API_KEY).
    #[arg(long, value_name = "ID")]
    pub sheet: Option<String>,

    /// Worksheet name within the spreadsheet.
    #[arg(long, default_value = "Sheet1")]
    pub worksheet: String,

    /// Load jobs from a local CSV file instead of a spreadsheet.
    #[arg(long, value_name = "FILE")]
    pub csv: Option<PathBuf>,

    /// Use the built-in demonstration dataset.
    #[arg(long)]
    pub demo: bool,

    /// Year of the month to display.
    #[arg(short = 'y', long)]
    pub year: Option<i32>,

    /// Month to display (1-12).
    #[arg(short = 'm', long)]
    pub month: Option<u32>,

    /// Total project budget in dollars.
    #[arg(short = 'b', long, default_value_t = 1_000_000.0)]
    pub budget: f64,

    /// As-of date for spend-to-date KPIs (defaults to today).
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub asof: Option<String>,

    /// How long a fetched snapshot stays fresh, in seconds.
    #[arg(long, default_value_t = 300)]
    pub cache_ttl_secs: u64,

    /// Render ASCII charts in the terminal (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal charts.
    #[arg(long)]
    pub no_plot: bool,

    /// Chart width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Chart height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Export the daily/cumulative spend series to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Export the full dashboard (KPIs + series + clipped jobs) to JSON.
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,
}

/// Options for plotting a saved dashboard.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Dashboard JSON file produced by `siteplan show --export-json`.
    #[arg(long, value_name = "JSON")]
    pub dashboard: PathBuf,

    /// Chart width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Chart height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}
