//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - fetches the raw job table
//! - runs validation, clipping, and budget aggregation
//! - prints reports/charts
//! - writes optional exports

use chrono::{Datelike, NaiveDate};
use clap::Parser;

use crate::cli::{Command, PlotArgs, ShowArgs};
use crate::domain::{DashConfig, DataSource, Window};
use crate::error::{AppError, EXIT_INPUT};

pub mod pipeline;

/// Entry point for the `siteplan` binary.
pub fn run() -> Result<(), AppError> {
    // We want `siteplan` and `siteplan --demo` to behave like `siteplan tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing. This preserves a clean clap structure while
    // retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Show(args) => handle_show(args),
        Command::Tui(args) => handle_tui(args),
        Command::Plot(args) => handle_plot(args),
    }
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let config = dash_config_from_args(&args)?;
    let run = pipeline::run_dashboard(&config)?;

    println!(
        "{}",
        crate::report::format_run_summary(&run.validated, &config)
    );
    println!(
        "{}",
        crate::report::format_kpis(&run.analysis.kpis, config.total_budget)
    );
    println!("{}", crate::report::format_jobs_table(&run.clipped));

    if config.plot {
        println!(
            "{}",
            crate::plot::render_gantt(&run.clipped, config.window)
        );
        println!(
            "{}",
            crate::plot::render_spend_chart(
                &run.analysis.daily,
                &run.analysis.cumulative,
                config.plot_width,
                config.plot_height,
            )
        );
    }

    // Optional exports.
    if let Some(path) = &config.export_series {
        crate::io::write_series_csv(path, &run.analysis)?;
    }
    if let Some(path) = &config.export_json {
        let file = pipeline::dashboard_file(&config, &run);
        crate::io::write_dashboard_json(path, &file)?;
    }

    Ok(())
}

fn handle_tui(args: ShowArgs) -> Result<(), AppError> {
    crate::tui::run(args)
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let file = crate::io::read_dashboard_json(&args.dashboard)?;

    println!(
        "Saved dashboard ({}, as of {})",
        file.window.label(),
        file.asof_date
    );
    println!(
        "{}",
        crate::report::format_kpis(&file.kpis, file.total_budget)
    );
    println!("{}", crate::plot::render_gantt(&file.clipped, file.window));
    println!(
        "{}",
        crate::plot::render_spend_chart(&file.daily, &file.cumulative, args.width, args.height)
    );
    Ok(())
}

/// Resolve CLI flags (plus defaults) into a pipeline configuration.
pub fn dash_config_from_args(args: &ShowArgs) -> Result<DashConfig, AppError> {
    let source = if let Some(id) = &args.sheet {
        DataSource::Sheet {
            spreadsheet_id: id.clone(),
            worksheet: args.worksheet.clone(),
        }
    } else if let Some(path) = &args.csv {
        DataSource::Csv(path.clone())
    } else {
        DataSource::Demo
    };

    let asof_date = match &args.asof {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
            AppError::new(EXIT_INPUT, format!("Invalid --asof date `{raw}` (expected YYYY-MM-DD)"))
        })?,
        None => chrono::Local::now().date_naive(),
    };

    // The viewing month defaults to the as-of month.
    let year = args.year.unwrap_or_else(|| asof_date.year());
    let month = args.month.unwrap_or_else(|| asof_date.month());
    let window = Window::new(year, month)
        .ok_or_else(|| AppError::new(EXIT_INPUT, format!("Invalid month `{month}` (expected 1-12)")))?;

    Ok(DashConfig {
        source,
        window,
        total_budget: args.budget,
        asof_date,
        cache_ttl_secs: args.cache_ttl_secs,
        plot: args.plot && !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        export_series: args.export.clone(),
        export_json: args.export_json.clone(),
    })
}

/// Rewrite argv so `siteplan` defaults to `siteplan tui`.
///
/// Rules:
/// - `siteplan`                      -> `siteplan tui`
/// - `siteplan --demo ...`           -> `siteplan tui --demo ...`
/// - `siteplan --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "show" | "tui" | "plot");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
