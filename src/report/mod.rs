//! Formatted terminal output: run summary, KPI cards, month job table.
//!
//! We keep formatting code in one place so:
//! - the pipeline stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::domain::{ClippedJob, DashConfig, DataSource, KpiSnapshot};
use crate::pipeline::{RowWarning, ValidatedJobs};

/// Format the full run header (source, window, dataset stats, warnings).
pub fn format_run_summary(validated: &ValidatedJobs, config: &DashConfig) -> String {
    let mut out = String::new();

    out.push_str("=== siteplan - Job Schedule Dashboard ===\n");
    out.push_str(&format!("Source: {}\n", source_label(&config.source)));
    out.push_str(&format!("Window: {}\n", config.window.label()));
    out.push_str(&format!("As-of: {}\n", config.asof_date));
    out.push_str(&format!(
        "Rows: read={} used={} skipped={}\n",
        validated.rows_read,
        validated.rows_used,
        validated.warnings.len()
    ));

    if !validated.warnings.is_empty() {
        out.push_str(&format_warnings(&validated.warnings));
    }

    out
}

/// Format skipped-row warnings, one line each.
pub fn format_warnings(warnings: &[RowWarning]) -> String {
    let mut out = String::new();
    for w in warnings {
        let who = w.name.as_deref().unwrap_or("?");
        out.push_str(&format!("  (skipped line {}: {}) {}\n", w.line, who, w.message));
    }
    out
}

/// Format the KPI cards as a compact block.
pub fn format_kpis(kpis: &KpiSnapshot, total_budget: f64) -> String {
    let mut out = String::new();
    out.push_str("KPIs:\n");
    out.push_str(&format!(
        "- Total spend to date : {} ({:.1}% of {})\n",
        fmt_money(kpis.total_spend_to_date),
        kpis.budget_used_pct,
        fmt_money(total_budget),
    ));
    out.push_str(&format!(
        "- Remaining budget    : {}{}\n",
        fmt_money(kpis.remaining_budget),
        if kpis.remaining_budget < 0.0 { " (over budget)" } else { "" },
    ));
    out.push_str(&format!("- Jobs this month     : {}\n", kpis.jobs_in_window));
    out.push_str(&format!(
        "- Spend this month    : {}\n",
        fmt_money(kpis.spend_in_window)
    ));
    out
}

/// Format the month's clipped jobs as a table.
pub fn format_jobs_table(clipped: &[ClippedJob]) -> String {
    if clipped.is_empty() {
        return "No jobs scheduled for this month.\n".to_string();
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{:<24} {:>10} {:>10} {:>12} {:<12}\n",
        "job", "start", "end", "cost", "status"
    ));
    out.push_str(&format!(
        "{:-<24} {:-<10} {:-<10} {:-<12} {:-<12}\n",
        "", "", "", "", ""
    ));

    for c in clipped {
        out.push_str(&format!(
            "{:<24} {:>10} {:>10} {:>12} {:<12}\n",
            truncate(&c.name, 24),
            c.start_date,
            c.end_date,
            fmt_money(c.estimated_cost),
            truncate(&c.status, 12),
        ));
    }

    out
}

/// Short human-readable label for the configured data source.
pub fn source_label(source: &DataSource) -> String {
    match source {
        DataSource::Demo => "built-in demo data".to_string(),
        DataSource::Csv(path) => format!("CSV '{}'", path.display()),
        DataSource::Sheet {
            spreadsheet_id,
            worksheet,
        } => format!("sheet {spreadsheet_id} / '{worksheet}'"),
    }
}

/// `$1,234,567` with the sign preserved (amounts rounded to whole dollars).
pub fn fmt_money(v: f64) -> String {
    let negative = v < 0.0;
    let n = v.abs().round() as u64;
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if negative {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Cap a label at `max` characters, marking the cut with a trailing dot.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
