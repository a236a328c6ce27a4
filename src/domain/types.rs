//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory while deriving chart data
//! - exported to JSON/CSV
//! - reloaded later for plotting or comparisons

use std::path::PathBuf;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Column headers the input table must carry, exactly as the spreadsheet
/// template names them (case-sensitive).
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "Job Name",
    "Start Date",
    "End Date",
    "Estimated Cost",
    "Estimated Duration",
    "Status",
];

/// Status assigned to rows whose `Status` cell is empty.
pub const DEFAULT_STATUS: &str = "Planned";

/// A validated job record.
///
/// Jobs are immutable once validated; every derived view (clipped span,
/// daily bucket) is a new value keyed by the job's name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub name: String,
    pub start_date: NaiveDate,
    /// Invariant: `start_date <= end_date` (enforced by the validator).
    pub end_date: NaiveDate,
    pub estimated_cost: f64,
    /// Informational; not required to equal `end_date - start_date`.
    pub estimated_duration: u32,
    /// Free-text label; no enumerated domain enforced.
    pub status: String,
}

/// The selected (year, month) viewing period.
///
/// Defines the inclusive calendar-month interval `[first_day, last_day]`
/// used for clipping and KPI scoping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    year: i32,
    month: u32,
}

impl Window {
    /// Returns `None` when `month` is outside `1..=12`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        // `new` validated the month, so this cannot fail for constructed windows.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(&self) -> NaiveDate {
        let next_first = if self.month == 12 {
            NaiveDate::from_ymd_opt(self.year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
        };
        // Fallback only reachable at chrono's maximum representable year.
        next_first
            .map(|d| d - Duration::days(1))
            .unwrap_or(self.first_day())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first_day() && date <= self.last_day()
    }

    /// Number of calendar days in the window (28..=31).
    pub fn num_days(&self) -> i64 {
        (self.last_day() - self.first_day()).num_days() + 1
    }

    /// The following calendar month.
    pub fn succ(&self) -> Window {
        if self.month == 12 {
            Window { year: self.year + 1, month: 1 }
        } else {
            Window { year: self.year, month: self.month + 1 }
        }
    }

    /// The preceding calendar month.
    pub fn pred(&self) -> Window {
        if self.month == 1 {
            Window { year: self.year - 1, month: 12 }
        } else {
            Window { year: self.year, month: self.month - 1 }
        }
    }

    /// Human-readable label, e.g. "February 2024".
    pub fn label(&self) -> String {
        self.first_day().format("%B %Y").to_string()
    }
}

/// A job's span truncated to the viewing window.
///
/// Carries the job's identity and display fields plus the two computed
/// boundary dates; the original `Job` is never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClippedJob {
    pub name: String,
    pub status: String,
    pub estimated_cost: f64,
    /// Original (unclipped) span, kept for display.
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Invariant: `overlap_start <= overlap_end`.
    pub overlap_start: NaiveDate,
    pub overlap_end: NaiveDate,
}

/// New spend recorded on a single date: the sum of `estimated_cost` over all
/// jobs whose `start_date` equals that date (full dataset, not window-clipped).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailySpendPoint {
    pub date: NaiveDate,
    pub new_spend: f64,
}

/// Running total of new spend; one point per daily entry, flat between entries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CumulativePoint {
    pub date: NaiveDate,
    pub running_total: f64,
}

/// Window-scoped KPI scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSnapshot {
    /// Sum of costs for jobs starting on or before the as-of date.
    pub total_spend_to_date: f64,
    /// `total_budget - total_spend_to_date`; may be negative (over budget).
    pub remaining_budget: f64,
    /// Count of jobs whose start date falls inside the window.
    pub jobs_in_window: usize,
    /// Sum of costs for jobs whose start date falls inside the window.
    pub spend_in_window: f64,
    /// `total_spend_to_date / total_budget * 100`, or 0 when the budget is 0.
    pub budget_used_pct: f64,
}

/// Where the raw job rows come from.
#[derive(Debug, Clone)]
pub enum DataSource {
    /// Built-in demo dataset (no credentials needed).
    Demo,
    /// A local CSV export.
    Csv(PathBuf),
    /// A Google Sheets worksheet (requires `SHEETS_API_KEY`).
    Sheet {
        spreadsheet_id: String,
        worksheet: String,
    },
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct DashConfig {
    pub source: DataSource,
    pub window: Window,
    pub total_budget: f64,
    /// Fixed reference "now" for spend-to-date, resolved by the app shell so
    /// the pipeline stays deterministic.
    pub asof_date: NaiveDate,
    /// Freshness window for the snapshot cache, in seconds.
    pub cache_ttl_secs: u64,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export_series: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
}

/// A saved dashboard file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardFile {
    pub tool: String,
    pub asof_date: NaiveDate,
    pub window: Window,
    pub total_budget: f64,
    pub kpis: KpiSnapshot,
    pub daily: Vec<DailySpendPoint>,
    pub cumulative: Vec<CumulativePoint>,
    pub clipped: Vec<ClippedJob>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_rejects_bad_month() {
        assert!(Window::new(2024, 0).is_none());
        assert!(Window::new(2024, 13).is_none());
        assert!(Window::new(2024, 12).is_some());
    }

    #[test]
    fn window_boundaries_leap_february() {
        let w = Window::new(2024, 2).unwrap();
        assert_eq!(w.first_day(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(w.last_day(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(w.num_days(), 29);
    }

    #[test]
    fn window_boundaries_december_rollover() {
        let w = Window::new(2023, 12).unwrap();
        assert_eq!(w.last_day(), NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
        assert_eq!(w.succ(), Window::new(2024, 1).unwrap());
        assert_eq!(Window::new(2024, 1).unwrap().pred(), w);
    }

    #[test]
    fn window_contains_is_inclusive() {
        let w = Window::new(2024, 2).unwrap();
        assert!(w.contains(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()));
        assert!(w.contains(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()));
        assert!(!w.contains(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
        assert!(!w.contains(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()));
    }

    #[test]
    fn window_label_formats_month_name() {
        let w = Window::new(2024, 2).unwrap();
        assert_eq!(w.label(), "February 2024");
    }
}
