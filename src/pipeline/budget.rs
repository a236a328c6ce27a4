//! Budget aggregation: spend series and KPI scalars.
//!
//! Spend is attributed to a job's START date. The daily/cumulative series
//! span the full project timeline (never window-clipped), while the
//! window-scoped KPIs use start-date membership — intentionally different
//! from the clipper's span-overlap rule.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::{CumulativePoint, DailySpendPoint, Job, KpiSnapshot, Window};
use crate::pipeline::PipelineError;

/// Everything the budget charts and KPI cards consume.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetAnalysis {
    /// Sparse: one point per distinct start date present in the data,
    /// ascending. Dates with no job starts are not materialized.
    pub daily: Vec<DailySpendPoint>,
    /// One point per daily entry; flat between entries.
    pub cumulative: Vec<CumulativePoint>,
    pub kpis: KpiSnapshot,
}

/// Aggregate the full job set into spend series and window-scoped KPIs.
///
/// `asof_date` is the caller-provided reference "now" for spend-to-date;
/// the aggregator never reads the wall clock.
pub fn aggregate(
    jobs: &[Job],
    total_budget: f64,
    window: Window,
    asof_date: NaiveDate,
) -> Result<BudgetAnalysis, PipelineError> {
    if !total_budget.is_finite() || total_budget < 0.0 {
        return Err(PipelineError::InvalidBudget(total_budget));
    }

    // BTreeMap keeps the buckets sorted by date.
    let mut buckets: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for job in jobs {
        *buckets.entry(job.start_date).or_insert(0.0) += job.estimated_cost;
    }

    let daily: Vec<DailySpendPoint> = buckets
        .iter()
        .map(|(&date, &new_spend)| DailySpendPoint { date, new_spend })
        .collect();

    let mut running_total = 0.0;
    let cumulative: Vec<CumulativePoint> = daily
        .iter()
        .map(|p| {
            running_total += p.new_spend;
            CumulativePoint {
                date: p.date,
                running_total,
            }
        })
        .collect();

    let total_spend_to_date: f64 = jobs
        .iter()
        .filter(|j| j.start_date <= asof_date)
        .map(|j| j.estimated_cost)
        .sum();

    let in_window: Vec<&Job> = jobs.iter().filter(|j| window.contains(j.start_date)).collect();
    let spend_in_window: f64 = in_window.iter().map(|j| j.estimated_cost).sum();

    let budget_used_pct = if total_budget > 0.0 {
        total_spend_to_date / total_budget * 100.0
    } else {
        0.0
    };

    let kpis = KpiSnapshot {
        total_spend_to_date,
        // Unclamped: going over budget must show as a negative remainder.
        remaining_budget: total_budget - total_spend_to_date,
        jobs_in_window: in_window.len(),
        spend_in_window,
        budget_used_pct,
    };

    Ok(BudgetAnalysis {
        daily,
        cumulative,
        kpis,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn job(name: &str, start: NaiveDate, cost: f64) -> Job {
        Job {
            name: name.to_string(),
            start_date: start,
            end_date: start + chrono::Duration::days(30),
            estimated_cost: cost,
            estimated_duration: 30,
            status: "Planned".to_string(),
        }
    }

    #[test]
    fn negative_budget_is_rejected() {
        let err = aggregate(&[], -1.0, Window::new(2024, 2).unwrap(), date(2024, 2, 1));
        assert_eq!(err, Err(PipelineError::InvalidBudget(-1.0)));
    }

    #[test]
    fn same_day_starts_share_a_bucket() {
        let d = date(2024, 2, 5);
        let jobs = vec![job("A", d, 10_000.0), job("B", d, 5_000.0), job("C", date(2024, 2, 7), 1_000.0)];
        let out = aggregate(&jobs, 100_000.0, Window::new(2024, 2).unwrap(), d).unwrap();
        assert_eq!(out.daily.len(), 2);
        assert_eq!(out.daily[0].new_spend, 15_000.0);
        assert_eq!(out.daily[1].new_spend, 1_000.0);
    }

    #[test]
    fn cumulative_series_is_monotone_for_non_negative_costs() {
        let jobs = vec![
            job("A", date(2024, 1, 15), 50_000.0),
            job("B", date(2024, 3, 1), 75_000.0),
            job("C", date(2024, 2, 10), 0.0),
        ];
        let out = aggregate(&jobs, 1_000_000.0, Window::new(2024, 2).unwrap(), date(2024, 12, 31)).unwrap();
        for pair in out.cumulative.windows(2) {
            assert!(pair[1].running_total >= pair[0].running_total);
            assert!(pair[1].date > pair[0].date);
        }
        assert_eq!(out.cumulative.last().unwrap().running_total, 125_000.0);
    }

    #[test]
    fn spend_to_date_respects_the_asof_cutoff() {
        let jobs = vec![
            job("A", date(2024, 1, 15), 50_000.0),
            job("B", date(2024, 3, 1), 75_000.0),
        ];
        let out = aggregate(&jobs, 1_000_000.0, Window::new(2024, 2).unwrap(), date(2024, 1, 31)).unwrap();
        assert_eq!(out.kpis.total_spend_to_date, 50_000.0);
        // The series itself still spans the full timeline.
        assert_eq!(out.daily.len(), 2);
    }

    #[test]
    fn remaining_budget_identity_holds_even_when_negative() {
        let jobs = vec![job("A", date(2024, 1, 15), 150_000.0)];
        let budget = 100_000.0;
        let out = aggregate(&jobs, budget, Window::new(2024, 1).unwrap(), date(2024, 12, 31)).unwrap();
        assert!(out.kpis.remaining_budget < 0.0);
        assert_eq!(out.kpis.remaining_budget + out.kpis.total_spend_to_date, budget);
        assert_eq!(out.kpis.budget_used_pct, 150.0);
    }

    #[test]
    fn zero_budget_avoids_percentage_blowup() {
        let jobs = vec![job("A", date(2024, 1, 15), 1_000.0)];
        let out = aggregate(&jobs, 0.0, Window::new(2024, 1).unwrap(), date(2024, 12, 31)).unwrap();
        assert_eq!(out.kpis.budget_used_pct, 0.0);
        assert_eq!(out.kpis.remaining_budget, -1_000.0);
    }

    #[test]
    fn window_membership_uses_start_date_only() {
        // Spans February but starts in January: excluded from window KPIs.
        let jobs = vec![
            job("Jan", date(2024, 1, 15), 50_000.0),
            job("Feb", date(2024, 2, 2), 20_000.0),
        ];
        let out = aggregate(&jobs, 1_000_000.0, Window::new(2024, 2).unwrap(), date(2024, 12, 31)).unwrap();
        assert_eq!(out.kpis.jobs_in_window, 1);
        assert_eq!(out.kpis.spend_in_window, 20_000.0);
    }

    #[test]
    fn empty_job_set_yields_empty_series_and_zero_kpis() {
        let out = aggregate(&[], 100_000.0, Window::new(2024, 2).unwrap(), date(2024, 2, 1)).unwrap();
        assert!(out.daily.is_empty());
        assert!(out.cumulative.is_empty());
        assert_eq!(out.kpis.total_spend_to_date, 0.0);
        assert_eq!(out.kpis.remaining_budget, 100_000.0);
        assert_eq!(out.kpis.jobs_in_window, 0);
    }
}
