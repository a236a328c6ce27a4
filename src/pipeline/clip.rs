//! Month clipping for Gantt display.
//!
//! For each job, compute the portion of its span that overlaps the viewing
//! window. Jobs with no overlap are silently excluded — absence of overlap
//! is a normal filtering outcome, not an error.

use crate::domain::{ClippedJob, Job, Window};

/// Clip each job's span to the window boundaries, dropping jobs that do not
/// intersect the window. Output preserves the input ordering (chart rows
/// stay stable across re-runs).
pub fn clip_to_window(jobs: &[Job], window: Window) -> Vec<ClippedJob> {
    let mut out = Vec::new();
    for job in jobs {
        let overlap_start = job.start_date.max(window.first_day());
        let overlap_end = job.end_date.min(window.last_day());
        if overlap_start > overlap_end {
            continue;
        }
        out.push(ClippedJob {
            name: job.name.clone(),
            status: job.status.clone(),
            estimated_cost: job.estimated_cost,
            start_date: job.start_date,
            end_date: job.end_date,
            overlap_start,
            overlap_end,
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn job(name: &str, start: NaiveDate, end: NaiveDate) -> Job {
        Job {
            name: name.to_string(),
            start_date: start,
            end_date: end,
            estimated_cost: 1_000.0,
            estimated_duration: 10,
            status: "Planned".to_string(),
        }
    }

    #[test]
    fn spans_are_truncated_to_month_boundaries() {
        let jobs = vec![job("A", date(2024, 1, 15), date(2024, 2, 28))];
        let window = Window::new(2024, 2).unwrap();
        let clipped = clip_to_window(&jobs, window);
        assert_eq!(clipped.len(), 1);
        assert_eq!(clipped[0].overlap_start, date(2024, 2, 1));
        assert_eq!(clipped[0].overlap_end, date(2024, 2, 28));
        // Original span is preserved for display.
        assert_eq!(clipped[0].start_date, date(2024, 1, 15));
    }

    #[test]
    fn non_overlapping_jobs_are_silently_excluded() {
        let jobs = vec![
            job("Before", date(2023, 11, 1), date(2023, 12, 31)),
            job("After", date(2024, 3, 1), date(2024, 4, 15)),
        ];
        let clipped = clip_to_window(&jobs, Window::new(2024, 2).unwrap());
        assert!(clipped.is_empty());
    }

    #[test]
    fn output_is_an_ordered_subset_with_valid_overlaps() {
        let jobs = vec![
            job("A", date(2024, 2, 10), date(2024, 2, 12)),
            job("B", date(2024, 1, 1), date(2024, 12, 31)),
            job("C", date(2024, 3, 1), date(2024, 3, 2)),
            job("D", date(2024, 2, 29), date(2024, 3, 15)),
        ];
        let window = Window::new(2024, 2).unwrap();
        let clipped = clip_to_window(&jobs, window);

        let names: Vec<&str> = clipped.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "D"]);

        for c in &clipped {
            assert!(c.overlap_start <= c.overlap_end);
            assert!(c.overlap_start >= window.first_day());
            assert!(c.overlap_end <= window.last_day());
            // Each output row corresponds to exactly one input job.
            assert_eq!(jobs.iter().filter(|j| j.name == c.name).count(), 1);
        }
    }

    #[test]
    fn single_day_overlap_is_kept() {
        let jobs = vec![job("Edge", date(2024, 1, 1), date(2024, 2, 1))];
        let clipped = clip_to_window(&jobs, Window::new(2024, 2).unwrap());
        assert_eq!(clipped.len(), 1);
        assert_eq!(clipped[0].overlap_start, clipped[0].overlap_end);
    }
}
