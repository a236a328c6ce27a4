//! ASCII rendering of the Gantt and spend charts.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Gantt elements: `#` span cell, `.` off-span day.
//! Spend elements: `#` daily new-spend bars, `*` cumulative running total.

use crate::domain::{ClippedJob, CumulativePoint, DailySpendPoint, Window};
use crate::report::{fmt_money, truncate};

const NAME_COL: usize = 24;

/// Render the month schedule: one row per clipped job, one column per
/// calendar day of the window.
pub fn render_gantt(clipped: &[ClippedJob], window: Window) -> String {
    let days = window.num_days() as usize;

    let mut out = String::new();
    out.push_str(&format!(
        "Gantt: {} [{} .. {}]\n",
        window.label(),
        window.first_day(),
        window.last_day()
    ));

    if clipped.is_empty() {
        out.push_str("(no jobs overlap this month)\n");
        return out;
    }

    // Day-of-month ruler, tens digit dropped (columns are narrow).
    let ruler: String = (1..=days)
        .map(|d| char::from_digit((d % 10) as u32, 10).unwrap_or('?'))
        .collect();
    out.push_str(&format!("{:<NAME_COL$} {ruler}\n", ""));

    for c in clipped {
        let s = (c.overlap_start - window.first_day()).num_days() as usize;
        let e = (c.overlap_end - window.first_day()).num_days() as usize;
        let bar: String = (0..days)
            .map(|i| if i >= s && i <= e { '#' } else { '.' })
            .collect();
        out.push_str(&format!(
            "{:<NAME_COL$} {bar} {}\n",
            truncate(&c.name, NAME_COL),
            fmt_money(c.estimated_cost)
        ));
    }

    out
}

/// Render daily new-spend bars with the cumulative running total overlaid.
///
/// The two series share the x axis (the observed start-date range) but are
/// scaled independently; the header states both maxima.
pub fn render_spend_chart(
    daily: &[DailySpendPoint],
    cumulative: &[CumulativePoint],
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (Some(first), Some(last)) = (daily.first(), daily.last()) else {
        return "Spend: (no job starts recorded)\n".to_string();
    };

    let max_daily = daily.iter().map(|p| p.new_spend).fold(0.0_f64, f64::max);
    let max_cum = cumulative
        .last()
        .map(|p| p.running_total)
        .unwrap_or_default();

    let mut out = String::new();
    out.push_str(&format!(
        "Spend: {} .. {} | daily `#` max={} | cumulative `*` max={}\n",
        first.date,
        last.date,
        fmt_money(max_daily),
        fmt_money(max_cum)
    ));

    // Dates and values come from a saved file as well as live runs, so both
    // mappings are clamped to the grid: out-of-range input must not panic.
    let span_days = (last.date - first.date).num_days().max(1) as f64;
    let map_x = |date: chrono::NaiveDate| -> usize {
        let u = (date - first.date).num_days() as f64 / span_days;
        (((width - 1) as f64) * u).round().clamp(0.0, (width - 1) as f64) as usize
    };

    let mut grid = vec![vec![' '; width]; height];

    // Bars first so the cumulative markers can overlay them.
    for p in daily {
        let x = map_x(p.date);
        let levels = if max_daily > 0.0 {
            (((height - 1) as f64 * p.new_spend / max_daily).round() as usize).min(height - 1)
        } else {
            0
        };
        for l in 0..=levels {
            grid[height - 1 - l][x] = '#';
        }
    }

    for p in cumulative {
        let x = map_x(p.date);
        let y = if max_cum > 0.0 {
            (((height - 1) as f64 * p.running_total / max_cum).round() as usize).min(height - 1)
        } else {
            0
        };
        grid[height - 1 - y][x] = '*';
    }

    for row in grid {
        let line: String = row.into_iter().collect();
        out.push_str(line.trim_end());
        out.push('\n');
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

    #[test]
    fn gantt_marks_exactly_the_overlap_days() {
        let clipped = vec![ClippedJob {
            name: "Foundation Work".to_string(),
            status: "In Progress".to_string(),
            estimated_cost: 50_000.0,
            start_date: date(2024, 1, 15),
            end_date: date(2024, 2, 10),
            overlap_start: date(2024, 2, 1),
            overlap_end: date(2024, 2, 10),
        }];
        let window = Window::new(2024, 2).unwrap();
        let text = render_gantt(&clipped, window);

        let bar_line = text
            .lines()
            .find(|l| l.starts_with("Foundation Work"))
            .unwrap();
        // 10 span days then 19 off days (leap February).
        assert!(bar_line.contains(&format!("{}{}", "#".repeat(10), ".".repeat(19))));
        assert!(bar_line.ends_with("$50,000"));
    }

    #[test]
    fn gantt_reports_empty_months() {
        let text = render_gantt(&[], Window::new(2024, 2).unwrap());
        assert!(text.contains("no jobs overlap"));
    }

    #[test]
    fn spend_chart_is_deterministic_and_scaled() {
        let daily = vec![
            DailySpendPoint { date: date(2024, 1, 15), new_spend: 50_000.0 },
            DailySpendPoint { date: date(2024, 3, 1), new_spend: 75_000.0 },
        ];
        let cumulative = vec![
            CumulativePoint { date: date(2024, 1, 15), running_total: 50_000.0 },
            CumulativePoint { date: date(2024, 3, 1), running_total: 125_000.0 },
        ];

        let a = render_spend_chart(&daily, &cumulative, 40, 10);
        let b = render_spend_chart(&daily, &cumulative, 40, 10);
        assert_eq!(a, b);
        assert!(a.contains("max=$75,000"));
        assert!(a.contains("max=$125,000"));
        // The final cumulative marker sits on the top row.
        let top_row = a.lines().nth(1).unwrap();
        assert!(top_row.contains('*'));
    }

    #[test]
    fn spend_chart_clamps_misaligned_series() {
        // A hand-edited dashboard file can carry cumulative dates past the
        // daily range (or totals above the final entry); the renderer must
        // clamp to the grid rather than index out of bounds.
        let daily = vec![DailySpendPoint { date: date(2024, 1, 1), new_spend: 10_000.0 }];
        let cumulative = vec![
            CumulativePoint { date: date(2024, 3, 1), running_total: 25_000.0 },
            CumulativePoint { date: date(2023, 12, 1), running_total: 10_000.0 },
        ];
        let text = render_spend_chart(&daily, &cumulative, 40, 10);
        assert!(text.starts_with("Spend:"));
        assert!(text.lines().count() > 1);
    }

    #[test]
    fn spend_chart_handles_no_data() {
        let text = render_spend_chart(&[], &[], 40, 10);
        assert!(text.contains("no job starts"));
    }
}
