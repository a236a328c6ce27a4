//! Ratatui-based terminal UI.
//!
//! The TUI shows the month's Gantt bars, KPI cards, and the spend chart, with
//! month navigation and snapshot refresh. It reuses the same pipeline as
//! `siteplan show`; only the presentation differs.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
    Terminal,
};

use crate::app::pipeline::{run_with_table, RunOutput};
use crate::cli::ShowArgs;
use crate::data::SnapshotCache;
use crate::domain::{ClippedJob, DashConfig};
use crate::error::{AppError, EXIT_RUNTIME};
use crate::report::fmt_money;

mod spend_chart;

use spend_chart::SpendPlottersChart;

/// Start the TUI.
pub fn run(args: ShowArgs) -> Result<(), AppError> {
    let config = crate::app::dash_config_from_args(&args)?;

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(config)?;
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(EXIT_RUNTIME, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(EXIT_RUNTIME, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    config: DashConfig,
    cache: SnapshotCache,
    run: Option<RunOutput>,
    status: String,
}

impl App {
    fn new(config: DashConfig) -> Result<Self, AppError> {
        let cache = SnapshotCache::new(Duration::from_secs(config.cache_ttl_secs));
        let mut app = Self {
            config,
            cache,
            run: None,
            status: "Fetching job data...".to_string(),
        };
        app.recompute()?;
        Ok(app)
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(EXIT_RUNTIME, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code)? {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) -> Result<bool, AppError> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
            KeyCode::Left => {
                self.config.window = self.config.window.pred();
                self.recompute()?;
                self.status = format!("month: {}", self.config.window.label());
            }
            KeyCode::Right => {
                self.config.window = self.config.window.succ();
                self.recompute()?;
                self.status = format!("month: {}", self.config.window.label());
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.config.total_budget += 50_000.0;
                self.recompute()?;
                self.status = format!("budget: {}", fmt_money(self.config.total_budget));
            }
            KeyCode::Char('-') => {
                self.config.total_budget = (self.config.total_budget - 50_000.0).max(0.0);
                self.recompute()?;
                self.status = format!("budget: {}", fmt_money(self.config.total_budget));
            }
            KeyCode::Char('r') => {
                self.cache.invalidate();
                self.recompute()?;
                self.status = "Refreshed job data.".to_string();
            }
            _ => {}
        }

        Ok(false)
    }

    /// Re-run validate/clip/aggregate over the (possibly cached) snapshot.
    ///
    /// Month navigation and budget changes land here; only `r` invalidates
    /// the cache, so navigation never hits the network.
    fn recompute(&mut self) -> Result<(), AppError> {
        let source = self.config.source.clone();
        let (table, age) = self
            .cache
            .get_or_fetch(|| crate::app::pipeline::fetch_table(&source))?;

        let run = run_with_table(&self.config, table)?;
        self.run = Some(run);
        if age > Duration::ZERO {
            self.status = format!("snapshot age: {}s", age.as_secs());
        }
        Ok(())
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(5),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_kpis(frame, chunks[1]);
        self.draw_body(frame, chunks[2]);
        self.draw_footer(frame, chunks[3]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("siteplan", Style::default().fg(Color::Cyan)),
            Span::raw(" — construction job schedule"),
        ]));

        let (rows_used, rows_read, warnings) = self
            .run
            .as_ref()
            .map(|r| {
                (
                    r.validated.rows_used,
                    r.validated.rows_read,
                    r.validated.warnings.len(),
                )
            })
            .unwrap_or((0, 0, 0));

        lines.push(Line::from(Span::styled(
            format!(
                "source: {} | month: {} | as of {} | rows: {rows_used}/{rows_read} ({warnings} skipped)",
                crate::report::source_label(&self.config.source),
                self.config.window.label(),
                self.config.asof_date,
            ),
            Style::default().fg(Color::Gray),
        )));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_kpis(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let Some(run) = &self.run else {
            return;
        };
        let kpis = &run.analysis.kpis;

        let cards = [
            ("Spend to Date", fmt_money(kpis.total_spend_to_date), Color::Cyan),
            (
                "Remaining Budget",
                fmt_money(kpis.remaining_budget),
                if kpis.remaining_budget < 0.0 { Color::Red } else { Color::Green },
            ),
            ("Jobs This Month", kpis.jobs_in_window.to_string(), Color::White),
            ("Spend This Month", fmt_money(kpis.spend_in_window), Color::White),
            (
                "Budget Used",
                format!("{:.1}%", kpis.budget_used_pct),
                if kpis.budget_used_pct > 100.0 { Color::Red } else { Color::White },
            ),
        ];

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 5); 5])
            .split(area);

        for ((title, value, color), rect) in cards.into_iter().zip(chunks.iter()) {
            let p = Paragraph::new(Line::from(Span::styled(
                value,
                Style::default().fg(color),
            )))
            .block(Block::default().title(title).borders(Borders::ALL));
            frame.render_widget(p, *rect);
        }
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Min(0)])
            .split(area);

        self.draw_gantt(frame, chunks[0]);
        self.draw_chart(frame, chunks[1]);
    }

    fn draw_gantt(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let title = format!("Schedule — {}", self.config.window.label());
        let block = Block::default().title(title).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(run) = &self.run else {
            return;
        };
        if run.clipped.is_empty() {
            let msg = Paragraph::new("No jobs scheduled for this month.")
                .style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        }

        let name_col = 22usize;
        let bar_width = (inner.width as usize).saturating_sub(name_col + 2);
        let lines: Vec<Line> = run
            .clipped
            .iter()
            .take(inner.height as usize)
            .map(|c| gantt_line(c, self.config.window, name_col, bar_width))
            .collect();

        frame.render_widget(Paragraph::new(Text::from(lines)), inner);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Budget Spend").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(run) = &self.run else {
            let msg = Paragraph::new("Waiting for data...")
                .style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        };

        let Some(series) = chart_series(run, self.config.total_budget) else {
            let msg = Paragraph::new("No job starts recorded.")
                .style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        };

        let widget = SpendPlottersChart {
            cumulative: &series.cumulative,
            daily: &series.daily,
            budget: self.config.total_budget,
            x_bounds: series.x_bounds,
            y_bounds: series.y_bounds,
            x_label: "days since first start",
            y_label: "spend ($k)".to_string(),
            fmt_x: fmt_axis_days,
            fmt_y: fmt_axis_dollars_k,
        };
        frame.render_widget(widget, inner);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "←/→ month  +/- budget  r refresh  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// One Gantt row: padded name, colored span bar, cost.
fn gantt_line(c: &ClippedJob, window: crate::domain::Window, name_col: usize, bar_width: usize) -> Line<'static> {
    let days = window.num_days().max(1) as usize;
    let first = window.first_day();

    let mut name: String = c.name.chars().take(name_col).collect();
    while name.chars().count() < name_col {
        name.push(' ');
    }

    let s = (c.overlap_start - first).num_days() as usize;
    let e = (c.overlap_end - first).num_days() as usize;
    let cell = |day: usize| (day * bar_width) / days;

    let lead = cell(s);
    let span = (cell(e) + 1).min(bar_width).saturating_sub(lead).max(1);
    let trail = bar_width.saturating_sub(lead + span);

    Line::from(vec![
        Span::raw(name),
        Span::raw(" ".repeat(lead)),
        Span::styled(
            "█".repeat(span),
            Style::default().fg(status_color(&c.status)),
        ),
        Span::raw(" ".repeat(trail)),
        Span::raw(format!(" {}", fmt_money(c.estimated_cost))),
    ])
}

/// Status palette, matching the report's legend.
fn status_color(status: &str) -> Color {
    if status.eq_ignore_ascii_case("planned") {
        Color::Yellow
    } else if status.eq_ignore_ascii_case("in progress") {
        Color::Blue
    } else if status.eq_ignore_ascii_case("completed") {
        Color::Green
    } else if status.eq_ignore_ascii_case("on hold") {
        Color::Red
    } else if status.eq_ignore_ascii_case("cancelled") {
        Color::Gray
    } else {
        Color::White
    }
}

struct ChartSeries {
    cumulative: Vec<(f64, f64)>,
    daily: Vec<(f64, f64)>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
}

/// Build Plotters series from a run: x is days since the first start date.
fn chart_series(run: &RunOutput, budget: f64) -> Option<ChartSeries> {
    let first = run.analysis.daily.first()?.date;

    let to_x = |date: chrono::NaiveDate| (date - first).num_days() as f64;

    let daily: Vec<(f64, f64)> = run
        .analysis
        .daily
        .iter()
        .map(|p| (to_x(p.date), p.new_spend))
        .collect();
    let cumulative: Vec<(f64, f64)> = run
        .analysis
        .cumulative
        .iter()
        .map(|p| (to_x(p.date), p.running_total))
        .collect();

    let x_max = daily.last().map(|&(x, _)| x).unwrap_or(0.0).max(1.0);
    let y_max = cumulative
        .last()
        .map(|&(_, y)| y)
        .unwrap_or(0.0)
        .max(budget)
        .max(1.0);

    Some(ChartSeries {
        cumulative,
        daily,
        x_bounds: [0.0, x_max],
        y_bounds: [0.0, y_max * 1.05],
    })
}

fn fmt_axis_days(v: f64) -> String {
    format!("{v:.0}")
}

fn fmt_axis_dollars_k(v: f64) -> String {
    format!("{:.0}k", v / 1_000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_palette_matches_known_labels() {
        assert_eq!(status_color("Planned"), Color::Yellow);
        assert_eq!(status_color("In Progress"), Color::Blue);
        assert_eq!(status_color("Completed"), Color::Green);
        assert_eq!(status_color("On Hold"), Color::Red);
        assert_eq!(status_color("Cancelled"), Color::Gray);
        assert_eq!(status_color("Custom Phase"), Color::White);
    }

    #[test]
    fn chart_series_scales_to_budget() {
        use crate::domain::{DashConfig, DataSource, Window};
        let config = DashConfig {
            source: DataSource::Demo,
            window: Window::new(2024, 3).unwrap(),
            total_budget: 1_000_000.0,
            asof_date: chrono::NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            cache_ttl_secs: 300,
            plot: false,
            plot_width: 80,
            plot_height: 20,
            export_series: None,
            export_json: None,
        };
        let run = crate::app::pipeline::run_dashboard(&config).unwrap();
        let series = chart_series(&run, config.total_budget).unwrap();

        assert_eq!(series.x_bounds[0], 0.0);
        // Demo spend stays under budget, so the budget line sets the y scale.
        assert_eq!(series.y_bounds[1], 1_000_000.0 * 1.05);
        assert_eq!(series.daily.len(), run.analysis.daily.len());
    }
}
