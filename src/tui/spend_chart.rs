//! Plotters-powered spend chart widget for Ratatui.
//!
//! Why Plotters instead of Ratatui's built-in `Chart` widget?
//! - nicer axis + mesh rendering
//! - less manual work for ticks/labels
//! - easy to extend later (legend, annotations, exportable PNG/SVG backends, etc.)
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// A lightweight, render-only chart description.
///
/// The widget is intentionally data-driven: all series and bounds are computed
/// outside the render call. This keeps `render()` focused on drawing and makes
/// it easy to test the data prep separately.
pub struct SpendPlottersChart<'a> {
    /// Step line for the cumulative running total.
    pub cumulative: &'a [(f64, f64)],
    /// Scatter series for daily new spend.
    pub daily: &'a [(f64, f64)],
    /// Total budget, drawn as a horizontal reference line.
    pub budget: f64,
    /// X bounds (days since first recorded start date).
    pub x_bounds: [f64; 2],
    /// Y bounds (dollars).
    pub y_bounds: [f64; 2],
    /// Axis labels (kept simple for terminal rendering).
    pub x_label: &'a str,
    pub y_label: String,
    /// Formatting of tick labels.
    pub fmt_x: fn(f64) -> String,
    pub fmt_y: fn(f64) -> String,
}

impl<'a> Widget for SpendPlottersChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
        // In that case, we render a small hint rather than panicking.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let x0 = self.x_bounds[0];
        let x1 = self.x_bounds[1];
        let y0 = self.y_bounds[0];
        let y1 = self.y_bounds[1];

        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite())
            || x1 <= x0
            || y1 <= y0
        {
            return;
        }

        // `plotters-ratatui-backend` draws Plotters primitives via Ratatui's
        // `Canvas` widget, which ultimately writes to the terminal buffer.
        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                // Small margins keep the chart readable without wasting space.
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 8)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            // Axes + tick labels. Mesh lines are disabled to reduce clutter in
            // low-resolution terminal rendering.
            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc(self.x_label)
                .y_desc(&self.y_label)
                .x_labels(5)
                .y_labels(5)
                .x_label_formatter(&|v| (self.fmt_x)(*v))
                .y_label_formatter(&|v| (self.fmt_y)(*v))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            // Series styling: keep the palette high-contrast for terminal readability.
            let cumulative_color = RGBColor(0, 255, 255); // cyan
            let daily_color = RGBColor(0, 255, 0); // green
            let budget_color = RGBColor(255, 0, 0); // red

            // 1) Budget reference line.
            if self.budget >= y0 && self.budget <= y1 {
                chart.draw_series(LineSeries::new(
                    [(x0, self.budget), (x1, self.budget)],
                    &budget_color,
                ))?;
            }

            // 2) Cumulative running total.
            chart.draw_series(LineSeries::new(
                self.cumulative.iter().copied(),
                &cumulative_color,
            ))?;

            // 3) Daily new-spend markers.
            //
            // `Pixel` rather than `Circle`: the underlying backend currently maps
            // circle radii incorrectly (pixel radius -> normalized canvas units),
            // producing huge circles. A colored pixel reads cleanly in terminals.
            chart.draw_series(
                self.daily
                    .iter()
                    .map(|&(x, y)| Pixel::new((x, y), daily_color)),
            )?;

            Ok(())
        });

        widget.render(area, buf);
    }
}
