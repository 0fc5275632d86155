use std::f64::consts::TAU;

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{
    Bar, BarChart, Legend, Line, Plot, PlotPoint, PlotPoints, Points, Polygon, Text,
};

use crate::chart::{Chart, HistogramChart, PieChart, RegressionChart};

// ---------------------------------------------------------------------------
// Chart dispatch (central panel)
// ---------------------------------------------------------------------------

/// Render one chart in the central panel.
pub fn chart_plot(ui: &mut Ui, chart: Option<&Chart>) {
    let Some(chart) = chart else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No charts to show");
        });
        return;
    };

    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(chart.title());
    });

    match chart {
        Chart::Histogram(h) => histogram_plot(ui, h),
        Chart::Pie(p) => pie_plot(ui, p),
        Chart::Regression(r) => regression_plot(ui, r),
    }
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

fn histogram_plot(ui: &mut Ui, chart: &HistogramChart) {
    let bars: Vec<Bar> = chart
        .histogram
        .bars()
        .map(|(center, width, count)| {
            Bar::new(center, count as f64)
                .width(width)
                .fill(chart.fill)
                .stroke(Stroke::new(1.0, chart.edge))
        })
        .collect();

    Plot::new(("histogram", chart.title.as_str()))
        .x_axis_label(chart.x_label.as_str())
        .y_axis_label(chart.y_label.as_str())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(chart.fill));
        });
}

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// Arc resolution, in points per full turn.
const PIE_SEGMENTS: f64 = 360.0;

fn pie_plot(ui: &mut Ui, chart: &PieChart) {
    Plot::new(("pie", chart.title.as_str()))
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            let mut start = chart.start_angle_deg.to_radians();
            for slice in &chart.slices {
                let sweep = slice.fraction * TAU;
                let mid = start + sweep / 2.0;
                let (cx, cy) = (slice.explode * mid.cos(), slice.explode * mid.sin());

                let steps = ((sweep / TAU) * PIE_SEGMENTS).ceil().max(1.0) as usize;
                let mut outline = vec![[cx, cy]];
                outline.extend((0..=steps).map(|i| {
                    let a = start + sweep * i as f64 / steps as f64;
                    [cx + a.cos(), cy + a.sin()]
                }));

                plot_ui.polygon(
                    Polygon::new(PlotPoints::from(outline))
                        .fill_color(slice.color)
                        .stroke(Stroke::new(1.0, Color32::WHITE))
                        .name(format!("{} ({})", slice.label, slice.count)),
                );

                plot_ui.text(Text::new(
                    PlotPoint::new(cx + 1.1 * mid.cos(), cy + 1.1 * mid.sin()),
                    RichText::new(&slice.label).size(14.0),
                ));
                plot_ui.text(Text::new(
                    PlotPoint::new(cx + 0.6 * mid.cos(), cy + 0.6 * mid.sin()),
                    RichText::new(format!("{:.1}%", slice.fraction * 100.0))
                        .color(Color32::BLACK),
                ));

                start += sweep;
            }
        });
}

// ---------------------------------------------------------------------------
// Scatter with fitted line
// ---------------------------------------------------------------------------

fn regression_plot(ui: &mut Ui, chart: &RegressionChart) {
    Plot::new(("regression", chart.title.as_str()))
        .legend(Legend::default())
        .x_axis_label(chart.x_label.as_str())
        .y_axis_label(chart.y_label.as_str())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(PlotPoints::from(chart.points.clone()))
                    .radius(2.5)
                    .color(chart.point_color)
                    .name("Data points"),
            );
            plot_ui.line(
                Line::new(PlotPoints::from(chart.fitted_line()))
                    .color(chart.line_color)
                    .width(2.0)
                    .name("Regression line"),
            );
        });
}
