use eframe::egui::Color32;

use crate::analysis::regression::LinearFit;
use crate::analysis::series::Histogram;

// ---------------------------------------------------------------------------
// Chart descriptions
// ---------------------------------------------------------------------------

/// A fully computed chart, ready for any rendering target.
#[derive(Debug, Clone)]
pub enum Chart {
    Histogram(HistogramChart),
    Pie(PieChart),
    Regression(RegressionChart),
}

impl Chart {
    pub fn title(&self) -> &str {
        match self {
            Chart::Histogram(c) => &c.title,
            Chart::Pie(c) => &c.title,
            Chart::Regression(c) => &c.title,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HistogramChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub histogram: Histogram,
    pub fill: Color32,
    pub edge: Color32,
}

#[derive(Debug, Clone)]
pub struct PieSlice {
    pub label: String,
    pub count: usize,
    /// Share of the whole, in [0, 1].
    pub fraction: f64,
    pub color: Color32,
    /// Radial offset as a fraction of the radius.
    pub explode: f64,
}

#[derive(Debug, Clone)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<PieSlice>,
    /// Angle of the first slice edge, counter-clockwise from the x axis.
    pub start_angle_deg: f64,
}

#[derive(Debug, Clone)]
pub struct RegressionChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<[f64; 2]>,
    pub fit: LinearFit,
    pub point_color: Color32,
    pub line_color: Color32,
}

impl RegressionChart {
    /// End points of the fitted line across the sampled x range.
    pub fn fitted_line(&self) -> Vec<[f64; 2]> {
        let (lo, hi) = self
            .points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &[x, _]| {
                (lo.min(x), hi.max(x))
            });
        if lo > hi {
            return Vec::new();
        }
        vec![[lo, self.fit.predict(lo)], [hi, self.fit.predict(hi)]]
    }
}

// ---------------------------------------------------------------------------
// Rendering targets
// ---------------------------------------------------------------------------

/// Receives charts as the analysis produces them.
pub trait ChartSink {
    fn render(&mut self, chart: Chart);
}

/// Keeps charts in production order for later display.
#[derive(Debug, Default)]
pub struct ChartQueue {
    pub charts: Vec<Chart>,
}

impl ChartSink for ChartQueue {
    fn render(&mut self, chart: Chart) {
        log::debug!("Queued chart '{}'", chart.title());
        self.charts.push(chart);
    }
}

impl ChartQueue {
    pub fn into_charts(self) -> Vec<Chart> {
        self.charts
    }
}
