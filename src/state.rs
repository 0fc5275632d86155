use crate::chart::Chart;

// ---------------------------------------------------------------------------
// Viewer state
// ---------------------------------------------------------------------------

/// Which queued chart is on screen, independent of rendering.
#[derive(Default)]
pub struct ViewerState {
    /// Charts in the order the analysis produced them.
    pub charts: Vec<Chart>,

    /// Index of the chart currently shown.
    pub current: usize,

    /// Set once the last chart has been dismissed.
    pub finished: bool,
}

impl ViewerState {
    pub fn new(charts: Vec<Chart>) -> Self {
        Self {
            finished: charts.is_empty(),
            charts,
            current: 0,
        }
    }

    pub fn current_chart(&self) -> Option<&Chart> {
        self.charts.get(self.current)
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.charts.len()
    }

    /// Dismiss the current chart and move to the next one.
    pub fn dismiss(&mut self) {
        if self.is_last() {
            self.finished = true;
        } else {
            self.current += 1;
        }
        log::debug!("Dismissed chart; now at {}/{}", self.current + 1, self.charts.len());
    }

    pub fn back(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    /// "2 / 4"-style position label.
    pub fn position_label(&self) -> String {
        format!("{} / {}", self.current + 1, self.charts.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{HistogramChart, PieChart};
    use crate::analysis::series::Histogram;

    fn charts() -> Vec<Chart> {
        vec![
            Chart::Histogram(HistogramChart {
                title: "first".into(),
                x_label: String::new(),
                y_label: String::new(),
                histogram: Histogram::default(),
                fill: crate::color::SKY_BLUE,
                edge: crate::color::EDGE,
            }),
            Chart::Pie(PieChart {
                title: "second".into(),
                slices: Vec::new(),
                start_angle_deg: 90.0,
            }),
        ]
    }

    #[test]
    fn dismissing_walks_charts_in_order() {
        let mut state = ViewerState::new(charts());
        assert_eq!(state.current_chart().map(Chart::title), Some("first"));
        state.dismiss();
        assert_eq!(state.current_chart().map(Chart::title), Some("second"));
        assert_eq!(state.position_label(), "2 / 2");
        assert!(!state.finished);
        state.dismiss();
        assert!(state.finished);
    }

    #[test]
    fn back_stops_at_first_chart() {
        let mut state = ViewerState::new(charts());
        state.back();
        assert_eq!(state.current, 0);
    }

    #[test]
    fn nothing_to_show_is_already_finished() {
        assert!(ViewerState::new(Vec::new()).finished);
    }
}
