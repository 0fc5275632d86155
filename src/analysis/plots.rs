use anyhow::{Context, Result};

use super::regression::LinearFit;
use super::series::{
    distance_speed_pairs, hazard_counts, orbit_intersection_values, present_values,
    with_average_diameter, Histogram,
};
use crate::chart::{Chart, ChartSink, HistogramChart, PieChart, PieSlice, RegressionChart};
use crate::color;
use crate::data::model::{
    RecordTable, COL_AVERAGE_DIAMETER, COL_MILES_PER_HOUR, COL_MIN_ORBIT_INTERSECTION,
    COL_MISS_DIST_KM,
};

// ---------------------------------------------------------------------------
// Histograms
// ---------------------------------------------------------------------------

/// Histogram of the per-row average of the min/max diameter estimates.
pub fn plot_diameter_histogram(
    table: &RecordTable,
    bins: usize,
    sink: &mut dyn ChartSink,
) -> Result<()> {
    let derived = with_average_diameter(table)?;
    let values = present_values(&derived, COL_AVERAGE_DIAMETER)?;
    let histogram = Histogram::compute(&values, bins);
    log::debug!("Average diameter histogram holds {} values", histogram.total());

    sink.render(Chart::Histogram(HistogramChart {
        title: "Distribution of Average diameter size".into(),
        x_label: "Average Diameter (in KM)".into(),
        y_label: "Number of Asteroids".into(),
        histogram,
        fill: color::SKY_BLUE,
        edge: color::EDGE,
    }));
    Ok(())
}

/// Histogram of the minimum orbit intersection after numeric coercion.
pub fn plot_orbit_intersection_histogram(
    table: &RecordTable,
    bins: usize,
    sink: &mut dyn ChartSink,
) -> Result<()> {
    let values = orbit_intersection_values(table)?;
    let histogram = Histogram::compute(&values, bins);
    log::debug!("Orbit intersection histogram holds {} values", histogram.total());

    sink.render(Chart::Histogram(HistogramChart {
        title: "Distribution of Asteroids by Minimum Orbit Intersection".into(),
        x_label: COL_MIN_ORBIT_INTERSECTION.into(),
        y_label: "Number of Asteroids".into(),
        histogram,
        fill: color::LIGHT_GREEN,
        edge: color::EDGE,
    }));
    Ok(())
}

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// Share of hazardous and non-hazardous records; the largest slice is pulled out.
pub fn plot_hazard_pie(table: &RecordTable, sink: &mut dyn ChartSink) -> Result<()> {
    let counts = hazard_counts(table)?;
    let total: usize = counts.iter().map(|(_, n)| n).sum();
    let colors = color::slice_colors(counts.len());

    let slices = counts
        .into_iter()
        .zip(colors)
        .enumerate()
        .map(|(i, ((flag, count), color))| PieSlice {
            label: if flag { "True" } else { "False" }.to_string(),
            count,
            fraction: count as f64 / total as f64,
            color,
            explode: if i == 0 { 0.1 } else { 0.0 },
        })
        .collect();

    sink.render(Chart::Pie(PieChart {
        title: "Percentage of Hazardous and Non-Hazardous Asteroids".into(),
        slices,
        start_angle_deg: 90.0,
    }));
    Ok(())
}

// ---------------------------------------------------------------------------
// Regression
// ---------------------------------------------------------------------------

/// Scatter of speed against miss distance with its least-squares line.
/// Prints and returns the Pearson correlation coefficient.
pub fn plot_speed_vs_distance(table: &RecordTable, sink: &mut dyn ChartSink) -> Result<f64> {
    let (x, y) = distance_speed_pairs(table)?;
    let fit = LinearFit::fit(&x, &y)
        .with_context(|| format!("regressing '{COL_MILES_PER_HOUR}' on '{COL_MISS_DIST_KM}'"))?;
    log::debug!(
        "Fit over {} points: slope={} intercept={} stderr={}",
        fit.n,
        fit.slope,
        fit.intercept,
        fit.std_err
    );

    sink.render(Chart::Regression(RegressionChart {
        title: "Linear Regression: Miss Distance vs Miles per hour".into(),
        x_label: COL_MISS_DIST_KM.into(),
        y_label: COL_MILES_PER_HOUR.into(),
        points: x.into_iter().zip(y).map(|(a, b)| [a, b]).collect(),
        fit,
        point_color: color::SCATTER_BLUE,
        line_color: color::FIT_RED,
    }));

    println!("Pearson correlation coefficient: {:.2}", fit.r_value);
    Ok(fit.r_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartQueue;
    use crate::data::model::tests::table;
    use crate::data::model::{COL_DIAMETER_MAX_KM, COL_DIAMETER_MIN_KM, COL_HAZARDOUS};

    #[test]
    fn diameter_histogram_uses_requested_bins() {
        let t = table(
            &[COL_DIAMETER_MIN_KM, COL_DIAMETER_MAX_KM],
            &[&["0.1", "0.3"], &["1", "2"], &["", ""]],
        );
        let mut queue = ChartQueue::default();
        plot_diameter_histogram(&t, 100, &mut queue).unwrap();
        match &queue.charts[..] {
            [Chart::Histogram(h)] => {
                assert_eq!(h.histogram.counts.len(), 100);
                assert_eq!(h.histogram.total(), 2);
            }
            other => panic!("unexpected charts: {other:?}"),
        }
    }

    #[test]
    fn orbit_intersection_histogram_needs_its_column() {
        let t = table(&[COL_DIAMETER_MIN_KM], &[&["1"]]);
        let mut queue = ChartQueue::default();
        assert!(plot_orbit_intersection_histogram(&t, 10, &mut queue).is_err());
        assert!(queue.charts.is_empty());
    }

    #[test]
    fn hazard_pie_has_labelled_fractions() {
        let t = table(&[COL_HAZARDOUS], &[&["False"], &["True"], &["False"], &["False"]]);
        let mut queue = ChartQueue::default();
        plot_hazard_pie(&t, &mut queue).unwrap();
        let Chart::Pie(pie) = &queue.charts[0] else {
            panic!("expected a pie chart");
        };
        let labels: Vec<&str> = pie.slices.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["False", "True"]);
        assert_eq!(pie.slices[0].fraction, 0.75);
        assert_eq!(pie.slices[0].explode, 0.1);
        assert_eq!(pie.slices[1].explode, 0.0);
    }

    #[test]
    fn regression_returns_correlation_and_queues_chart() {
        let t = table(
            &[COL_MISS_DIST_KM, COL_MILES_PER_HOUR],
            &[&["1", "3"], &["2", "5"], &["", "900"], &["4", "9"]],
        );
        let mut queue = ChartQueue::default();
        let r = plot_speed_vs_distance(&t, &mut queue).unwrap();
        assert_eq!(format!("{r:.2}"), "1.00");
        let Chart::Regression(chart) = &queue.charts[0] else {
            panic!("expected a regression chart");
        };
        assert_eq!(chart.points.len(), 3);
        let line = chart.fitted_line();
        assert_eq!(line.len(), 2);
        assert!((line[1][1] - 9.0).abs() < 1e-9);
    }
}
