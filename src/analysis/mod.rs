/// Analysis pipeline: queries, chart series, and the driver tying them together.
///
/// ```text
///   load_table ──► filter_by_date ──► queries  ──► println!
///                                  └► plots    ──► ChartSink
/// ```

pub mod plots;
pub mod queries;
pub mod regression;
pub mod report;
pub mod series;

use thiserror::Error;

use crate::chart::ChartSink;
use crate::config::AnalysisConfig;
use crate::data::filter::filter_by_date;
use crate::data::loader::{LoadError, load_table};
use crate::data::model::COL_CLOSE_APPROACH_DATE;
use report::AnalysisReport;

/// Why a run stopped early.
#[derive(Debug, Error)]
pub enum RunError {
    /// The input could not be loaded; reported and skipped.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// The table does not fit the expected schema.
    #[error(transparent)]
    Analysis(#[from] anyhow::Error),
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Run the whole analysis: load, filter, print each result as it is computed,
/// and hand the four charts to `sink`. Nothing is displayed here.
pub fn run(config: &AnalysisConfig, sink: &mut dyn ChartSink) -> Result<AnalysisReport, RunError> {
    let table = load_table(&config.data_path)?;
    let table = filter_by_date(&table, COL_CLOSE_APPROACH_DATE, config.cutoff_date)?;

    let shape = queries::shape_summary(&table, &config.dropped_columns());
    println!("{shape}");
    let peak_magnitude = queries::peak_magnitude(&table)?;
    println!("{peak_magnitude}");
    let nearest_approach = queries::nearest_approach(&table)?;
    println!("{nearest_approach}");
    let orbit_counts = queries::orbit_counts(&table)?;
    log::debug!(
        "{} orbit ids covering {} records",
        orbit_counts.entries.len(),
        orbit_counts.total()
    );
    println!("{orbit_counts}");
    let large_diameter_count = queries::large_diameter_count(&table)?;
    println!("{large_diameter_count}");

    plots::plot_diameter_histogram(&table, config.diameter_bins, sink)?;
    plots::plot_orbit_intersection_histogram(&table, config.orbit_intersection_bins, sink)?;
    plots::plot_hazard_pie(&table, sink)?;
    let correlation = plots::plot_speed_vs_distance(&table, sink)?;

    let report = AnalysisReport {
        shape,
        peak_magnitude,
        nearest_approach,
        orbit_counts,
        large_diameter_count,
        correlation,
    };
    match serde_json::to_string(&report) {
        Ok(json) => log::debug!("Report: {json}"),
        Err(e) => log::warn!("Could not serialise report: {e}"),
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::chart::{Chart, ChartQueue};
    use crate::data::model::CellValue;

    const FIXTURE: &str = "\
Neo Reference ID,Name,Absolute Magnitude,Est Dia in KM(min),Est Dia in KM(max),Close Approach Date,Miles per hour,Miss Dist.(kilometers),Orbiting Body,Orbit ID,Minimum Orbit Intersection,Equinox,Hazardous
3703080,3703080,21.6,0.127,0.284,1995-01-01,13326.9,62753692,Earth,17,0.025,J2000,True
3723955,3723955,30.1,0.005,0.011,2005-01-08,36212.4,57298148,Earth,17,0.0123,J2000,False
2446862,2446862,20.3,0.231,0.517,2010-01-15,46970.0,7622911.5,Earth,3,abc,J2000,False
";

    fn fixture_config() -> (tempfile::NamedTempFile, AnalysisConfig) {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(FIXTURE.as_bytes()).unwrap();
        let config = AnalysisConfig::with_data_path(file.path());
        (file, config)
    }

    #[test]
    fn run_filters_then_reports_every_result() {
        let (_file, config) = fixture_config();
        let mut queue = ChartQueue::default();
        let report = run(&config, &mut queue).unwrap();

        assert_eq!(report.shape.rows, 2);
        assert_eq!(report.shape.columns, 10);
        assert!(!report.shape.column_names.iter().any(|c| c == "Equinox"));
        assert_eq!(report.peak_magnitude.name, CellValue::Integer(3723955));
        assert_eq!(report.nearest_approach, CellValue::Integer(2446862));
        assert_eq!(report.orbit_counts.total(), 2);
        assert_eq!(report.large_diameter_count, 1);
        assert_eq!(format!("{:.2}", report.correlation), "-1.00");

        let titles: Vec<&str> = queue.charts.iter().map(Chart::title).collect();
        assert_eq!(titles.len(), 4);
        assert!(matches!(queue.charts[3], Chart::Regression(_)));
    }

    #[test]
    fn run_reports_load_errors_by_kind() {
        let config = AnalysisConfig::with_data_path("missing-survey.csv");
        let err = run(&config, &mut ChartQueue::default()).unwrap_err();
        assert!(matches!(err, RunError::Load(LoadError::NotAvailable(_))));

        let config = AnalysisConfig::with_data_path("survey.json");
        let err = run(&config, &mut ChartQueue::default()).unwrap_err();
        assert!(matches!(err, RunError::Load(LoadError::InvalidFileName(_))));
    }

    #[test]
    fn run_fails_on_schema_errors() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(b"Name,Close Approach Date\na,2010-01-01\n").unwrap();
        let config = AnalysisConfig::with_data_path(file.path());
        let err = run(&config, &mut ChartQueue::default()).unwrap_err();
        assert!(matches!(err, RunError::Analysis(_)));
    }
}
