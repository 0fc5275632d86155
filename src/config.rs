//! Run configuration
//!
//! Every constant of an analysis run lives here. There are no CLI flags or
//! environment overrides; `AnalysisConfig::default()` is the run.

use std::path::PathBuf;

use chrono::NaiveDate;

use crate::data::model::METADATA_COLUMNS;

#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Input file, relative to the working directory
    pub data_path: PathBuf,

    /// Earliest close-approach date kept by the date filter (inclusive)
    pub cutoff_date: NaiveDate,

    /// Bin count of the average-diameter histogram
    pub diameter_bins: usize,

    /// Bin count of the minimum-orbit-intersection histogram
    pub orbit_intersection_bins: usize,

    /// Columns left out of the shape summary
    pub dropped_columns: Vec<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("nasa.csv"),
            cutoff_date: NaiveDate::from_ymd_opt(2000, 1, 1).expect("valid cutoff date"),
            diameter_bins: 100,
            orbit_intersection_bins: 10,
            dropped_columns: METADATA_COLUMNS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl AnalysisConfig {
    /// Default settings reading from another file.
    #[cfg(test)]
    pub fn with_data_path(path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: path.into(),
            ..Self::default()
        }
    }

    pub fn dropped_columns(&self) -> Vec<&str> {
        self.dropped_columns.iter().map(String::as_str).collect()
    }
}
