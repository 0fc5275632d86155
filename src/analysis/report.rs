use serde::Serialize;

use super::queries::{OrbitCounts, PeakMagnitude, ShapeSummary};
use crate::data::model::CellValue;

/// Everything one analysis run produces, in print order. Logged as JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub shape: ShapeSummary,
    pub peak_magnitude: PeakMagnitude,
    pub nearest_approach: CellValue,
    pub orbit_counts: OrbitCounts,
    pub large_diameter_count: usize,
    pub correlation: f64,
}
