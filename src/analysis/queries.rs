use std::collections::HashMap;
use std::fmt;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::data::model::{
    CellValue, RecordTable, COL_ABSOLUTE_MAGNITUDE, COL_DIAMETER_MAX_KM, COL_MISS_DIST_KM,
    COL_NAME, COL_ORBIT_ID,
};

// ---------------------------------------------------------------------------
// Shape summary
// ---------------------------------------------------------------------------

/// Row/column counts after the metadata columns are dropped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeSummary {
    pub rows: usize,
    pub columns: usize,
    pub column_names: Vec<String>,
}

impl fmt::Display for ShapeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.column_names.iter().map(|c| format!("'{c}'")).collect();
        write!(f, "({}, {}, [{}])", self.rows, self.columns, names.join(", "))
    }
}

/// Shape of the table once `dropped` columns are removed (absent ones are ignored).
pub fn shape_summary(table: &RecordTable, dropped: &[&str]) -> ShapeSummary {
    let cleaned = table.drop_columns(dropped);
    ShapeSummary {
        rows: cleaned.len(),
        columns: cleaned.column_names.len(),
        column_names: cleaned.column_names,
    }
}

// ---------------------------------------------------------------------------
// Extremes
// ---------------------------------------------------------------------------

/// The record with the largest absolute magnitude.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeakMagnitude {
    pub name: CellValue,
    pub magnitude: f64,
}

impl fmt::Display for PeakMagnitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {})",
            self.name.repr(),
            CellValue::Float(self.magnitude).repr()
        )
    }
}

/// Index of the first row whose `column` value wins against every earlier one.
/// Rows where the value is missing never take part.
fn first_extreme(
    table: &RecordTable,
    column: &str,
    better: impl Fn(f64, f64) -> bool,
) -> Result<(usize, f64)> {
    table
        .numeric_column(column)?
        .into_iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|v| (i, v)))
        .fold(None, |best: Option<(usize, f64)>, (i, v)| match best {
            Some((_, b)) if !better(v, b) => best,
            _ => Some((i, v)),
        })
        .with_context(|| format!("no values in column '{column}'"))
}

/// Name and value of the row with the maximum absolute magnitude.
/// Ties resolve to the first such row in table order.
pub fn peak_magnitude(table: &RecordTable) -> Result<PeakMagnitude> {
    table.require_column(COL_NAME)?;
    let (idx, magnitude) = first_extreme(table, COL_ABSOLUTE_MAGNITUDE, |v, best| v > best)?;
    Ok(PeakMagnitude {
        name: table.records[idx].get(COL_NAME).clone(),
        magnitude,
    })
}

/// Name of the row with the smallest miss distance (first on ties).
pub fn nearest_approach(table: &RecordTable) -> Result<CellValue> {
    table.require_column(COL_NAME)?;
    let (idx, _) = first_extreme(table, COL_MISS_DIST_KM, |v, best| v < best)?;
    Ok(table.records[idx].get(COL_NAME).clone())
}

// ---------------------------------------------------------------------------
// Orbit grouping
// ---------------------------------------------------------------------------

/// Records per orbit id, most frequent first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrbitCounts {
    pub entries: Vec<(CellValue, usize)>,
}

impl OrbitCounts {
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, n)| n).sum()
    }
}

impl fmt::Display for OrbitCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs: Vec<String> = self
            .entries
            .iter()
            .map(|(id, n)| format!("{}: {n}", id.repr()))
            .collect();
        write!(f, "{{{}}}", pairs.join(", "))
    }
}

/// Count records per distinct `Orbit ID`, sorted by count descending.
/// Equal counts keep the order in which the ids were first seen; missing ids are skipped.
pub fn orbit_counts(table: &RecordTable) -> Result<OrbitCounts> {
    let mut position: HashMap<&CellValue, usize> = HashMap::new();
    let mut entries: Vec<(CellValue, usize)> = Vec::new();

    for id in table.column(COL_ORBIT_ID)? {
        if id.is_null() {
            continue;
        }
        match position.get(id) {
            Some(&i) => entries[i].1 += 1,
            None => {
                position.insert(id, entries.len());
                entries.push((id.clone(), 1));
            }
        }
    }

    // sort_by is stable
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    Ok(OrbitCounts { entries })
}

// ---------------------------------------------------------------------------
// Diameter threshold
// ---------------------------------------------------------------------------

/// Number of rows whose maximum estimated diameter is strictly above the column mean.
pub fn large_diameter_count(table: &RecordTable) -> Result<usize> {
    let values: Vec<f64> = table
        .numeric_column(COL_DIAMETER_MAX_KM)?
        .into_iter()
        .flatten()
        .collect();
    if values.is_empty() {
        return Ok(0);
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    log::debug!("Mean '{COL_DIAMETER_MAX_KM}' over {} rows: {mean}", values.len());
    Ok(values.iter().filter(|&&v| v > mean).count())
}
