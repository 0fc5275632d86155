use std::collections::BTreeMap;
use std::fmt;

use anyhow::{Result, bail};
use chrono::{NaiveDateTime, NaiveTime};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Column names of the close-approach dataset
// ---------------------------------------------------------------------------

pub const COL_NAME: &str = "Name";
pub const COL_CLOSE_APPROACH_DATE: &str = "Close Approach Date";
pub const COL_ABSOLUTE_MAGNITUDE: &str = "Absolute Magnitude";
pub const COL_MISS_DIST_KM: &str = "Miss Dist.(kilometers)";
pub const COL_MILES_PER_HOUR: &str = "Miles per hour";
pub const COL_ORBIT_ID: &str = "Orbit ID";
pub const COL_DIAMETER_MIN_KM: &str = "Est Dia in KM(min)";
pub const COL_DIAMETER_MAX_KM: &str = "Est Dia in KM(max)";
pub const COL_MIN_ORBIT_INTERSECTION: &str = "Minimum Orbit Intersection";
pub const COL_HAZARDOUS: &str = "Hazardous";

/// Derived column added by the diameter histogram.
pub const COL_AVERAGE_DIAMETER: &str = "Average Diameter";

/// Metadata columns left out of the shape summary.
pub const METADATA_COLUMNS: [&str; 3] = ["Neo Reference ID", "Orbiting Body", "Equinox"];

// ---------------------------------------------------------------------------
// CellValue – a single cell of the table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell, inferred per value when the CSV is read.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// Normalised close-approach timestamp; only the calendar date is compared.
    Date(NaiveDateTime),
    Null,
}

// -- Manual Eq/Hash so values can key the orbit grouping --

impl Eq for CellValue {}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::String(s) => s.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Bool(b) => b.hash(state),
            CellValue::Date(d) => d.hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(true) => write!(f, "True"),
            CellValue::Bool(false) => write!(f, "False"),
            CellValue::Date(d) if d.time() == NaiveTime::MIN => write!(f, "{}", d.date()),
            CellValue::Date(d) => write!(f, "{d}"),
            CellValue::Null => write!(f, "NaN"),
        }
    }
}

impl CellValue {
    /// Interpret the value as an `f64`. Missing and non-numeric cells yield `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) if !v.is_nan() => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Missing marker, including a float NaN that slipped through parsing.
    pub fn is_null(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::Float(v) => v.is_nan(),
            _ => false,
        }
    }

    /// Infer a typed value from raw CSV text.
    pub fn infer(s: &str) -> Self {
        const MISSING: [&str; 11] = [
            "", "NA", "N/A", "NaN", "nan", "-NaN", "null", "NULL", "None", "#N/A", "<NA>",
        ];
        let s = s.trim();
        if MISSING.contains(&s) {
            return CellValue::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return CellValue::Float(f);
        }
        match s {
            "True" | "TRUE" | "true" => CellValue::Bool(true),
            "False" | "FALSE" | "false" => CellValue::Bool(false),
            _ => CellValue::String(s.to_string()),
        }
    }

    /// Quoted form used inside printed tuples and mappings.
    pub fn repr(&self) -> String {
        match self {
            CellValue::String(s) => format!("'{s}'"),
            CellValue::Date(_) => format!("'{self}'"),
            CellValue::Float(v) if v.fract() == 0.0 && v.is_finite() => format!("{v:.1}"),
            other => other.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the table
// ---------------------------------------------------------------------------

/// A single close-approach record: column name → value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub cells: BTreeMap<String, CellValue>,
}

static MISSING_CELL: CellValue = CellValue::Null;

impl Record {
    /// Value of `column`, treating an absent cell as missing.
    pub fn get(&self, column: &str) -> &CellValue {
        self.cells.get(column).unwrap_or(&MISSING_CELL)
    }
}

// ---------------------------------------------------------------------------
// RecordTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The in-memory table: rows in file order plus the header's column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordTable {
    pub records: Vec<Record>,
    /// Column names in header order.
    pub column_names: Vec<String>,
}

impl RecordTable {
    pub fn new(column_names: Vec<String>, records: Vec<Record>) -> Self {
        RecordTable {
            records,
            column_names,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.column_names.iter().any(|c| c == column)
    }

    /// Fail when a column the caller depends on is not part of the schema.
    pub fn require_column(&self, column: &str) -> Result<()> {
        if !self.has_column(column) {
            bail!("column '{column}' not found in table");
        }
        Ok(())
    }

    /// Borrow every value of a column in row order.
    pub fn column(&self, column: &str) -> Result<Vec<&CellValue>> {
        self.require_column(column)?;
        Ok(self.records.iter().map(|r| r.get(column)).collect())
    }

    /// Numeric view of a column; missing or non-numeric cells become `None`.
    pub fn numeric_column(&self, column: &str) -> Result<Vec<Option<f64>>> {
        Ok(self.column(column)?.into_iter().map(CellValue::as_f64).collect())
    }

    /// Copy of the table without the named columns. Unknown names are ignored.
    pub fn drop_columns(&self, columns: &[&str]) -> RecordTable {
        let keep = |name: &str| !columns.contains(&name);
        let records = self
            .records
            .iter()
            .map(|r| Record {
                cells: r
                    .cells
                    .iter()
                    .filter(|(k, _)| keep(k))
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect(),
            })
            .collect();
        RecordTable {
            records,
            column_names: self
                .column_names
                .iter()
                .filter(|c| keep(c))
                .cloned()
                .collect(),
        }
    }

    /// Copy of the table with `column` set to `values` (appended if new).
    pub fn with_column(&self, column: &str, values: Vec<CellValue>) -> Result<RecordTable> {
        if values.len() != self.len() {
            bail!(
                "column '{column}' has {} values but the table has {} rows",
                values.len(),
                self.len()
            );
        }
        let mut table = self.clone();
        if !table.has_column(column) {
            table.column_names.push(column.to_string());
        }
        for (record, value) in table.records.iter_mut().zip(values) {
            record.cells.insert(column.to_string(), value);
        }
        Ok(table)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Build a table from a header and rows of raw CSV-like text.
    pub(crate) fn table(header: &[&str], rows: &[&[&str]]) -> RecordTable {
        let column_names: Vec<String> = header.iter().map(|h| h.to_string()).collect();
        let records = rows
            .iter()
            .map(|row| Record {
                cells: column_names
                    .iter()
                    .cloned()
                    .zip(row.iter().map(|v| CellValue::infer(v)))
                    .collect(),
            })
            .collect();
        RecordTable::new(column_names, records)
    }

    #[test]
    fn infer_recognises_types_and_missing_markers() {
        assert_eq!(CellValue::infer("3703080"), CellValue::Integer(3703080));
        assert_eq!(CellValue::infer("21.6"), CellValue::Float(21.6));
        assert_eq!(CellValue::infer("True"), CellValue::Bool(true));
        assert_eq!(CellValue::infer("false"), CellValue::Bool(false));
        assert_eq!(CellValue::infer(""), CellValue::Null);
        assert_eq!(CellValue::infer("NaN"), CellValue::Null);
        assert_eq!(CellValue::infer("Earth"), CellValue::String("Earth".into()));
    }

    #[test]
    fn drop_columns_ignores_unknown_names() {
        let t = table(&["Name", "Equinox"], &[&["a", "J2000"]]);
        let dropped = t.drop_columns(&["Equinox", "Orbiting Body"]);
        assert_eq!(dropped.column_names, vec!["Name".to_string()]);
        assert!(!dropped.records[0].cells.contains_key("Equinox"));
    }

    #[test]
    fn with_column_leaves_source_untouched() {
        let t = table(&["Name"], &[&["a"], &["b"]]);
        let derived = t
            .with_column("Extra", vec![CellValue::Integer(1), CellValue::Null])
            .unwrap();
        assert!(!t.has_column("Extra"));
        assert_eq!(derived.column_names, vec!["Name", "Extra"]);
        assert!(derived.records[1].get("Extra").is_null());
    }

    #[test]
    fn missing_column_is_an_error() {
        let t = table(&["Name"], &[&["a"]]);
        let err = t.column("Orbit ID").unwrap_err();
        assert!(err.to_string().contains("Orbit ID"));
    }
}
