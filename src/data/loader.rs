use std::path::Path;

use thiserror::Error;

use super::model::{CellValue, Record, RecordTable};

// ---------------------------------------------------------------------------
// Load errors
// ---------------------------------------------------------------------------

/// Why a dataset could not be loaded.
#[derive(Debug, Error, PartialEq)]
pub enum LoadError {
    #[error("The file name: '{0}' is not valid. Please provide a valid CSV file.")]
    InvalidFileName(String),

    #[error("The file '{0}' is not available.")]
    NotAvailable(String),

    #[error("The file '{0}' is empty and does not contain any data.")]
    Empty(String),

    #[error("An unexpected error occurred: {0}")]
    Parse(String),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a close-approach table from a `.csv` file.
///
/// The name is validated before the filesystem is touched, then existence is
/// checked, then the file is parsed. Header-only files count as empty.
pub fn load_table(path: &Path) -> Result<RecordTable, LoadError> {
    let display = path.display().to_string();

    let name = match path.to_str() {
        Some(s) if !s.is_empty() && s.ends_with(".csv") => s,
        _ => return Err(LoadError::InvalidFileName(display)),
    };

    if !path.exists() {
        return Err(LoadError::NotAvailable(name.to_string()));
    }

    let table = read_csv(path)?;
    if table.column_names.is_empty() || table.is_empty() {
        return Err(LoadError::Empty(name.to_string()));
    }

    log::info!(
        "Loaded {} records with {} columns from {name}",
        table.len(),
        table.column_names.len()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

/// Header row with column names, one record per following row.
/// Every cell is typed independently via [`CellValue::infer`]. Short rows
/// are padded with missing cells; rows longer than the header are rejected.
fn read_csv(path: &Path) -> Result<RecordTable, LoadError> {
    let parse_err = |e: csv::Error| LoadError::Parse(e.to_string());

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(parse_err)?;
    let headers: Vec<String> = reader
        .headers()
        .map_err(parse_err)?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if headers.is_empty() {
        return Ok(RecordTable::default());
    }

    let mut records = Vec::new();

    for result in reader.records() {
        let record = result.map_err(parse_err)?;
        if record.len() > headers.len() {
            let line = record.position().map_or(0, |p| p.line());
            return Err(LoadError::Parse(format!(
                "Expected {} fields in line {line}, saw {}",
                headers.len(),
                record.len()
            )));
        }

        let cells = headers
            .iter()
            .enumerate()
            .map(|(i, col)| {
                let value = record.get(i).map_or(CellValue::Null, CellValue::infer);
                (col.clone(), value)
            })
            .collect();

        records.push(Record { cells });
    }

    log::debug!("Parsed {} rows from {}", records.len(), path.display());
    Ok(RecordTable::new(headers, records))
}
