use anyhow::Result;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::model::{CellValue, Record, RecordTable};

// ---------------------------------------------------------------------------
// Date coercion
// ---------------------------------------------------------------------------

const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Coerce a cell to a timestamp. Anything unparseable becomes `None`.
pub fn parse_date(value: &CellValue) -> Option<NaiveDateTime> {
    match value {
        CellValue::Date(d) => Some(*d),
        CellValue::String(s) => parse_date_str(s),
        _ => None,
    }
}

fn parse_date_str(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|d| d.naive_local()))
}

// ---------------------------------------------------------------------------
// Date filter
// ---------------------------------------------------------------------------

/// Keep rows whose `column` date falls on or after `cutoff`.
///
/// * Only the calendar date is compared, so `cutoff` itself is kept whatever the time of day.
/// * Unparseable or missing dates never satisfy the bound.
/// * Surviving rows get the column normalised to [`CellValue::Date`]; nothing else changes.
pub fn filter_by_date(table: &RecordTable, column: &str, cutoff: NaiveDate) -> Result<RecordTable> {
    table.require_column(column)?;

    let records: Vec<Record> = table
        .records
        .iter()
        .filter_map(|record| {
            let date = parse_date(record.get(column))?;
            if date.date() < cutoff {
                return None;
            }
            let mut kept = record.clone();
            kept.cells.insert(column.to_string(), CellValue::Date(date));
            Some(kept)
        })
        .collect();

    log::info!(
        "Date filter on '{column}' >= {cutoff}: kept {} of {} records",
        records.len(),
        table.len()
    );
    Ok(RecordTable::new(table.column_names.clone(), records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::table;
    use crate::data::model::{COL_CLOSE_APPROACH_DATE, COL_NAME};

    fn cutoff() -> NaiveDate {
        NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()
    }

    #[test]
    fn drops_only_rows_before_cutoff() {
        let t = table(
            &[COL_NAME, COL_CLOSE_APPROACH_DATE],
            &[&["a", "2001-03-04"], &["b", "1999-12-31"], &["c", "2000-01-01"]],
        );
        let filtered = filter_by_date(&t, COL_CLOSE_APPROACH_DATE, cutoff()).unwrap();
        let names: Vec<String> = filtered
            .records
            .iter()
            .map(|r| r.get(COL_NAME).to_string())
            .collect();
        assert_eq!(names, vec!["a", "c"]);
        assert_eq!(filtered.column_names, t.column_names);
    }

    #[test]
    fn time_of_day_is_ignored_at_the_boundary() {
        let t = table(
            &[COL_NAME, COL_CLOSE_APPROACH_DATE],
            &[&["a", "2000-01-01 23:59:00"], &["b", "1999-12-31 23:59:59"]],
        );
        let filtered = filter_by_date(&t, COL_CLOSE_APPROACH_DATE, cutoff()).unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.records[0].get(COL_NAME).to_string(), "a");
    }

    #[test]
    fn unparseable_dates_are_excluded() {
        let t = table(
            &[COL_NAME, COL_CLOSE_APPROACH_DATE],
            &[&["a", "not a date"], &["b", ""], &["c", "2015-06-01"]],
        );
        let filtered = filter_by_date(&t, COL_CLOSE_APPROACH_DATE, cutoff()).unwrap();
        assert_eq!(filtered.len(), 1);
        assert!(matches!(
            filtered.records[0].get(COL_CLOSE_APPROACH_DATE),
            CellValue::Date(_)
        ));
    }

    #[test]
    fn filtering_twice_changes_nothing() {
        let t = table(
            &[COL_NAME, COL_CLOSE_APPROACH_DATE],
            &[&["a", "2010-01-01"], &["b", "1980-05-05"], &["c", "2000-01-01T08:00:00"]],
        );
        let once = filter_by_date(&t, COL_CLOSE_APPROACH_DATE, cutoff()).unwrap();
        let twice = filter_by_date(&once, COL_CLOSE_APPROACH_DATE, cutoff()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn missing_date_column_is_an_error() {
        let t = table(&[COL_NAME], &[&["a"]]);
        assert!(filter_by_date(&t, COL_CLOSE_APPROACH_DATE, cutoff()).is_err());
    }
}
