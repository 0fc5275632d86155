use anyhow::Result;

use crate::data::model::{
    CellValue, RecordTable, COL_AVERAGE_DIAMETER, COL_DIAMETER_MAX_KM, COL_DIAMETER_MIN_KM,
    COL_HAZARDOUS, COL_MILES_PER_HOUR, COL_MIN_ORBIT_INTERSECTION, COL_MISS_DIST_KM,
};

// ---------------------------------------------------------------------------
// Histogram binning
// ---------------------------------------------------------------------------

/// Equal-width bins over the data range.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Histogram {
    /// `counts.len() + 1` ascending bin edges.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin the finite values into `bins` equal-width bins spanning [min, max].
    ///
    /// Bins are half-open except the last, which also holds `max`. A
    /// zero-width range is widened by 0.5 on each side, or by half the
    /// value once 0.5 is below its precision. Without finite values there
    /// are no bins.
    pub fn compute(values: &[f64], bins: usize) -> Self {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() || bins == 0 {
            return Histogram::default();
        }

        let mut lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let mut hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if lo == hi {
            let pad = if (hi + 0.5) - (lo - 0.5) == 1.0 {
                0.5
            } else {
                0.5 * hi.abs()
            };
            lo -= pad;
            hi += pad;
        }

        let width = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();

        let mut counts = vec![0usize; bins];
        for v in finite {
            let idx = (((v - lo) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Histogram { edges, counts }
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// `(center, width, count)` for each bin.
    pub fn bars(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        self.edges
            .windows(2)
            .zip(&self.counts)
            .map(|(e, &c)| ((e[0] + e[1]) / 2.0, e[1] - e[0], c))
    }
}

// ---------------------------------------------------------------------------
// Derived and coerced columns
// ---------------------------------------------------------------------------

/// Copy of `table` with an `Average Diameter` column: the mean of the min and
/// max estimates, using whichever side is present when only one is.
pub fn with_average_diameter(table: &RecordTable) -> Result<RecordTable> {
    let min = table.numeric_column(COL_DIAMETER_MIN_KM)?;
    let max = table.numeric_column(COL_DIAMETER_MAX_KM)?;

    let averages = min
        .into_iter()
        .zip(max)
        .map(|pair| match pair {
            (Some(a), Some(b)) => CellValue::Float((a + b) / 2.0),
            (Some(v), None) | (None, Some(v)) => CellValue::Float(v),
            (None, None) => CellValue::Null,
        })
        .collect();

    table.with_column(COL_AVERAGE_DIAMETER, averages)
}

/// Numeric coercion: numbers pass through, numeric text is parsed, everything else is missing.
pub fn coerce_numeric(value: &CellValue) -> Option<f64> {
    match value {
        CellValue::String(s) => s.trim().parse::<f64>().ok().filter(|v| !v.is_nan()),
        other => other.as_f64(),
    }
}

/// Coerced `Minimum Orbit Intersection` values, missing ones dropped.
pub fn orbit_intersection_values(table: &RecordTable) -> Result<Vec<f64>> {
    Ok(table
        .column(COL_MIN_ORBIT_INTERSECTION)?
        .into_iter()
        .filter_map(coerce_numeric)
        .collect())
}

/// Present values of a numeric column, in row order.
pub fn present_values(table: &RecordTable, column: &str) -> Result<Vec<f64>> {
    Ok(table.numeric_column(column)?.into_iter().flatten().collect())
}

/// `(miss distance, speed)` pairs from rows where both are present.
pub fn distance_speed_pairs(table: &RecordTable) -> Result<(Vec<f64>, Vec<f64>)> {
    let distance = table.numeric_column(COL_MISS_DIST_KM)?;
    let speed = table.numeric_column(COL_MILES_PER_HOUR)?;
    Ok(distance
        .into_iter()
        .zip(speed)
        .filter_map(|pair| match pair {
            (Some(d), Some(s)) => Some((d, s)),
            _ => None,
        })
        .unzip())
}

// ---------------------------------------------------------------------------
// Category counts
// ---------------------------------------------------------------------------

/// Count of each `Hazardous` value, most frequent first (first-seen on ties).
pub fn hazard_counts(table: &RecordTable) -> Result<Vec<(bool, usize)>> {
    let mut counts: Vec<(bool, usize)> = Vec::with_capacity(2);
    for flag in table.column(COL_HAZARDOUS)?.into_iter().filter_map(CellValue::as_bool) {
        match counts.iter_mut().find(|(f, _)| *f == flag) {
            Some((_, n)) => *n += 1,
            None => counts.push((flag, 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::table;

    #[test]
    fn histogram_puts_max_in_last_bin() {
        let h = Histogram::compute(&[0.0, 1.0, 2.0, 3.0, 4.0, 10.0], 10);
        assert_eq!(h.edges.len(), 11);
        assert_eq!(h.edges[0], 0.0);
        assert_eq!(h.edges[10], 10.0);
        assert_eq!(h.counts[0], 1);
        assert_eq!(h.counts[4], 1);
        assert_eq!(h.counts[9], 1);
        assert_eq!(h.total(), 6);
    }

    #[test]
    fn histogram_skips_non_finite_values() {
        let h = Histogram::compute(&[1.0, f64::NAN, 2.0, f64::INFINITY], 4);
        assert_eq!(h.total(), 2);
    }

    #[test]
    fn histogram_widens_a_single_value() {
        let h = Histogram::compute(&[3.0, 3.0], 10);
        assert_eq!(h.edges[0], 2.5);
        assert_eq!(h.edges[10], 3.5);
        assert_eq!(h.total(), 2);
        let bars: Vec<_> = h.bars().collect();
        assert_eq!(bars.len(), 10);
        assert!((bars[0].1 - 0.1).abs() < 1e-12);
    }

    #[test]
    fn histogram_widens_a_large_single_value() {
        let h = Histogram::compute(&[1e17, 1e17], 10);
        assert_eq!(h.edges[0], 5e16);
        assert_eq!(h.edges[10], 1.5e17);
        assert!(h.edges.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(h.total(), 2);
        assert!(h.bars().all(|(_, width, _)| width > 0.0));
    }

    #[test]
    fn histogram_of_nothing_is_empty() {
        assert_eq!(Histogram::compute(&[], 100), Histogram::default());
    }

    #[test]
    fn average_diameter_is_added_without_touching_input() {
        let t = table(
            &[COL_DIAMETER_MIN_KM, COL_DIAMETER_MAX_KM],
            &[&["1", "3"], &["", "4"], &["", ""]],
        );
        let derived = with_average_diameter(&t).unwrap();
        assert!(!t.has_column(COL_AVERAGE_DIAMETER));
        let values = derived.numeric_column(COL_AVERAGE_DIAMETER).unwrap();
        assert_eq!(values, vec![Some(2.0), Some(4.0), None]);
    }

    #[test]
    fn orbit_intersection_coerces_text() {
        let t = table(
            &[COL_MIN_ORBIT_INTERSECTION],
            &[&["0.025"], &["abc"], &[""], &["3"], &["0.5 AU"]],
        );
        assert_eq!(orbit_intersection_values(&t).unwrap(), vec![0.025, 3.0]);
    }

    #[test]
    fn pairs_require_both_values() {
        let t = table(
            &[COL_MISS_DIST_KM, COL_MILES_PER_HOUR],
            &[&["10", "100"], &["", "200"], &["30", ""], &["40", "400"]],
        );
        let (x, y) = distance_speed_pairs(&t).unwrap();
        assert_eq!(x, vec![10.0, 40.0]);
        assert_eq!(y, vec![100.0, 400.0]);
    }

    #[test]
    fn hazard_counts_order_by_frequency() {
        let t = table(
            &[COL_HAZARDOUS],
            &[&["True"], &["False"], &["False"], &[""], &["False"], &["True"]],
        );
        assert_eq!(hazard_counts(&t).unwrap(), vec![(false, 3), (true, 2)]);
    }
}
