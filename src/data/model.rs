use super::error::DataError;

// ---------------------------------------------------------------------------
// Value – a single field of a row
// ---------------------------------------------------------------------------

/// A field as it comes out of the loader: raw CSV text, or a number once the
/// loader (field 1) or a row schema has converted it.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Number(f64),
}

impl Value {
    /// The numeric content, if this field has been converted.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(v) => Some(*v),
            Value::Text(_) => None,
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

/// One retained record of the source file.
pub type Row = Vec<Value>;

// ---------------------------------------------------------------------------
// Dataset – the loaded rows plus the queries the plot consumes
// ---------------------------------------------------------------------------

/// Rows of one loaded file, in file order after filtering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    rows: Vec<Row>,
}

impl Dataset {
    pub fn from_rows(rows: Vec<Row>) -> Self {
        Dataset { rows }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Widest row, used by the viewer to offer column choices.
    pub fn max_fields(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Shift the values at `idx` so that their minimum becomes zero.
    ///
    /// Every row is checked before anything is written, so an error leaves
    /// the dataset untouched. An empty dataset is left as is.
    pub fn rebase_min(&mut self, idx: usize) -> Result<(), DataError> {
        let values = self.column(idx)?;
        let Some(min) = min_max(&values).0 else {
            return Ok(());
        };

        for row in &mut self.rows {
            if let Value::Number(v) = &mut row[idx] {
                *v -= min;
            }
        }
        log::debug!("Rebased field {idx} by {min}");
        Ok(())
    }

    /// `(min, max)` of the values at `idx`; `(None, None)` when empty.
    pub fn get_data_range(&self, idx: usize) -> Result<(Option<f64>, Option<f64>), DataError> {
        let values = self.column(idx)?;
        Ok(min_max(&values))
    }

    /// Project fields `idx_x` and `idx_y` into parallel sequences, row order.
    pub fn get_plot_data(
        &self,
        idx_x: usize,
        idx_y: usize,
    ) -> Result<(Vec<f64>, Vec<f64>), DataError> {
        Ok((self.column(idx_x)?, self.column(idx_y)?))
    }

    /// Numeric values of field `idx` for every row.
    pub fn column(&self, idx: usize) -> Result<Vec<f64>, DataError> {
        self.rows
            .iter()
            .enumerate()
            .map(|(row_no, row)| {
                let value = row.get(idx).ok_or(DataError::FieldIndex {
                    row: row_no,
                    index: idx,
                    len: row.len(),
                })?;
                value.as_f64().ok_or(DataError::NotNumeric {
                    row: row_no,
                    index: idx,
                })
            })
            .collect()
    }
}

/// Running min/max; the first value seeds both bounds.
fn min_max(values: &[f64]) -> (Option<f64>, Option<f64>) {
    let mut min: Option<f64> = None;
    let mut max: Option<f64> = None;
    for &v in values {
        if min.map_or(true, |m| v < m) {
            min = Some(v);
        }
        if max.map_or(true, |m| v > m) {
            max = Some(v);
        }
    }
    (min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::from_rows(vec![
            vec!["A".into(), 0.0.into(), 3.5.into()],
            vec!["A".into(), 2.0.into(), (-1.0).into()],
            vec!["A".into(), 1.0.into(), 7.25.into()],
        ])
    }

    #[test]
    fn range_counts_zero_as_a_real_minimum() {
        let ds = sample();
        assert_eq!(ds.get_data_range(1).unwrap(), (Some(0.0), Some(2.0)));
        assert_eq!(ds.get_data_range(2).unwrap(), (Some(-1.0), Some(7.25)));
    }

    #[test]
    fn range_of_empty_dataset_is_none() {
        let ds = Dataset::default();
        assert_eq!(ds.get_data_range(1).unwrap(), (None, None));
    }

    #[test]
    fn rebase_moves_minimum_to_zero() {
        let mut ds = sample();
        ds.rebase_min(2).unwrap();
        assert_eq!(ds.column(2).unwrap(), vec![4.5, 0.0, 8.25]);
        assert_eq!(ds.get_data_range(2).unwrap().0, Some(0.0));
    }

    #[test]
    fn second_rebase_changes_nothing() {
        let mut ds = sample();
        ds.rebase_min(2).unwrap();
        let once = ds.clone();
        ds.rebase_min(2).unwrap();
        assert_eq!(ds, once);
        assert_eq!(ds.get_data_range(2).unwrap().0, Some(0.0));
    }

    #[test]
    fn rebase_on_empty_dataset_is_noop() {
        let mut ds = Dataset::default();
        ds.rebase_min(5).unwrap();
        assert!(ds.is_empty());
    }

    #[test]
    fn plot_data_follows_row_order() {
        let ds = sample();
        let (xs, ys) = ds.get_plot_data(1, 2).unwrap();
        assert_eq!(xs, vec![0.0, 2.0, 1.0]);
        assert_eq!(ys, vec![3.5, -1.0, 7.25]);
    }

    #[test]
    fn out_of_range_index_is_an_error() {
        let mut ds = sample();
        let err = ds.get_data_range(3).unwrap_err();
        assert!(matches!(err, DataError::FieldIndex { row: 0, index: 3, len: 3 }));
        assert!(ds.rebase_min(3).is_err());
        assert_eq!(ds, sample());
    }

    #[test]
    fn text_field_is_not_numeric() {
        let ds = sample();
        let err = ds.get_plot_data(0, 1).unwrap_err();
        assert!(matches!(err, DataError::NotNumeric { row: 0, index: 0 }));
    }

    #[test]
    fn ragged_rows_fail_without_partial_rebase() {
        let mut ds = Dataset::from_rows(vec![
            vec!["A".into(), 5.0.into(), 1.0.into()],
            vec!["A".into(), 6.0.into()],
        ]);
        let before = ds.clone();
        assert!(matches!(
            ds.rebase_min(2),
            Err(DataError::FieldIndex { row: 1, index: 2, len: 2 })
        ));
        assert_eq!(ds, before);
    }
}
