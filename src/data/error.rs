use thiserror::Error;

/// Everything that can go wrong while loading or querying a [`Dataset`].
///
/// A file that cannot be opened is deliberately absent: that case yields an
/// empty dataset instead of an error.
///
/// [`Dataset`]: super::model::Dataset
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Line {line}: '{text}' is not a hexadecimal integer")]
    Hex { line: u64, text: String },

    #[error("Line {line}: missing field {index}")]
    MissingField { line: u64, index: usize },

    #[error("Row {row}: field index {index} out of range (row has {len} fields)")]
    FieldIndex { row: usize, index: usize, len: usize },

    #[error("Row {row}: field {index} is not numeric")]
    NotNumeric { row: usize, index: usize },
}
