use serde::{Deserialize, Serialize};

use super::loader::parse_scaled_hex;
use super::model::{Row, Value};

// ---------------------------------------------------------------------------
// RowParser – per-source row shaping
// ---------------------------------------------------------------------------

/// Shapes a loaded row (field 1 already converted) or rejects it.
///
/// Returning `None` drops the row without raising an error.
pub trait RowParser {
    fn parse_row(&self, row: Row) -> Option<Row>;
}

impl<F> RowParser for F
where
    F: Fn(Row) -> Option<Row>,
{
    fn parse_row(&self, row: Row) -> Option<Row> {
        self(row)
    }
}

/// Keeps every row as loaded.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl RowParser for PassThrough {
    fn parse_row(&self, row: Row) -> Option<Row> {
        Some(row)
    }
}

// ---------------------------------------------------------------------------
// ColumnSchema – fixed layout with typed columns
// ---------------------------------------------------------------------------

/// A file layout: minimum width plus the columns to convert to numbers.
///
/// `decimal` columns go through `str::parse::<f64>`, `hex` columns get the
/// same hex / 1000 scaling as field 1. A row too short, or with a listed
/// column that does not convert to a finite number, is dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnSchema {
    pub min_fields: usize,
    pub decimal: Vec<usize>,
    pub hex: Vec<usize>,
}

impl ColumnSchema {
    fn convert(&self, row: &mut Row, idx: usize, parse: fn(&str) -> Option<f64>) -> Option<()> {
        let field = row.get_mut(idx)?;
        if let Value::Text(text) = field {
            let v = parse(text).filter(|v| v.is_finite())?;
            *field = Value::Number(v);
        }
        Some(())
    }
}

impl RowParser for ColumnSchema {
    fn parse_row(&self, mut row: Row) -> Option<Row> {
        if row.len() < self.min_fields {
            return None;
        }
        for &idx in &self.decimal {
            self.convert(&mut row, idx, |s| s.trim().parse::<f64>().ok())?;
        }
        for &idx in &self.hex {
            self.convert(&mut row, idx, |s| parse_scaled_hex(s))?;
        }
        Some(row)
    }
}

// ---------------------------------------------------------------------------
// SchemaConfig – serde-selectable schema
// ---------------------------------------------------------------------------

/// Row schema as written in the viewer config file.
///
/// ```json
/// { "kind": "columns", "min_fields": 4, "decimal": [2, 3] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SchemaConfig {
    PassThrough,
    Columns(ColumnSchema),
}

impl Default for SchemaConfig {
    fn default() -> Self {
        SchemaConfig::PassThrough
    }
}

impl SchemaConfig {
    pub fn build(&self) -> Box<dyn RowParser> {
        match self {
            SchemaConfig::PassThrough => Box::new(PassThrough),
            SchemaConfig::Columns(schema) => Box::new(schema.clone()),
        }
    }
}
