/// Data layer: row model, loading, and per-source row schemas.
///
/// Architecture:
/// ```text
///   trace.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  head filter, field 1 hex → f64 / 1000
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  schema   │  RowParser: shape or drop each row
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<Row>; rebase / range / plot data
///   └──────────┘
/// ```

pub mod error;
pub mod loader;
pub mod model;
pub mod schema;

pub use error::DataError;
pub use loader::LoadOptions;
pub use model::{Dataset, Row, Value};
pub use schema::{ColumnSchema, PassThrough, RowParser};
