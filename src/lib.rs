//! Loading and querying of hex-timestamped CSV traces.
//!
//! The [`data`] module holds the row model, the loader and the row schemas;
//! [`config`] holds the JSON-backed viewer settings.

pub mod config;
pub mod data;

pub use data::{DataError, Dataset, LoadOptions, Row, RowParser, Value};
