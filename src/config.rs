use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::loader::{LoadOptions, HEX_FIELD};
use crate::data::schema::SchemaConfig;

/// Viewer settings, read from an optional JSON file.
///
/// ```json
/// {
///   "file": "trace.csv",
///   "load": { "head_ch": "A" },
///   "schema": { "kind": "columns", "min_fields": 3, "decimal": [2] },
///   "x_column": 1,
///   "y_columns": [2],
///   "rebase_x": true
/// }
/// ```
///
/// Every key is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Trace to open at startup.
    pub file: Option<PathBuf>,
    pub load: LoadOptions,
    pub schema: SchemaConfig,
    pub x_column: usize,
    pub y_columns: Vec<usize>,
    /// Rebase the x column right after each load.
    pub rebase_x: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            file: None,
            load: LoadOptions::default(),
            schema: SchemaConfig::default(),
            x_column: HEX_FIELD,
            y_columns: Vec::new(),
            rebase_x: false,
        }
    }
}

impl ViewerConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Config from the first command-line argument, defaults without one.
    pub fn from_args() -> Result<Self> {
        match std::env::args_os().nth(1) {
            Some(path) => Self::from_file(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::schema::ColumnSchema;

    #[test]
    fn empty_object_gives_defaults() {
        let cfg: ViewerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, ViewerConfig::default());
        assert_eq!(cfg.x_column, 1);
    }

    #[test]
    fn full_config_parses() {
        let cfg: ViewerConfig = serde_json::from_str(
            r#"{
                "file": "trace.csv",
                "load": { "head_ch": "A" },
                "schema": { "kind": "columns", "min_fields": 3, "decimal": [2] },
                "y_columns": [2],
                "rebase_x": true
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.file.as_deref(), Some(Path::new("trace.csv")));
        assert_eq!(cfg.load.head_ch, Some('A'));
        assert_eq!(
            cfg.schema,
            SchemaConfig::Columns(ColumnSchema {
                min_fields: 3,
                decimal: vec![2],
                hex: vec![],
            })
        );
        assert_eq!(cfg.y_columns, vec![2]);
        assert!(cfg.rebase_x);
    }

    #[test]
    fn multi_char_head_is_rejected() {
        let res: Result<ViewerConfig, _> = serde_json::from_str(r#"{ "load": { "head_ch": "AB" } }"#);
        assert!(res.is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = ViewerConfig::from_file(Path::new("/nonexistent/hexplot.json")).unwrap_err();
        assert!(format!("{err:#}").contains("reading config"));
    }
}
