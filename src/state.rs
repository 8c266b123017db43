use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use hexplot::config::ViewerConfig;
use hexplot::data::{DataError, Dataset, LoadOptions};

use crate::color::SeriesColors;

// ---------------------------------------------------------------------------
// Plot series
// ---------------------------------------------------------------------------

/// One y column projected against the current x column.
pub struct Series {
    pub column: usize,
    pub points: Vec<[f64; 2]>,
    pub range: (Option<f64>, Option<f64>),
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: ViewerConfig,

    /// File the dataset was loaded from.
    pub path: Option<PathBuf>,

    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<Dataset>,

    /// Text of the head filter box; empty means no filtering.
    pub head_input: String,

    pub x_column: usize,
    pub y_columns: BTreeSet<usize>,

    /// Cached plot data, rebuilt whenever the data or the columns change.
    pub series: Vec<Series>,
    pub x_range: (Option<f64>, Option<f64>),

    pub colors: SeriesColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: ViewerConfig) -> Self {
        let mut state = Self {
            path: None,
            dataset: None,
            head_input: config.load.head_ch.map(String::from).unwrap_or_default(),
            x_column: config.x_column,
            y_columns: config.y_columns.iter().copied().collect(),
            series: Vec::new(),
            x_range: (None, None),
            colors: SeriesColors::default(),
            status_message: None,
            config,
        };
        if let Some(path) = state.config.file.clone() {
            state.load_path(&path);
        }
        state
    }

    /// Parse the head filter box into load options.
    fn load_options(&self) -> Result<LoadOptions, String> {
        let text = self.head_input.trim();
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Ok(LoadOptions::default()),
            (Some(c), None) => Ok(LoadOptions::with_head(c)),
            _ => Err(format!("Filter must be a single character, got '{text}'")),
        }
    }

    /// Load `path` with the current filter and the configured schema.
    pub fn load_path(&mut self, path: &Path) {
        let options = match self.load_options() {
            Ok(options) => options,
            Err(msg) => {
                self.status_message = Some(msg);
                return;
            }
        };
        let parser = self.config.schema.build();

        match Dataset::load(path, &options, parser.as_ref()) {
            Ok(dataset) => {
                if dataset.is_empty() {
                    log::warn!("No rows loaded from {}", path.display());
                }
                self.path = Some(path.to_path_buf());
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Load the current file again, e.g. after the filter changed.
    pub fn reload(&mut self) {
        if let Some(path) = self.path.clone() {
            self.load_path(&path);
        }
    }

    /// Ingest a newly loaded dataset.
    pub fn set_dataset(&mut self, mut dataset: Dataset) {
        self.status_message = None;
        if self.config.rebase_x {
            if let Err(e) = dataset.rebase_min(self.x_column) {
                self.report(e);
            }
        }
        self.dataset = Some(dataset);
        self.refresh_series();
    }

    pub fn set_x_column(&mut self, column: usize) {
        self.x_column = column;
        self.refresh_series();
    }

    pub fn toggle_y_column(&mut self, column: usize) {
        if !self.y_columns.remove(&column) {
            self.y_columns.insert(column);
        }
        self.refresh_series();
    }

    /// Shift the x column so it starts at zero.
    pub fn rebase_x(&mut self) {
        let Some(ds) = &mut self.dataset else {
            return;
        };
        match ds.rebase_min(self.x_column) {
            Ok(()) => self.refresh_series(),
            Err(e) => self.report(e),
        }
    }

    /// Recompute `series` and `x_range` from the dataset.
    pub fn refresh_series(&mut self) {
        self.series.clear();
        self.x_range = (None, None);
        let Some(ds) = &self.dataset else {
            return;
        };

        let result = (|| -> Result<_, DataError> {
            let x_range = ds.get_data_range(self.x_column)?;
            let mut series = Vec::with_capacity(self.y_columns.len());
            for &column in &self.y_columns {
                let (xs, ys) = ds.get_plot_data(self.x_column, column)?;
                series.push(Series {
                    column,
                    points: xs.into_iter().zip(ys).map(|(x, y)| [x, y]).collect(),
                    range: ds.get_data_range(column)?,
                });
            }
            Ok((x_range, series))
        })();

        match result {
            Ok((x_range, series)) => {
                self.x_range = x_range;
                self.series = series;
                self.colors = SeriesColors::new(&self.y_columns);
            }
            Err(e) => self.report(e),
        }
    }

    fn report(&mut self, e: DataError) {
        log::error!("{e}");
        self.status_message = Some(format!("Error: {e}"));
    }
}
