use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let rgb: Srgb = Hsl::new(hue, 0.75, 0.55).into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Series colours: y column → Color32
// ---------------------------------------------------------------------------

/// Stable colour per plotted y column.
#[derive(Debug, Clone, Default)]
pub struct SeriesColors {
    mapping: BTreeMap<usize, Color32>,
}

impl SeriesColors {
    pub fn new(columns: &BTreeSet<usize>) -> Self {
        let mapping = columns
            .iter()
            .copied()
            .zip(generate_palette(columns.len()))
            .collect();
        SeriesColors { mapping }
    }

    pub fn color_for(&self, column: usize) -> Color32 {
        self.mapping
            .get(&column)
            .copied()
            .unwrap_or(Color32::LIGHT_BLUE)
    }
}
