use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: city → Color32
// ---------------------------------------------------------------------------

/// Maps every city of the loaded table to a distinct colour, so a city keeps
/// its colour across charts and selection changes.
#[derive(Debug, Clone, Default)]
pub struct CityColors {
    mapping: BTreeMap<String, Color32>,
}

impl CityColors {
    pub fn new(cities: &BTreeSet<String>) -> Self {
        let palette = generate_palette(cities.len());
        let mapping = cities.iter().cloned().zip(palette).collect();
        CityColors { mapping }
    }

    /// Colour for `city`, grey for cities not seen at construction.
    pub fn color_for(&self, city: &str) -> Color32 {
        self.mapping.get(city).copied().unwrap_or(Color32::GRAY)
    }
}
