use std::collections::BTreeMap;

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
// Color mapping: vehicle id → Color32
// ---------------------------------------------------------------------------

/// Assigns each vehicle identifier in the dataset a distinct, stable colour,
/// shared between the chart series and the selection checkboxes.
#[derive(Debug, Clone, Default)]
pub struct VehicleColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl VehicleColors {
    /// Build the colour map from the dataset's sorted vehicle ids.
    pub fn new(vehicle_ids: &[String]) -> Self {
        let palette = generate_palette(vehicle_ids.len());
        let mapping = vehicle_ids
            .iter()
            .cloned()
            .zip(palette.into_iter())
            .collect();

        VehicleColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a vehicle id.
    pub fn color_for(&self, vehicle_id: &str) -> Color32 {
        self.mapping
            .get(vehicle_id)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_size_matches_request() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(7).len(), 7);
    }

    #[test]
    fn distinct_vehicles_get_distinct_colors() {
        let ids = vec!["A1".to_string(), "B2".to_string(), "C3".to_string()];
        let colors = VehicleColors::new(&ids);
        assert_ne!(colors.color_for("A1"), colors.color_for("B2"));
        assert_ne!(colors.color_for("B2"), colors.color_for("C3"));
        // Unknown ids fall back to the default.
        assert_eq!(colors.color_for("Z9"), Color32::GRAY);
    }
}
