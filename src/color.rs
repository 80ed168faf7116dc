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
// Color mapping: group label → Color32
// ---------------------------------------------------------------------------

/// Maps group labels (regions or product categories) to distinct colours.
///
/// Built once per loaded dataset from the full label list, so a label keeps
/// its colour no matter how the filter slices the data.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
}

impl ColorMap {
    /// Build a colour map for a list of distinct labels.
    pub fn new(labels: &[String]) -> Self {
        let palette = generate_palette(labels.len());
        let mapping: BTreeMap<String, Color32> = labels
            .iter()
            .zip(palette.into_iter())
            .map(|(label, color)| (label.clone(), color))
            .collect();

        ColorMap { mapping }
    }

    /// Look up the colour for a label.
    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping.get(label).copied().unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colors_are_distinct() {
        let palette = generate_palette(8);
        assert_eq!(palette.len(), 8);
        for (i, a) in palette.iter().enumerate() {
            for b in palette.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn unknown_label_falls_back_to_gray() {
        let map = ColorMap::new(&["East".to_string(), "West".to_string()]);
        assert_ne!(map.color_for("East"), Color32::GRAY);
        assert_eq!(map.color_for("North"), Color32::GRAY);
    }
}
