use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Mix, Srgb};

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
            let hsl = Hsl::new(hue, 0.70, 0.50);
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
// Color mapping: cluster label → Color32
// ---------------------------------------------------------------------------

/// Maps the cluster labels of the current method to distinct colours, shared
/// by the scatter plot and both bar charts so a cluster reads the same
/// everywhere.
#[derive(Debug, Clone)]
pub struct ClusterColors {
    mapping: BTreeMap<i64, Color32>,
    default_color: Color32,
}

impl ClusterColors {
    /// Build a colour map from the distinct labels, ascending.
    pub fn new(labels: &BTreeSet<i64>) -> Self {
        let palette = generate_palette(labels.len());
        let mapping: BTreeMap<i64, Color32> =
            labels.iter().copied().zip(palette).collect();

        ClusterColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a cluster label.
    pub fn color_for(&self, label: i64) -> Color32 {
        self.mapping
            .get(&label)
            .copied()
            .unwrap_or(self.default_color)
    }
}

// ---------------------------------------------------------------------------
// Sequential ramp for the heatmap
// ---------------------------------------------------------------------------

/// Map a normalized value in `[0, 1]` onto a light-to-dark blue-green ramp.
/// Out-of-range and NaN inputs clamp to the ends.
pub fn heat_color(t: f64) -> Color32 {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) } as f32;
    let light: Hsl = Hsl::new(170.0, 0.35, 0.93);
    let dark: Hsl = Hsl::new(205.0, 0.75, 0.25);
    let rgb: Srgb = light.mix(dark, t).into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// Annotation colour that stays readable on top of [`heat_color`].
pub fn heat_text_color(t: f64) -> Color32 {
    if t.is_nan() || t < 0.55 {
        Color32::from_rgb(30, 30, 30)
    } else {
        Color32::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size_and_distinct_entries() {
        let palette = generate_palette(8);
        assert_eq!(palette.len(), 8);
        let unique: std::collections::BTreeSet<_> =
            palette.iter().map(|c| c.to_array()).collect();
        assert_eq!(unique.len(), 8);
    }

    #[test]
    fn cluster_colors_fall_back_for_unknown_labels() {
        let labels: BTreeSet<i64> = [0, 1, 2].into_iter().collect();
        let colors = ClusterColors::new(&labels);
        assert_ne!(colors.color_for(0), colors.color_for(1));
        assert_eq!(colors.color_for(99), Color32::GRAY);
    }

    #[test]
    fn heat_ramp_clamps_and_handles_nan() {
        assert_eq!(heat_color(-1.0), heat_color(0.0));
        assert_eq!(heat_color(2.0), heat_color(1.0));
        assert_eq!(heat_color(f64::NAN), heat_color(0.0));
    }
}
