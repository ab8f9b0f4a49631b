use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::highlight::HighlightKind;

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
// Color mapping: series label → Color32
// ---------------------------------------------------------------------------

/// Maps series labels (contaminant or city names) to distinct colours.
///
/// Built once per loaded dataset from the full label roster, so a label
/// keeps its colour no matter which subset is currently charted.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
}

impl ColorMap {
    /// Assign one colour per label, in the given order.
    pub fn new(labels: &[String]) -> Self {
        let palette = generate_palette(labels.len());
        let mapping: BTreeMap<String, Color32> =
            labels.iter().cloned().zip(palette).collect();
        ColorMap { mapping }
    }

    /// Look up the colour for a label.
    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping.get(label).copied().unwrap_or(Color32::GRAY)
    }
}

// ---------------------------------------------------------------------------
// Highlight tints: HighlightKind → row colour
// ---------------------------------------------------------------------------

/// Row tint for levels above the legal limit.
const MCL_TINT: Color32 = Color32::from_rgb(0xFF, 0x4D, 0x4D);
/// Row tint for levels above the aspirational goal.
const MCLG_TINT: Color32 = Color32::from_rgb(0x99, 0x99, 0xFF);

/// Map a classification to its table tint. `None` rows keep the default
/// text colour. This is the only place a [`HighlightKind`] turns into a
/// visual style.
pub fn highlight_tint(kind: HighlightKind) -> Option<Color32> {
    match kind {
        HighlightKind::None => None,
        HighlightKind::ExceedsMcl => Some(MCL_TINT),
        HighlightKind::ExceedsMclg => Some(MCLG_TINT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_is_distinct() {
        let palette = generate_palette(15);
        assert_eq!(palette.len(), 15);
        for (i, a) in palette.iter().enumerate() {
            for b in &palette[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn labels_keep_their_colour() {
        let labels = vec!["Lead".to_string(), "Nitrate".to_string()];
        let map = ColorMap::new(&labels);
        assert_eq!(map.color_for("Lead"), map.color_for("Lead"));
        assert_ne!(map.color_for("Lead"), map.color_for("Nitrate"));
        assert_eq!(map.color_for("Unknown"), Color32::GRAY);
    }

    #[test]
    fn only_flagged_kinds_are_tinted() {
        assert_eq!(highlight_tint(HighlightKind::None), None);
        assert_ne!(
            highlight_tint(HighlightKind::ExceedsMcl),
            highlight_tint(HighlightKind::ExceedsMclg)
        );
    }
}
