use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::{significance_options, Significance};

pub const CLASS_RED: &str = "text-red";
pub const CLASS_GREEN: &str = "text-green";

// ---------------------------------------------------------------------------
// Significance → display hint
// ---------------------------------------------------------------------------

/// Display hint for a significance string: `text-red` for `PATHOGENIC`,
/// `text-green` for `BENIGN`, empty for anything else.
pub fn classify_significance(significance: &str) -> &'static str {
    match significance {
        "PATHOGENIC" => CLASS_RED,
        "BENIGN" => CLASS_GREEN,
        _ => "",
    }
}

// ---------------------------------------------------------------------------
// Display hint → Color32
// ---------------------------------------------------------------------------

fn hue_color(hue: f32) -> Color32 {
    let hsl = Hsl::new(hue, 0.75, 0.55);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// Concrete colour for a display hint. `None` means "default text colour".
pub fn class_color(class: &str) -> Option<Color32> {
    match class {
        CLASS_RED => Some(hue_color(0.0)),
        CLASS_GREEN => Some(hue_color(120.0)),
        _ => None,
    }
}

pub fn significance_color(significance: &str) -> Option<Color32> {
    class_color(classify_significance(significance))
}

/// Legend entries (significance → colour) for the UI, in option order.
pub fn legend_entries() -> Vec<(Significance, Option<Color32>)> {
    significance_options()
        .iter()
        .map(|s| (*s, significance_color(s.as_str())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_values() {
        assert_eq!(classify_significance("PATHOGENIC"), "text-red");
        assert_eq!(classify_significance("BENIGN"), "text-green");
    }

    #[test]
    fn test_classify_everything_else_is_empty() {
        for other in ["LIKELY_PATHOGENIC", "UNDEFINED", "UNCERTAIN", "LIKELY_BENIGN"] {
            assert_eq!(classify_significance(other), "", "{other}");
        }
        for garbage in ["", "pathogenic", "Benign", " BENIGN", "PATHOGENIC ", "🧬"] {
            assert_eq!(classify_significance(garbage), "", "{garbage:?}");
        }
    }

    #[test]
    fn test_class_colors() {
        let red = class_color("text-red").unwrap();
        let green = class_color("text-green").unwrap();
        assert!(red.r() > red.g() && red.r() > red.b());
        assert!(green.g() > green.r() && green.g() > green.b());
        assert_eq!(class_color(""), None);
        assert_eq!(class_color("text-blue"), None);
    }

    #[test]
    fn test_legend_entries() {
        let legend = legend_entries();
        assert_eq!(legend.len(), 6);
        let colored: Vec<Significance> = legend
            .iter()
            .filter(|(_, c)| c.is_some())
            .map(|(s, _)| *s)
            .collect();
        assert_eq!(colored, [Significance::Pathogenic, Significance::Benign]);
    }
}
