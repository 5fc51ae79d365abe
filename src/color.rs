use egui::Color32;

/// Color used for any record whose hex color cannot be parsed.
pub const FALLBACK_COLOR: Color32 = Color32::TRANSPARENT;

/// Parses a `#rrggbb` / `#rgb` string into a color.
///
/// Never fails: anything that is not a valid hex color maps to [`FALLBACK_COLOR`]
/// so that a single bad record cannot blank the layer it belongs to.
pub fn hex_to_rgb(hex: &str) -> Color32 {
    Color32::from_hex(hex.trim()).unwrap_or(FALLBACK_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_long_form() {
        assert_eq!(hex_to_rgb("#ff0000"), Color32::from_rgb(255, 0, 0));
        assert_eq!(hex_to_rgb("#00FF80"), Color32::from_rgb(0, 255, 128));
        assert_eq!(hex_to_rgb(" #00ff80\n"), Color32::from_rgb(0, 255, 128));
    }

    #[test]
    fn test_parses_short_form() {
        assert_eq!(hex_to_rgb("#f08"), Color32::from_rgb(255, 0, 136));
    }

    #[test]
    fn test_malformed_falls_back() {
        assert_eq!(hex_to_rgb("not-a-color"), FALLBACK_COLOR);
        assert_eq!(hex_to_rgb("ff0000"), FALLBACK_COLOR);
        assert_eq!(hex_to_rgb("#12345"), FALLBACK_COLOR);
        assert_eq!(hex_to_rgb("#gg0000"), FALLBACK_COLOR);
        assert_eq!(hex_to_rgb(""), FALLBACK_COLOR);
        assert_eq!(hex_to_rgb("#ééé"), FALLBACK_COLOR);
    }
}
