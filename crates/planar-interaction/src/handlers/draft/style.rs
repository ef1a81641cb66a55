//! Draft style payload construction from the tool defaults.

use planar_bridge::{DraftFlags, DraftStyle, Rgba, parse_hex_color};

use crate::settings::ToolDefaults;

/// Stroke width bounds enforced on every draft payload.
pub const STROKE_WIDTH_MIN: f64 = 1.0;
pub const STROKE_WIDTH_MAX: f64 = 100.0;

/// Build the fixed-shape style payload the engine expects on draft begin.
///
/// A `None` color is the ByLayer sentinel: the payload carries the
/// matching by-layer flag and a placeholder color the engine ignores.
pub fn draft_style(defaults: &ToolDefaults) -> DraftStyle {
    let mut flags = DraftFlags::empty();

    let stroke = match defaults.stroke_color.as_deref() {
        Some(hex) => parse_hex_color(hex).unwrap_or_else(|err| {
            log::warn!("bad stroke color {hex:?}: {err}");
            Rgba::BLACK
        }),
        None => {
            flags |= DraftFlags::STROKE_BY_LAYER;
            Rgba::BLACK
        }
    };

    let fill = match defaults.fill_color.as_deref() {
        Some(hex) => parse_hex_color(hex).unwrap_or_else(|err| {
            log::warn!("bad fill color {hex:?}: {err}");
            Rgba::WHITE
        }),
        None => {
            flags |= DraftFlags::FILL_BY_LAYER;
            Rgba::WHITE
        }
    };

    DraftStyle {
        fill,
        stroke,
        fill_enabled: defaults.fill_enabled,
        stroke_enabled: defaults.stroke_enabled,
        stroke_width_px: defaults
            .stroke_width
            .clamp(STROKE_WIDTH_MIN, STROKE_WIDTH_MAX),
        flags,
    }
}

/// Arrow head size derived from the stroke width: proportional to the
/// stroke but never below a usable minimum.
pub fn arrow_head_px(stroke_width_px: f64) -> f64 {
    (16.0_f64.max(stroke_width_px * 10.0) * 1.1).round()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_colors_have_no_by_layer_flags() {
        let defaults = ToolDefaults {
            stroke_color: Some("#ff0000".to_string()),
            fill_color: Some("#00ff00".to_string()),
            ..Default::default()
        };
        let style = draft_style(&defaults);
        assert!(style.flags.is_empty());
        assert!((style.stroke.r - 1.0).abs() < 1e-6);
        assert!((style.fill.g - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_none_colors_set_by_layer_flags() {
        let defaults = ToolDefaults {
            stroke_color: None,
            fill_color: None,
            ..Default::default()
        };
        let style = draft_style(&defaults);
        assert!(style.flags.contains(DraftFlags::STROKE_BY_LAYER));
        assert!(style.flags.contains(DraftFlags::FILL_BY_LAYER));
    }

    #[test]
    fn test_stroke_width_clamped() {
        let mut defaults = ToolDefaults {
            stroke_width: 0.2,
            ..Default::default()
        };
        assert!((draft_style(&defaults).stroke_width_px - 1.0).abs() < f64::EPSILON);
        defaults.stroke_width = 500.0;
        assert!((draft_style(&defaults).stroke_width_px - 100.0).abs() < f64::EPSILON);
        defaults.stroke_width = 3.5;
        assert!((draft_style(&defaults).stroke_width_px - 3.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_arrow_head_size() {
        // Thin strokes hit the 16 px floor: round(16 * 1.1) = 18.
        assert_eq!(arrow_head_px(1.0), 18.0);
        // Above the floor it scales with the width.
        assert_eq!(arrow_head_px(2.0), 22.0);
        assert_eq!(arrow_head_px(10.0), 110.0);
    }
}
