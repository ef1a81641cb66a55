//! Declarative overlay output consumed by the SVG rendering layer.
//!
//! Handlers describe what should be drawn; the binding layer maps these
//! nodes to SVG elements. Nothing here draws.

use kurbo::{Point, Rect};

/// Native cursor the canvas element should show.
///
/// `None` means "hide the native cursor" — a custom cursor badge is being
/// drawn in the overlay and must be the only cursor visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorHint {
    #[default]
    Default,
    None,
    Grab,
    Grabbing,
    Crosshair,
    Text,
}

impl CursorHint {
    /// CSS cursor value, or `None` to hide the cursor entirely.
    pub fn css(&self) -> Option<&'static str> {
        match self {
            Self::Default => Some("default"),
            Self::None => None,
            Self::Grab => Some("grab"),
            Self::Grabbing => Some("grabbing"),
            Self::Crosshair => Some("crosshair"),
            Self::Text => Some("text"),
        }
    }
}

/// A custom cursor drawn in the overlay, replacing the native one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CursorBadge {
    /// Curved rotation arrows, oriented by `angle_deg`.
    Rotate { screen: Point, angle_deg: f64 },
    /// Double-headed resize arrow along `angle_deg`.
    Resize { screen: Point, angle_deg: f64 },
    /// Four-way move cursor.
    Move { screen: Point },
}

/// One element of the interaction overlay.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayNode {
    /// Marquee selection box, world coordinates. `crossing` selects the
    /// dashed (crossing) visual instead of the solid (window) one.
    Marquee { rect: Rect, crossing: bool },
    /// Custom cursor badge, screen coordinates.
    Cursor(CursorBadge),
    /// Inline side-count prompt for the polygon tool, anchored in screen
    /// coordinates. `min`/`max` bound the input widget.
    PolygonPrompt {
        anchor: Point,
        sides: u32,
        min: u32,
        max: u32,
    },
    /// Text caret, world coordinates.
    Caret {
        world: Point,
        height: f64,
        rotation: f64,
    },
    /// Text selection highlight rectangles, text-local coordinates.
    TextSelection { rects: Vec<Rect> },
}
