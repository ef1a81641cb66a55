//! Command protocol vocabulary shared with the engine module.
//!
//! The engine is compiled separately and loaded as an opaque binary; the
//! types here mirror its wire-level enums one-to-one, so every discriminant
//! is fixed and must not be reordered.

use bitflags::bitflags;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Engine-assigned entity identifier. `0` is reserved for "no entity".
pub type EntityId = u32;

/// Kind of a scene entity, as reported by picking and snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum EntityKind {
    Unknown = 0,
    Rect = 1,
    Circle = 2,
    Line = 3,
    Polyline = 4,
    Polygon = 5,
    Arrow = 6,
    Text = 7,
}

impl EntityKind {
    /// Decode a raw discriminant coming off the engine boundary.
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            1 => Self::Rect,
            2 => Self::Circle,
            3 => Self::Line,
            4 => Self::Polyline,
            5 => Self::Polygon,
            6 => Self::Arrow,
            7 => Self::Text,
            _ => Self::Unknown,
        }
    }
}

bitflags! {
    /// Entity-kind filter for pick queries.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct PickMask: u32 {
        const RECT     = 1 << EntityKind::Rect as u32;
        const CIRCLE   = 1 << EntityKind::Circle as u32;
        const LINE     = 1 << EntityKind::Line as u32;
        const POLYLINE = 1 << EntityKind::Polyline as u32;
        const POLYGON  = 1 << EntityKind::Polygon as u32;
        const ARROW    = 1 << EntityKind::Arrow as u32;
        const TEXT     = 1 << EntityKind::Text as u32;
    }
}

impl PickMask {
    /// Filter accepting every pickable kind.
    pub fn any() -> Self {
        Self::all()
    }
}

/// What part of an entity a pick landed on.
///
/// Handles only exist on selected entities; the engine reports them with
/// priority over body/edge hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SubTarget {
    None = 0,
    Body = 1,
    Edge = 2,
    Vertex = 3,
    ResizeHandle = 4,
    RotateHandle = 5,
    TextBody = 6,
    TextCaret = 7,
}

/// Result of a pick query. A miss is represented as `None` at the call
/// site, never as an id of `0` inside this struct.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    /// Entity that was hit.
    pub id: EntityId,
    /// Kind of the hit entity.
    pub kind: EntityKind,
    /// Which feature of the entity was hit.
    pub sub_target: SubTarget,
    /// Vertex/edge/handle/caret index; `-1` when not applicable.
    ///
    /// For `ResizeHandle` this is the corner index `0..4`
    /// (TL=0, TR=1, BR=2, BL=3) or the side index offset by 4
    /// (S=4, E=5, N=6, W=7). For `Vertex`/`Edge` it indexes the contour.
    pub sub_index: i32,
    /// World-space hit point.
    pub hit: Point,
    /// Distance from the query point in world units.
    pub distance: f64,
}

impl PickHit {
    /// True when the hit is a resize-handle corner (as opposed to a side).
    pub fn is_corner_handle(&self) -> bool {
        self.sub_target == SubTarget::ResizeHandle && (0..4).contains(&self.sub_index)
    }

    /// Side index for side-resize handles (S=0, E=1, N=2, W=3), if this
    /// hit is one.
    pub fn side_index(&self) -> Option<i32> {
        if self.sub_target == SubTarget::ResizeHandle && (4..8).contains(&self.sub_index) {
            Some(self.sub_index - 4)
        } else {
            None
        }
    }
}

/// Live transform session mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TransformMode {
    Move = 0,
    VertexDrag = 1,
    EdgeDrag = 2,
    Resize = 3,
    Rotate = 4,
    /// Constrained resize from an N/E/S/W handle.
    SideResize = 5,
}

/// How an id set combines with the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u32)]
pub enum SelectionMode {
    Replace = 0,
    Add = 1,
    Remove = 2,
    Toggle = 3,
}

/// Marquee containment semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u32)]
pub enum MarqueeMode {
    /// Only entities fully inside the box.
    Window = 0,
    /// Any entity overlapping the box.
    Crossing = 1,
}

/// Which style channel an override command addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum StyleTarget {
    Stroke = 0,
    Fill = 1,
    TextColor = 2,
    TextBackground = 3,
}

bitflags! {
    /// Keyboard-modifier mask carried on every begin/update command.
    ///
    /// The engine interprets these per session mode (Shift constrains,
    /// Alt duplicates a move / makes a side-resize symmetric); the client
    /// only builds and forwards the mask.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct ModifierMask: u32 {
        const SHIFT = 1 << 0;
        const CTRL  = 1 << 1;
        const ALT   = 1 << 2;
        const META  = 1 << 3;
    }
}

/// Build the engine modifier mask from raw modifier booleans.
pub fn modifier_mask(shift: bool, ctrl: bool, alt: bool, meta: bool) -> ModifierMask {
    let mut mask = ModifierMask::empty();
    if shift {
        mask |= ModifierMask::SHIFT;
    }
    if ctrl {
        mask |= ModifierMask::CTRL;
    }
    if alt {
        mask |= ModifierMask::ALT;
    }
    if meta {
        mask |= ModifierMask::META;
    }
    mask
}

bitflags! {
    /// Flags on a draft-begin payload.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct DraftFlags: u32 {
        /// Fill color inherits from the layer instead of the payload color.
        const FILL_BY_LAYER = 1 << 0;
        /// Stroke color inherits from the layer.
        const STROKE_BY_LAYER = 1 << 1;
    }
}

/// Snap configuration forwarded to the engine session. The client never
/// snaps points itself; it only toggles this.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapOptions {
    pub enabled: bool,
    pub grid_enabled: bool,
    pub grid_size: f64,
}

impl Default for SnapOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            grid_enabled: false,
            grid_size: 10.0,
        }
    }
}

/// Position/size/rotation readout for a single entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityTransform {
    /// Center of the entity's bounding box, world units.
    pub center: Point,
    /// Bounding-box width in world units.
    pub width: f64,
    /// Bounding-box height in world units.
    pub height: f64,
    /// Rotation in radians, counter-clockwise.
    pub rotation: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_kind_roundtrip() {
        for raw in 0..9u32 {
            let kind = EntityKind::from_raw(raw);
            if raw >= 1 && raw <= 7 {
                assert_eq!(kind as u32, raw);
            } else {
                assert_eq!(kind, EntityKind::Unknown);
            }
        }
    }

    #[test]
    fn test_modifier_mask_bits() {
        assert_eq!(modifier_mask(false, false, false, false).bits(), 0);
        assert_eq!(modifier_mask(true, false, false, false).bits(), 1);
        assert_eq!(modifier_mask(false, true, false, false).bits(), 2);
        assert_eq!(modifier_mask(false, false, true, false).bits(), 4);
        assert_eq!(modifier_mask(false, false, false, true).bits(), 8);
        assert_eq!(modifier_mask(true, true, true, true).bits(), 15);
    }

    #[test]
    fn test_side_index_mapping() {
        let mut hit = PickHit {
            id: 1,
            kind: EntityKind::Rect,
            sub_target: SubTarget::ResizeHandle,
            sub_index: 2,
            hit: Point::ZERO,
            distance: 0.0,
        };
        assert!(hit.is_corner_handle());
        assert_eq!(hit.side_index(), None);

        hit.sub_index = 6; // N side
        assert!(!hit.is_corner_handle());
        assert_eq!(hit.side_index(), Some(2));
    }

    #[test]
    fn test_pick_mask_any_covers_all_kinds() {
        let mask = PickMask::any();
        for kind in [
            EntityKind::Rect,
            EntityKind::Circle,
            EntityKind::Line,
            EntityKind::Polyline,
            EntityKind::Polygon,
            EntityKind::Arrow,
            EntityKind::Text,
        ] {
            assert!(mask.bits() & (1 << kind as u32) != 0);
        }
    }
}
