//! Per-event context handed to the active handler.
//!
//! Built on the stack by the core for the duration of one event and
//! discarded afterwards; handlers never retain any part of it.

use kurbo::{Point, Size};
use planar_bridge::{Engine, PickHit, PickMask, TextTool, ViewTransform};

// Use web-time on WASM, std::time otherwise
#[cfg(target_arch = "wasm32")]
use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

use crate::event::{ModifierState, PointerButton};
use crate::notify::Notifier;
use crate::settings::SharedSettings;
use crate::ui_state::SharedUi;

/// Pick tolerance in screen pixels; divided by the zoom scale to get the
/// world-unit tolerance handed to the engine.
pub const PICK_TOLERANCE_PX: f64 = 5.0;

/// Screen-space Euclidean movement at/above which a press becomes a drag.
pub const DRAG_THRESHOLD_PX: f64 = 5.0;

/// True when the movement from `down` to `current` counts as a drag.
/// Exactly at the threshold is a drag; below it is a click.
pub fn exceeds_drag_threshold(down: Point, current: Point) -> bool {
    down.distance(current) >= DRAG_THRESHOLD_PX
}

/// Capabilities available to a handler during any hook, including the
/// event-less lifecycle hooks (enter/leave/cancel/blur/keys).
pub struct Env<'a> {
    /// The engine command surface.
    pub engine: &'a mut dyn Engine,
    /// The per-document text-editing façade.
    pub text_tool: &'a mut dyn TextTool,
    /// Tool-default settings (snapshot per interaction).
    pub settings: &'a SharedSettings,
    /// Cross-panel UI state.
    pub ui: &'a SharedUi,
    /// Frame-coalesced re-render notification.
    pub notifier: &'a Notifier,
    /// Current view transform, read-only snapshot.
    pub view: ViewTransform,
    /// Canvas size in pixels.
    pub canvas_size: Size,
}

/// Context for a pointer event.
pub struct EventContext<'a> {
    pub env: Env<'a>,
    /// Canvas-local screen point, pixels.
    pub screen: Point,
    /// Screen point mapped through the view transform.
    pub world: Point,
    /// World point after snap resolution. Currently equal to `world`:
    /// snapping happens inside the engine during draft/transform updates,
    /// not client-side.
    pub snapped: Point,
    pub button: PointerButton,
    pub modifiers: ModifierState,
    /// Event timestamp, used by the hover-pick throttle.
    pub now: Instant,
}

impl EventContext<'_> {
    /// World-unit pick tolerance for the current zoom.
    pub fn pick_tolerance(&self) -> f64 {
        PICK_TOLERANCE_PX / self.env.view.scale
    }

    /// Best hit under the event's world point.
    pub fn hover_pick(&self) -> Option<PickHit> {
        self.env
            .engine
            .pick(self.world, self.pick_tolerance(), PickMask::any())
    }

    /// Full candidate stack under the event's world point, front-most
    /// first. Used by Ctrl-click cycling.
    pub fn pick_candidates(&self) -> Vec<PickHit> {
        self.env
            .engine
            .pick_all(self.world, self.pick_tolerance(), PickMask::any())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_threshold_boundary() {
        let down = Point::new(100.0, 100.0);
        // 4.99 px: click
        assert!(!exceeds_drag_threshold(down, Point::new(104.99, 100.0)));
        // exactly 5 px: drag
        assert!(exceeds_drag_threshold(down, Point::new(105.0, 100.0)));
        // euclidean, not per-axis: (3,4) is 5 px
        assert!(exceeds_drag_threshold(down, Point::new(103.0, 104.0)));
        // (3,3) is ~4.24 px
        assert!(!exceeds_drag_threshold(down, Point::new(103.0, 103.0)));
    }
}
