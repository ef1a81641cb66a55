//! View transform: pan/zoom state and screen↔world conversion.

use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

/// Minimum allowed zoom scale.
pub const MIN_SCALE: f64 = 0.05;
/// Maximum allowed zoom scale.
pub const MAX_SCALE: f64 = 20.0;

/// The canvas view: a translation (pan) plus a uniform scale (zoom).
///
/// World coordinates are what the engine stores; screen coordinates are
/// canvas-local pixels. Handlers receive the transform as a read-only
/// snapshot inside each event context.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    /// Pan offset in screen pixels.
    pub offset: Vec2,
    /// Zoom scale (screen px per world unit).
    pub scale: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: 1.0,
        }
    }
}

impl ViewTransform {
    pub fn new(offset: Vec2, scale: f64) -> Self {
        Self { offset, scale }
    }

    /// World → screen affine.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.scale)
    }

    /// Screen → world affine.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.scale) * Affine::translate(-self.offset)
    }

    /// Convert a canvas-local screen point to world coordinates.
    pub fn screen_to_world(&self, screen: Point) -> Point {
        self.inverse_transform() * screen
    }

    /// Convert a world point to canvas-local screen coordinates.
    pub fn world_to_screen(&self, world: Point) -> Point {
        self.transform() * world
    }

    /// Pan by a delta in screen pixels.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Zoom by `factor`, keeping `screen` fixed on the canvas.
    pub fn zoom_at(&mut self, screen: Point, factor: f64) {
        let new_scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
        if (new_scale - self.scale).abs() < f64::EPSILON {
            return;
        }

        let world = self.screen_to_world(screen);
        self.scale = new_scale;
        let moved = self.world_to_screen(world);
        self.offset += Vec2::new(screen.x - moved.x, screen.y - moved.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_conversion() {
        let view = ViewTransform::default();
        let p = Point::new(120.0, 45.0);
        assert_eq!(view.screen_to_world(p), p);
    }

    #[test]
    fn test_conversion_with_offset_and_scale() {
        let view = ViewTransform::new(Vec2::new(50.0, -20.0), 2.0);
        let world = view.screen_to_world(Point::new(150.0, 80.0));
        assert!((world.x - 50.0).abs() < 1e-12);
        assert!((world.y - 50.0).abs() < 1e-12);
    }

    #[test]
    fn test_roundtrip() {
        let view = ViewTransform::new(Vec2::new(13.0, 7.5), 1.25);
        let original = Point::new(321.0, -44.0);
        let back = view.world_to_screen(view.screen_to_world(original));
        assert!((back.x - original.x).abs() < 1e-10);
        assert!((back.y - original.y).abs() < 1e-10);
    }

    #[test]
    fn test_zoom_at_keeps_anchor_fixed() {
        let mut view = ViewTransform::new(Vec2::new(10.0, 10.0), 1.0);
        let anchor = Point::new(200.0, 100.0);
        let world_before = view.screen_to_world(anchor);
        view.zoom_at(anchor, 2.0);
        let world_after = view.screen_to_world(anchor);
        assert!((world_before.x - world_after.x).abs() < 1e-9);
        assert!((world_before.y - world_after.y).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_clamped() {
        let mut view = ViewTransform::default();
        view.zoom_at(Point::ZERO, 1e-6);
        assert!((view.scale - MIN_SCALE).abs() < f64::EPSILON);
        view.zoom_at(Point::ZERO, 1e9);
        assert!((view.scale - MAX_SCALE).abs() < f64::EPSILON);
    }
}
