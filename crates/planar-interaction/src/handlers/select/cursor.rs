//! Custom cursor state for the select tool.
//!
//! At most one custom cursor (rotate / resize / move) shows at a time. The
//! state is reset on every pointer move before the hover pick possibly
//! re-arms it; while armed, the native cursor is hidden and the badge is
//! drawn in the overlay instead.

use kurbo::Point;

use crate::overlay::CursorBadge;

/// Which custom cursor is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CustomCursor {
    #[default]
    None,
    Rotate,
    Resize,
    Move,
}

/// Armed cursor plus its placement.
#[derive(Debug, Clone, Copy, Default)]
pub struct CursorState {
    kind: CustomCursor,
    screen: Point,
    angle_deg: f64,
}

impl CursorState {
    /// Disarm; called at the start of every pointer move.
    pub fn reset(&mut self) {
        self.kind = CustomCursor::None;
    }

    pub fn arm_rotate(&mut self, screen: Point, angle_deg: f64) {
        self.kind = CustomCursor::Rotate;
        self.screen = screen;
        self.angle_deg = normalize_deg(angle_deg);
    }

    pub fn arm_resize(&mut self, screen: Point, angle_deg: f64) {
        self.kind = CustomCursor::Resize;
        self.screen = screen;
        self.angle_deg = normalize_deg(angle_deg);
    }

    pub fn arm_move(&mut self, screen: Point) {
        self.kind = CustomCursor::Move;
        self.screen = screen;
        self.angle_deg = 0.0;
    }

    /// True when a custom cursor is showing (native cursor must hide).
    pub fn is_custom(&self) -> bool {
        self.kind != CustomCursor::None
    }

    pub fn kind(&self) -> CustomCursor {
        self.kind
    }

    /// Overlay badge for the armed cursor, if any.
    pub fn badge(&self) -> Option<CursorBadge> {
        match self.kind {
            CustomCursor::None => None,
            CustomCursor::Rotate => Some(CursorBadge::Rotate {
                screen: self.screen,
                angle_deg: self.angle_deg,
            }),
            CustomCursor::Resize => Some(CursorBadge::Resize {
                screen: self.screen,
                angle_deg: self.angle_deg,
            }),
            CustomCursor::Move => Some(CursorBadge::Move {
                screen: self.screen,
            }),
        }
    }
}

/// Base angle of the rotation cursor per corner (TL=0, TR=1, BR=2, BL=3):
/// the arrows point outward along the corner's diagonal.
pub fn rotate_corner_angle(corner: i32) -> f64 {
    match corner {
        0 => 315.0,
        1 => 45.0,
        2 => 135.0,
        3 => 225.0,
        _ => 0.0,
    }
}

/// Resize arrow axis per corner: TL/BR share the NW–SE diagonal, TR/BL the
/// NE–SW one.
pub fn resize_corner_angle(corner: i32) -> f64 {
    match corner {
        0 | 2 => 135.0,
        1 | 3 => 45.0,
        _ => 0.0,
    }
}

/// Resize arrow axis per side (S=0, E=1, N=2, W=3).
pub fn resize_side_angle(side: i32) -> f64 {
    match side {
        0 | 2 => 90.0,
        1 | 3 => 0.0,
        _ => 0.0,
    }
}

/// Wrap an angle into [0, 360).
pub fn normalize_deg(angle: f64) -> f64 {
    angle.rem_euclid(360.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_disarms() {
        let mut state = CursorState::default();
        state.arm_move(Point::new(10.0, 10.0));
        assert!(state.is_custom());
        state.reset();
        assert!(!state.is_custom());
        assert!(state.badge().is_none());
    }

    #[test]
    fn test_mutually_exclusive() {
        let mut state = CursorState::default();
        state.arm_rotate(Point::ZERO, 45.0);
        state.arm_resize(Point::ZERO, 90.0);
        assert_eq!(state.kind(), CustomCursor::Resize);
        assert!(matches!(
            state.badge(),
            Some(CursorBadge::Resize { angle_deg, .. }) if (angle_deg - 90.0).abs() < 1e-12
        ));
    }

    #[test]
    fn test_angle_normalization() {
        assert_eq!(normalize_deg(370.0), 10.0);
        assert_eq!(normalize_deg(-45.0), 315.0);
        let mut state = CursorState::default();
        state.arm_rotate(Point::ZERO, 405.0);
        assert!(matches!(
            state.badge(),
            Some(CursorBadge::Rotate { angle_deg, .. }) if (angle_deg - 45.0).abs() < 1e-12
        ));
    }

    #[test]
    fn test_corner_angles_opposite_corners_share_axis() {
        assert_eq!(resize_corner_angle(0), resize_corner_angle(2));
        assert_eq!(resize_corner_angle(1), resize_corner_angle(3));
        assert_ne!(resize_corner_angle(0), resize_corner_angle(1));
        assert_eq!(resize_side_angle(0), resize_side_angle(2));
        assert_eq!(resize_side_angle(1), 0.0);
    }
}
