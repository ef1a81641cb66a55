//! Local mirror of the engine draft session.
//!
//! The engine owns the authoritative draft geometry; this mirror exists
//! only to answer "am I mid-draft, in which phase, with which points so
//! far" for click-vs-drag and commit/cancel decisions. It must never be
//! used as a source of final geometry — commits always go through the
//! engine.

use kurbo::Point;
use planar_bridge::{BeginDraft, DraftStyle, Engine, EntityId, EntityKind, ModifierMask};

use crate::context::exceeds_drag_threshold;

/// Squared world-space distance under which two consecutive polyline
/// points count as duplicates and the click is ignored.
pub const DUPLICATE_POINT_EPSILON_SQ: f64 = 1e-6;

/// Where the session is in its life cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DraftPhase {
    #[default]
    Idle,
    /// Button held since the initial press; click vs drag undecided.
    Pressed,
    /// Click-click mode: the start is pinned and the free endpoint follows
    /// the pointer with the button up.
    Sticky,
}

/// One drafting session for a single shape kind.
#[derive(Debug, Clone)]
pub struct DraftSession {
    kind: EntityKind,
    phase: DraftPhase,
    down_screen: Point,
    start_world: Point,
    /// Fixed polyline points, including the start.
    points: Vec<Point>,
}

impl DraftSession {
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            phase: DraftPhase::Idle,
            down_screen: Point::ZERO,
            start_world: Point::ZERO,
            points: Vec::new(),
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn phase(&self) -> DraftPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase != DraftPhase::Idle
    }

    pub fn is_sticky(&self) -> bool {
        self.phase == DraftPhase::Sticky
    }

    pub fn start_world(&self) -> Point {
        self.start_world
    }

    /// Fixed points accumulated so far (polyline only).
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Begin the engine draft at `start`.
    pub fn begin(
        &mut self,
        engine: &mut dyn Engine,
        start: Point,
        down_screen: Point,
        style: DraftStyle,
        sides: u32,
        head_px: f64,
    ) {
        engine.begin_draft(&BeginDraft {
            kind: self.kind,
            start,
            style,
            sides,
            head_px,
        });
        self.phase = DraftPhase::Pressed;
        self.down_screen = down_screen;
        self.start_world = start;
        self.points.clear();
        if self.kind == EntityKind::Polyline {
            self.points.push(start);
        }
    }

    /// Forward the pointer into the live draft.
    pub fn update(&mut self, engine: &mut dyn Engine, world: Point, modifiers: ModifierMask) {
        if self.is_active() {
            engine.update_draft(world, modifiers);
        }
    }

    /// Append a fixed polyline point. Returns false (and appends nothing)
    /// for a repeat click at (nearly) the last point.
    pub fn append_point(
        &mut self,
        engine: &mut dyn Engine,
        world: Point,
        modifiers: ModifierMask,
    ) -> bool {
        if !self.is_active() {
            return false;
        }
        if let Some(last) = self.points.last() {
            let d = world - *last;
            if d.hypot2() <= DUPLICATE_POINT_EPSILON_SQ {
                return false;
            }
        }
        engine.append_draft_point(world, modifiers);
        self.points.push(world);
        true
    }

    /// Enter click-click mode after a press released without dragging.
    pub fn make_sticky(&mut self) {
        if self.phase == DraftPhase::Pressed {
            self.phase = DraftPhase::Sticky;
        }
    }

    /// Whether the pointer has dragged since the initial press.
    pub fn dragged(&self, screen: Point) -> bool {
        exceeds_drag_threshold(self.down_screen, screen)
    }

    /// Commit through the engine. Degenerate drafts cancel instead: a
    /// zero-delta line/rect/circle or a sub-2-point polyline never becomes
    /// an entity.
    pub fn commit(&mut self, engine: &mut dyn Engine) -> Option<EntityId> {
        if !self.is_active() {
            return None;
        }
        let id = if self.kind == EntityKind::Polyline {
            if self.points.len() >= 2 {
                engine.commit_draft()
            } else {
                engine.cancel_draft();
                None
            }
        } else if engine.has_draft_delta() {
            engine.commit_draft()
        } else {
            engine.cancel_draft();
            None
        };
        if let Some(id) = id {
            log::debug!("committed {:?} draft as entity {id}", self.kind);
        }
        self.reset();
        id
    }

    /// Cancel through the engine and reset.
    pub fn cancel(&mut self, engine: &mut dyn Engine) {
        if self.is_active() {
            engine.cancel_draft();
        }
        self.reset();
    }

    fn reset(&mut self) {
        self.phase = DraftPhase::Idle;
        self.points.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakeEngine;
    use planar_bridge::{DraftFlags, Rgba};

    fn style() -> DraftStyle {
        DraftStyle {
            fill: Rgba::WHITE,
            stroke: Rgba::BLACK,
            fill_enabled: true,
            stroke_enabled: true,
            stroke_width_px: 2.0,
            flags: DraftFlags::empty(),
        }
    }

    #[test]
    fn test_phase_progression() {
        let mut engine = FakeEngine::new();
        let mut session = DraftSession::new(EntityKind::Line);
        assert!(!session.is_active());

        session.begin(
            &mut engine,
            Point::new(0.0, 0.0),
            Point::new(0.0, 0.0),
            style(),
            0,
            0.0,
        );
        assert_eq!(session.phase(), DraftPhase::Pressed);

        session.make_sticky();
        assert!(session.is_sticky());

        session.cancel(&mut engine);
        assert_eq!(session.phase(), DraftPhase::Idle);
        assert!(!engine.draft_active());
    }

    #[test]
    fn test_zero_delta_commit_cancels() {
        let mut engine = FakeEngine::new();
        let mut session = DraftSession::new(EntityKind::Line);
        session.begin(
            &mut engine,
            Point::new(5.0, 5.0),
            Point::new(5.0, 5.0),
            style(),
            0,
            0.0,
        );
        assert_eq!(session.commit(&mut engine), None);
        assert!(engine.committed.is_empty());
    }

    #[test]
    fn test_duplicate_polyline_point_rejected() {
        let mut engine = FakeEngine::new();
        let mut session = DraftSession::new(EntityKind::Polyline);
        session.begin(
            &mut engine,
            Point::new(0.0, 0.0),
            Point::new(0.0, 0.0),
            style(),
            0,
            0.0,
        );
        // At the epsilon boundary the click still counts as a duplicate.
        assert!(!session.append_point(
            &mut engine,
            Point::new(1e-3, 0.0),
            ModifierMask::empty()
        ));
        assert!(session.append_point(
            &mut engine,
            Point::new(2e-3, 0.0),
            ModifierMask::empty()
        ));
        assert_eq!(session.points().len(), 2);
    }

    #[test]
    fn test_single_point_polyline_cancels() {
        let mut engine = FakeEngine::new();
        let mut session = DraftSession::new(EntityKind::Polyline);
        session.begin(
            &mut engine,
            Point::new(0.0, 0.0),
            Point::new(0.0, 0.0),
            style(),
            0,
            0.0,
        );
        assert_eq!(session.commit(&mut engine), None);
        assert!(!engine.draft_active());
        assert!(engine.committed.is_empty());
    }
}
