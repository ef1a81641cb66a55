//! Engine transform session driving for the select tool.

use kurbo::Point;
use planar_bridge::{BeginTransform, EntityId, EntityKind, PickHit, SubTarget, TransformMode};

use crate::context::{Env, EventContext};

/// Derive the transform session a pick hit should start, with its
/// vertex/corner/side index. `None` means the hit is a plain body hit
/// (handled through the pending-click path instead).
pub fn session_for_hit(hit: &PickHit, contour_enabled: bool) -> Option<(TransformMode, i32)> {
    match hit.sub_target {
        SubTarget::RotateHandle => Some((TransformMode::Rotate, hit.sub_index)),
        SubTarget::ResizeHandle => match hit.side_index() {
            Some(side) => Some((TransformMode::SideResize, side)),
            None => Some((TransformMode::Resize, hit.sub_index)),
        },
        SubTarget::Vertex if contour_enabled && hit.kind == EntityKind::Polygon => {
            Some((TransformMode::VertexDrag, hit.sub_index))
        }
        SubTarget::Edge if contour_enabled && hit.kind == EntityKind::Polygon => {
            Some((TransformMode::EdgeDrag, hit.sub_index))
        }
        _ => None,
    }
}

/// The live engine transform session, if any.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransformController {
    active: Option<ActiveSession>,
}

#[derive(Debug, Clone, Copy)]
struct ActiveSession {
    mode: TransformMode,
    start_screen: Point,
}

impl TransformController {
    /// Start an engine transform session over `ids`. `start_screen` is the
    /// gesture's press point, which may precede the current event (a
    /// pending press promotes to a session only after the drag threshold).
    pub fn begin(
        &mut self,
        ctx: &mut EventContext<'_>,
        start_screen: Point,
        ids: Vec<EntityId>,
        mode: TransformMode,
        specific_id: EntityId,
        vertex_index: i32,
    ) {
        if self.active.is_some() {
            // One session at a time; the engine would reject the second
            // begin anyway.
            log::warn!("begin_transform while a session is active; ignoring");
            return;
        }
        log::debug!("begin transform {mode:?} over {} ids", ids.len());
        ctx.env.engine.begin_transform(&BeginTransform {
            ids,
            mode,
            specific_id,
            vertex_index,
            screen: start_screen,
            view: ctx.env.view,
            canvas: ctx.env.canvas_size,
            modifiers: ctx.modifiers.mask(),
        });
        self.active = Some(ActiveSession { mode, start_screen });
    }

    /// Forward the current pointer position into the live session.
    pub fn update(&mut self, ctx: &mut EventContext<'_>) {
        if self.active.is_none() {
            return;
        }
        ctx.env.engine.update_transform(
            ctx.screen,
            ctx.env.view,
            ctx.env.canvas_size,
            ctx.modifiers.mask(),
        );
    }

    /// Commit the live session. No-op when none is active.
    pub fn commit(&mut self, env: &mut Env<'_>) {
        if self.active.take().is_some() {
            env.engine.commit_transform();
        }
    }

    /// Cancel the live session. Returns true when one was cancelled.
    pub fn cancel(&mut self, env: &mut Env<'_>) -> bool {
        if self.active.take().is_some() {
            env.engine.cancel_transform();
            true
        } else {
            false
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn mode(&self) -> Option<TransformMode> {
        self.active.map(|s| s.mode)
    }

    /// Screen point where the session started.
    pub fn start_screen(&self) -> Option<Point> {
        self.active.map(|s| s.start_screen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(sub_target: SubTarget, sub_index: i32, kind: EntityKind) -> PickHit {
        PickHit {
            id: 1,
            kind,
            sub_target,
            sub_index,
            hit: Point::ZERO,
            distance: 0.0,
        }
    }

    #[test]
    fn test_corner_handle_starts_resize() {
        let h = hit(SubTarget::ResizeHandle, 2, EntityKind::Rect);
        assert_eq!(
            session_for_hit(&h, false),
            Some((TransformMode::Resize, 2))
        );
    }

    #[test]
    fn test_side_handle_starts_side_resize() {
        // Side indices are offset by 4 in the pick result; N is raw 6.
        let h = hit(SubTarget::ResizeHandle, 6, EntityKind::Rect);
        assert_eq!(
            session_for_hit(&h, false),
            Some((TransformMode::SideResize, 2))
        );
    }

    #[test]
    fn test_rotate_handle_starts_rotate() {
        let h = hit(SubTarget::RotateHandle, 1, EntityKind::Circle);
        assert_eq!(session_for_hit(&h, false), Some((TransformMode::Rotate, 1)));
    }

    #[test]
    fn test_contour_grips_need_feature_flag() {
        let vertex = hit(SubTarget::Vertex, 3, EntityKind::Polygon);
        assert_eq!(session_for_hit(&vertex, false), None);
        assert_eq!(
            session_for_hit(&vertex, true),
            Some((TransformMode::VertexDrag, 3))
        );

        let edge = hit(SubTarget::Edge, 1, EntityKind::Polygon);
        assert_eq!(session_for_hit(&edge, false), None);
        assert_eq!(
            session_for_hit(&edge, true),
            Some((TransformMode::EdgeDrag, 1))
        );
    }

    #[test]
    fn test_non_polygon_edge_is_body_hit() {
        let edge = hit(SubTarget::Edge, 0, EntityKind::Line);
        assert_eq!(session_for_hit(&edge, true), None);
        let body = hit(SubTarget::Body, -1, EntityKind::Rect);
        assert_eq!(session_for_hit(&body, true), None);
    }
}
