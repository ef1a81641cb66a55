//! Drafting tool: creates new shapes through the engine draft session.
//!
//! Every shape family shares the `idle → begin → update* → commit|cancel`
//! cycle but differs in its click behavior: box shapes support
//! click-to-create with a default size (polygon opens the side-count
//! prompt instead), line/arrow/polyline support click-click drafting on
//! top of the conventional press-drag-release.

mod polygon;
mod session;
mod style;

pub use polygon::{PolygonPrompt, SIDES_INPUT_MAX, SIDES_MIN, SIDES_SEED_MAX};
pub use session::{DUPLICATE_POINT_EPSILON_SQ, DraftPhase, DraftSession};
pub use style::{STROKE_WIDTH_MAX, STROKE_WIDTH_MIN, arrow_head_px, draft_style};

use std::any::Any;

use kurbo::Point;
use planar_bridge::{
    BeginDraft, DraftStyle, Engine, EntityId, EntityKind, ModifierMask, SelectionMode,
};

use crate::context::{Env, EventContext};
use crate::event::{Key, KeyInput, PointerButton};
use crate::handler::{HandlerName, ToolHandler, Transition};
use crate::overlay::{CursorHint, OverlayNode};
use crate::settings::ToolDefaults;
use crate::tools::Tool;

/// Edge length of shapes created by a plain click (no drag).
pub const DEFAULT_SHAPE_SIZE: f64 = 100.0;

/// Create-and-commit a shape of the default size centered on `center`.
fn create_default_shape(
    engine: &mut dyn Engine,
    kind: EntityKind,
    center: Point,
    style: DraftStyle,
    sides: u32,
    head_px: f64,
) -> Option<EntityId> {
    let half = DEFAULT_SHAPE_SIZE / 2.0;
    engine.begin_draft(&BeginDraft {
        kind,
        start: Point::new(center.x - half, center.y - half),
        style,
        sides,
        head_px,
    });
    engine.update_draft(
        Point::new(center.x + half, center.y + half),
        ModifierMask::empty(),
    );
    engine.commit_draft()
}

/// The drafting handler, parameterized by the shape tool it was opened
/// with and a settings snapshot taken at that moment.
pub struct DraftHandler {
    tool: Tool,
    defaults: ToolDefaults,
    session: DraftSession,
    prompt: Option<PolygonPrompt>,
}

impl DraftHandler {
    /// Returns `None` for tools that do not draft shapes.
    pub fn new(tool: Tool, defaults: ToolDefaults) -> Option<Self> {
        let kind = tool.draft_kind()?;
        Some(Self {
            tool,
            defaults,
            session: DraftSession::new(kind),
            prompt: None,
        })
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn prompt(&self) -> Option<&PolygonPrompt> {
        self.prompt.as_ref()
    }

    fn kind(&self) -> EntityKind {
        self.session.kind()
    }

    fn style(&self) -> DraftStyle {
        draft_style(&self.defaults)
    }

    fn sides(&self) -> u32 {
        self.defaults
            .polygon_sides
            .clamp(SIDES_MIN, SIDES_SEED_MAX)
    }

    fn head_px(&self) -> f64 {
        arrow_head_px(self.style().stroke_width_px)
    }

    fn is_segment_kind(&self) -> bool {
        matches!(
            self.kind(),
            EntityKind::Line | EntityKind::Arrow | EntityKind::Polyline
        )
    }

    /// Confirm the side-count prompt: build the polygon and persist the
    /// chosen count as the new tool default.
    pub fn confirm_polygon(&mut self, env: &mut Env<'_>, sides: u32) {
        let Some(prompt) = self.prompt.take() else {
            return;
        };
        let sides = PolygonPrompt::clamp_input(sides);
        if let Some(id) = create_default_shape(
            env.engine,
            EntityKind::Polygon,
            prompt.center_world,
            draft_style(&self.defaults),
            sides,
            0.0,
        ) {
            env.engine.set_selection(&[id], SelectionMode::Replace);
        }
        env.settings.set_polygon_sides(sides);
        self.defaults.polygon_sides = sides;
        env.notifier.notify();
    }

    /// Dismiss the side-count prompt, discarding the pending center.
    pub fn cancel_polygon(&mut self, env: &mut Env<'_>) {
        if self.prompt.take().is_some() {
            env.notifier.notify();
        }
    }
}

impl ToolHandler for DraftHandler {
    fn name(&self) -> HandlerName {
        HandlerName::Draft
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn on_pointer_down(&mut self, ctx: &mut EventContext<'_>) -> Transition {
        // The prompt swallows all drafting input while open.
        if self.prompt.is_some() {
            return None;
        }

        if ctx.button == PointerButton::Right {
            // Right-click commits a click-click draft.
            if self.session.is_sticky() {
                self.session.commit(ctx.env.engine);
                ctx.env.notifier.notify();
            }
            return None;
        }
        if ctx.button != PointerButton::Left {
            return None;
        }

        if self.session.is_sticky() {
            match self.kind() {
                EntityKind::Polyline => {
                    // Each non-duplicate click pins another point.
                    if self
                        .session
                        .append_point(ctx.env.engine, ctx.snapped, ctx.modifiers.mask())
                    {
                        ctx.env.notifier.notify();
                    }
                }
                _ => {
                    // Line/arrow: the second click commits the segment.
                    self.session.commit(ctx.env.engine);
                    ctx.env.notifier.notify();
                }
            }
            return None;
        }

        let style = self.style();
        let sides = self.sides();
        let head_px = self.head_px();
        self.session.begin(
            ctx.env.engine,
            ctx.snapped,
            ctx.screen,
            style,
            sides,
            head_px,
        );
        ctx.env.notifier.notify();
        None
    }

    fn on_pointer_move(&mut self, ctx: &mut EventContext<'_>) {
        if self.prompt.is_some() {
            return;
        }
        if self.session.is_active() {
            self.session
                .update(ctx.env.engine, ctx.snapped, ctx.modifiers.mask());
            ctx.env.notifier.notify();
        }
    }

    fn on_pointer_up(&mut self, ctx: &mut EventContext<'_>) -> Transition {
        if self.prompt.is_some() || ctx.button != PointerButton::Left {
            return None;
        }
        if self.session.phase() != DraftPhase::Pressed {
            return None;
        }

        if self.session.dragged(ctx.screen) {
            // Conventional press-drag-release creation.
            if self.kind() == EntityKind::Polyline {
                self.session
                    .append_point(ctx.env.engine, ctx.snapped, ctx.modifiers.mask());
            }
            self.session.commit(ctx.env.engine);
            ctx.env.notifier.notify();
            return None;
        }

        // A click, not a drag.
        match self.kind() {
            EntityKind::Rect | EntityKind::Circle => {
                let center = self.session.start_world();
                self.session.cancel(ctx.env.engine);
                if let Some(id) = create_default_shape(
                    ctx.env.engine,
                    self.kind(),
                    center,
                    self.style(),
                    self.sides(),
                    self.head_px(),
                ) {
                    ctx.env.engine.set_selection(&[id], SelectionMode::Replace);
                }
            }
            EntityKind::Polygon => {
                let center = self.session.start_world();
                self.session.cancel(ctx.env.engine);
                self.prompt = Some(PolygonPrompt::open(
                    center,
                    ctx.screen,
                    self.defaults.polygon_sides,
                ));
            }
            EntityKind::Line | EntityKind::Arrow | EntityKind::Polyline => {
                self.session.make_sticky();
            }
            _ => {}
        }
        ctx.env.notifier.notify();
        None
    }

    fn on_double_click(&mut self, ctx: &mut EventContext<'_>) -> Transition {
        if self.session.is_sticky() && self.is_segment_kind() {
            self.session.commit(ctx.env.engine);
            ctx.env.notifier.notify();
        }
        None
    }

    fn on_pointer_leave(&mut self, env: &mut Env<'_>) {
        // Accumulated polyline points are worth keeping; partial box
        // drafts keep following the pointer thanks to pointer capture.
        if self.kind() == EntityKind::Polyline && self.session.is_sticky() {
            self.session.commit(env.engine);
            env.notifier.notify();
        }
    }

    fn on_cancel(&mut self, env: &mut Env<'_>) {
        self.prompt = None;
        self.session.cancel(env.engine);
        env.notifier.notify();
    }

    fn on_key_down(&mut self, env: &mut Env<'_>, key: &KeyInput) -> bool {
        match &key.key {
            Key::Escape => {
                if self.prompt.take().is_some() {
                    env.notifier.notify();
                    return true;
                }
                if self.session.is_active() {
                    self.session.cancel(env.engine);
                    env.notifier.notify();
                    return true;
                }
                false
            }
            Key::Enter => {
                if self.kind() == EntityKind::Polyline && self.session.is_active() {
                    self.session.commit(env.engine);
                    env.notifier.notify();
                    return true;
                }
                false
            }
            _ => false,
        }
    }

    fn on_leave(&mut self, env: &mut Env<'_>) {
        self.prompt = None;
        if self.kind() == EntityKind::Polyline && self.session.is_active() {
            // Never silently discard accumulated polyline points.
            self.session.commit(env.engine);
        } else {
            self.session.cancel(env.engine);
        }
    }

    fn cursor(&self) -> CursorHint {
        CursorHint::Crosshair
    }

    fn overlay(&self, out: &mut Vec<OverlayNode>) {
        if let Some(prompt) = &self.prompt {
            out.push(prompt.overlay());
        }
    }
}
