//! Select tool: click selection, Ctrl-click cycling, marquee, and
//! handle-driven transforms.
//!
//! The pointer state machine is `idle → pending → transforming → idle` for
//! entity presses (the 5 px drag threshold decides click vs move) and
//! `idle → marquee → idle` for empty-space presses.

mod cursor;
mod cycle;
mod hover;
mod marquee;
mod transform;

pub use cursor::{CursorState, CustomCursor};
pub use cycle::{CycleController, CycleOutcome};
pub use hover::HoverPicker;
pub use marquee::{MarqueeSession, selection_combine};
pub use transform::{TransformController, session_for_hit};

use std::any::Any;

use kurbo::Point;
use planar_bridge::{EntityId, EntityKind, PickHit, SelectionMode, SubTarget, TransformMode};

use crate::context::{Env, EventContext, exceeds_drag_threshold};
use crate::event::{Key, KeyInput, PointerButton};
use crate::handler::{HandlerName, ToolHandler, Transition};
use crate::handlers::text::TextHandler;
use crate::overlay::{CursorHint, OverlayNode};
use crate::throttle::DEFAULT_HOVER_INTERVAL;

/// A press on an entity body whose click-vs-drag outcome is undecided.
#[derive(Debug, Clone)]
struct PendingPress {
    down_screen: Point,
    hit_id: EntityId,
    click_select: ClickSelect,
}

/// Selection change to apply if the press turns out to be a click (and,
/// for Replace/Toggle-on, before a drag starts moving).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClickSelect {
    /// Already-selected entity, no modifiers: the selection stays as-is.
    Keep,
    /// Unselected entity, no modifiers: becomes the sole selection.
    Replace,
    /// Shift chord: toggles membership.
    Toggle,
}

#[derive(Debug, Clone)]
enum SelectState {
    Idle,
    Pending(PendingPress),
    Marquee(MarqueeSession),
    Transforming,
}

/// The select tool handler.
pub struct SelectHandler {
    state: SelectState,
    cycle: CycleController,
    cursor: CursorState,
    hover: HoverPicker,
    transform: TransformController,
    /// Polygon-contour editing feature: vertex/edge grips start
    /// VertexDrag/EdgeDrag sessions when enabled.
    contour_enabled: bool,
}

impl SelectHandler {
    pub fn new() -> Self {
        Self {
            state: SelectState::Idle,
            cycle: CycleController::new(),
            cursor: CursorState::default(),
            hover: HoverPicker::throttled(DEFAULT_HOVER_INTERVAL),
            transform: TransformController::default(),
            contour_enabled: false,
        }
    }

    pub fn with_contour_editing(mut self, enabled: bool) -> Self {
        self.contour_enabled = enabled;
        self
    }

    /// Replace the hover-pick configuration (throttled or not).
    pub fn with_hover_picker(mut self, hover: HoverPicker) -> Self {
        self.hover = hover;
        self
    }

    fn is_handle_hit(hit: &PickHit) -> bool {
        matches!(
            hit.sub_target,
            SubTarget::ResizeHandle | SubTarget::RotateHandle
        )
    }

    /// Ctrl-click path. Returns true when the event was consumed.
    fn handle_command_click(&mut self, ctx: &mut EventContext<'_>) -> bool {
        let candidates: Vec<EntityId> = {
            let mut ids = Vec::new();
            for hit in ctx.pick_candidates() {
                if !Self::is_handle_hit(&hit) && !ids.contains(&hit.id) {
                    ids.push(hit.id);
                }
            }
            ids
        };

        if candidates.len() >= 2 {
            let selection = ctx.env.engine.selection();
            if let Some(outcome) = self.cycle.advance(&candidates, &selection) {
                if ctx.modifiers.shift {
                    // Shift+Ctrl: toggle the chosen candidate in, keep the rest.
                    ctx.env
                        .engine
                        .set_selection(&[outcome.chosen], SelectionMode::Toggle);
                } else {
                    ctx.env
                        .engine
                        .set_selection(&outcome.selection, SelectionMode::Replace);
                }
                ctx.env.notifier.notify();
            }
            return true;
        }

        self.cycle.reset();
        if let Some(id) = candidates.first() {
            ctx.env.engine.set_selection(&[*id], SelectionMode::Toggle);
            ctx.env.notifier.notify();
            return true;
        }
        // Ctrl-click on empty space falls through to the marquee path.
        false
    }

    /// A pending press moved past the drag threshold: adjust the selection
    /// the way the pointer-down decided, then start moving it.
    fn promote_pending(&mut self, ctx: &mut EventContext<'_>, press: &PendingPress) {
        match press.click_select {
            ClickSelect::Replace => {
                ctx.env
                    .engine
                    .set_selection(&[press.hit_id], SelectionMode::Replace);
            }
            ClickSelect::Toggle => {
                if !ctx.env.engine.is_selected(press.hit_id) {
                    ctx.env
                        .engine
                        .set_selection(&[press.hit_id], SelectionMode::Add);
                }
            }
            ClickSelect::Keep => {}
        }

        let ids = ctx.env.engine.selection();
        if ids.is_empty() {
            self.state = SelectState::Idle;
            return;
        }
        self.transform.begin(
            ctx,
            press.down_screen,
            ids,
            TransformMode::Move,
            press.hit_id,
            -1,
        );
        self.transform.update(ctx);
        self.state = SelectState::Transforming;
    }

    /// Hover pick in the idle state, arming the custom cursor.
    fn update_hover_cursor(&mut self, ctx: &mut EventContext<'_>) {
        let Some(result) = self.hover.pick(ctx) else {
            // Throttled out: keep whatever cursor is showing.
            return;
        };

        let before = self.cursor.badge();
        self.cursor.reset();

        if let Some(hit) = result {
            let rotation_deg = ctx
                .env
                .engine
                .entity_transform(hit.id)
                .map(|t| t.rotation.to_degrees())
                .unwrap_or(0.0);
            match hit.sub_target {
                SubTarget::RotateHandle => {
                    let angle = cursor::rotate_corner_angle(hit.sub_index) + rotation_deg;
                    self.cursor.arm_rotate(ctx.screen, angle);
                }
                SubTarget::ResizeHandle => {
                    let angle = match hit.side_index() {
                        Some(side) => cursor::resize_side_angle(side) + rotation_deg,
                        None => cursor::resize_corner_angle(hit.sub_index) + rotation_deg,
                    };
                    self.cursor.arm_resize(ctx.screen, angle);
                }
                SubTarget::Vertex | SubTarget::Edge
                    if self.contour_enabled && hit.kind == EntityKind::Polygon =>
                {
                    self.cursor.arm_move(ctx.screen);
                }
                _ => {}
            }
        }

        if self.cursor.badge() != before {
            ctx.env.notifier.notify();
        }
    }
}

impl Default for SelectHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolHandler for SelectHandler {
    fn name(&self) -> HandlerName {
        HandlerName::Select
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn on_pointer_down(&mut self, ctx: &mut EventContext<'_>) -> Transition {
        if ctx.button != PointerButton::Left {
            return None;
        }

        if ctx.modifiers.command() {
            if self.handle_command_click(ctx) {
                return None;
            }
        } else {
            self.cycle.reset();
        }

        match ctx.hover_pick() {
            Some(hit) => {
                if let Some((mode, index)) = session_for_hit(&hit, self.contour_enabled) {
                    // Handle / contour grip: the session starts immediately.
                    let ids = match mode {
                        TransformMode::VertexDrag | TransformMode::EdgeDrag => vec![hit.id],
                        _ => {
                            let selection = ctx.env.engine.selection();
                            if selection.contains(&hit.id) {
                                selection
                            } else {
                                vec![hit.id]
                            }
                        }
                    };
                    let down_screen = ctx.screen;
                    self.transform.begin(ctx, down_screen, ids, mode, hit.id, index);
                    self.state = SelectState::Transforming;
                } else {
                    let click_select = if ctx.modifiers.shift {
                        ClickSelect::Toggle
                    } else if ctx.env.engine.is_selected(hit.id) {
                        ClickSelect::Keep
                    } else {
                        ClickSelect::Replace
                    };
                    self.state = SelectState::Pending(PendingPress {
                        down_screen: ctx.screen,
                        hit_id: hit.id,
                        click_select,
                    });
                }
            }
            None => {
                self.state = SelectState::Marquee(MarqueeSession::begin(ctx.screen, ctx.world));
            }
        }
        ctx.env.notifier.notify();
        None
    }

    fn on_pointer_move(&mut self, ctx: &mut EventContext<'_>) {
        match &mut self.state {
            SelectState::Idle => self.update_hover_cursor(ctx),
            SelectState::Pending(press) => {
                if exceeds_drag_threshold(press.down_screen, ctx.screen) {
                    let press = press.clone();
                    self.promote_pending(ctx, &press);
                    ctx.env.notifier.notify();
                }
            }
            SelectState::Marquee(session) => {
                session.update(ctx.screen, ctx.world);
                ctx.env.notifier.notify();
            }
            SelectState::Transforming => {
                self.transform.update(ctx);
                ctx.env.notifier.notify();
            }
        }
    }

    fn on_pointer_up(&mut self, ctx: &mut EventContext<'_>) -> Transition {
        match std::mem::replace(&mut self.state, SelectState::Idle) {
            SelectState::Idle => return None,
            SelectState::Transforming => {
                self.transform.commit(&mut ctx.env);
            }
            SelectState::Pending(press) => match press.click_select {
                ClickSelect::Keep => {}
                ClickSelect::Replace => {
                    ctx.env
                        .engine
                        .set_selection(&[press.hit_id], SelectionMode::Replace);
                }
                ClickSelect::Toggle => {
                    ctx.env
                        .engine
                        .set_selection(&[press.hit_id], SelectionMode::Toggle);
                }
            },
            SelectState::Marquee(session) => {
                if session.dragged() {
                    ctx.env.engine.marquee_select(
                        session.rect(),
                        session.mode(),
                        selection_combine(&ctx.modifiers),
                    );
                } else if !ctx.modifiers.any() {
                    // Plain click on empty space deselects everything.
                    ctx.env.engine.set_selection(&[], SelectionMode::Replace);
                }
            }
        }
        ctx.env.notifier.notify();
        None
    }

    fn on_double_click(&mut self, ctx: &mut EventContext<'_>) -> Transition {
        let hit = ctx.hover_pick()?;
        if hit.kind != EntityKind::Text {
            return None;
        }
        // Hand off to the text tool for in-place editing at the clicked
        // position.
        log::debug!("double-click on text {}; switching to text tool", hit.id);
        Some(Box::new(TextHandler::edit_existing(hit.id, ctx.world)))
    }

    fn on_cancel(&mut self, env: &mut Env<'_>) {
        self.transform.cancel(env);
        self.state = SelectState::Idle;
        self.cursor.reset();
        env.notifier.notify();
    }

    fn on_key_down(&mut self, env: &mut Env<'_>, key: &KeyInput) -> bool {
        match &key.key {
            Key::Escape => {
                if !self.transform.cancel(env) {
                    env.engine.set_selection(&[], SelectionMode::Replace);
                }
                self.state = SelectState::Idle;
                env.notifier.notify();
                true
            }
            Key::Delete | Key::Backspace => {
                let ids = env.engine.selection();
                if !ids.is_empty() {
                    env.engine.delete_entities(&ids);
                    env.engine.set_selection(&[], SelectionMode::Replace);
                    env.notifier.notify();
                }
                true
            }
            _ => false,
        }
    }

    fn on_key_up(&mut self, _env: &mut Env<'_>, key: &KeyInput) {
        if matches!(key.key, Key::Control | Key::Meta) {
            self.cycle.reset();
        }
    }

    fn on_blur(&mut self, env: &mut Env<'_>) {
        self.cycle.reset();
        self.cursor.reset();
        self.hover.reset();
        env.notifier.notify();
    }

    fn on_leave(&mut self, env: &mut Env<'_>) {
        // Tool switched away mid-gesture: abandon the session.
        self.transform.cancel(env);
        self.state = SelectState::Idle;
        self.cursor.reset();
    }

    fn cursor(&self) -> CursorHint {
        if self.cursor.is_custom() {
            CursorHint::None
        } else {
            CursorHint::Default
        }
    }

    fn overlay(&self, out: &mut Vec<OverlayNode>) {
        if let SelectState::Marquee(session) = &self.state
            && session.dragged()
        {
            out.push(OverlayNode::Marquee {
                rect: session.rect(),
                crossing: session.mode() == planar_bridge::MarqueeMode::Crossing,
            });
        }
        if let Some(badge) = self.cursor.badge() {
            out.push(OverlayNode::Cursor(badge));
        }
    }
}
