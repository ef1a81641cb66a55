//! Text tool: bridges pointer/keyboard input to the per-document text
//! editing façade and publishes caret geometry for the overlay.
//!
//! At most one text entity is in edit mode at a time; switching targets or
//! tools always commits first — typed text is never silently discarded.

use std::any::Any;

use kurbo::{Point, Vec2};
use planar_bridge::{
    EntityFlags, EntityId, EntityTransform, PickMask, StyleTarget, TextEditResult, parse_hex_color,
};

use crate::context::{Env, EventContext};
use crate::event::{Key, KeyInput, PointerButton};
use crate::handler::{HandlerName, ToolHandler, Transition};
use crate::overlay::{CursorHint, OverlayNode};
use crate::settings::TextDefaults;
use crate::ui_state::CaretOverlay;

/// Convert a world point into text-local coordinates: relative to the
/// entity anchor (top-left), un-rotated, Y up.
pub fn world_to_local(world: Point, anchor: Point, rotation: f64) -> Point {
    let v = world - anchor;
    let (sin, cos) = (-rotation).sin_cos();
    let x = v.x * cos - v.y * sin;
    let y = v.x * sin + v.y * cos;
    Point::new(x, -y)
}

/// Inverse of [`world_to_local`].
pub fn local_to_world(local: Point, anchor: Point, rotation: f64) -> Point {
    let v = Vec2::new(local.x, -local.y);
    let (sin, cos) = rotation.sin_cos();
    anchor + Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// World-space anchor (top-left corner) of an entity's rotated box.
fn entity_anchor(t: &EntityTransform) -> Point {
    let half = Vec2::new(-t.width / 2.0, -t.height / 2.0);
    let (sin, cos) = t.rotation.sin_cos();
    t.center + Vec2::new(half.x * cos - half.y * sin, half.x * sin + half.y * cos)
}

/// Handed to the handler when the select tool double-clicked into a text
/// entity: begin editing there on enter.
#[derive(Debug, Clone, Copy)]
struct PendingEdit {
    id: EntityId,
    world: Point,
}

/// The text tool handler.
pub struct TextHandler {
    defaults: Option<TextDefaults>,
    pending: Option<PendingEdit>,
    dragging: bool,
    caret: Option<CaretOverlay>,
    selection_rects: Vec<kurbo::Rect>,
}

impl TextHandler {
    pub fn new() -> Self {
        Self {
            defaults: None,
            pending: None,
            dragging: false,
            caret: None,
            selection_rects: Vec::new(),
        }
    }

    /// Construct for a select-tool double-click hand-off: editing starts
    /// at the clicked sub-position as soon as the handler becomes active.
    pub fn edit_existing(id: EntityId, world: Point) -> Self {
        Self {
            pending: Some(PendingEdit { id, world }),
            ..Self::new()
        }
    }

    fn text_defaults<'e>(&mut self, env: &Env<'e>) -> TextDefaults {
        self.defaults
            .get_or_insert_with(|| env.settings.snapshot().text)
            .clone()
    }

    /// Forward a pointer-down into the edited/target entity.
    fn forward_pointer_down(env: &mut Env<'_>, id: EntityId, world: Point) {
        let Some(t) = env.engine.entity_transform(id) else {
            return;
        };
        let anchor = entity_anchor(&t);
        let box_mode = env
            .engine
            .entity_flags(id)
            .contains(EntityFlags::TEXT_BOX_MODE);
        env.text_tool
            .pointer_down(world_to_local(world, anchor, t.rotation), t.rotation, box_mode);
    }

    /// Pull caret geometry out of the tool, rotate it into world space and
    /// republish it for the overlay and side panels.
    fn sync_caret(&mut self, env: &mut Env<'_>) {
        match env.text_tool.caret() {
            Some(c) => {
                let caret = CaretOverlay {
                    world: local_to_world(c.local, c.anchor, c.rotation),
                    height: c.height,
                    rotation: c.rotation,
                };
                self.selection_rects = env.text_tool.selection_rects();
                self.caret = Some(caret);
                env.ui.set_caret(Some(caret), self.selection_rects.clone());
            }
            None => {
                self.caret = None;
                self.selection_rects.clear();
                env.ui.clear_caret();
            }
        }
        env.notifier.notify();
    }

    /// Apply the text style defaults to a freshly created entity. ByLayer
    /// sentinels (None) push nothing and leave layer inheritance intact.
    fn apply_creation_style(&mut self, env: &mut Env<'_>, id: EntityId) {
        let defaults = self.text_defaults(env);
        if let Some(hex) = defaults.color.as_deref()
            && let Ok(color) = parse_hex_color(hex)
        {
            env.engine
                .set_style_color(&[id], StyleTarget::TextColor, color);
        }
        if let Some(hex) = defaults.background.as_deref()
            && let Ok(color) = parse_hex_color(hex)
        {
            env.engine
                .set_style_color(&[id], StyleTarget::TextBackground, color);
            env.engine.set_style_enabled(
                &[id],
                StyleTarget::TextBackground,
                defaults.background_enabled,
            );
        }
    }

    fn commit_edit(&mut self, env: &mut Env<'_>) {
        if env.text_tool.editing().is_some() {
            env.text_tool.commit();
        }
        self.dragging = false;
        self.sync_caret(env);
    }
}

impl Default for TextHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolHandler for TextHandler {
    fn name(&self) -> HandlerName {
        HandlerName::Text
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn on_enter(&mut self, env: &mut Env<'_>) {
        if let Some(pending) = self.pending.take() {
            if env
                .text_tool
                .editing()
                .is_some_and(|cur| cur != pending.id)
            {
                env.text_tool.commit();
            }
            env.text_tool.begin_edit(pending.id);
            Self::forward_pointer_down(env, pending.id, pending.world);
            env.text_tool.pointer_up();
            self.sync_caret(env);
        }
    }

    fn on_pointer_down(&mut self, ctx: &mut EventContext<'_>) -> Transition {
        if ctx.button != PointerButton::Left {
            return None;
        }

        let hit = ctx
            .env
            .engine
            .pick(ctx.world, ctx.pick_tolerance(), PickMask::TEXT);

        if let Some(current) = ctx.env.text_tool.editing() {
            if hit.is_some_and(|h| h.id == current) {
                Self::forward_pointer_down(&mut ctx.env, current, ctx.world);
                self.dragging = true;
                self.sync_caret(&mut ctx.env);
                return None;
            }
            // Clicked away from the edited entity: commit first.
            self.commit_edit(&mut ctx.env);
        }

        match hit {
            Some(h) => {
                ctx.env.text_tool.begin_edit(h.id);
                Self::forward_pointer_down(&mut ctx.env, h.id, ctx.world);
                self.dragging = true;
            }
            None => {
                // Empty space: start a brand-new text entity here.
                if let Some(id) = ctx.env.text_tool.create_entity(ctx.world) {
                    log::debug!("created text entity {id}");
                    self.apply_creation_style(&mut ctx.env, id);
                }
            }
        }
        self.sync_caret(&mut ctx.env);
        None
    }

    fn on_pointer_move(&mut self, ctx: &mut EventContext<'_>) {
        if !self.dragging {
            return;
        }
        let Some(current) = ctx.env.text_tool.editing() else {
            return;
        };
        let Some(t) = ctx.env.engine.entity_transform(current) else {
            return;
        };
        let anchor = entity_anchor(&t);
        ctx.env
            .text_tool
            .pointer_move(world_to_local(ctx.world, anchor, t.rotation));
        self.sync_caret(&mut ctx.env);
    }

    fn on_pointer_up(&mut self, ctx: &mut EventContext<'_>) -> Transition {
        if self.dragging {
            self.dragging = false;
            ctx.env.text_tool.pointer_up();
        }
        None
    }

    fn on_key_down(&mut self, env: &mut Env<'_>, key: &KeyInput) -> bool {
        if env.text_tool.editing().is_none() {
            return false;
        }

        // Composition undo/redo stays inside the text tool's own history.
        if key.modifiers.command()
            && let Key::Character(c) = &key.key
        {
            match c.as_str() {
                "z" | "Z" if key.modifiers.shift => {
                    env.text_tool.redo();
                    self.sync_caret(env);
                    return true;
                }
                "z" | "Z" => {
                    env.text_tool.undo();
                    self.sync_caret(env);
                    return true;
                }
                "y" | "Y" => {
                    env.text_tool.redo();
                    self.sync_caret(env);
                    return true;
                }
                _ => {}
            }
        }

        let Some(text_key) = key.key.to_text_key() else {
            return false;
        };
        match env.text_tool.key_down(&text_key, key.modifiers.mask()) {
            TextEditResult::Handled => {
                self.sync_caret(env);
                true
            }
            TextEditResult::ExitEdit => {
                self.commit_edit(env);
                true
            }
            TextEditResult::NotHandled => false,
        }
    }

    fn on_cancel(&mut self, env: &mut Env<'_>) {
        self.commit_edit(env);
    }

    fn on_leave(&mut self, env: &mut Env<'_>) {
        if env.text_tool.editing().is_some() {
            env.text_tool.commit();
        }
        self.dragging = false;
        self.caret = None;
        self.selection_rects.clear();
        env.ui.clear_caret();
    }

    fn cursor(&self) -> CursorHint {
        CursorHint::Text
    }

    fn overlay(&self, out: &mut Vec<OverlayNode>) {
        if let Some(caret) = &self.caret {
            out.push(OverlayNode::Caret {
                world: caret.world,
                height: caret.height,
                rotation: caret.rotation,
            });
        }
        if !self.selection_rects.is_empty() {
            out.push(OverlayNode::TextSelection {
                rects: self.selection_rects.clone(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_world_roundtrip() {
        let anchor = Point::new(100.0, 50.0);
        let rotation = 0.7;
        let world = Point::new(112.0, 61.5);
        let local = world_to_local(world, anchor, rotation);
        let back = local_to_world(local, anchor, rotation);
        assert!((back.x - world.x).abs() < 1e-9);
        assert!((back.y - world.y).abs() < 1e-9);
    }

    #[test]
    fn test_local_is_y_up() {
        // A world point below the anchor (larger y) has negative local y.
        let anchor = Point::new(0.0, 0.0);
        let local = world_to_local(Point::new(4.0, 3.0), anchor, 0.0);
        assert!((local.x - 4.0).abs() < 1e-12);
        assert!((local.y + 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_anchor_of_unrotated_box() {
        let t = EntityTransform {
            center: Point::new(10.0, 10.0),
            width: 4.0,
            height: 2.0,
            rotation: 0.0,
        };
        let anchor = entity_anchor(&t);
        assert!((anchor.x - 8.0).abs() < 1e-12);
        assert!((anchor.y - 9.0).abs() < 1e-12);
    }
}
