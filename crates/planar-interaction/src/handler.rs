//! The handler contract: one implementation per top-level tool mode.
//!
//! A closed interface with optional hooks — every method except `name`
//! (and the `Any` escape hatch) has a default no-op body, so a handler
//! implements only what it reacts to. Exactly one handler is active at a
//! time; returning a boxed replacement from a pointer hook asks the core
//! to transition.

use std::any::Any;

use crate::context::{Env, EventContext};
use crate::event::KeyInput;
use crate::notify::Notifier;
use crate::overlay::{CursorHint, OverlayNode};

/// Discriminant naming the active handler, exposed to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlerName {
    Idle,
    Pan,
    Draft,
    Select,
    Text,
}

impl HandlerName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pan => "pan",
            Self::Draft => "draft",
            Self::Select => "select",
            Self::Text => "text",
        }
    }
}

/// A requested handler swap: `None` = stay, `Some(next)` = transition.
pub type Transition = Option<Box<dyn ToolHandler>>;

/// Contract implemented by every tool-mode handler.
pub trait ToolHandler: Any {
    fn name(&self) -> HandlerName;

    /// Downcast support for handler-specific entry points (e.g. the
    /// polygon side-count prompt confirmation).
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Receives the core's notifier right before `on_enter`.
    fn set_notifier(&mut self, _notifier: Notifier) {}

    /// Called after this handler becomes active.
    fn on_enter(&mut self, _env: &mut Env<'_>) {}

    /// Called before this handler is discarded. Cleanup point: commit an
    /// in-progress polyline or text edit, cancel everything else.
    fn on_leave(&mut self, _env: &mut Env<'_>) {}

    fn on_pointer_down(&mut self, _ctx: &mut EventContext<'_>) -> Transition {
        None
    }

    fn on_pointer_move(&mut self, _ctx: &mut EventContext<'_>) {}

    fn on_pointer_up(&mut self, _ctx: &mut EventContext<'_>) -> Transition {
        None
    }

    fn on_double_click(&mut self, _ctx: &mut EventContext<'_>) -> Transition {
        None
    }

    /// Pointer left the canvas.
    fn on_pointer_leave(&mut self, _env: &mut Env<'_>) {}

    /// External cancel request (context menu, tool-level abort).
    fn on_cancel(&mut self, _env: &mut Env<'_>) {}

    /// Returns true when the key was consumed.
    fn on_key_down(&mut self, _env: &mut Env<'_>, _key: &KeyInput) -> bool {
        false
    }

    fn on_key_up(&mut self, _env: &mut Env<'_>, _key: &KeyInput) {}

    /// Window lost focus; abandon modifier-dependent state.
    fn on_blur(&mut self, _env: &mut Env<'_>) {}

    /// Native cursor to show. `CursorHint::None` while a custom cursor
    /// badge is drawn in the overlay.
    fn cursor(&self) -> CursorHint {
        CursorHint::Default
    }

    /// Append this handler's overlay nodes.
    fn overlay(&self, _out: &mut Vec<OverlayNode>) {}
}
