//! The interaction core: owns the active handler, builds event contexts,
//! performs handler transitions and aggregates the UI-visible outputs.
//!
//! The binding layer is expected to take pointer capture on pointer-down,
//! so the move/up of a gesture keep arriving here even when the cursor
//! leaves the canvas bounds.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Point, Size};
use planar_bridge::{SharedEngine, SnapOptions, TextTool, ViewTransform};

// Use web-time on WASM, std::time otherwise
#[cfg(target_arch = "wasm32")]
use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

use std::time::Duration;

use crate::context::{Env, EventContext};
use crate::event::{Key, KeyInput, PointerInput};
use crate::handler::{HandlerName, ToolHandler, Transition};
use crate::handlers::select::HoverPicker;
use crate::handlers::{DraftHandler, IdleHandler, PanHandler, SelectHandler, TextHandler};
use crate::notify::Notifier;
use crate::throttle::DEFAULT_HOVER_INTERVAL;
use crate::overlay::{CursorHint, OverlayNode};
use crate::settings::SharedSettings;
use crate::tools::Tool;
use crate::ui_state::SharedUi;

/// Snapshot of everything the rendering layer consumes.
#[derive(Debug)]
pub struct InteractionOutputs {
    pub cursor: CursorHint,
    pub overlay: Vec<OverlayNode>,
    pub active_handler: HandlerName,
}

/// The dispatcher. One per canvas.
pub struct InteractionCore {
    engine: Option<SharedEngine>,
    text_tool: Rc<RefCell<dyn TextTool>>,
    settings: SharedSettings,
    ui: SharedUi,
    view: Rc<RefCell<ViewTransform>>,
    canvas_size: Size,
    /// Live client-space offset of the canvas, kept fresh by the binding
    /// layer on resize/scroll.
    canvas_origin: Point,
    active: Box<dyn ToolHandler>,
    current_tool: Option<Tool>,
    notifier: Notifier,
    /// Polygon-contour editing feature flag, applied to new select handlers.
    contour_enabled: bool,
    /// Hover-pick throttle interval; `None` selects the unthrottled path.
    hover_interval: Option<Duration>,
}

impl InteractionCore {
    pub fn new(
        text_tool: Rc<RefCell<dyn TextTool>>,
        settings: SharedSettings,
        ui: SharedUi,
    ) -> Self {
        Self {
            engine: None,
            text_tool,
            settings,
            ui,
            view: Rc::new(RefCell::new(ViewTransform::default())),
            canvas_size: Size::new(0.0, 0.0),
            canvas_origin: Point::ZERO,
            active: Box::new(IdleHandler),
            current_tool: None,
            notifier: Notifier::new(),
            contour_enabled: false,
            hover_interval: Some(DEFAULT_HOVER_INTERVAL),
        }
    }

    // ------------------------------------------------------------------
    // Wiring
    // ------------------------------------------------------------------

    /// Install the engine once its module finishes loading. Until then
    /// every event is dropped silently.
    pub fn attach_engine(&mut self, engine: SharedEngine) {
        log::info!("engine attached; interaction live");
        self.engine = Some(engine);
        self.notifier.notify();
    }

    pub fn engine_attached(&self) -> bool {
        self.engine.is_some()
    }

    /// Shared view transform, also driven by the pan/zoom controller.
    pub fn view_handle(&self) -> Rc<RefCell<ViewTransform>> {
        self.view.clone()
    }

    pub fn set_canvas_origin(&mut self, origin: Point) {
        self.canvas_origin = origin;
    }

    pub fn set_canvas_size(&mut self, size: Size) {
        self.canvas_size = size;
    }

    /// Forward snap configuration to the engine session.
    pub fn set_snap_options(&mut self, options: SnapOptions) {
        if let Some(engine) = &self.engine {
            engine.borrow_mut().set_snap_options(options);
        }
    }

    /// Frame-coalesced change notification; the binding layer drains this
    /// once per animation frame.
    pub fn notifier(&self) -> Notifier {
        self.notifier.clone()
    }

    // ------------------------------------------------------------------
    // Tool selection
    // ------------------------------------------------------------------

    /// Enable polygon-contour editing (vertex/edge grips) on the select
    /// tool. Takes effect at the next tool switch.
    pub fn set_contour_editing(&mut self, enabled: bool) {
        self.contour_enabled = enabled;
    }

    /// Configure hover-pick throttling; `None` picks on every move.
    /// Takes effect at the next tool switch.
    pub fn set_hover_throttle(&mut self, interval: Option<Duration>) {
        self.hover_interval = interval;
    }

    /// Switch to a tool. A fresh handler is constructed on every switch so
    /// no state leaks between tools.
    pub fn set_active_tool(&mut self, tool: Tool) {
        let handler: Box<dyn ToolHandler> = match tool {
            Tool::Select => {
                let hover = match self.hover_interval {
                    Some(interval) => HoverPicker::throttled(interval),
                    None => HoverPicker::unthrottled(),
                };
                Box::new(
                    SelectHandler::new()
                        .with_contour_editing(self.contour_enabled)
                        .with_hover_picker(hover),
                )
            }
            Tool::Pan => Box::new(PanHandler),
            Tool::Text => Box::new(TextHandler::new()),
            shape => match DraftHandler::new(shape, self.settings.snapshot()) {
                Some(draft) => Box::new(draft),
                None => Box::new(IdleHandler),
            },
        };
        self.current_tool = Some(tool);
        self.transition_to(handler);
    }

    /// Switch by toolbar id; unknown ids fall back to the idle handler.
    pub fn set_active_tool_by_id(&mut self, id: &str) {
        match Tool::from_id(id) {
            Some(tool) => self.set_active_tool(tool),
            None => {
                log::debug!("unknown tool id {id:?}; going idle");
                self.current_tool = None;
                self.transition_to(Box::new(IdleHandler));
            }
        }
    }

    pub fn active_tool(&self) -> Option<Tool> {
        self.current_tool
    }

    // ------------------------------------------------------------------
    // Event entry points
    // ------------------------------------------------------------------

    pub fn handle_pointer_down(&mut self, input: &PointerInput) {
        let transition = self
            .with_ctx(input, |handler, ctx| handler.on_pointer_down(ctx))
            .flatten();
        self.apply_transition(transition);
    }

    pub fn handle_pointer_move(&mut self, input: &PointerInput) {
        self.with_ctx(input, |handler, ctx| handler.on_pointer_move(ctx));
    }

    pub fn handle_pointer_up(&mut self, input: &PointerInput) {
        let transition = self
            .with_ctx(input, |handler, ctx| handler.on_pointer_up(ctx))
            .flatten();
        self.apply_transition(transition);
    }

    pub fn handle_double_click(&mut self, input: &PointerInput) {
        let transition = self
            .with_ctx(input, |handler, ctx| handler.on_double_click(ctx))
            .flatten();
        self.apply_transition(transition);
    }

    /// Pointer left the canvas element.
    pub fn handle_pointer_leave(&mut self) {
        self.with_env(|handler, env| handler.on_pointer_leave(env));
    }

    /// External cancel (e.g. context-menu open).
    pub fn handle_cancel(&mut self) {
        self.with_env(|handler, env| handler.on_cancel(env));
    }

    /// Returns true when the key was consumed. Keys arriving while focus
    /// is inside a text input are suppressed — except Escape, which must
    /// always be able to cancel a modal or edit session.
    pub fn handle_key_down(&mut self, key: &KeyInput) -> bool {
        if key.in_text_input && key.key != Key::Escape {
            return false;
        }
        self.with_env(|handler, env| handler.on_key_down(env, key))
            .unwrap_or(false)
    }

    pub fn handle_key_up(&mut self, key: &KeyInput) {
        self.with_env(|handler, env| handler.on_key_up(env, key));
    }

    /// Window lost focus.
    pub fn handle_blur(&mut self) {
        self.with_env(|handler, env| handler.on_blur(env));
    }

    // ------------------------------------------------------------------
    // Polygon side-count prompt plumbing
    // ------------------------------------------------------------------

    /// Confirm the polygon side-count prompt (invoked by the inline input
    /// widget). No-op unless the draft handler has an open prompt.
    pub fn confirm_polygon_prompt(&mut self, sides: u32) {
        self.with_env(|handler, env| {
            if let Some(draft) = handler.as_any_mut().downcast_mut::<DraftHandler>() {
                draft.confirm_polygon(env, sides);
            }
        });
    }

    /// Dismiss the polygon side-count prompt.
    pub fn cancel_polygon_prompt(&mut self) {
        self.with_env(|handler, env| {
            if let Some(draft) = handler.as_any_mut().downcast_mut::<DraftHandler>() {
                draft.cancel_polygon(env);
            }
        });
    }

    // ------------------------------------------------------------------
    // Outputs
    // ------------------------------------------------------------------

    pub fn cursor(&self) -> CursorHint {
        self.active.cursor()
    }

    pub fn overlay(&self) -> Vec<OverlayNode> {
        let mut nodes = Vec::new();
        self.active.overlay(&mut nodes);
        nodes
    }

    pub fn active_handler_name(&self) -> HandlerName {
        self.active.name()
    }

    pub fn outputs(&self) -> InteractionOutputs {
        InteractionOutputs {
            cursor: self.cursor(),
            overlay: self.overlay(),
            active_handler: self.active_handler_name(),
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn apply_transition(&mut self, transition: Transition) {
        if let Some(next) = transition {
            self.transition_to(next);
        }
    }

    /// Swap handlers with the ordering guarantee: the outgoing handler's
    /// `on_leave` completes before the incoming one's `on_enter`, and the
    /// update notification fires only after both.
    fn transition_to(&mut self, next: Box<dyn ToolHandler>) {
        log::debug!(
            "handler transition {} -> {}",
            self.active.name().as_str(),
            next.name().as_str()
        );
        self.with_env(|handler, env| handler.on_leave(env));
        self.active = next;
        self.active.set_notifier(self.notifier.clone());
        self.with_env(|handler, env| handler.on_enter(env));
        self.notifier.notify();
    }

    /// Run a hook with the capability bundle. Returns `None` (dropping the
    /// event) while no engine is attached.
    fn with_env<R>(
        &mut self,
        f: impl FnOnce(&mut Box<dyn ToolHandler>, &mut Env<'_>) -> R,
    ) -> Option<R> {
        let engine_rc = self.engine.clone()?;
        let mut engine = engine_rc.borrow_mut();
        let text_rc = self.text_tool.clone();
        let mut text_tool = text_rc.borrow_mut();
        let mut env = Env {
            engine: &mut *engine,
            text_tool: &mut *text_tool,
            settings: &self.settings,
            ui: &self.ui,
            notifier: &self.notifier,
            view: *self.view.borrow(),
            canvas_size: self.canvas_size,
        };
        Some(f(&mut self.active, &mut env))
    }

    /// Run a pointer hook with a full event context. The context is built
    /// on the stack per event; handlers never retain it.
    fn with_ctx<R>(
        &mut self,
        input: &PointerInput,
        f: impl FnOnce(&mut Box<dyn ToolHandler>, &mut EventContext<'_>) -> R,
    ) -> Option<R> {
        let engine_rc = self.engine.clone()?;
        let mut engine = engine_rc.borrow_mut();
        let text_rc = self.text_tool.clone();
        let mut text_tool = text_rc.borrow_mut();
        let view = *self.view.borrow();
        let screen = Point::new(
            input.position.x - self.canvas_origin.x,
            input.position.y - self.canvas_origin.y,
        );
        let world = view.screen_to_world(screen);
        let mut ctx = EventContext {
            env: Env {
                engine: &mut *engine,
                text_tool: &mut *text_tool,
                settings: &self.settings,
                ui: &self.ui,
                notifier: &self.notifier,
                view,
                canvas_size: self.canvas_size,
            },
            screen,
            world,
            // Snapping is resolved inside the engine during draft and
            // transform updates; the snapped point is the world point.
            snapped: world,
            button: input.button,
            modifiers: input.modifiers,
            now: Instant::now(),
        };
        Some(f(&mut self.active, &mut ctx))
    }
}
