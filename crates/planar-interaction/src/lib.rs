//! Planar interaction layer
//!
//! The state machine between raw pointer/keyboard input and the engine's
//! command protocol: a dispatcher core, one handler per tool mode
//! (idle / pan / draft / select / text), and the small controllers each
//! handler is built from.

pub mod context;
pub mod core;
pub mod event;
pub mod handler;
pub mod handlers;
pub mod notify;
pub mod overlay;
pub mod pan_zoom;
pub mod settings;
pub mod throttle;
pub mod tools;
pub mod ui_state;

#[cfg(test)]
pub(crate) mod fake;

pub use crate::core::{InteractionCore, InteractionOutputs};
pub use context::{DRAG_THRESHOLD_PX, Env, EventContext, PICK_TOLERANCE_PX};
pub use event::{Key, KeyInput, ModifierState, PointerButton, PointerInput};
pub use handler::{HandlerName, ToolHandler, Transition};
pub use handlers::{DraftHandler, IdleHandler, PanHandler, SelectHandler, TextHandler};
pub use notify::Notifier;
pub use overlay::{CursorBadge, CursorHint, OverlayNode};
pub use pan_zoom::PanZoomController;
pub use settings::{SharedSettings, TextAlign, TextDefaults, ToolDefaults};
pub use throttle::{Admit, DEFAULT_HOVER_INTERVAL, ThrottleGate};
pub use tools::Tool;
pub use ui_state::{CaretOverlay, SharedUi, UiState};
