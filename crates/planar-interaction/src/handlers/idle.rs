//! The inert default handler, active before a tool is chosen.

use std::any::Any;

use crate::handler::{HandlerName, ToolHandler};

/// Does nothing on any event. Exists so the core always has an active
/// handler, including before the engine finishes loading.
#[derive(Debug, Default)]
pub struct IdleHandler;

impl ToolHandler for IdleHandler {
    fn name(&self) -> HandlerName {
        HandlerName::Idle
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
