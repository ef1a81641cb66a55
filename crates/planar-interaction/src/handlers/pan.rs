//! Pan tool handler.
//!
//! Only contributes the grab cursor; the actual drag mechanics live in
//! [`crate::pan_zoom`], shared across all tools so modifier/middle-button
//! panning works regardless of the active tool.

use std::any::Any;

use crate::handler::{HandlerName, ToolHandler};
use crate::overlay::CursorHint;

#[derive(Debug, Default)]
pub struct PanHandler;

impl ToolHandler for PanHandler {
    fn name(&self) -> HandlerName {
        HandlerName::Pan
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn cursor(&self) -> CursorHint {
        CursorHint::Grab
    }
}
