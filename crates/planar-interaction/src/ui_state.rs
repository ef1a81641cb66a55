//! Shared UI state published by handlers for other panels to read.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Point, Rect};

/// World-space caret geometry published while a text edit is active, so
/// side panels can mirror the caret.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaretOverlay {
    /// Caret base point in world coordinates.
    pub world: Point,
    /// Caret height in world units.
    pub height: f64,
    /// Rotation of the edited entity, radians.
    pub rotation: f64,
}

/// Cross-panel UI state owned by the interaction layer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Active text caret, if any.
    pub caret: Option<CaretOverlay>,
    /// Text selection highlight rectangles, text-local coordinates.
    pub text_selection: Vec<Rect>,
}

/// Shared handle to [`UiState`].
#[derive(Debug, Clone, Default)]
pub struct SharedUi {
    inner: Rc<RefCell<UiState>>,
}

impl SharedUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> UiState {
        self.inner.borrow().clone()
    }

    pub fn set_caret(&self, caret: Option<CaretOverlay>, selection: Vec<Rect>) {
        let mut state = self.inner.borrow_mut();
        state.caret = caret;
        state.text_selection = selection;
    }

    pub fn clear_caret(&self) {
        self.set_caret(None, Vec::new());
    }
}
