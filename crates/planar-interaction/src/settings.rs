//! Tool-default settings, read as snapshots by the handlers.
//!
//! The settings store itself (persistence, panels) is external; handlers
//! receive a shared handle, take a snapshot per interaction and write back
//! exactly one thing: the polygon side count chosen in the side-count
//! prompt. A color of `None` is the ByLayer sentinel — "inherit from the
//! layer" rather than a literal color.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Defaults applied to newly created text entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextDefaults {
    pub font_size: f64,
    pub font_family: String,
    pub align: TextAlign,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strike: bool,
    /// Text color, hex string; `None` = ByLayer.
    pub color: Option<String>,
    /// Text background color, hex string; `None` = ByLayer.
    pub background: Option<String>,
    pub background_enabled: bool,
}

impl Default for TextDefaults {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            font_family: "sans-serif".to_string(),
            align: TextAlign::Left,
            bold: false,
            italic: false,
            underline: false,
            strike: false,
            color: None,
            background: None,
            background_enabled: false,
        }
    }
}

/// Defaults applied when drafting new shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefaults {
    /// Stroke color, hex string; `None` = ByLayer.
    pub stroke_color: Option<String>,
    /// Fill color, hex string; `None` = ByLayer.
    pub fill_color: Option<String>,
    pub stroke_width: f64,
    pub stroke_enabled: bool,
    pub fill_enabled: bool,
    /// Last-used regular polygon side count.
    pub polygon_sides: u32,
    pub text: TextDefaults,
}

impl Default for ToolDefaults {
    fn default() -> Self {
        Self {
            stroke_color: Some("#333333".to_string()),
            fill_color: Some("#d9d9d9".to_string()),
            stroke_width: 2.0,
            stroke_enabled: true,
            fill_enabled: true,
            polygon_sides: 5,
            text: TextDefaults::default(),
        }
    }
}

/// Shared handle to the tool defaults.
#[derive(Debug, Clone, Default)]
pub struct SharedSettings {
    inner: Rc<RefCell<ToolDefaults>>,
}

impl SharedSettings {
    pub fn new(defaults: ToolDefaults) -> Self {
        Self {
            inner: Rc::new(RefCell::new(defaults)),
        }
    }

    /// Read-only snapshot for the current interaction.
    pub fn snapshot(&self) -> ToolDefaults {
        self.inner.borrow().clone()
    }

    /// Persist the polygon side count chosen in the side-count prompt.
    /// This is the only settings write the interaction layer performs.
    pub fn set_polygon_sides(&self, sides: u32) {
        self.inner.borrow_mut().polygon_sides = sides;
    }

    /// Replace the defaults wholesale (driven by the settings panels,
    /// not by handlers).
    pub fn replace(&self, defaults: ToolDefaults) {
        *self.inner.borrow_mut() = defaults;
    }
}
