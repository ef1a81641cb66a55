//! Tool identifiers as exposed by the toolbar.

use planar_bridge::EntityKind;
use serde::{Deserialize, Serialize};

/// Top-level tool selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Tool {
    #[default]
    Select,
    Pan,
    Line,
    Rect,
    Circle,
    Arrow,
    Polygon,
    Polyline,
    Text,
}

impl Tool {
    /// Stable id used by the toolbar and the settings store.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Pan => "pan",
            Self::Line => "line",
            Self::Rect => "rect",
            Self::Circle => "circle",
            Self::Arrow => "arrow",
            Self::Polygon => "polygon",
            Self::Polyline => "polyline",
            Self::Text => "text",
        }
    }

    /// Parse a toolbar id. Unknown ids map to `None` (the core falls back
    /// to the idle handler).
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "select" => Some(Self::Select),
            "pan" => Some(Self::Pan),
            "line" => Some(Self::Line),
            "rect" => Some(Self::Rect),
            "circle" => Some(Self::Circle),
            "arrow" => Some(Self::Arrow),
            "polygon" => Some(Self::Polygon),
            "polyline" => Some(Self::Polyline),
            "text" => Some(Self::Text),
            _ => None,
        }
    }

    /// The entity kind drafted by this tool, if it is a shape tool.
    pub fn draft_kind(&self) -> Option<EntityKind> {
        match self {
            Self::Line => Some(EntityKind::Line),
            Self::Rect => Some(EntityKind::Rect),
            Self::Circle => Some(EntityKind::Circle),
            Self::Arrow => Some(EntityKind::Arrow),
            Self::Polygon => Some(EntityKind::Polygon),
            Self::Polyline => Some(EntityKind::Polyline),
            Self::Select | Self::Pan | Self::Text => None,
        }
    }
}
