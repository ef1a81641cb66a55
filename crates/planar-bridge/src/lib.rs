//! Planar engine bridge
//!
//! Typed contract between the browser interaction layer and the separately
//! compiled Planar geometry engine: protocol enums and payloads, the
//! `Engine` and `TextTool` traits, the view transform, and the load-once
//! installation slot.

pub mod engine;
pub mod loader;
pub mod protocol;
pub mod style;
pub mod view;

pub use engine::{
    BeginDraft, BeginTransform, CaretGeometry, DraftStyle, Engine, EntityFlags, TextEditResult,
    TextKey, TextTool,
};
pub use loader::{BridgeError, EngineSlot, SharedEngine};
pub use protocol::{
    DraftFlags, EntityId, EntityKind, EntityTransform, MarqueeMode, ModifierMask, PickHit,
    PickMask, SelectionMode, SnapOptions, StyleTarget, SubTarget, TransformMode, modifier_mask,
};
pub use style::{ColorParseError, Rgba, parse_hex_color};
pub use view::{MAX_SCALE, MIN_SCALE, ViewTransform};
