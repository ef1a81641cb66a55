//! Input event model: pointer buttons, modifier state, keys.
//!
//! These are the raw facts the binding layer extracts from DOM events;
//! everything position-related is in client pixels until the core converts
//! it against the canvas origin and view transform.

use kurbo::Point;
use planar_bridge::{ModifierMask, TextKey, modifier_mask};
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerButton {
    Left,
    Middle,
    Right,
}

/// Keyboard modifier state at the time of an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifierState {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl ModifierState {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Engine-facing bitmask.
    pub fn mask(&self) -> ModifierMask {
        modifier_mask(self.shift, self.ctrl, self.alt, self.meta)
    }

    /// Ctrl on Windows/Linux, Cmd on macOS; both are accepted everywhere.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }

    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }
}

/// One pointer event as delivered by the binding layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    /// Client-space position (viewport pixels, not yet canvas-local).
    pub position: Point,
    pub button: PointerButton,
    pub modifiers: ModifierState,
}

impl PointerInput {
    pub fn new(position: Point, button: PointerButton, modifiers: ModifierState) -> Self {
        Self {
            position,
            button,
            modifiers,
        }
    }

    /// Left click with the given position and no modifiers.
    pub fn left(position: Point) -> Self {
        Self::new(position, PointerButton::Left, ModifierState::NONE)
    }
}

/// Keyboard key, pre-decoded from the DOM `key` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    Delete,
    Backspace,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    Control,
    Meta,
    Shift,
    Alt,
    Character(String),
}

impl Key {
    /// Decode a DOM `KeyboardEvent.key` string.
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "Escape" => Self::Escape,
            "Enter" => Self::Enter,
            "Delete" => Self::Delete,
            "Backspace" => Self::Backspace,
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            "ArrowUp" => Self::ArrowUp,
            "ArrowDown" => Self::ArrowDown,
            "Home" => Self::Home,
            "End" => Self::End,
            "Control" => Self::Control,
            "Meta" => Self::Meta,
            "Shift" => Self::Shift,
            "Alt" => Self::Alt,
            other => Self::Character(other.to_string()),
        }
    }

    /// The text-tool rendering of this key, if it has one.
    pub fn to_text_key(&self) -> Option<TextKey> {
        Some(match self {
            Self::Escape => TextKey::Escape,
            Self::Enter => TextKey::Enter,
            Self::Delete => TextKey::Delete,
            Self::Backspace => TextKey::Backspace,
            Self::ArrowLeft => TextKey::Left,
            Self::ArrowRight => TextKey::Right,
            Self::ArrowUp => TextKey::Up,
            Self::ArrowDown => TextKey::Down,
            Self::Home => TextKey::Home,
            Self::End => TextKey::End,
            Self::Character(c) => TextKey::Character(c.clone()),
            Self::Control | Self::Meta | Self::Shift | Self::Alt => return None,
        })
    }

    /// True for a single printable character.
    pub fn is_character(&self) -> bool {
        matches!(self, Self::Character(c) if c.chars().count() == 1)
    }
}

/// One keyboard event.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyInput {
    pub key: Key,
    pub modifiers: ModifierState,
    /// Focus was inside a text input / textarea / content-editable when
    /// the event fired. The core suppresses everything but Escape then.
    pub in_text_input: bool,
}

impl KeyInput {
    pub fn new(key: Key, modifiers: ModifierState) -> Self {
        Self {
            key,
            modifiers,
            in_text_input: false,
        }
    }
}
