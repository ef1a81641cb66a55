//! Marquee (box) selection session.

use kurbo::{Point, Rect};
use planar_bridge::{MarqueeMode, SelectionMode};

use crate::context::exceeds_drag_threshold;
use crate::event::ModifierState;

/// An in-progress box selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarqueeSession {
    pub start_world: Point,
    pub current_world: Point,
    pub start_screen: Point,
    pub current_screen: Point,
}

impl MarqueeSession {
    pub fn begin(screen: Point, world: Point) -> Self {
        Self {
            start_world: world,
            current_world: world,
            start_screen: screen,
            current_screen: screen,
        }
    }

    pub fn update(&mut self, screen: Point, world: Point) {
        self.current_screen = screen;
        self.current_world = world;
    }

    /// Normalized world-space box.
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.start_world.x.min(self.current_world.x),
            self.start_world.y.min(self.current_world.y),
            self.start_world.x.max(self.current_world.x),
            self.start_world.y.max(self.current_world.y),
        )
    }

    /// Sweep direction decides containment semantics: left-to-right
    /// (release x at or right of press x) selects fully-contained
    /// entities, right-to-left selects anything crossed.
    pub fn mode(&self) -> MarqueeMode {
        if self.current_screen.x >= self.start_screen.x {
            MarqueeMode::Window
        } else {
            MarqueeMode::Crossing
        }
    }

    /// Whether the gesture moved far enough to count as a box selection
    /// rather than a click.
    pub fn dragged(&self) -> bool {
        exceeds_drag_threshold(self.start_screen, self.current_screen)
    }
}

/// How a marquee (or click) combines with the existing selection, derived
/// from the modifier chord.
pub fn selection_combine(modifiers: &ModifierState) -> SelectionMode {
    if modifiers.command() {
        SelectionMode::Toggle
    } else if modifiers.shift {
        SelectionMode::Add
    } else {
        SelectionMode::Replace
    }
}
