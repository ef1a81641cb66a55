//! The engine contract: what the interaction layer is allowed to ask of
//! the externally compiled geometry engine.
//!
//! Every call is synchronous and in-process. Calls that cannot apply
//! (no active session, unknown id) are no-ops on the engine side; nothing
//! here returns an error. See the loader module for the one fallible
//! surface (module instantiation).

use kurbo::{Point, Rect, Size};

use crate::protocol::{
    DraftFlags, EntityId, EntityKind, EntityTransform, MarqueeMode, ModifierMask, PickHit,
    PickMask, SelectionMode, SnapOptions, StyleTarget, TransformMode,
};
use crate::style::Rgba;
use crate::view::ViewTransform;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Per-entity behavior flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct EntityFlags: u32 {
        const LOCKED = 1 << 0;
        const HIDDEN = 1 << 1;
        /// Text entity wraps inside a fixed-width box instead of auto-sizing.
        const TEXT_BOX_MODE = 1 << 2;
    }
}

/// Style payload carried by a draft-begin command.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DraftStyle {
    pub fill: Rgba,
    pub stroke: Rgba,
    pub fill_enabled: bool,
    pub stroke_enabled: bool,
    /// Clamped to [1, 100] by the builder.
    pub stroke_width_px: f64,
    pub flags: DraftFlags,
}

/// Payload for `Engine::begin_draft`.
#[derive(Debug, Clone, PartialEq)]
pub struct BeginDraft {
    pub kind: EntityKind,
    pub start: Point,
    pub style: DraftStyle,
    /// Regular-polygon side count; ignored for other kinds.
    pub sides: u32,
    /// Arrow head size in pixels; ignored for other kinds.
    pub head_px: f64,
}

/// Payload for `Engine::begin_transform`.
#[derive(Debug, Clone, PartialEq)]
pub struct BeginTransform {
    /// The full id set the session operates on.
    pub ids: Vec<EntityId>,
    pub mode: TransformMode,
    /// The entity whose feature initiated the session (handle owner,
    /// vertex owner). `0` when the whole set moves uniformly.
    pub specific_id: EntityId,
    /// Contour vertex/edge index for VertexDrag/EdgeDrag, resize corner
    /// for Resize, side index for SideResize; `-1` otherwise.
    pub vertex_index: i32,
    /// Screen point where the gesture started.
    pub screen: Point,
    pub view: ViewTransform,
    pub canvas: Size,
    pub modifiers: ModifierMask,
}

/// The opaque engine module, seen through its command protocol.
///
/// Implemented over the binary module's exports in the shipping app and by
/// a scripted fake in tests.
pub trait Engine {
    // ------------------------------------------------------------------
    // Picking
    // ------------------------------------------------------------------

    /// Best hit at a world point, or `None` on a miss. `tolerance` is in
    /// world units (derive it from the current zoom).
    fn pick(&self, world: Point, tolerance: f64, mask: PickMask) -> Option<PickHit>;

    /// All candidate hits at a point, front-most first. Used for
    /// Ctrl-click cycling through overlapping entities.
    fn pick_all(&self, world: Point, tolerance: f64, mask: PickMask) -> Vec<PickHit>;

    // ------------------------------------------------------------------
    // Draft session (new-shape creation)
    // ------------------------------------------------------------------

    fn begin_draft(&mut self, draft: &BeginDraft);
    fn update_draft(&mut self, world: Point, modifiers: ModifierMask);
    /// Append a fixed point to a polyline draft.
    fn append_draft_point(&mut self, world: Point, modifiers: ModifierMask);
    /// True once the draft's current point has left its start point.
    /// Guards every commit path against degenerate geometry.
    fn has_draft_delta(&self) -> bool;
    /// Commit the draft; returns the new entity id, or `None` when the
    /// draft was degenerate and nothing was created.
    fn commit_draft(&mut self) -> Option<EntityId>;
    fn cancel_draft(&mut self);

    // ------------------------------------------------------------------
    // Transform session (move/resize/rotate/vertex-drag/edge-drag)
    // ------------------------------------------------------------------

    fn begin_transform(&mut self, req: &BeginTransform);
    fn update_transform(
        &mut self,
        screen: Point,
        view: ViewTransform,
        canvas: Size,
        modifiers: ModifierMask,
    );
    fn commit_transform(&mut self);
    fn cancel_transform(&mut self);
    fn is_transform_active(&self) -> bool;

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    fn set_selection(&mut self, ids: &[EntityId], mode: SelectionMode);
    fn selection(&self) -> Vec<EntityId>;
    fn is_selected(&self, id: EntityId) -> bool {
        self.selection().contains(&id)
    }
    /// Box select with window/crossing semantics, combined into the
    /// current selection per `combine`.
    fn marquee_select(&mut self, rect: Rect, mode: MarqueeMode, combine: SelectionMode);
    fn delete_entities(&mut self, ids: &[EntityId]);

    // ------------------------------------------------------------------
    // Style overrides
    // ------------------------------------------------------------------

    fn set_style_color(&mut self, ids: &[EntityId], target: StyleTarget, color: Rgba);
    fn set_style_enabled(&mut self, ids: &[EntityId], target: StyleTarget, enabled: bool);
    /// Revert the channel to ByLayer inheritance.
    fn clear_style_override(&mut self, ids: &[EntityId], target: StyleTarget);

    // ------------------------------------------------------------------
    // Readout / options
    // ------------------------------------------------------------------

    fn entity_kind(&self, id: EntityId) -> Option<EntityKind>;
    fn entity_transform(&self, id: EntityId) -> Option<EntityTransform>;
    fn entity_flags(&self, id: EntityId) -> EntityFlags;
    fn set_snap_options(&mut self, options: SnapOptions);
}

// ----------------------------------------------------------------------
// Text tool façade
// ----------------------------------------------------------------------

/// Keyboard key forwarded into an active text edit.
#[derive(Debug, Clone, PartialEq)]
pub enum TextKey {
    Character(String),
    Backspace,
    Delete,
    Enter,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    Escape,
}

/// Outcome of forwarding a key into the text tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEditResult {
    /// Consumed; content or caret may have changed.
    Handled,
    /// Consumed; the user wants to leave editing (commit).
    ExitEdit,
    /// Not consumed; the caller may treat it as a normal shortcut.
    NotHandled,
}

/// Caret geometry reported by the text tool after each forwarded event.
///
/// `local` is relative to the entity anchor (top-left corner) in a Y-up
/// convention; the handler rotates it into world space before publishing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaretGeometry {
    pub local: Point,
    pub height: f64,
    /// Rotation of the edited entity, radians.
    pub rotation: f64,
    /// World-space anchor (top-left) of the edited entity.
    pub anchor: Point,
}

/// The per-document text-editing façade. At most one entity is in edit
/// mode at any time.
pub trait TextTool {
    /// Begin editing an existing text entity.
    fn begin_edit(&mut self, id: EntityId);
    /// Create a new empty text entity at a world point and begin editing
    /// it. Returns `None` if the engine refused the creation.
    fn create_entity(&mut self, world: Point) -> Option<EntityId>;
    /// Entity currently in edit mode.
    fn editing(&self) -> Option<EntityId>;
    /// Commit the active edit. Returns the committed entity id.
    fn commit(&mut self) -> Option<EntityId>;
    /// Abandon the active edit, reverting uncommitted composition.
    fn cancel(&mut self);

    /// Pointer events in text-local coordinates. `rotation` and
    /// `box_mode` describe the entity being edited or entered.
    fn pointer_down(&mut self, local: Point, rotation: f64, box_mode: bool);
    fn pointer_move(&mut self, local: Point);
    fn pointer_up(&mut self);

    fn key_down(&mut self, key: &TextKey, modifiers: ModifierMask) -> TextEditResult;

    /// Text-composition undo/redo, distinct from document-level history.
    fn undo(&mut self);
    fn redo(&mut self);

    /// Caret geometry, if an edit is active.
    fn caret(&self) -> Option<CaretGeometry>;
    /// Selection highlight rectangles in text-local coordinates.
    fn selection_rects(&self) -> Vec<Rect>;
}
