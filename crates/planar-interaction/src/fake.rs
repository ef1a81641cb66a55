//! Scripted engine and text-tool fakes for handler/core tests.
//!
//! The fake engine records every command one-to-one with the `Engine`
//! trait and maintains just enough state (selection set, draft mirror,
//! transform flag) for the interaction layer's guards to behave like the
//! real module.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use kurbo::{Point, Rect, Size};
use planar_bridge::{
    BeginDraft, BeginTransform, CaretGeometry, Engine, EntityFlags, EntityId, EntityKind,
    EntityTransform, MarqueeMode, ModifierMask, PickHit, PickMask, Rgba, SelectionMode,
    SnapOptions, StyleTarget, TextEditResult, TextKey, TextTool, ViewTransform,
};

use crate::core::InteractionCore;
use crate::settings::{SharedSettings, ToolDefaults};
use crate::ui_state::SharedUi;

/// Every engine command, recorded in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    BeginDraft(BeginDraft),
    UpdateDraft(Point, ModifierMask),
    AppendDraftPoint(Point, ModifierMask),
    CommitDraft,
    CancelDraft,
    BeginTransform(BeginTransform),
    UpdateTransform(Point, ModifierMask),
    CommitTransform,
    CancelTransform,
    SetSelection(Vec<EntityId>, SelectionMode),
    MarqueeSelect(Rect, MarqueeMode, SelectionMode),
    DeleteEntities(Vec<EntityId>),
    SetStyleColor(Vec<EntityId>, StyleTarget, Rgba),
    SetStyleEnabled(Vec<EntityId>, StyleTarget, bool),
    ClearStyleOverride(Vec<EntityId>, StyleTarget),
    SetSnapOptions(SnapOptions),
}

/// A draft the fake engine turned into an entity.
#[derive(Debug, Clone, PartialEq)]
pub struct CommittedDraft {
    pub id: EntityId,
    pub kind: EntityKind,
    pub start: Point,
    pub end: Point,
    pub points: Vec<Point>,
    pub sides: u32,
}

#[derive(Debug, Clone)]
struct DraftMirror {
    begin: BeginDraft,
    current: Point,
    points: Vec<Point>,
}

/// Scripted engine.
#[derive(Debug, Default)]
pub struct FakeEngine {
    pub commands: Vec<Cmd>,
    /// Candidate stack served to picks, front-most first.
    pub pick_results: Vec<PickHit>,
    pub selection: Vec<EntityId>,
    /// Entities selected by the next marquee_select call.
    pub marquee_result: Vec<EntityId>,
    pub transforms: HashMap<EntityId, EntityTransform>,
    pub kinds: HashMap<EntityId, EntityKind>,
    pub flags: HashMap<EntityId, EntityFlags>,
    pub committed: Vec<CommittedDraft>,
    draft: Option<DraftMirror>,
    transform_active: bool,
    next_id: EntityId,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self {
            next_id: 100,
            ..Default::default()
        }
    }

    /// Script the pick stack (front-most first).
    pub fn set_picks(&mut self, hits: Vec<PickHit>) {
        self.pick_results = hits;
    }

    /// Shorthand for a scripted body hit.
    pub fn body_hit(id: EntityId, kind: EntityKind, at: Point) -> PickHit {
        PickHit {
            id,
            kind,
            sub_target: planar_bridge::SubTarget::Body,
            sub_index: -1,
            hit: at,
            distance: 0.0,
        }
    }

    pub fn draft_active(&self) -> bool {
        self.draft.is_some()
    }

    pub fn transform_active(&self) -> bool {
        self.transform_active
    }

    fn allowed(mask: PickMask, kind: EntityKind) -> bool {
        mask.bits() & (1 << kind as u32) != 0
    }
}

impl Engine for FakeEngine {
    fn pick(&self, _world: Point, _tolerance: f64, mask: PickMask) -> Option<PickHit> {
        self.pick_results
            .iter()
            .find(|h| Self::allowed(mask, h.kind))
            .copied()
    }

    fn pick_all(&self, _world: Point, _tolerance: f64, mask: PickMask) -> Vec<PickHit> {
        self.pick_results
            .iter()
            .filter(|h| Self::allowed(mask, h.kind))
            .copied()
            .collect()
    }

    fn begin_draft(&mut self, draft: &BeginDraft) {
        self.commands.push(Cmd::BeginDraft(draft.clone()));
        let mut points = Vec::new();
        if draft.kind == EntityKind::Polyline {
            points.push(draft.start);
        }
        self.draft = Some(DraftMirror {
            begin: draft.clone(),
            current: draft.start,
            points,
        });
    }

    fn update_draft(&mut self, world: Point, modifiers: ModifierMask) {
        self.commands.push(Cmd::UpdateDraft(world, modifiers));
        if let Some(draft) = self.draft.as_mut() {
            draft.current = world;
        }
    }

    fn append_draft_point(&mut self, world: Point, modifiers: ModifierMask) {
        self.commands.push(Cmd::AppendDraftPoint(world, modifiers));
        if let Some(draft) = self.draft.as_mut() {
            draft.points.push(world);
            draft.current = world;
        }
    }

    fn has_draft_delta(&self) -> bool {
        self.draft
            .as_ref()
            .is_some_and(|d| (d.current - d.begin.start).hypot2() > 1e-9)
    }

    fn commit_draft(&mut self) -> Option<EntityId> {
        self.commands.push(Cmd::CommitDraft);
        let draft = self.draft.take()?;
        let start = draft.begin.start;
        let end = draft.current;
        let kind = draft.begin.kind;

        // Degenerate geometry never becomes an entity.
        let viable = match kind {
            EntityKind::Rect | EntityKind::Circle | EntityKind::Polygon => {
                (end.x - start.x).abs() > 1e-3 && (end.y - start.y).abs() > 1e-3
            }
            EntityKind::Polyline => draft.points.len() >= 2,
            _ => true,
        };
        if !viable {
            return None;
        }

        let id = self.next_id;
        self.next_id += 1;
        self.kinds.insert(id, kind);
        self.transforms.insert(
            id,
            EntityTransform {
                center: Point::new((start.x + end.x) / 2.0, (start.y + end.y) / 2.0),
                width: (end.x - start.x).abs(),
                height: (end.y - start.y).abs(),
                rotation: 0.0,
            },
        );
        self.committed.push(CommittedDraft {
            id,
            kind,
            start,
            end,
            points: draft.points,
            sides: draft.begin.sides,
        });
        // The engine auto-selects what it just created.
        self.selection = vec![id];
        Some(id)
    }

    fn cancel_draft(&mut self) {
        self.commands.push(Cmd::CancelDraft);
        self.draft = None;
    }

    fn begin_transform(&mut self, req: &BeginTransform) {
        self.commands.push(Cmd::BeginTransform(req.clone()));
        self.transform_active = true;
    }

    fn update_transform(
        &mut self,
        screen: Point,
        _view: ViewTransform,
        _canvas: Size,
        modifiers: ModifierMask,
    ) {
        self.commands.push(Cmd::UpdateTransform(screen, modifiers));
    }

    fn commit_transform(&mut self) {
        self.commands.push(Cmd::CommitTransform);
        self.transform_active = false;
    }

    fn cancel_transform(&mut self) {
        self.commands.push(Cmd::CancelTransform);
        self.transform_active = false;
    }

    fn is_transform_active(&self) -> bool {
        self.transform_active
    }

    fn set_selection(&mut self, ids: &[EntityId], mode: SelectionMode) {
        self.commands.push(Cmd::SetSelection(ids.to_vec(), mode));
        match mode {
            SelectionMode::Replace => self.selection = ids.to_vec(),
            SelectionMode::Add => {
                for &id in ids {
                    if !self.selection.contains(&id) {
                        self.selection.push(id);
                    }
                }
            }
            SelectionMode::Remove => self.selection.retain(|id| !ids.contains(id)),
            SelectionMode::Toggle => {
                for &id in ids {
                    if let Some(pos) = self.selection.iter().position(|&s| s == id) {
                        self.selection.remove(pos);
                    } else {
                        self.selection.push(id);
                    }
                }
            }
        }
    }

    fn selection(&self) -> Vec<EntityId> {
        self.selection.clone()
    }

    fn marquee_select(&mut self, rect: Rect, mode: MarqueeMode, combine: SelectionMode) {
        self.commands.push(Cmd::MarqueeSelect(rect, mode, combine));
        let result = self.marquee_result.clone();
        self.set_selection(&result, combine);
        // Drop the bookkeeping entry the nested call pushed.
        self.commands.pop();
    }

    fn delete_entities(&mut self, ids: &[EntityId]) {
        self.commands.push(Cmd::DeleteEntities(ids.to_vec()));
        for id in ids {
            self.kinds.remove(id);
            self.transforms.remove(id);
            self.flags.remove(id);
        }
        self.selection.retain(|id| !ids.contains(id));
    }

    fn set_style_color(&mut self, ids: &[EntityId], target: StyleTarget, color: Rgba) {
        self.commands
            .push(Cmd::SetStyleColor(ids.to_vec(), target, color));
    }

    fn set_style_enabled(&mut self, ids: &[EntityId], target: StyleTarget, enabled: bool) {
        self.commands
            .push(Cmd::SetStyleEnabled(ids.to_vec(), target, enabled));
    }

    fn clear_style_override(&mut self, ids: &[EntityId], target: StyleTarget) {
        self.commands
            .push(Cmd::ClearStyleOverride(ids.to_vec(), target));
    }

    fn entity_kind(&self, id: EntityId) -> Option<EntityKind> {
        self.kinds.get(&id).copied()
    }

    fn entity_transform(&self, id: EntityId) -> Option<EntityTransform> {
        self.transforms.get(&id).copied()
    }

    fn entity_flags(&self, id: EntityId) -> EntityFlags {
        self.flags.get(&id).copied().unwrap_or_default()
    }

    fn set_snap_options(&mut self, options: SnapOptions) {
        self.commands.push(Cmd::SetSnapOptions(options));
    }
}

/// Every text-tool call, recorded in order.
#[derive(Debug, Clone, PartialEq)]
pub enum TextCmd {
    BeginEdit(EntityId),
    Create(Point),
    Commit,
    Cancel,
    PointerDown(Point, f64, bool),
    PointerMove(Point),
    PointerUp,
    KeyDown(TextKey),
    Undo,
    Redo,
}

/// Scripted text tool.
#[derive(Debug)]
pub struct FakeTextTool {
    pub commands: Vec<TextCmd>,
    pub editing: Option<EntityId>,
    pub caret: Option<CaretGeometry>,
    pub selection_rects: Vec<Rect>,
    pub committed: Vec<EntityId>,
    next_id: EntityId,
}

impl Default for FakeTextTool {
    fn default() -> Self {
        Self {
            commands: Vec::new(),
            editing: None,
            caret: None,
            selection_rects: Vec::new(),
            committed: Vec::new(),
            next_id: 9000,
        }
    }
}

impl FakeTextTool {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TextTool for FakeTextTool {
    fn begin_edit(&mut self, id: EntityId) {
        self.commands.push(TextCmd::BeginEdit(id));
        self.editing = Some(id);
    }

    fn create_entity(&mut self, world: Point) -> Option<EntityId> {
        self.commands.push(TextCmd::Create(world));
        let id = self.next_id;
        self.next_id += 1;
        self.editing = Some(id);
        Some(id)
    }

    fn editing(&self) -> Option<EntityId> {
        self.editing
    }

    fn commit(&mut self) -> Option<EntityId> {
        self.commands.push(TextCmd::Commit);
        let id = self.editing.take();
        if let Some(id) = id {
            self.committed.push(id);
        }
        self.caret = None;
        id
    }

    fn cancel(&mut self) {
        self.commands.push(TextCmd::Cancel);
        self.editing = None;
        self.caret = None;
    }

    fn pointer_down(&mut self, local: Point, rotation: f64, box_mode: bool) {
        self.commands
            .push(TextCmd::PointerDown(local, rotation, box_mode));
    }

    fn pointer_move(&mut self, local: Point) {
        self.commands.push(TextCmd::PointerMove(local));
    }

    fn pointer_up(&mut self) {
        self.commands.push(TextCmd::PointerUp);
    }

    fn key_down(&mut self, key: &TextKey, _modifiers: ModifierMask) -> TextEditResult {
        self.commands.push(TextCmd::KeyDown(key.clone()));
        match key {
            TextKey::Escape => TextEditResult::ExitEdit,
            _ => TextEditResult::Handled,
        }
    }

    fn undo(&mut self) {
        self.commands.push(TextCmd::Undo);
    }

    fn redo(&mut self) {
        self.commands.push(TextCmd::Redo);
    }

    fn caret(&self) -> Option<CaretGeometry> {
        self.caret
    }

    fn selection_rects(&self) -> Vec<Rect> {
        self.selection_rects.clone()
    }
}

/// A core wired to fakes, ready for event-level tests.
pub struct TestRig {
    pub core: InteractionCore,
    pub engine: Rc<RefCell<FakeEngine>>,
    pub text_tool: Rc<RefCell<FakeTextTool>>,
    pub settings: SharedSettings,
    pub ui: SharedUi,
}

impl TestRig {
    pub fn new() -> Self {
        Self::with_defaults(ToolDefaults::default())
    }

    pub fn with_defaults(defaults: ToolDefaults) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        let engine = Rc::new(RefCell::new(FakeEngine::new()));
        let text_tool = Rc::new(RefCell::new(FakeTextTool::new()));
        let settings = SharedSettings::new(defaults);
        let ui = SharedUi::new();
        let mut core =
            InteractionCore::new(text_tool.clone(), settings.clone(), ui.clone());
        core.attach_engine(engine.clone());
        core.set_canvas_size(Size::new(800.0, 600.0));
        Self {
            core,
            engine,
            text_tool,
            settings,
            ui,
        }
    }

    pub fn commands(&self) -> Vec<Cmd> {
        self.engine.borrow().commands.clone()
    }

    pub fn selection(&self) -> Vec<EntityId> {
        self.engine.borrow().selection.clone()
    }
}
