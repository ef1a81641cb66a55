//! Ctrl-click cycling through overlapping pick candidates.
//!
//! Repeated Ctrl-clicks at the same spot should not keep picking the
//! front-most entity; they rotate through the stack. The cycle is keyed by
//! the sorted candidate id list and dies as soon as the candidate set
//! changes or the modifier chord is released.

use planar_bridge::EntityId;

/// Live cycle over one candidate set.
#[derive(Debug, Clone)]
struct CycleState {
    /// Sorted candidate ids — the identity of this cycle.
    key: Vec<EntityId>,
    /// Selection as it was before cycling began; every cycle step replaces
    /// the selection with `base + chosen`.
    base_selection: Vec<EntityId>,
    /// Candidate chosen by the previous step.
    last_added: EntityId,
    /// Index of `last_added` within `key`.
    index: usize,
}

/// What one Ctrl-click resolved to.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleOutcome {
    /// The candidate picked by this click.
    pub chosen: EntityId,
    /// The candidate this click rotated away from, when continuing an
    /// existing cycle.
    pub previous: Option<EntityId>,
    /// Replacement selection: base selection plus `chosen`.
    pub selection: Vec<EntityId>,
}

/// Owns the (at most one) live cycle.
#[derive(Debug, Clone, Default)]
pub struct CycleController {
    state: Option<CycleState>,
}

impl CycleController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a Ctrl-click over `candidates` (front-most first) given the
    /// selection before the click. Returns `None` when there is nothing to
    /// cycle over.
    pub fn advance(
        &mut self,
        candidates: &[EntityId],
        selection_before: &[EntityId],
    ) -> Option<CycleOutcome> {
        if candidates.is_empty() {
            self.reset();
            return None;
        }

        let mut key: Vec<EntityId> = candidates.to_vec();
        key.sort_unstable();
        key.dedup();

        if let Some(state) = self.state.as_mut().filter(|s| s.key == key) {
            state.index = (state.index + 1) % state.key.len();
            let chosen = state.key[state.index];
            let previous = state.last_added;
            state.last_added = chosen;
            return Some(CycleOutcome {
                chosen,
                previous: Some(previous),
                selection: with_candidate(&state.base_selection, chosen),
            });
        }

        // New candidate set: start from the front-most hit, remember the
        // pre-cycle selection with any stale candidates filtered out.
        let chosen = candidates[0];
        let index = key.iter().position(|&id| id == chosen).unwrap_or(0);
        let base_selection: Vec<EntityId> = selection_before
            .iter()
            .copied()
            .filter(|id| !key.contains(id))
            .collect();
        let selection = with_candidate(&base_selection, chosen);
        self.state = Some(CycleState {
            key,
            base_selection,
            last_added: chosen,
            index,
        });
        Some(CycleOutcome {
            chosen,
            previous: None,
            selection,
        })
    }

    /// Drop the live cycle (modifier released, unrelated click, blur).
    pub fn reset(&mut self) {
        self.state = None;
    }

    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }
}

fn with_candidate(base: &[EntityId], chosen: EntityId) -> Vec<EntityId> {
    let mut selection = base.to_vec();
    if !selection.contains(&chosen) {
        selection.push(chosen);
    }
    selection
}
