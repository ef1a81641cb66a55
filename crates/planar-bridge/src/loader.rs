//! One-shot engine installation.
//!
//! The binary module is instantiated exactly once per page and cached; the
//! interaction layer stays inert until the slot is filled. This is the only
//! fallible surface of the bridge.

use std::cell::RefCell;
use std::rc::Rc;

use once_cell::unsync::OnceCell;
use thiserror::Error;

use crate::engine::Engine;

/// Shared handle to the installed engine. Single-threaded by design; the
/// whole interaction layer lives on the UI thread.
pub type SharedEngine = Rc<RefCell<dyn Engine>>;

/// Errors from the engine installation path.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("engine module is not loaded yet")]
    NotLoaded,
    #[error("engine module was already installed")]
    AlreadyInstalled,
    #[error("engine module failed to instantiate: {0}")]
    Instantiate(String),
}

/// Load-once slot for the engine handle.
#[derive(Default)]
pub struct EngineSlot {
    cell: OnceCell<SharedEngine>,
}

impl EngineSlot {
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// Install the instantiated engine. Fails if one is already present.
    pub fn install(&self, engine: SharedEngine) -> Result<(), BridgeError> {
        self.cell.set(engine).map_err(|_| {
            log::warn!("attempted to install a second engine module");
            BridgeError::AlreadyInstalled
        })
    }

    /// The installed engine, or `BridgeError::NotLoaded`.
    pub fn get(&self) -> Result<&SharedEngine, BridgeError> {
        self.cell.get().ok_or(BridgeError::NotLoaded)
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl std::fmt::Debug for EngineSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineSlot")
            .field("loaded", &self.is_loaded())
            .finish()
    }
}
