//! # Persistence
//!
//! Models do not talk to a network themselves. [`crate::Model::save`] builds a
//! payload through the schema's [`SaveHooks`] and hands it to a
//! [`SaveTransport`]:
//!
//! ```text
//! save(transport, force)
//!   ├─ no changes && !force      → Skipped(NoChanges)
//!   ├─ no save_url               → Skipped(NoSaveUrl)
//!   ├─ on_before_save() == false → Vetoed
//!   ├─ "beforesave" listener veto→ Vetoed
//!   └─ transport.send(url, data_for_saving())
//!        ├─ Ok(reply)  → on_save_complete, commit, on_after_save, "save" → Saved
//!        └─ Err(e)     → on_save_error → Failed
//! ```
//!
//! [`memory::MemoryTransport`] is the in-process implementation used by tests
//! and offline callers.

pub mod memory;

use serde_json::json;

use crate::error::TransportError;
use crate::model::Model;

pub use memory::MemoryTransport;

/// Sends a save payload somewhere and returns the reply body.
pub trait SaveTransport {
    fn send(
        &mut self,
        url: &str,
        payload: &serde_json::Value,
    ) -> Result<serde_json::Value, TransportError>;
}

/// Per-schema persistence hooks. Every method has a default.
pub trait SaveHooks: Send + Sync {
    /// The payload sent to the transport. Defaults to `{"model": fields}`.
    fn data_for_saving(&self, model: &Model) -> serde_json::Value {
        json!({ "model": model.fields() })
    }

    /// Return `false` to cancel the save.
    fn on_before_save(&self, _model: &Model) -> bool {
        true
    }

    /// Runs after a successful save, once the originals are committed.
    fn on_after_save(&self, _model: &Model) {}

    /// Gets the transport reply; may update the model from it.
    fn on_save_complete(&self, _model: &mut Model, _response: &serde_json::Value) {}

    fn on_save_error(&self, _model: &Model, _error: &TransportError) {}
}

/// Hooks with every default in place.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultHooks;

impl SaveHooks for DefaultHooks {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoChanges,
    NoSaveUrl,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    Skipped(SkipReason),
    Vetoed,
    Saved(serde_json::Value),
    Failed(TransportError),
}

impl SaveOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveOutcome::Saved(_))
    }
}
