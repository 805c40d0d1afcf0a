//! Immutable translation-memory entries.

use serde::{Deserialize, Serialize};

use crate::ident::{ClientId, ProjectId, SnapshotId, TmEntryKey};

/// One `(source_text, target_text)` pair in a client's translation memory.
///
/// Entries are create-once: there is no update or delete in the core
/// contract. A correction is a new entry with fresh provenance. Every field
/// is required; an entry without provenance cannot exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TmEntry {
    pub source_text: String,
    pub target_text: String,
    pub client_id: ClientId,
    pub project_id: ProjectId,
    pub snapshot_id: SnapshotId,
    pub created_at_epoch_ms: i64,
}

impl TmEntry {
    /// The `(client_id, source_text)` key adapters enforce uniqueness on.
    #[must_use]
    pub fn natural_key(&self) -> TmEntryKey {
        TmEntryKey::new(self.client_id.clone(), self.source_text.clone())
    }
}
