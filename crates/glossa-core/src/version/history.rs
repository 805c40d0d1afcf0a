//! The snapshot history graph.
//!
//! Snapshots form a DAG linked by parent references: one optional parent per
//! snapshot, any number of children. The core never deletes or mutates a
//! committed snapshot; branching arises naturally from committing after a
//! rollback.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ident::SnapshotId;
use crate::state::ProjectState;

/// Immutable record of a project state at commit time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub id: SnapshotId,
    pub state: ProjectState,
    pub created_at_epoch_ms: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Snapshots plus their parent links.
///
/// `BTreeMap` keys give every scan over the graph (dedup, serialization,
/// child listing) a stable order, which the audit-replay guarantee depends
/// on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryGraph {
    pub snapshots: BTreeMap<SnapshotId, Snapshot>,
    pub parent_map: BTreeMap<SnapshotId, SnapshotId>,
}

impl HistoryGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &SnapshotId) -> bool {
        self.snapshots.contains_key(id)
    }

    #[must_use]
    pub fn get(&self, id: &SnapshotId) -> Option<&Snapshot> {
        self.snapshots.get(id)
    }

    #[must_use]
    pub fn parent_of(&self, id: &SnapshotId) -> Option<&SnapshotId> {
        self.parent_map.get(id)
    }

    /// Snapshots with no parent, in ID order.
    #[must_use]
    pub fn roots(&self) -> Vec<&SnapshotId> {
        self.snapshots
            .keys()
            .filter(|id| !self.parent_map.contains_key(*id))
            .collect()
    }

    /// Direct children of `id`, in ID order.
    #[must_use]
    pub fn children_of(&self, id: &SnapshotId) -> Vec<&SnapshotId> {
        self.parent_map
            .iter()
            .filter(|(_, parent)| *parent == id)
            .map(|(child, _)| child)
            .collect()
    }

    /// Whether `ancestor` lies on the parent chain above `descendant`.
    ///
    /// A snapshot is not its own ancestor. The walk is bounded by the size
    /// of the parent map, so even a malformed graph cannot loop forever.
    #[must_use]
    pub fn is_ancestor(&self, ancestor: &SnapshotId, descendant: &SnapshotId) -> bool {
        let mut cursor = self.parent_map.get(descendant);
        let mut remaining = self.parent_map.len();
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            if remaining == 0 {
                return false;
            }
            remaining -= 1;
            cursor = self.parent_map.get(current);
        }
        false
    }

    /// The chain from `id` up to its root, starting with `id` itself.
    /// Unknown IDs yield an empty path.
    #[must_use]
    pub fn path_to_root(&self, id: &SnapshotId) -> Vec<SnapshotId> {
        if !self.contains(id) {
            return Vec::new();
        }
        let mut path = vec![id.clone()];
        let mut cursor = self.parent_map.get(id);
        let mut remaining = self.parent_map.len();
        while let Some(current) = cursor {
            path.push(current.clone());
            if remaining == 0 {
                break;
            }
            remaining -= 1;
            cursor = self.parent_map.get(current);
        }
        path
    }
}

/// A current working state together with the history it was drawn from.
///
/// `current_snapshot_id` names the snapshot `current_state` was taken from,
/// when there is one; the first commit of a fresh project has none. Commit
/// uses it to attribute parentage, rollback repoints it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionedState {
    pub current_state: ProjectState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_snapshot_id: Option<SnapshotId>,
    pub history: HistoryGraph,
}

impl VersionedState {
    /// Wrap a caller-built initial state with an empty history.
    #[must_use]
    pub fn new(initial_state: ProjectState) -> Self {
        Self {
            current_state: initial_state,
            current_snapshot_id: None,
            history: HistoryGraph::new(),
        }
    }
}
