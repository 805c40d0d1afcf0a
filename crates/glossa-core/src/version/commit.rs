//! Commit and rollback over a [`VersionedState`].

use tracing::debug;

use crate::ident::SnapshotId;
use crate::state::{TranslationChange, apply_translation_change};
use crate::version::equality::states_equal;
use crate::version::history::{HistoryGraph, Snapshot, VersionedState};

/// Apply `change` to the current state and record the result as a snapshot.
///
/// If some already-committed snapshot is structurally equal to the candidate
/// state, no new snapshot is created: the current state advances to the
/// existing one, and a parent edge onto it is recorded when it has none.
/// Otherwise the candidate is stored under the caller-supplied `snapshot_id`
/// with its parent set to the snapshot the current state was drawn from.
///
/// Reusing a `snapshot_id` already present in the history (without the
/// candidate deduplicating onto it) is caller misuse; committed snapshots
/// are immutable, so the call is an identity return.
#[must_use]
pub fn commit_snapshot(
    v: &VersionedState,
    change: &TranslationChange,
    snapshot_id: SnapshotId,
    created_at_epoch_ms: i64,
    label: Option<String>,
) -> VersionedState {
    let candidate = apply_translation_change(&v.current_state, change);

    if let Some(existing) = v
        .history
        .snapshots
        .values()
        .find(|s| states_equal(&s.state, &candidate))
    {
        let existing_id = existing.id.clone();
        debug!(snapshot = %existing_id, "commit deduplicated onto existing snapshot");
        let mut history = v.history.clone();
        record_parent_if_missing(&mut history, &existing_id, v.current_snapshot_id.as_ref());
        return VersionedState {
            current_state: existing.state.clone(),
            current_snapshot_id: Some(existing_id),
            history,
        };
    }

    if v.history.contains(&snapshot_id) {
        return v.clone();
    }

    let mut history = v.history.clone();
    if let Some(current_id) = &v.current_snapshot_id {
        history
            .parent_map
            .insert(snapshot_id.clone(), current_id.clone());
    }
    history.snapshots.insert(
        snapshot_id.clone(),
        Snapshot {
            id: snapshot_id.clone(),
            state: candidate.clone(),
            created_at_epoch_ms,
            label,
        },
    );

    VersionedState {
        current_state: candidate,
        current_snapshot_id: Some(snapshot_id),
        history,
    }
}

/// Move the current state back (or forward) to `snapshot_id`.
///
/// History is never destructively modified: every snapshot stays reachable,
/// so a later rollback can land on any of them, not only earlier ones. An
/// unknown ID is an identity return.
///
/// Whether TM entries created after the target snapshot should also be
/// rolled back is an unresolved product question; this function takes no
/// position and touches only versioned state.
#[must_use]
pub fn rollback_to_snapshot(v: &VersionedState, snapshot_id: &SnapshotId) -> VersionedState {
    match v.history.get(snapshot_id) {
        None => v.clone(),
        Some(snapshot) => VersionedState {
            current_state: snapshot.state.clone(),
            current_snapshot_id: Some(snapshot.id.clone()),
            history: v.history.clone(),
        },
    }
}

/// Record `current -> existing` parentage after a dedup hit, when legal.
///
/// The edge is skipped when the snapshot already has a parent, when it *is*
/// the current snapshot, or when it is an ancestor of the current snapshot;
/// any of those edges would either rewrite history or close a cycle, and
/// the graph must stay a DAG.
fn record_parent_if_missing(
    history: &mut HistoryGraph,
    existing_id: &SnapshotId,
    current_id: Option<&SnapshotId>,
) {
    let Some(current_id) = current_id else {
        return;
    };
    if existing_id == current_id
        || history.parent_map.contains_key(existing_id)
        || history.is_ancestor(existing_id, current_id)
    {
        return;
    }
    history
        .parent_map
        .insert(existing_id.clone(), current_id.clone());
}
