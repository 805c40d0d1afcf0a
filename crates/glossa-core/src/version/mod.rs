//! Snapshot-based versioning: history graph, commit with structural-equality
//! dedup, and exact rollback.

pub mod commit;
pub mod equality;
pub mod history;

pub use commit::{commit_snapshot, rollback_to_snapshot};
pub use equality::states_equal;
pub use history::{HistoryGraph, Snapshot, VersionedState};
