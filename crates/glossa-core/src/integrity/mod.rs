//! Content-hash verification of persisted snapshot records.
//!
//! This is the layer that closes the loop between the in-memory invariants
//! and whatever the persistence adapter wrote to disk. Verification only
//! reads and reports; nothing is ever repaired or rewritten.

pub mod checksum;
pub mod verify;

pub use checksum::{calculate_snapshot_checksum, verify_checksum};
pub use verify::{
    IntegrityIssue, IntegrityReport, IssueSeverity, IssueType, StoredSnapshotRecord,
    verify_snapshot_integrity,
};
