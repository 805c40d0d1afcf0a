//! Contracts the core requires from its callers.
//!
//! The core owns no clock, no ID generator, and no storage. Harnesses
//! implement these traits and thread the resulting values into the pure
//! APIs; the core itself never calls out through them at runtime — they
//! exist so every adapter agrees on one seam shape.

use serde_json::Value;

use crate::ident::{ProjectId, SegmentId, SnapshotId, TargetSegmentId, TermId};

/// Supplies fresh, globally-unique opaque identifiers per entity type.
pub trait IdSource {
    fn next_project_id(&mut self) -> ProjectId;
    fn next_segment_id(&mut self) -> SegmentId;
    fn next_target_segment_id(&mut self) -> TargetSegmentId;
    fn next_snapshot_id(&mut self) -> SnapshotId;
    fn next_term_id(&mut self) -> TermId;
}

/// Supplies wall-clock timestamps wherever the pure APIs take `epoch_ms`.
pub trait ClockSource {
    fn epoch_ms(&self) -> i64;
}

/// Opaque persistence seam: statement execution, single- and multi-row
/// queries, and a scoped transaction wrapper.
///
/// The core does not depend on SQL; parameters and rows travel as JSON
/// values, and whatever dialect the adapter speaks stays behind this trait.
/// Writes are expected to be atomic per outermost `transaction` invocation.
pub trait PersistenceGateway {
    type Error;

    fn run(&mut self, statement: &str, params: &[Value]) -> Result<(), Self::Error>;

    fn get(&mut self, query: &str, params: &[Value]) -> Result<Option<Value>, Self::Error>;

    fn all(&mut self, query: &str, params: &[Value]) -> Result<Vec<Value>, Self::Error>;

    fn transaction<T, F>(&mut self, scope: F) -> Result<T, Self::Error>
    where
        F: FnOnce(&mut Self) -> Result<T, Self::Error>;
}
