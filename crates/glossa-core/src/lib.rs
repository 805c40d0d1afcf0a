//! Pure domain core of a local-first translation-memory engine.
//!
//! This crate holds the four load-bearing concerns of the product:
//!
//! - an immutable project state model with pure transitions (`state`),
//! - a snapshot-based versioning engine with branching and exact rollback
//!   (`version`),
//! - the translation-memory promotion guard enforcing per-client isolation
//!   and provenance (`tm`),
//! - a deterministic linguistic diff engine with explicit cause attribution
//!   and bounded-resource degradation (`diff`),
//!
//! plus the integrity kernel (`integrity`) that verifies persisted snapshot
//! records against their checksums, and the canonical byte encoding
//! (`encoding`) those checksums are computed over.
//!
//! Everything here is value-in / value-out: no I/O, no clocks, no ID
//! generation, no global state. Callers inject identifiers and timestamps
//! and sequence their own side effects through the contracts in `gateway`.

pub mod diff;
pub mod encoding;
pub mod gateway;
pub mod ident;
pub mod integrity;
pub mod state;
pub mod tm;
pub mod version;
