//! Snapshot checksums.
//!
//! The digest is plain SHA-256 over the exact bytes the adapter persisted,
//! rendered as lowercase hex. No salt, no domain prefix: any party holding
//! the bytes must be able to reproduce the digest independently.

use sha2::{Digest, Sha256};

/// SHA-256 of the serialized state, as lowercase hex.
#[must_use]
pub fn calculate_snapshot_checksum(serialized: &[u8]) -> String {
    hex::encode(Sha256::digest(serialized))
}

/// Whether `expected` matches the digest of `serialized`.
///
/// Hex case and surrounding whitespace in the stored value are forgiven;
/// the bytes are not.
#[must_use]
pub fn verify_checksum(serialized: &[u8], expected: &str) -> bool {
    calculate_snapshot_checksum(serialized).eq_ignore_ascii_case(expected.trim())
}
