//! Canonical JSON encoding for persisted snapshots.
//!
//! The checksum in [`crate::integrity`] is only meaningful if serialization
//! is deterministic, so the encoding is fixed here once: compact JSON with
//! object keys sorted by UTF-8 byte order at every nesting level, encoded as
//! UTF-8 bytes. Adapters persist these exact bytes; any canonical-equal
//! writer reproduces the same digest.

use serde::Serialize;
use serde_json::Value;

use crate::state::ProjectState;

/// Failure while producing canonical bytes.
#[derive(Debug, thiserror::Error)]
pub enum CanonicalError {
    #[error("failed to serialize canonical JSON: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Canonical JSON text for any serializable value.
pub fn canonical_json_string(value: &impl Serialize) -> Result<String, CanonicalError> {
    let serialized = serde_json::to_value(value)?;
    let canonical = sort_keys(serialized);
    Ok(serde_json::to_string(&canonical)?)
}

/// Canonical JSON as UTF-8 bytes.
pub fn canonical_json_bytes(value: &impl Serialize) -> Result<Vec<u8>, CanonicalError> {
    canonical_json_string(value).map(String::into_bytes)
}

/// The persisted form of one project state.
pub fn encode_project_state(state: &ProjectState) -> Result<Vec<u8>, CanonicalError> {
    canonical_json_bytes(state)
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));

            let mut sorted = serde_json::Map::with_capacity(entries.len());
            for (key, nested) in entries {
                sorted.insert(key, sort_keys(nested));
            }
            Value::Object(sorted)
        }
        Value::Array(values) => Value::Array(values.into_iter().map(sort_keys).collect()),
        other => other,
    }
}
