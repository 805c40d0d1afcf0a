//! Deterministic byte encodings.

pub mod canonical;

pub use canonical::{
    CanonicalError, canonical_json_bytes, canonical_json_string, encode_project_state,
};
