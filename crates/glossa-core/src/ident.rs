//! Opaque identifier spaces and language codes.
//!
//! Every entity family gets its own nominal type so the compiler rejects
//! cross-ID assignment. The core never generates, parses, or inspects ID
//! contents; callers supply them fully formed.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// True when the identifier is empty after trimming.
            #[must_use]
            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

opaque_id!(
    /// Identifies a client (the party owning projects and TM entries).
    ClientId
);
opaque_id!(
    /// Identifies a translation project.
    ProjectId
);
opaque_id!(
    /// Identifies a source segment within a project.
    SegmentId
);
opaque_id!(
    /// Identifies one target-language rendering of a source segment.
    TargetSegmentId
);
opaque_id!(
    /// Identifies an immutable snapshot in the history graph.
    SnapshotId
);
opaque_id!(
    /// Identifies a glossary term.
    TermId
);

/// Marks an operation as scoped to one client.
///
/// A plain [`ClientId`] says *which* client an entity belongs to; a
/// `ClientScope` says an operation is being performed *on behalf of* that
/// client. The distinction keeps cross-client checks type-visible at call
/// sites.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientScope(ClientId);

impl ClientScope {
    pub fn new(client_id: ClientId) -> Self {
        Self(client_id)
    }

    #[must_use]
    pub fn client_id(&self) -> &ClientId {
        &self.0
    }
}

impl fmt::Display for ClientScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// An opaque language code.
///
/// The core imposes only equality and set-membership semantics; whether the
/// value is BCP 47, ISO 639, or something house-grown is the caller's
/// business.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageCode(String);

impl LanguageCode {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LanguageCode {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Natural key of a translation-memory entry: `(client_id, source_text)`.
///
/// Adapters enforce uniqueness on this key; the promotion guard surfaces
/// duplicates before any insert is attempted.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TmEntryKey {
    pub client_id: ClientId,
    pub source_text: String,
}

impl TmEntryKey {
    pub fn new(client_id: ClientId, source_text: impl Into<String>) -> Self {
        Self {
            client_id,
            source_text: source_text.into(),
        }
    }
}
