//! Structural equality between project states.
//!
//! Used by the commit path to deduplicate snapshots. Fast paths short-circuit
//! before the full walk: pointer identity, project-ID mismatch, and length
//! mismatch all decide without touching segment contents.

use std::collections::BTreeMap;

use crate::ident::{LanguageCode, SegmentId};
use crate::state::{ProjectState, TargetSegment};

/// Whether two states are structurally equal.
///
/// Segments compare as ordered sequences; target segments compare as sets
/// keyed by `(segment_id, target_language)`, so two states that list the
/// same target segments in different order are equal. The full compare is
/// O(n log n) over target segments and O(n) over source segments.
#[must_use]
pub fn states_equal(a: &ProjectState, b: &ProjectState) -> bool {
    if std::ptr::eq(a, b) {
        return true;
    }
    if a.project.id != b.project.id {
        return false;
    }
    if a.segments.len() != b.segments.len()
        || a.target_segments.len() != b.target_segments.len()
    {
        return false;
    }
    if a.project != b.project {
        return false;
    }
    if a.segments != b.segments {
        return false;
    }

    let keyed: BTreeMap<(&SegmentId, &LanguageCode), &TargetSegment> = b
        .target_segments
        .iter()
        .map(|t| ((&t.segment_id, &t.target_language), t))
        .collect();
    a.target_segments.iter().all(|t| {
        keyed
            .get(&(&t.segment_id, &t.target_language))
            .is_some_and(|other| t == *other)
    })
}
