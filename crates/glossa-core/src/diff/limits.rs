//! Resource bounds for the diff engine, and every user-facing sentence about
//! them.
//!
//! Wording lives here, in one place, so the strings shown for refusals,
//! warnings, and truncations stay consistent and testable.

use serde::{Deserialize, Serialize};

/// Hard ceiling on segment count per diffed state; larger inputs are refused.
pub const MAX_SEGMENTS_PER_DIFF: usize = 10_000;

/// Hard ceiling on returned change units; the rest are truncated away.
pub const MAX_CHANGES_RETURNED: usize = 5_000;

/// Soft threshold above which callers should show a size warning.
pub const WARN_SEGMENTS_THRESHOLD: usize = 5_000;

/// Whether a diff over `segment_count` segments will run at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DiffFeasibility {
    Feasible,
    Refused { reason: String },
}

/// Check the segment-count precondition.
///
/// Exactly [`MAX_SEGMENTS_PER_DIFF`] segments is still feasible; one more is
/// refused, with a reason naming both the observed and limiting counts.
#[must_use]
pub fn check_diff_feasibility(segment_count: usize) -> DiffFeasibility {
    if segment_count <= MAX_SEGMENTS_PER_DIFF {
        DiffFeasibility::Feasible
    } else {
        DiffFeasibility::Refused {
            reason: format!(
                "this comparison covers {} segments, which is more than the {} the \
                 engine will walk in one pass; compare a smaller range instead",
                format_count(segment_count),
                format_count(MAX_SEGMENTS_PER_DIFF),
            ),
        }
    }
}

/// True for projects big enough to warn about but still diffable:
/// `WARN < n <= MAX`.
#[must_use]
pub fn should_warn_about_project_size(segment_count: usize) -> bool {
    segment_count > WARN_SEGMENTS_THRESHOLD && segment_count <= MAX_SEGMENTS_PER_DIFF
}

/// Sentence shown alongside the warning from
/// [`should_warn_about_project_size`].
#[must_use]
pub fn get_project_size_warning(segment_count: usize) -> String {
    format!(
        "this project has {} segments; comparisons stay exact up to {} segments \
         but may take noticeably longer at this size",
        format_count(segment_count),
        format_count(MAX_SEGMENTS_PER_DIFF),
    )
}

/// Sentence explaining a truncated result.
#[must_use]
pub fn get_partial_diff_explanation(returned: usize, total: usize) -> String {
    format!(
        "showing the first {} of {} changes; narrow the comparison to see the rest",
        format_count(returned),
        format_count(total),
    )
}

/// Group digits with thousands separators: `10000` becomes `"10,000"`.
#[must_use]
pub fn format_count(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
