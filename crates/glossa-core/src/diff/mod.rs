//! Deterministic linguistic diff between two project states.
//!
//! The engine never invents causation: a change is attributed to translation
//! memory only when the target state carries explicit provenance, and
//! everything else is `unknown`. Results degrade declaratively under the
//! bounds in [`limits`] instead of running unbounded.

pub mod engine;
pub mod limits;

pub use engine::{
    ChangeCause, ChangeType, DiffCompleteness, DiffResult, DiffSummary, DiffUnit, SegmentDiff,
    TermDiff, TmAttribution, TranslationFacet, compute_diff, explain_change_cause,
};
pub use limits::{
    DiffFeasibility, MAX_CHANGES_RETURNED, MAX_SEGMENTS_PER_DIFF, WARN_SEGMENTS_THRESHOLD,
    check_diff_feasibility, get_partial_diff_explanation, get_project_size_warning,
    should_warn_about_project_size,
};
