//! Diff computation and change classification.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::diff::limits::{
    DiffFeasibility, MAX_CHANGES_RETURNED, check_diff_feasibility,
    get_partial_diff_explanation,
};
use crate::ident::{LanguageCode, ProjectId, SegmentId, SnapshotId, TermId};
use crate::state::{ProjectState, TargetSegment, TranslationStatus};

/// How a `(segment, language)` pair changed between the two states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    Created,
    Modified,
    Deleted,
    Unchanged,
}

impl ChangeType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Modified => "modified",
            Self::Deleted => "deleted",
            Self::Unchanged => "unchanged",
        }
    }
}

/// Why a change happened. Attribution is explicit, never inferred: the
/// engine emits `TmInsert` only when the target state recorded provenance,
/// and everything else is `Unknown`. `ManualEdit` exists for upstream
/// callers that annotate changes themselves; the pure engine never emits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeCause {
    TmInsert,
    ManualEdit,
    Unknown,
}

/// Where a TM-driven change came from. Present on a [`SegmentDiff`] exactly
/// when its cause is [`ChangeCause::TmInsert`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TmAttribution {
    pub source_project_id: ProjectId,
    pub source_snapshot_id: SnapshotId,
}

/// The compared facet of one target segment: what "semantically equal"
/// ranges over. Provenance deliberately does not participate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationFacet {
    pub translated_text: String,
    pub status: TranslationStatus,
    pub target_language: LanguageCode,
}

impl TranslationFacet {
    fn of(target: &TargetSegment) -> Self {
        Self {
            translated_text: target.translated_text.clone(),
            status: target.status,
            target_language: target.target_language.clone(),
        }
    }

    fn semantically_equal(&self, other: &Self) -> bool {
        self.translated_text == other.translated_text
            && self.status == other.status
            && self.target_language == other.target_language
    }
}

/// One changed `(segment, language)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentDiff {
    pub segment_id: SegmentId,
    pub target_language: LanguageCode,
    pub change_type: ChangeType,
    pub cause: ChangeCause,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<TranslationFacet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<TranslationFacet>,
    pub source_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tm_attribution: Option<TmAttribution>,
}

/// One changed glossary term. Project-state diffs never produce these; they
/// exist for callers diffing termbases alongside segment work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermDiff {
    pub term_id: TermId,
    pub change_type: ChangeType,
    pub cause: ChangeCause,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before_term: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after_term: Option<String>,
}

/// A single unit of change in a diff result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiffUnit {
    Segment(SegmentDiff),
    Term(TermDiff),
}

impl DiffUnit {
    #[must_use]
    pub fn change_type(&self) -> ChangeType {
        match self {
            Self::Segment(s) => s.change_type,
            Self::Term(t) => t.change_type,
        }
    }
}

/// Counts over the units actually returned (after any truncation), plus the
/// number of pairs that did not change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub created: usize,
    pub modified: usize,
    pub deleted: usize,
    pub unchanged: usize,
}

/// Whether the result is everything, a prefix, or nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DiffCompleteness {
    Complete,
    Partial { truncated_at: usize, reason: String },
    Refused { reason: String },
}

/// Outcome of [`compute_diff`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffResult {
    pub from_snapshot_id: SnapshotId,
    pub to_snapshot_id: SnapshotId,
    pub changes: Vec<DiffUnit>,
    pub summary: DiffSummary,
    pub completeness: DiffCompleteness,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_changes_before_truncation: Option<usize>,
}

/// Compute the linguistic diff between two states of one project.
///
/// One [`SegmentDiff`] is considered for every `(segment_id,
/// target_language)` pair present in either state's target segments, walked
/// in lexicographic key order so identical inputs always produce identical
/// output. Unchanged pairs are tallied in the summary but not materialized
/// as units. The source text for each pair is read from `to` when the
/// segment still exists there, else from `from`.
#[must_use]
pub fn compute_diff(
    from: &ProjectState,
    to: &ProjectState,
    from_id: &SnapshotId,
    to_id: &SnapshotId,
) -> DiffResult {
    let largest = from.segments.len().max(to.segments.len());
    if let DiffFeasibility::Refused { reason } = check_diff_feasibility(largest) {
        warn!(segments = largest, "diff refused");
        return DiffResult {
            from_snapshot_id: from_id.clone(),
            to_snapshot_id: to_id.clone(),
            changes: Vec::new(),
            summary: DiffSummary::default(),
            completeness: DiffCompleteness::Refused { reason },
            total_changes_before_truncation: None,
        };
    }

    let before_by_key = index_targets(from);
    let after_by_key = index_targets(to);
    let source_before = index_segments(from);
    let source_after = index_segments(to);

    let keys: BTreeSet<(&SegmentId, &LanguageCode)> = before_by_key
        .keys()
        .chain(after_by_key.keys())
        .copied()
        .collect();

    let mut changes = Vec::new();
    let mut unchanged = 0_usize;
    for key in keys {
        let (segment_id, target_language) = key;
        let before = before_by_key.get(&key).copied();
        let after = after_by_key.get(&key).copied();
        let source_text = source_after
            .get(segment_id)
            .or_else(|| source_before.get(segment_id))
            .map(|s| (*s).clone())
            .unwrap_or_default();

        match classify(before, after) {
            Classified::Unchanged => unchanged += 1,
            Classified::Changed(change_type) => {
                let (cause, tm_attribution) = attribute_cause(change_type, after);
                changes.push(DiffUnit::Segment(SegmentDiff {
                    segment_id: segment_id.clone(),
                    target_language: target_language.clone(),
                    change_type,
                    cause,
                    before: before.map(TranslationFacet::of),
                    after: after.map(TranslationFacet::of),
                    source_text,
                    tm_attribution,
                }));
            }
        }
    }

    let total = changes.len();
    let (completeness, total_before_truncation) = if total > MAX_CHANGES_RETURNED {
        changes.truncate(MAX_CHANGES_RETURNED);
        debug!(returned = changes.len(), total, "diff truncated");
        (
            DiffCompleteness::Partial {
                truncated_at: changes.len(),
                reason: get_partial_diff_explanation(changes.len(), total),
            },
            Some(total),
        )
    } else {
        (DiffCompleteness::Complete, None)
    };

    let mut summary = DiffSummary {
        unchanged,
        ..DiffSummary::default()
    };
    for unit in &changes {
        match unit.change_type() {
            ChangeType::Created => summary.created += 1,
            ChangeType::Modified => summary.modified += 1,
            ChangeType::Deleted => summary.deleted += 1,
            ChangeType::Unchanged => {}
        }
    }

    DiffResult {
        from_snapshot_id: from_id.clone(),
        to_snapshot_id: to_id.clone(),
        changes,
        summary,
        completeness,
        total_changes_before_truncation: total_before_truncation,
    }
}

/// A short, jargon-free sentence for each cause value.
///
/// The `unknown` sentence names the absence of provenance without alarming
/// words; an unattributed change is a normal condition, not a defect.
#[must_use]
pub fn explain_change_cause(cause: ChangeCause) -> String {
    match cause {
        ChangeCause::TmInsert => {
            "This translation was filled in from translation memory; the attribution \
             names the project and snapshot it came from."
                .to_string()
        }
        ChangeCause::ManualEdit => "Someone edited this translation directly.".to_string(),
        ChangeCause::Unknown => {
            "No provenance was recorded for this change, so the engine cannot say \
             where it came from."
                .to_string()
        }
    }
}

enum Classified {
    Unchanged,
    Changed(ChangeType),
}

fn classify(before: Option<&TargetSegment>, after: Option<&TargetSegment>) -> Classified {
    match (before, after) {
        (None, Some(_)) => Classified::Changed(ChangeType::Created),
        (Some(_), None) => Classified::Changed(ChangeType::Deleted),
        (Some(b), Some(a)) => {
            if TranslationFacet::of(b).semantically_equal(&TranslationFacet::of(a)) {
                Classified::Unchanged
            } else {
                Classified::Changed(ChangeType::Modified)
            }
        }
        // the key came from one of the two states, so both sides can never
        // be absent; treat it as unchanged rather than fabricate a unit
        (None, None) => Classified::Unchanged,
    }
}

fn attribute_cause(
    change_type: ChangeType,
    after: Option<&TargetSegment>,
) -> (ChangeCause, Option<TmAttribution>) {
    if !matches!(change_type, ChangeType::Created | ChangeType::Modified) {
        return (ChangeCause::Unknown, None);
    }
    match after.and_then(|t| t.tm_provenance.as_ref()) {
        Some(provenance) => (
            ChangeCause::TmInsert,
            Some(TmAttribution {
                source_project_id: provenance.source_project_id.clone(),
                source_snapshot_id: provenance.source_snapshot_id.clone(),
            }),
        ),
        None => (ChangeCause::Unknown, None),
    }
}

fn index_targets(
    state: &ProjectState,
) -> BTreeMap<(&SegmentId, &LanguageCode), &TargetSegment> {
    state
        .target_segments
        .iter()
        .map(|t| ((&t.segment_id, &t.target_language), t))
        .collect()
}

fn index_segments(state: &ProjectState) -> BTreeMap<&SegmentId, &String> {
    state
        .segments
        .iter()
        .map(|s| (&s.id, &s.source_text))
        .collect()
}
