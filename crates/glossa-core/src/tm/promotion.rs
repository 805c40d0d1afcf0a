//! The promotion guard: whether a translated segment may enter a client's
//! translation memory.
//!
//! The guard is pure and queries nothing. Everything it needs — the owning
//! project, the source segment, the commit provenance, and (optionally) the
//! set of source texts already in the client's TM — is supplied by the
//! caller. Silent failure at the persistence layer (a unique-constraint
//! violation, a row written into the wrong client's memory) is exactly what
//! this kernel exists to make impossible: every denial is an explainable
//! value.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ident::{ClientScope, SnapshotId, TargetSegmentId};
use crate::state::{Project, ProjectStatus, Segment, TargetSegment};

/// Everything the guard evaluates against, borrowed from the caller.
#[derive(Debug, Clone)]
pub struct PromotionContext<'a> {
    /// The project the promotion is being performed for.
    pub project: &'a Project,
    /// Source segment whose translation is being promoted.
    pub source_segment: &'a Segment,
    /// Snapshot the translation was committed in. Mandatory provenance.
    pub snapshot_id: &'a SnapshotId,
    /// Rush/one-off project flag; ad-hoc segments are quarantined from TM.
    pub is_ad_hoc: bool,
    /// When present, the client scope the entry would be written into.
    pub target_scope: Option<&'a ClientScope>,
    /// When present, source texts already in the client's TM.
    pub existing_source_texts: Option<&'a BTreeSet<String>>,
}

/// Why a promotion was denied. Ordered by evaluation priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromotionDenial {
    ProvenanceRequired,
    ProjectArchived,
    EmptyTranslation,
    ProjectMismatch,
    CrossClient,
    DuplicateEntry,
    AdHocQuarantine,
}

impl PromotionDenial {
    /// Stable machine-readable code for logs and telemetry.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::ProvenanceRequired => "TM_PROMOTION_PROVENANCE_REQUIRED",
            Self::ProjectArchived => "TM_PROMOTION_PROJECT_ARCHIVED",
            Self::EmptyTranslation => "TM_PROMOTION_EMPTY_TRANSLATION",
            Self::ProjectMismatch => "TM_PROMOTION_PROJECT_MISMATCH",
            Self::CrossClient => "TM_PROMOTION_CROSS_CLIENT",
            Self::DuplicateEntry => "TM_PROMOTION_DUPLICATE_ENTRY",
            Self::AdHocQuarantine => "TM_PROMOTION_ADHOC_QUARANTINE",
        }
    }

    /// Human-readable reason shown to the translator.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::ProvenanceRequired => {
                "provenance required: promotion must name the snapshot the translation was committed in"
            }
            Self::ProjectArchived => "archived projects are read-only; nothing can be promoted",
            Self::EmptyTranslation => "empty translation: there is nothing to store",
            Self::ProjectMismatch => {
                "segment/project mismatch: the target segment does not belong to this project"
            }
            Self::CrossClient => {
                "cross-client IP protection: this translation belongs to a different client's work"
            }
            Self::DuplicateEntry => {
                "duplicate entry: this source text already exists in the client's translation memory"
            }
            Self::AdHocQuarantine => {
                "ad-hoc quarantine: segments from ad-hoc projects need an explicit override"
            }
        }
    }

    /// Whether an explicit caller override can lift the denial.
    #[must_use]
    pub fn overridable(&self) -> bool {
        matches!(self, Self::DuplicateEntry | Self::AdHocQuarantine)
    }
}

/// Outcome of the guard. `reason` is always non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromotionDecision {
    pub allowed: bool,
    pub reason: String,
    pub requires_explicit_override: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub denial: Option<PromotionDenial>,
}

impl PromotionDecision {
    fn allow() -> Self {
        Self {
            allowed: true,
            reason: "all promotion rules passed".to_string(),
            requires_explicit_override: false,
            denial: None,
        }
    }

    fn deny(denial: PromotionDenial) -> Self {
        Self {
            allowed: false,
            reason: denial.message().to_string(),
            requires_explicit_override: denial.overridable(),
            denial: Some(denial),
        }
    }
}

/// Evaluate the promotion rules for one target segment, first failure wins.
///
/// Rule order, and whether an explicit override can lift a failure:
///
/// 1. the context names a snapshot (no — provenance is mandatory),
/// 2. the project is not archived (no),
/// 3. the translation is non-empty after trim (no),
/// 4. the segment belongs to the context's project (no),
/// 5. a supplied target scope matches the project's client (no — this is
///    the cross-client isolation line),
/// 6. the source text is not already in the client's TM (yes),
/// 7. the project is not ad-hoc (yes).
#[must_use]
pub fn can_promote_segment(
    target: &TargetSegment,
    ctx: &PromotionContext<'_>,
) -> PromotionDecision {
    let denial = first_failed_rule(target, ctx);
    match denial {
        None => PromotionDecision::allow(),
        Some(denial) => {
            debug!(
                code = denial.code(),
                target_segment = %target.id,
                "promotion denied"
            );
            PromotionDecision::deny(denial)
        }
    }
}

fn first_failed_rule(
    target: &TargetSegment,
    ctx: &PromotionContext<'_>,
) -> Option<PromotionDenial> {
    if ctx.snapshot_id.is_blank() {
        return Some(PromotionDenial::ProvenanceRequired);
    }
    if ctx.project.status == ProjectStatus::Archived {
        return Some(PromotionDenial::ProjectArchived);
    }
    if target.translated_text.trim().is_empty() {
        return Some(PromotionDenial::EmptyTranslation);
    }
    if target.project_id != ctx.project.id {
        return Some(PromotionDenial::ProjectMismatch);
    }
    if let Some(scope) = ctx.target_scope
        && scope.client_id() != &ctx.project.client_id
    {
        return Some(PromotionDenial::CrossClient);
    }
    if let Some(existing) = ctx.existing_source_texts
        && existing.contains(&ctx.source_segment.source_text)
    {
        return Some(PromotionDenial::DuplicateEntry);
    }
    if ctx.is_ad_hoc {
        return Some(PromotionDenial::AdHocQuarantine);
    }
    None
}

/// One target segment's decision within a bulk plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkPromotionItem {
    pub target_segment_id: TargetSegmentId,
    pub decision: PromotionDecision,
}

/// Tally over a bulk plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkPromotionSummary {
    pub promotable: usize,
    pub needs_override: usize,
    pub blocked: usize,
}

/// Per-segment decisions for a batch, plus the tally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkPromotionPlan {
    pub items: Vec<BulkPromotionItem>,
    pub summary: BulkPromotionSummary,
}

/// Evaluate a whole batch against one shared context.
///
/// Each segment gets an independent decision; nothing about one segment
/// influences another. The adapter drives the inserts and reports back a
/// [`BatchPromotionOutcome`].
#[must_use]
pub fn plan_bulk_promotion(
    targets: &[TargetSegment],
    ctx: &PromotionContext<'_>,
) -> BulkPromotionPlan {
    let mut summary = BulkPromotionSummary::default();
    let items = targets
        .iter()
        .map(|target| {
            let decision = can_promote_segment(target, ctx);
            if decision.allowed {
                summary.promotable += 1;
            } else if decision.requires_explicit_override {
                summary.needs_override += 1;
            } else {
                summary.blocked += 1;
            }
            BulkPromotionItem {
                target_segment_id: target.id.clone(),
                decision,
            }
        })
        .collect();
    BulkPromotionPlan { items, summary }
}

/// What an adapter reports after executing a bulk promotion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchPromotionOutcome {
    pub inserted: usize,
    pub skipped: usize,
    pub failed: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ident::{ClientId, LanguageCode, ProjectId, SegmentId};
    use crate::state::TranslationStatus;

    fn project() -> Project {
        Project {
            id: ProjectId::new("prj-1"),
            client_id: ClientId::new("client-acme"),
            name: "Manual".to_string(),
            source_language: LanguageCode::new("en"),
            target_languages: vec![LanguageCode::new("fr")],
            status: ProjectStatus::InProgress,
        }
    }

    fn segment() -> Segment {
        Segment {
            id: SegmentId::new("seg-1"),
            project_id: ProjectId::new("prj-1"),
            index_within_project: 0,
            source_text: "Hello".to_string(),
            source_language: LanguageCode::new("en"),
            is_locked: false,
        }
    }

    fn target(text: &str) -> TargetSegment {
        TargetSegment {
            id: TargetSegmentId::new("tgt-1"),
            project_id: ProjectId::new("prj-1"),
            segment_id: SegmentId::new("seg-1"),
            target_language: LanguageCode::new("fr"),
            translated_text: text.to_string(),
            status: TranslationStatus::Approved,
            tm_provenance: None,
        }
    }

    #[test]
    fn clean_promotion_is_allowed() {
        let project = project();
        let segment = segment();
        let snapshot = SnapshotId::new("snap-1");
        let ctx = PromotionContext {
            project: &project,
            source_segment: &segment,
            snapshot_id: &snapshot,
            is_ad_hoc: false,
            target_scope: None,
            existing_source_texts: None,
        };
        let decision = can_promote_segment(&target("Bonjour"), &ctx);
        assert!(decision.allowed);
        assert!(!decision.requires_explicit_override);
        assert!(!decision.reason.is_empty());
    }

    #[test]
    fn blank_snapshot_id_denies_without_override() {
        let project = project();
        let segment = segment();
        let snapshot = SnapshotId::new("   ");
        let ctx = PromotionContext {
            project: &project,
            source_segment: &segment,
            snapshot_id: &snapshot,
            is_ad_hoc: false,
            target_scope: None,
            existing_source_texts: None,
        };
        let decision = can_promote_segment(&target("Bonjour"), &ctx);
        assert!(!decision.allowed);
        assert!(!decision.requires_explicit_override);
        assert_eq!(decision.denial, Some(PromotionDenial::ProvenanceRequired));
        assert!(decision.reason.contains("provenance"));
    }

    #[test]
    fn cross_client_scope_is_never_overridable() {
        let project = project();
        let segment = segment();
        let snapshot = SnapshotId::new("snap-1");
        let scope = ClientScope::new(ClientId::new("client-globex"));
        let ctx = PromotionContext {
            project: &project,
            source_segment: &segment,
            snapshot_id: &snapshot,
            is_ad_hoc: false,
            target_scope: Some(&scope),
            existing_source_texts: None,
        };
        let decision = can_promote_segment(&target("Bonjour"), &ctx);
        assert!(!decision.allowed);
        assert!(!decision.requires_explicit_override);
        assert!(decision.reason.contains("cross-client"));
    }

    #[test]
    fn matching_scope_passes_the_isolation_rule() {
        let project = project();
        let segment = segment();
        let snapshot = SnapshotId::new("snap-1");
        let scope = ClientScope::new(ClientId::new("client-acme"));
        let ctx = PromotionContext {
            project: &project,
            source_segment: &segment,
            snapshot_id: &snapshot,
            is_ad_hoc: false,
            target_scope: Some(&scope),
            existing_source_texts: None,
        };
        assert!(can_promote_segment(&target("Bonjour"), &ctx).allowed);
    }

    #[test]
    fn duplicate_source_text_is_overridable() {
        let project = project();
        let segment = segment();
        let snapshot = SnapshotId::new("snap-1");
        let existing: BTreeSet<String> = ["Hello".to_string()].into();
        let ctx = PromotionContext {
            project: &project,
            source_segment: &segment,
            snapshot_id: &snapshot,
            is_ad_hoc: false,
            target_scope: None,
            existing_source_texts: Some(&existing),
        };
        let decision = can_promote_segment(&target("Bonjour"), &ctx);
        assert!(!decision.allowed);
        assert!(decision.requires_explicit_override);
        assert_eq!(decision.denial, Some(PromotionDenial::DuplicateEntry));
    }

    #[test]
    fn ad_hoc_projects_are_quarantined_with_override() {
        let project = project();
        let segment = segment();
        let snapshot = SnapshotId::new("snap-1");
        let ctx = PromotionContext {
            project: &project,
            source_segment: &segment,
            snapshot_id: &snapshot,
            is_ad_hoc: true,
            target_scope: None,
            existing_source_texts: None,
        };
        let decision = can_promote_segment(&target("Bonjour"), &ctx);
        assert!(!decision.allowed);
        assert!(decision.requires_explicit_override);
        assert_eq!(decision.denial, Some(PromotionDenial::AdHocQuarantine));
    }

    #[test]
    fn rule_order_puts_provenance_before_everything() {
        // blank snapshot AND archived project AND empty translation: the
        // first rule in the priority list must win
        let mut project = project();
        project.status = ProjectStatus::Archived;
        let segment = segment();
        let snapshot = SnapshotId::new("");
        let ctx = PromotionContext {
            project: &project,
            source_segment: &segment,
            snapshot_id: &snapshot,
            is_ad_hoc: true,
            target_scope: None,
            existing_source_texts: None,
        };
        let decision = can_promote_segment(&target("  "), &ctx);
        assert_eq!(decision.denial, Some(PromotionDenial::ProvenanceRequired));
    }

    #[test]
    fn archived_beats_empty_translation() {
        let mut project = project();
        project.status = ProjectStatus::Archived;
        let segment = segment();
        let snapshot = SnapshotId::new("snap-1");
        let ctx = PromotionContext {
            project: &project,
            source_segment: &segment,
            snapshot_id: &snapshot,
            is_ad_hoc: false,
            target_scope: None,
            existing_source_texts: None,
        };
        let decision = can_promote_segment(&target(""), &ctx);
        assert_eq!(decision.denial, Some(PromotionDenial::ProjectArchived));
    }

    #[test]
    fn mismatched_segment_project_is_denied() {
        let project = project();
        let segment = segment();
        let snapshot = SnapshotId::new("snap-1");
        let ctx = PromotionContext {
            project: &project,
            source_segment: &segment,
            snapshot_id: &snapshot,
            is_ad_hoc: false,
            target_scope: None,
            existing_source_texts: None,
        };
        let mut stray = target("Bonjour");
        stray.project_id = ProjectId::new("prj-other");
        let decision = can_promote_segment(&stray, &ctx);
        assert_eq!(decision.denial, Some(PromotionDenial::ProjectMismatch));
        assert!(!decision.requires_explicit_override);
    }

    #[test]
    fn bulk_plan_tallies_by_override_class() {
        let project = project();
        let segment = segment();
        let snapshot = SnapshotId::new("snap-1");
        let existing: BTreeSet<String> = ["Hello".to_string()].into();
        let ctx = PromotionContext {
            project: &project,
            source_segment: &segment,
            snapshot_id: &snapshot,
            is_ad_hoc: false,
            target_scope: None,
            existing_source_texts: Some(&existing),
        };

        // all three hit the duplicate rule; one has an empty translation
        // which is blocked outright
        let targets = vec![target("Bonjour"), target("Salut"), target("  ")];
        let plan = plan_bulk_promotion(&targets, &ctx);

        assert_eq!(plan.items.len(), 3);
        assert_eq!(plan.summary.promotable, 0);
        assert_eq!(plan.summary.needs_override, 2);
        assert_eq!(plan.summary.blocked, 1);
    }
}
