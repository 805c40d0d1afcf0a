//! Verification of stored snapshot records against checksums, referential
//! integrity, and domain invariants.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ident::{ProjectId, SnapshotId};
use crate::integrity::checksum::calculate_snapshot_checksum;
use crate::state::ProjectState;
use crate::version::VersionedState;

/// What went wrong with one stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    ChecksumMismatch,
    MissingPayload,
    OrphanedNoProject,
    OrphanedNotInHistory,
    InvalidJson,
    DomainInvariantViolation,
}

impl IssueType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ChecksumMismatch => "checksum_mismatch",
            Self::MissingPayload => "missing_payload",
            Self::OrphanedNoProject => "orphaned_no_project",
            Self::OrphanedNotInHistory => "orphaned_not_in_history",
            Self::InvalidJson => "invalid_json",
            Self::DomainInvariantViolation => "domain_invariant_violation",
        }
    }
}

/// Whether an issue blocks (`Error`) or merely informs (`Warning`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueSeverity {
    Error,
    Warning,
}

/// One finding against one stored record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityIssue {
    pub snapshot_id: SnapshotId,
    pub issue_type: IssueType,
    pub severity: IssueSeverity,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Outcome of verifying all records for one project.
///
/// `is_safe` is true exactly when no issue has `Error` severity; warnings
/// never block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityReport {
    pub project_id: ProjectId,
    pub verified_at_epoch_ms: i64,
    pub total_snapshots: usize,
    pub issues: Vec<IntegrityIssue>,
    pub is_safe: bool,
}

/// The persisted shape of one snapshot, as handed over by the adapter.
///
/// `serialized_state` holds the exact bytes that were written (the canonical
/// encoding from [`crate::encoding`]); `checksum` is whatever digest was
/// stored alongside, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSnapshotRecord {
    pub snapshot_id: SnapshotId,
    pub project_id: ProjectId,
    pub serialized_state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
}

/// Verify every record, accumulating issues into a report.
///
/// Per-record checks run in a fixed order: project attribution, payload
/// presence (stop on failure), checksum comparison (continue on failure),
/// payload parse (stop on failure), domain invariants against the supplied
/// `project_id`, and finally presence in the live history (warning only).
/// Library-level parse failures become issues; nothing escapes as a panic,
/// and no record is repaired.
#[must_use]
pub fn verify_snapshot_integrity(
    records: &[StoredSnapshotRecord],
    project_id: &ProjectId,
    versioned_state: &VersionedState,
    verified_at_epoch_ms: i64,
) -> IntegrityReport {
    let mut issues = Vec::new();
    for record in records {
        verify_record(record, project_id, versioned_state, &mut issues);
    }
    let is_safe = !issues
        .iter()
        .any(|issue| issue.severity == IssueSeverity::Error);
    if !is_safe {
        debug!(
            project = %project_id,
            issues = issues.len(),
            "integrity verification found blocking issues"
        );
    }
    IntegrityReport {
        project_id: project_id.clone(),
        verified_at_epoch_ms,
        total_snapshots: records.len(),
        issues,
        is_safe,
    }
}

fn verify_record(
    record: &StoredSnapshotRecord,
    project_id: &ProjectId,
    versioned_state: &VersionedState,
    issues: &mut Vec<IntegrityIssue>,
) {
    // 1. project attribution
    if record.project_id != *project_id {
        issues.push(IntegrityIssue {
            snapshot_id: record.snapshot_id.clone(),
            issue_type: IssueType::OrphanedNoProject,
            severity: IssueSeverity::Error,
            message: format!(
                "record belongs to project '{}', not the project under verification",
                record.project_id
            ),
            details: None,
        });
    }

    // 2. payload presence; nothing further can be checked without bytes
    if record.serialized_state.trim().is_empty() {
        issues.push(IntegrityIssue {
            snapshot_id: record.snapshot_id.clone(),
            issue_type: IssueType::MissingPayload,
            severity: IssueSeverity::Error,
            message: "stored record has no serialized payload".to_string(),
            details: None,
        });
        return;
    }

    // 3. checksum, when one was stored
    if let Some(stored) = record.checksum.as_deref()
        && !stored.trim().is_empty()
    {
        let actual = calculate_snapshot_checksum(record.serialized_state.as_bytes());
        if !actual.eq_ignore_ascii_case(stored.trim()) {
            issues.push(IntegrityIssue {
                snapshot_id: record.snapshot_id.clone(),
                issue_type: IssueType::ChecksumMismatch,
                severity: IssueSeverity::Error,
                message: "stored checksum does not match the stored payload".to_string(),
                details: Some(format!("expected {}, actual {}", stored.trim(), actual)),
            });
        }
    }

    // 4. parse; a payload that does not decode cannot be invariant-checked
    let state: ProjectState = match serde_json::from_str(&record.serialized_state) {
        Ok(state) => state,
        Err(err) => {
            issues.push(IntegrityIssue {
                snapshot_id: record.snapshot_id.clone(),
                issue_type: IssueType::InvalidJson,
                severity: IssueSeverity::Error,
                message: format!("stored payload does not decode as a project state: {err}"),
                details: None,
            });
            return;
        }
    };

    // 5. domain invariants against the supplied project
    check_domain_invariants(record, &state, project_id, issues);

    // 6. live-history membership
    if !versioned_state.history.contains(&record.snapshot_id) {
        issues.push(IntegrityIssue {
            snapshot_id: record.snapshot_id.clone(),
            issue_type: IssueType::OrphanedNotInHistory,
            severity: IssueSeverity::Warning,
            message: "stored snapshot is not present in the loaded history graph".to_string(),
            details: None,
        });
    }
}

fn check_domain_invariants(
    record: &StoredSnapshotRecord,
    state: &ProjectState,
    project_id: &ProjectId,
    issues: &mut Vec<IntegrityIssue>,
) {
    let mut violation = |message: String| {
        issues.push(IntegrityIssue {
            snapshot_id: record.snapshot_id.clone(),
            issue_type: IssueType::DomainInvariantViolation,
            severity: IssueSeverity::Error,
            message,
            details: None,
        });
    };

    if state.project.id != *project_id {
        violation(format!(
            "payload project id '{}' does not match '{}'",
            state.project.id, project_id
        ));
    }
    for segment in &state.segments {
        if segment.project_id != *project_id {
            violation(format!(
                "segment '{}' carries project id '{}'",
                segment.id, segment.project_id
            ));
        }
    }
    for target in &state.target_segments {
        if target.project_id != *project_id {
            violation(format!(
                "target segment '{}' carries project id '{}'",
                target.id, target.project_id
            ));
        }
        if !state.project.is_target_language(&target.target_language) {
            violation(format!(
                "target segment '{}' uses undeclared language '{}'",
                target.id, target.target_language
            ));
        }
        if target.target_language == state.project.source_language {
            violation(format!(
                "target segment '{}' targets the source language '{}'",
                target.id, target.target_language
            ));
        }
    }
}
