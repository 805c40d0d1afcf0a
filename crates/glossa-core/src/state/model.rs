//! Value types for one translation project's working state.
//!
//! A [`ProjectState`] is the triple (project header, source segments, target
//! segments). States are plain owned values: cloning one is a deep copy, and
//! nothing in this crate hands out mutable references into a stored state.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ident::{ClientId, LanguageCode, ProjectId, SegmentId, SnapshotId, TargetSegmentId};

/// Lifecycle status of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Draft,
    InProgress,
    Completed,
    Archived,
}

impl ProjectStatus {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Workflow status of a single target-language rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslationStatus {
    Draft,
    Translated,
    Approved,
}

impl TranslationStatus {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Translated => "translated",
            Self::Approved => "approved",
        }
    }
}

impl fmt::Display for TranslationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Project header.
///
/// `target_languages` is a non-empty list of distinct codes, none equal to
/// `source_language`. The caller constructs projects; the core only reads
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub client_id: ClientId,
    pub name: String,
    pub source_language: LanguageCode,
    pub target_languages: Vec<LanguageCode>,
    pub status: ProjectStatus,
}

impl Project {
    /// Set-membership check over the declared target languages.
    #[must_use]
    pub fn is_target_language(&self, language: &LanguageCode) -> bool {
        self.target_languages.contains(language)
    }
}

/// One source segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub id: SegmentId,
    pub project_id: ProjectId,
    /// Position in source order; unique per project, monotone.
    pub index_within_project: u32,
    pub source_text: String,
    pub source_language: LanguageCode,
    pub is_locked: bool,
}

/// Records that a translation was filled in from translation memory, and
/// from where. Presence of this value is the *only* signal the diff engine
/// uses to attribute a change to TM; nothing is ever inferred from content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TmProvenance {
    pub source_project_id: ProjectId,
    pub source_snapshot_id: SnapshotId,
}

/// One target-language rendering of a source segment.
///
/// At most one entry exists per `(segment_id, target_language)` pair within
/// a state. `translated_text` may be empty (an untranslated placeholder).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSegment {
    pub id: TargetSegmentId,
    pub project_id: ProjectId,
    pub segment_id: SegmentId,
    pub target_language: LanguageCode,
    pub translated_text: String,
    pub status: TranslationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tm_provenance: Option<TmProvenance>,
}

/// Complete working state for one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectState {
    pub project: Project,
    pub segments: Vec<Segment>,
    pub target_segments: Vec<TargetSegment>,
}

impl ProjectState {
    #[must_use]
    pub fn find_segment(&self, segment_id: &SegmentId) -> Option<&Segment> {
        self.segments.iter().find(|s| &s.id == segment_id)
    }

    #[must_use]
    pub fn find_target_segment(
        &self,
        segment_id: &SegmentId,
        target_language: &LanguageCode,
    ) -> Option<&TargetSegment> {
        self.target_segments
            .iter()
            .find(|t| &t.segment_id == segment_id && &t.target_language == target_language)
    }
}

/// Input to [`apply_translation_change`](crate::state::apply_translation_change).
///
/// `target_segment_id` is consumed only when the change creates a new target
/// segment; updates keep the existing entry's ID. `tm_provenance` must be
/// supplied when the new text came from translation memory; an absent value
/// clears any provenance previously recorded on the entry, since the stored
/// text no longer is the TM text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationChange {
    pub project_id: ProjectId,
    pub segment_id: SegmentId,
    pub target_language: LanguageCode,
    pub new_text: String,
    pub new_status: TranslationStatus,
    pub target_segment_id: TargetSegmentId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tm_provenance: Option<TmProvenance>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_project() -> Project {
        Project {
            id: ProjectId::new("prj-1"),
            client_id: ClientId::new("client-acme"),
            name: "Device manual".to_string(),
            source_language: LanguageCode::new("en"),
            target_languages: vec![LanguageCode::new("fr"), LanguageCode::new("de")],
            status: ProjectStatus::InProgress,
        }
    }

    #[test]
    fn status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&ProjectStatus::InProgress).unwrap(),
            r#""in_progress""#
        );
        assert_eq!(
            serde_json::to_string(&TranslationStatus::Approved).unwrap(),
            r#""approved""#
        );
    }

    #[test]
    fn target_language_membership() {
        let project = sample_project();
        assert!(project.is_target_language(&LanguageCode::new("fr")));
        assert!(!project.is_target_language(&LanguageCode::new("es")));
        assert!(!project.is_target_language(&LanguageCode::new("en")));
    }

    #[test]
    fn find_target_segment_matches_pair() {
        let project = sample_project();
        let state = ProjectState {
            project: project.clone(),
            segments: vec![Segment {
                id: SegmentId::new("seg-1"),
                project_id: project.id.clone(),
                index_within_project: 0,
                source_text: "Hello".to_string(),
                source_language: LanguageCode::new("en"),
                is_locked: false,
            }],
            target_segments: vec![TargetSegment {
                id: TargetSegmentId::new("tgt-1"),
                project_id: project.id.clone(),
                segment_id: SegmentId::new("seg-1"),
                target_language: LanguageCode::new("fr"),
                translated_text: "Bonjour".to_string(),
                status: TranslationStatus::Translated,
                tm_provenance: None,
            }],
        };

        assert!(
            state
                .find_target_segment(&SegmentId::new("seg-1"), &LanguageCode::new("fr"))
                .is_some()
        );
        assert!(
            state
                .find_target_segment(&SegmentId::new("seg-1"), &LanguageCode::new("de"))
                .is_none()
        );
    }

    #[test]
    fn provenance_is_omitted_from_json_when_absent() {
        let target = TargetSegment {
            id: TargetSegmentId::new("tgt-1"),
            project_id: ProjectId::new("prj-1"),
            segment_id: SegmentId::new("seg-1"),
            target_language: LanguageCode::new("fr"),
            translated_text: String::new(),
            status: TranslationStatus::Draft,
            tm_provenance: None,
        };
        let json = serde_json::to_string(&target).unwrap();
        assert!(!json.contains("tm_provenance"));
    }
}
