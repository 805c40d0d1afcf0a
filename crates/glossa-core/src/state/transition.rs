//! The single pure transition over a [`ProjectState`].

use crate::state::model::{ProjectState, ProjectStatus, TargetSegment, TranslationChange};

/// Apply one translation change, producing the next state.
///
/// Rejection is signalled by identity: an invalid change returns a value
/// equal to `previous` and nothing else happens. A change is rejected when
/// any of these hold:
///
/// - it addresses a different project than `previous`,
/// - the project is archived,
/// - the target language is not one of the project's target languages, or
///   equals the source language,
/// - the referenced source segment does not exist.
///
/// An accepted change either rewrites the one target segment matching
/// `(segment_id, target_language)` or, when none exists, appends a new entry
/// carrying `change.target_segment_id`. The input is never mutated.
#[must_use]
pub fn apply_translation_change(
    previous: &ProjectState,
    change: &TranslationChange,
) -> ProjectState {
    if change.project_id != previous.project.id {
        return previous.clone();
    }
    if previous.project.status == ProjectStatus::Archived {
        return previous.clone();
    }
    if change.target_language == previous.project.source_language {
        return previous.clone();
    }
    if !previous.project.is_target_language(&change.target_language) {
        return previous.clone();
    }
    if previous.find_segment(&change.segment_id).is_none() {
        return previous.clone();
    }

    let mut target_segments = previous.target_segments.clone();
    let existing = target_segments
        .iter_mut()
        .find(|t| t.segment_id == change.segment_id && t.target_language == change.target_language);

    match existing {
        Some(entry) => {
            entry.translated_text = change.new_text.clone();
            entry.status = change.new_status;
            entry.tm_provenance = change.tm_provenance.clone();
        }
        None => target_segments.push(TargetSegment {
            id: change.target_segment_id.clone(),
            project_id: previous.project.id.clone(),
            segment_id: change.segment_id.clone(),
            target_language: change.target_language.clone(),
            translated_text: change.new_text.clone(),
            status: change.new_status,
            tm_provenance: change.tm_provenance.clone(),
        }),
    }

    ProjectState {
        project: previous.project.clone(),
        segments: previous.segments.clone(),
        target_segments,
    }
}
