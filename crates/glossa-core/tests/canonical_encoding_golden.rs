//! Golden-byte conformance for the canonical snapshot encoding.
//!
//! The bytes pinned here are load-bearing: adapters persist them verbatim
//! and the integrity kernel recomputes digests over them. If this file ever
//! needs updating, every stored checksum in the wild breaks with it.

use glossa_core::encoding::encode_project_state;
use glossa_core::ident::{ClientId, LanguageCode, ProjectId, SegmentId, TargetSegmentId};
use glossa_core::integrity::{calculate_snapshot_checksum, verify_checksum};
use glossa_core::state::{
    Project, ProjectState, ProjectStatus, Segment, TargetSegment, TranslationStatus,
};

const GOLDEN_CANONICAL_JSON: &str = "{\"project\":{\"client_id\":\"client-1\",\"id\":\"prj-1\",\"name\":\"Pilot\",\"source_language\":\"en\",\"status\":\"draft\",\"target_languages\":[\"fr\"]},\"segments\":[{\"id\":\"seg-1\",\"index_within_project\":0,\"is_locked\":false,\"project_id\":\"prj-1\",\"source_language\":\"en\",\"source_text\":\"Hello world\"}],\"target_segments\":[{\"id\":\"tgt-1\",\"project_id\":\"prj-1\",\"segment_id\":\"seg-1\",\"status\":\"translated\",\"target_language\":\"fr\",\"translated_text\":\"Bonjour le monde\"}]}";

const GOLDEN_SHA256: &str = "0df141daa6e5f2fd3c427a2a27c2ca75912de352aeae78986796dc96ad605910";

fn golden_state() -> ProjectState {
    let project_id = ProjectId::new("prj-1");
    ProjectState {
        project: Project {
            id: project_id.clone(),
            client_id: ClientId::new("client-1"),
            name: "Pilot".to_string(),
            source_language: LanguageCode::new("en"),
            target_languages: vec![LanguageCode::new("fr")],
            status: ProjectStatus::Draft,
        },
        segments: vec![Segment {
            id: SegmentId::new("seg-1"),
            project_id: project_id.clone(),
            index_within_project: 0,
            source_text: "Hello world".to_string(),
            source_language: LanguageCode::new("en"),
            is_locked: false,
        }],
        target_segments: vec![TargetSegment {
            id: TargetSegmentId::new("tgt-1"),
            project_id,
            segment_id: SegmentId::new("seg-1"),
            target_language: LanguageCode::new("fr"),
            translated_text: "Bonjour le monde".to_string(),
            status: TranslationStatus::Translated,
            tm_provenance: None,
        }],
    }
}

#[test]
fn golden_state_encodes_to_pinned_bytes() {
    let bytes = encode_project_state(&golden_state()).expect("encode");
    assert_eq!(
        std::str::from_utf8(&bytes).expect("utf-8"),
        GOLDEN_CANONICAL_JSON
    );
}

#[test]
fn golden_bytes_hash_to_pinned_digest() {
    assert_eq!(
        calculate_snapshot_checksum(GOLDEN_CANONICAL_JSON.as_bytes()),
        GOLDEN_SHA256
    );
}

#[test]
fn encode_then_checksum_matches_the_pin_end_to_end() {
    let bytes = encode_project_state(&golden_state()).expect("encode");
    assert_eq!(calculate_snapshot_checksum(&bytes), GOLDEN_SHA256);
    assert!(verify_checksum(&bytes, GOLDEN_SHA256));
}

#[test]
fn every_single_byte_mutation_is_rejected() {
    let bytes = GOLDEN_CANONICAL_JSON.as_bytes().to_vec();
    for position in 0..bytes.len() {
        let mut tampered = bytes.clone();
        tampered[position] ^= 0x01;
        assert!(
            !verify_checksum(&tampered, GOLDEN_SHA256),
            "bit flip at byte {position} went undetected"
        );
    }
}

#[test]
fn encoding_round_trips_through_the_state_type() {
    let bytes = encode_project_state(&golden_state()).expect("encode");
    let decoded: ProjectState =
        serde_json::from_slice(&bytes).expect("canonical bytes decode");
    assert_eq!(decoded, golden_state());
}

#[test]
fn re_encoding_a_decoded_state_is_stable() {
    let first = encode_project_state(&golden_state()).expect("encode");
    let decoded: ProjectState = serde_json::from_slice(&first).expect("decode");
    let second = encode_project_state(&decoded).expect("re-encode");
    assert_eq!(first, second);
}
