//! Immutable project state model and its pure transitions.

pub mod model;
pub mod transition;

pub use model::{
    Project, ProjectState, ProjectStatus, Segment, TargetSegment, TmProvenance,
    TranslationChange, TranslationStatus,
};
pub use transition::apply_translation_change;
