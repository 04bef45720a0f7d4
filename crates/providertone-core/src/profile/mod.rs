//! Answer schema for both tracks.
//!
//! Each track's profile is a fixed set of named sections. Sections are
//! addressed through [`SectionUpdate`], so an unknown section name is not
//! representable.

pub mod common;
pub mod documentation;
pub mod messaging;
pub mod patch;

pub use common::{
    EditCapture, EditScenarioId, EditSlot, NegativeConstraints, PairChoice, PairSelection,
    ScoredTrait,
};
pub use documentation::*;
pub use messaging::*;
pub use patch::SectionPatch;

use serde::Serialize;

use crate::error::{Result, ToneError};
use crate::track::Track;

/// A shallow merge into one section of one track.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionUpdate {
    MessagingColdResponses(MessagingColdResponsesPatch),
    MessagingPairSelections(MessagingPairSelectionsPatch),
    MessagingAntiExamples(MessagingAntiExamplesPatch),
    MessagingEditCapture(MessagingEditCapturePatch),
    MessagingValues(MessagingValuesPatch),
    DocumentationStructure(DocumentationStructurePatch),
    DocumentationColdResponses(DocumentationColdResponsesPatch),
    DocumentationPairSelections(DocumentationPairSelectionsPatch),
    DocumentationAntiExamples(DocumentationAntiExamplesPatch),
    DocumentationEditCapture(DocumentationEditCapturePatch),
    DocumentationValues(DocumentationValuesPatch),
    DocumentationSpecialty(DocumentationSpecialtyPatch),
}

impl SectionUpdate {
    pub fn track(&self) -> Track {
        match self {
            SectionUpdate::MessagingColdResponses(_)
            | SectionUpdate::MessagingPairSelections(_)
            | SectionUpdate::MessagingAntiExamples(_)
            | SectionUpdate::MessagingEditCapture(_)
            | SectionUpdate::MessagingValues(_) => Track::Messaging,
            _ => Track::Documentation,
        }
    }

    /// Wire name of the addressed section, e.g. `coldResponses`.
    pub fn section_name(&self) -> &'static str {
        match self {
            SectionUpdate::MessagingColdResponses(_)
            | SectionUpdate::DocumentationColdResponses(_) => "coldResponses",
            SectionUpdate::MessagingPairSelections(_)
            | SectionUpdate::DocumentationPairSelections(_) => "pairSelections",
            SectionUpdate::MessagingAntiExamples(_)
            | SectionUpdate::DocumentationAntiExamples(_) => "antiExamples",
            SectionUpdate::MessagingEditCapture(_)
            | SectionUpdate::DocumentationEditCapture(_) => "editCapture",
            SectionUpdate::MessagingValues(_) | SectionUpdate::DocumentationValues(_) => "values",
            SectionUpdate::DocumentationStructure(_) => "structure",
            SectionUpdate::DocumentationSpecialty(_) => "specialty",
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            SectionUpdate::MessagingColdResponses(p) => p.is_empty(),
            SectionUpdate::MessagingPairSelections(p) => p.is_empty(),
            SectionUpdate::MessagingAntiExamples(p) => p.is_empty(),
            SectionUpdate::MessagingEditCapture(p) => p.is_empty(),
            SectionUpdate::MessagingValues(p) => p.is_empty(),
            SectionUpdate::DocumentationStructure(p) => p.is_empty(),
            SectionUpdate::DocumentationColdResponses(p) => p.is_empty(),
            SectionUpdate::DocumentationPairSelections(p) => p.is_empty(),
            SectionUpdate::DocumentationAntiExamples(p) => p.is_empty(),
            SectionUpdate::DocumentationEditCapture(p) => p.is_empty(),
            SectionUpdate::DocumentationValues(p) => p.is_empty(),
            SectionUpdate::DocumentationSpecialty(p) => p.is_empty(),
        }
    }

    /// Update that stores `capture` in the given edit scenario.
    pub fn edit_capture(id: EditScenarioId, capture: EditCapture) -> Self {
        match id.track {
            Track::Messaging => SectionUpdate::MessagingEditCapture(
                MessagingEditCapturePatch::for_slot(id.slot, capture),
            ),
            Track::Documentation => SectionUpdate::DocumentationEditCapture(
                DocumentationEditCapturePatch::for_slot(id.slot, capture),
            ),
        }
    }

    /// Builds an update from a section's wire name and a partial JSON object.
    ///
    /// Keys use the stored camelCase names. Unknown keys and values of the
    /// wrong type are rejected; absent keys leave the stored field untouched.
    pub fn from_json(track: Track, section: &str, patch: serde_json::Value) -> Result<Self> {
        let update = match (track, section) {
            (Track::Messaging, "coldResponses") => {
                SectionUpdate::MessagingColdResponses(serde_json::from_value(patch)?)
            }
            (Track::Messaging, "pairSelections") => {
                SectionUpdate::MessagingPairSelections(serde_json::from_value(patch)?)
            }
            (Track::Messaging, "antiExamples") => {
                SectionUpdate::MessagingAntiExamples(serde_json::from_value(patch)?)
            }
            (Track::Messaging, "editCapture") => {
                SectionUpdate::MessagingEditCapture(serde_json::from_value(patch)?)
            }
            (Track::Messaging, "values") => {
                SectionUpdate::MessagingValues(serde_json::from_value(patch)?)
            }
            (Track::Documentation, "structure") => {
                SectionUpdate::DocumentationStructure(serde_json::from_value(patch)?)
            }
            (Track::Documentation, "coldResponses") => {
                SectionUpdate::DocumentationColdResponses(serde_json::from_value(patch)?)
            }
            (Track::Documentation, "pairSelections") => {
                SectionUpdate::DocumentationPairSelections(serde_json::from_value(patch)?)
            }
            (Track::Documentation, "antiExamples") => {
                SectionUpdate::DocumentationAntiExamples(serde_json::from_value(patch)?)
            }
            (Track::Documentation, "editCapture") => {
                SectionUpdate::DocumentationEditCapture(serde_json::from_value(patch)?)
            }
            (Track::Documentation, "values") => {
                SectionUpdate::DocumentationValues(serde_json::from_value(patch)?)
            }
            (Track::Documentation, "specialty") => {
                SectionUpdate::DocumentationSpecialty(serde_json::from_value(patch)?)
            }
            (track, section) => return Err(ToneError::unknown_section(track.to_string(), section)),
        };
        Ok(update)
    }

    pub(crate) fn apply(self, messaging: &mut MessagingProfile, documentation: &mut DocumentationProfile) {
        match self {
            SectionUpdate::MessagingColdResponses(p) => p.apply_to(&mut messaging.cold_responses),
            SectionUpdate::MessagingPairSelections(p) => p.apply_to(&mut messaging.pair_selections),
            SectionUpdate::MessagingAntiExamples(p) => p.apply_to(&mut messaging.anti_examples),
            SectionUpdate::MessagingEditCapture(p) => p.apply_to(&mut messaging.edit_capture),
            SectionUpdate::MessagingValues(p) => p.apply_to(&mut messaging.values),
            SectionUpdate::DocumentationStructure(p) => p.apply_to(&mut documentation.structure),
            SectionUpdate::DocumentationColdResponses(p) => {
                p.apply_to(&mut documentation.cold_responses)
            }
            SectionUpdate::DocumentationPairSelections(p) => {
                p.apply_to(&mut documentation.pair_selections)
            }
            SectionUpdate::DocumentationAntiExamples(p) => {
                p.apply_to(&mut documentation.anti_examples)
            }
            SectionUpdate::DocumentationEditCapture(p) => {
                p.apply_to(&mut documentation.edit_capture)
            }
            SectionUpdate::DocumentationValues(p) => p.apply_to(&mut documentation.values),
            SectionUpdate::DocumentationSpecialty(p) => p.apply_to(&mut documentation.specialty),
        }
    }
}

macro_rules! impl_from_patch {
    ($($patch:ident => $variant:ident),+ $(,)?) => {
        $(
            impl From<$patch> for SectionUpdate {
                fn from(patch: $patch) -> Self {
                    SectionUpdate::$variant(patch)
                }
            }
        )+
    };
}

impl_from_patch! {
    MessagingColdResponsesPatch => MessagingColdResponses,
    MessagingPairSelectionsPatch => MessagingPairSelections,
    MessagingAntiExamplesPatch => MessagingAntiExamples,
    MessagingEditCapturePatch => MessagingEditCapture,
    MessagingValuesPatch => MessagingValues,
    DocumentationStructurePatch => DocumentationStructure,
    DocumentationColdResponsesPatch => DocumentationColdResponses,
    DocumentationPairSelectionsPatch => DocumentationPairSelections,
    DocumentationAntiExamplesPatch => DocumentationAntiExamples,
    DocumentationEditCapturePatch => DocumentationEditCapture,
    DocumentationValuesPatch => DocumentationValues,
    DocumentationSpecialtyPatch => DocumentationSpecialty,
}

/// A synthesized style profile for either track.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GeneratedProfile {
    Messaging(MessagingStyleProfile),
    Documentation(DocumentationStyleProfile),
}

impl GeneratedProfile {
    pub fn track(&self) -> Track {
        match self {
            GeneratedProfile::Messaging(_) => Track::Messaging,
            GeneratedProfile::Documentation(_) => Track::Documentation,
        }
    }

    pub fn voice_summary(&self) -> &str {
        match self {
            GeneratedProfile::Messaging(p) => &p.voice_summary,
            GeneratedProfile::Documentation(p) => &p.voice_summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_routing() {
        let update: SectionUpdate = DocumentationSpecialtyPatch::default()
            .practice_type("family medicine")
            .into();
        assert_eq!(update.track(), Track::Documentation);
        assert_eq!(update.section_name(), "specialty");
        assert!(!update.is_empty());

        let mut messaging = MessagingProfile::default();
        let mut documentation = DocumentationProfile::default();
        update.apply(&mut messaging, &mut documentation);
        assert_eq!(documentation.specialty.practice_type, "family medicine");
        assert_eq!(messaging, MessagingProfile::default());
    }

    #[test]
    fn test_edit_capture_update_targets_track() {
        let id: EditScenarioId = "scenario4C".parse().unwrap();
        let update = SectionUpdate::edit_capture(id, EditCapture::generated("hi"));
        assert_eq!(update.track(), Track::Messaging);
        assert_eq!(update.section_name(), "editCapture");
    }

    #[test]
    fn test_from_json_uses_wire_names() {
        let update = SectionUpdate::from_json(
            Track::Messaging,
            "pairSelections",
            serde_json::json!({ "pair2B": { "selected": "A", "edits": null } }),
        )
        .unwrap();
        let expected: SectionUpdate = MessagingPairSelectionsPatch::default()
            .pair_2b(PairSelection::chosen(PairChoice::A))
            .into();
        assert_eq!(update, expected);

        let update = SectionUpdate::from_json(
            Track::Documentation,
            "values",
            serde_json::json!({ "templateFlexibility": 8, "documentationPhilosophy": "brief" }),
        )
        .unwrap();
        let SectionUpdate::DocumentationValues(patch) = update else {
            panic!("wrong section");
        };
        assert_eq!(patch.template_flexibility, Some(8));
        assert_eq!(patch.documentation_philosophy.as_deref(), Some("brief"));
        assert!(patch.verbosity.is_none());
    }

    #[test]
    fn test_from_json_null_clears_optional_specialty_field() {
        let update = SectionUpdate::from_json(
            Track::Documentation,
            "specialty",
            serde_json::json!({ "growthDocStyle": null }),
        )
        .unwrap();
        let SectionUpdate::DocumentationSpecialty(patch) = update else {
            panic!("wrong section");
        };
        assert_eq!(patch.growth_doc_style, Some(None));
        assert!(patch.development_doc_style.is_none());
    }

    #[test]
    fn test_from_json_rejects_bad_input() {
        let err = SectionUpdate::from_json(Track::Messaging, "structure", serde_json::json!({}))
            .unwrap_err();
        assert!(matches!(err, ToneError::UnknownSection { .. }));

        let err = SectionUpdate::from_json(
            Track::Messaging,
            "values",
            serde_json::json!({ "warmthh": 3 }),
        )
        .unwrap_err();
        assert!(err.is_serialization());

        let err = SectionUpdate::from_json(
            Track::Messaging,
            "values",
            serde_json::json!({ "warmth": "high" }),
        )
        .unwrap_err();
        assert!(err.is_serialization());
    }
}
