//! Messaging track answers and the synthesized messaging style profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{EditCapture, EditSlot, NegativeConstraints, PairSelection, ScoredTrait};
use super::patch::section_patch;

/// Step 1: free-text replies to three scenarios.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagingColdResponses {
    #[serde(rename = "scenario1A")]
    pub scenario_1a: String,
    #[serde(rename = "scenario1B")]
    pub scenario_1b: String,
    #[serde(rename = "scenario1C")]
    pub scenario_1c: String,
}

impl MessagingColdResponses {
    /// Stored keys paired with the answer text, in display order.
    pub fn entries(&self) -> [(&'static str, &str); 3] {
        [
            ("scenario1A", self.scenario_1a.as_str()),
            ("scenario1B", self.scenario_1b.as_str()),
            ("scenario1C", self.scenario_1c.as_str()),
        ]
    }
}

section_patch! {
    MessagingColdResponsesPatch => MessagingColdResponses {
        #[serde(rename = "scenario1A")]
        scenario_1a: String,
        #[serde(rename = "scenario1B")]
        scenario_1b: String,
        #[serde(rename = "scenario1C")]
        scenario_1c: String,
    }
}

/// Step 2: six contrastive pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagingPairSelections {
    #[serde(rename = "pair2A")]
    pub pair_2a: PairSelection,
    #[serde(rename = "pair2B")]
    pub pair_2b: PairSelection,
    #[serde(rename = "pair2C")]
    pub pair_2c: PairSelection,
    #[serde(rename = "pair2D")]
    pub pair_2d: PairSelection,
    #[serde(rename = "pair2E")]
    pub pair_2e: PairSelection,
    #[serde(rename = "pair2F")]
    pub pair_2f: PairSelection,
}

impl MessagingPairSelections {
    pub fn entries(&self) -> [(&'static str, &PairSelection); 6] {
        [
            ("pair2A", &self.pair_2a),
            ("pair2B", &self.pair_2b),
            ("pair2C", &self.pair_2c),
            ("pair2D", &self.pair_2d),
            ("pair2E", &self.pair_2e),
            ("pair2F", &self.pair_2f),
        ]
    }
}

section_patch! {
    MessagingPairSelectionsPatch => MessagingPairSelections {
        #[serde(rename = "pair2A")]
        pair_2a: PairSelection,
        #[serde(rename = "pair2B")]
        pair_2b: PairSelection,
        #[serde(rename = "pair2C")]
        pair_2c: PairSelection,
        #[serde(rename = "pair2D")]
        pair_2d: PairSelection,
        #[serde(rename = "pair2E")]
        pair_2e: PairSelection,
        #[serde(rename = "pair2F")]
        pair_2f: PairSelection,
    }
}

/// Step 3: what the provider never says.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagingAntiExamples {
    pub forbidden_phrases: String,
    pub closers_never_used: Vec<String>,
    pub openers_never_used: Vec<String>,
    pub stylistic_aversions: Vec<String>,
    pub pet_peeves: String,
}

section_patch! {
    #[serde(rename_all = "camelCase")]
    MessagingAntiExamplesPatch => MessagingAntiExamples {
        forbidden_phrases: String,
        closers_never_used: Vec<String>,
        openers_never_used: Vec<String>,
        stylistic_aversions: Vec<String>,
        pet_peeves: String,
    }
}

/// Step 4: generated drafts and the provider's edits of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagingEditCapture {
    #[serde(rename = "scenario4A")]
    pub scenario_4a: EditCapture,
    #[serde(rename = "scenario4B")]
    pub scenario_4b: EditCapture,
    #[serde(rename = "scenario4C")]
    pub scenario_4c: EditCapture,
}

impl MessagingEditCapture {
    pub fn get(&self, slot: EditSlot) -> &EditCapture {
        match slot {
            EditSlot::A => &self.scenario_4a,
            EditSlot::B => &self.scenario_4b,
            EditSlot::C => &self.scenario_4c,
        }
    }
}

section_patch! {
    MessagingEditCapturePatch => MessagingEditCapture {
        #[serde(rename = "scenario4A")]
        scenario_4a: EditCapture,
        #[serde(rename = "scenario4B")]
        scenario_4b: EditCapture,
        #[serde(rename = "scenario4C")]
        scenario_4c: EditCapture,
    }
}

impl MessagingEditCapturePatch {
    /// A patch touching exactly one slot.
    pub fn for_slot(slot: EditSlot, capture: EditCapture) -> Self {
        let patch = Self::default();
        match slot {
            EditSlot::A => patch.scenario_4a(capture),
            EditSlot::B => patch.scenario_4b(capture),
            EditSlot::C => patch.scenario_4c(capture),
        }
    }
}

/// Step 5: sliders (1-10) and judgment answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagingValues {
    pub uncertainty: u8,
    pub length: u8,
    pub warmth: u8,
    pub directive_style: u8,
    pub declining_requests: String,
    pub emotional_patient: String,
    pub after_hours: String,
    pub uncertainty_handling: String,
    pub philosophy: String,
}

impl Default for MessagingValues {
    fn default() -> Self {
        Self {
            uncertainty: 5,
            length: 5,
            warmth: 5,
            directive_style: 5,
            declining_requests: String::new(),
            emotional_patient: String::new(),
            after_hours: String::new(),
            uncertainty_handling: String::new(),
            philosophy: String::new(),
        }
    }
}

section_patch! {
    #[serde(rename_all = "camelCase")]
    MessagingValuesPatch => MessagingValues {
        uncertainty: u8,
        length: u8,
        warmth: u8,
        directive_style: u8,
        declining_requests: String,
        emotional_patient: String,
        after_hours: String,
        uncertainty_handling: String,
        philosophy: String,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfacePatterns {
    pub greetings: String,
    pub closings: String,
    pub length_tendency: String,
    pub paragraph_structure: String,
    pub punctuation_patterns: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToneDimensions {
    pub warmth: ScoredTrait,
    pub certainty: ScoredTrait,
    pub directiveness: ScoredTrait,
    pub formality: ScoredTrait,
    pub thoroughness: ScoredTrait,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JudgmentPatterns {
    pub uncertainty_handling: String,
    pub escalation_style: String,
    pub declining_requests: String,
    pub emotional_responsiveness: String,
    pub after_hours_approach: String,
}

/// Synthesized description of how a provider writes portal messages.
///
/// Every field is required when parsing a synthesis answer; partial answers
/// are rejected instead of being padded with defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagingStyleProfile {
    pub surface_patterns: SurfacePatterns,
    pub tone_dimensions: ToneDimensions,
    pub negative_constraints: NegativeConstraints,
    pub judgment_patterns: JudgmentPatterns,
    pub signature_moves: Vec<String>,
    pub voice_summary: String,
    pub example_fragments: Vec<String>,
}

/// Everything captured on the messaging track.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagingProfile {
    pub cold_responses: MessagingColdResponses,
    pub pair_selections: MessagingPairSelections,
    pub anti_examples: MessagingAntiExamples,
    pub edit_capture: MessagingEditCapture,
    pub values: MessagingValues,
    pub generated_profile: Option<MessagingStyleProfile>,
    pub user_corrections: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl MessagingProfile {
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::SectionPatch;

    #[test]
    fn test_default_values_sit_mid_scale() {
        let values = MessagingValues::default();
        assert_eq!(values.uncertainty, 5);
        assert_eq!(values.directive_style, 5);
        assert!(values.philosophy.is_empty());
    }

    #[test]
    fn test_patch_keeps_unmentioned_fields() {
        let mut cold = MessagingColdResponses {
            scenario_1a: "first".into(),
            scenario_1b: "second".into(),
            scenario_1c: String::new(),
        };
        MessagingColdResponsesPatch::default()
            .scenario_1c("third")
            .apply_to(&mut cold);
        assert_eq!(cold.scenario_1a, "first");
        assert_eq!(cold.scenario_1b, "second");
        assert_eq!(cold.scenario_1c, "third");
    }

    #[test]
    fn test_empty_patch() {
        assert!(MessagingValuesPatch::default().is_empty());
        assert!(!MessagingValuesPatch::default().warmth(8u8).is_empty());
    }

    #[test]
    fn test_wire_keys() {
        let json = serde_json::to_value(MessagingProfile::default()).unwrap();
        assert!(json["coldResponses"].get("scenario1A").is_some());
        assert!(json["pairSelections"].get("pair2F").is_some());
        assert!(json["editCapture"]["scenario4B"].get("edited").is_some());
        assert!(json["antiExamples"].get("closersNeverUsed").is_some());
        assert_eq!(json["values"]["directiveStyle"], 5);
        assert!(json["generatedProfile"].is_null());
        assert!(json["completedAt"].is_null());
    }

    #[test]
    fn test_edit_slot_patch_targets_one_slot() {
        let mut capture = MessagingEditCapture::default();
        MessagingEditCapturePatch::for_slot(EditSlot::B, EditCapture::generated("draft"))
            .apply_to(&mut capture);
        assert_eq!(capture.get(EditSlot::B).original, "draft");
        assert!(capture.get(EditSlot::A).original.is_empty());
    }
}
