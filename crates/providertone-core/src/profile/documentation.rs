//! Documentation track answers and the synthesized documentation style profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{EditCapture, EditSlot, NegativeConstraints, PairSelection, ScoredTrait};
use super::patch::{present, section_patch};

/// Step 1: how notes are organized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentationStructure {
    pub overall_structure: String,
    pub plan_organization: String,
    pub assessment_style: String,
    pub hpi_construction: String,
    pub physical_exam_style: String,
    /// 1 (free text) to 10 (strict templates).
    pub template_usage: u8,
}

impl Default for DocumentationStructure {
    fn default() -> Self {
        Self {
            overall_structure: String::new(),
            plan_organization: String::new(),
            assessment_style: String::new(),
            hpi_construction: String::new(),
            physical_exam_style: String::new(),
            template_usage: 5,
        }
    }
}

section_patch! {
    #[serde(rename_all = "camelCase")]
    DocumentationStructurePatch => DocumentationStructure {
        overall_structure: String,
        plan_organization: String,
        assessment_style: String,
        hpi_construction: String,
        physical_exam_style: String,
        template_usage: u8,
    }
}

/// Step 2: five note sections written from scratch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentationColdResponses {
    pub hpi_pediatric_acute: String,
    pub hpi_adult_chronic: String,
    pub ap_pediatric_well_child: String,
    pub ap_diagnostic_uncertainty: String,
    pub ap_mental_health: String,
}

impl DocumentationColdResponses {
    pub fn entries(&self) -> [(&'static str, &str); 5] {
        [
            ("hpiPediatricAcute", self.hpi_pediatric_acute.as_str()),
            ("hpiAdultChronic", self.hpi_adult_chronic.as_str()),
            ("apPediatricWellChild", self.ap_pediatric_well_child.as_str()),
            ("apDiagnosticUncertainty", self.ap_diagnostic_uncertainty.as_str()),
            ("apMentalHealth", self.ap_mental_health.as_str()),
        ]
    }
}

section_patch! {
    #[serde(rename_all = "camelCase")]
    DocumentationColdResponsesPatch => DocumentationColdResponses {
        hpi_pediatric_acute: String,
        hpi_adult_chronic: String,
        ap_pediatric_well_child: String,
        ap_diagnostic_uncertainty: String,
        ap_mental_health: String,
    }
}

/// Step 3: six contrastive pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentationPairSelections {
    #[serde(rename = "pair3A")]
    pub pair_3a: PairSelection,
    #[serde(rename = "pair3B")]
    pub pair_3b: PairSelection,
    #[serde(rename = "pair3C")]
    pub pair_3c: PairSelection,
    #[serde(rename = "pair3D")]
    pub pair_3d: PairSelection,
    #[serde(rename = "pair3E")]
    pub pair_3e: PairSelection,
    #[serde(rename = "pair3F")]
    pub pair_3f: PairSelection,
}

impl DocumentationPairSelections {
    pub fn entries(&self) -> [(&'static str, &PairSelection); 6] {
        [
            ("pair3A", &self.pair_3a),
            ("pair3B", &self.pair_3b),
            ("pair3C", &self.pair_3c),
            ("pair3D", &self.pair_3d),
            ("pair3E", &self.pair_3e),
            ("pair3F", &self.pair_3f),
        ]
    }
}

section_patch! {
    DocumentationPairSelectionsPatch => DocumentationPairSelections {
        #[serde(rename = "pair3A")]
        pair_3a: PairSelection,
        #[serde(rename = "pair3B")]
        pair_3b: PairSelection,
        #[serde(rename = "pair3C")]
        pair_3c: PairSelection,
        #[serde(rename = "pair3D")]
        pair_3d: PairSelection,
        #[serde(rename = "pair3E")]
        pair_3e: PairSelection,
        #[serde(rename = "pair3F")]
        pair_3f: PairSelection,
    }
}

/// Step 4.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentationAntiExamples {
    pub forbidden_phrases: String,
    pub documentation_pet_peeves: String,
    pub patterns_avoided: Vec<String>,
    pub style_aversions: Vec<String>,
}

section_patch! {
    #[serde(rename_all = "camelCase")]
    DocumentationAntiExamplesPatch => DocumentationAntiExamples {
        forbidden_phrases: String,
        documentation_pet_peeves: String,
        patterns_avoided: Vec<String>,
        style_aversions: Vec<String>,
    }
}

/// Step 5.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentationEditCapture {
    #[serde(rename = "scenario5A")]
    pub scenario_5a: EditCapture,
    #[serde(rename = "scenario5B")]
    pub scenario_5b: EditCapture,
    #[serde(rename = "scenario5C")]
    pub scenario_5c: EditCapture,
}

impl DocumentationEditCapture {
    pub fn get(&self, slot: EditSlot) -> &EditCapture {
        match slot {
            EditSlot::A => &self.scenario_5a,
            EditSlot::B => &self.scenario_5b,
            EditSlot::C => &self.scenario_5c,
        }
    }
}

section_patch! {
    DocumentationEditCapturePatch => DocumentationEditCapture {
        #[serde(rename = "scenario5A")]
        scenario_5a: EditCapture,
        #[serde(rename = "scenario5B")]
        scenario_5b: EditCapture,
        #[serde(rename = "scenario5C")]
        scenario_5c: EditCapture,
    }
}

impl DocumentationEditCapturePatch {
    pub fn for_slot(slot: EditSlot, capture: EditCapture) -> Self {
        let patch = Self::default();
        match slot {
            EditSlot::A => patch.scenario_5a(capture),
            EditSlot::B => patch.scenario_5b(capture),
            EditSlot::C => patch.scenario_5c(capture),
        }
    }
}

/// Step 6: sliders (1-10) and policy answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentationValues {
    pub verbosity: u8,
    pub reasoning_visibility: u8,
    pub medicolegal_awareness: u8,
    pub template_flexibility: u8,
    pub patient_quote_usage: String,
    pub open_notes_awareness: String,
    pub uncertainty_documentation: String,
    pub sensitive_info_handling: String,
    pub billing_considerations: u8,
    pub documentation_philosophy: String,
}

impl Default for DocumentationValues {
    fn default() -> Self {
        Self {
            verbosity: 5,
            reasoning_visibility: 5,
            medicolegal_awareness: 5,
            template_flexibility: 5,
            patient_quote_usage: String::new(),
            open_notes_awareness: String::new(),
            uncertainty_documentation: String::new(),
            sensitive_info_handling: String::new(),
            billing_considerations: 5,
            documentation_philosophy: String::new(),
        }
    }
}

section_patch! {
    #[serde(rename_all = "camelCase")]
    DocumentationValuesPatch => DocumentationValues {
        verbosity: u8,
        reasoning_visibility: u8,
        medicolegal_awareness: u8,
        template_flexibility: u8,
        patient_quote_usage: String,
        open_notes_awareness: String,
        uncertainty_documentation: String,
        sensitive_info_handling: String,
        billing_considerations: u8,
        documentation_philosophy: String,
    }
}

/// Practice type plus optional practice-specific habits.
///
/// Optional fields are omitted from the wire format when unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentationSpecialty {
    pub practice_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub growth_doc_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub development_doc_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anticipatory_guidance_doc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chronic_disease_doc_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preventive_care_doc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medication_reconciliation_doc: Option<String>,
}

impl DocumentationSpecialty {
    pub fn has_practice_type(&self) -> bool {
        !self.practice_type.trim().is_empty()
    }
}

section_patch! {
    /// `Some(None)` clears an optional field; `None` leaves it untouched.
    #[serde(rename_all = "camelCase")]
    DocumentationSpecialtyPatch => DocumentationSpecialty {
        practice_type: String,
        #[serde(deserialize_with = "present")]
        growth_doc_style: Option<String>,
        #[serde(deserialize_with = "present")]
        development_doc_style: Option<String>,
        #[serde(deserialize_with = "present")]
        anticipatory_guidance_doc: Option<String>,
        #[serde(deserialize_with = "present")]
        chronic_disease_doc_style: Option<String>,
        #[serde(deserialize_with = "present")]
        preventive_care_doc: Option<String>,
        #[serde(deserialize_with = "present")]
        medication_reconciliation_doc: Option<String>,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuralPatterns {
    pub note_organization: String,
    pub hpi_construction: String,
    pub assessment_section: String,
    pub plan_section: String,
    pub physical_exam: String,
    pub ros: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceDimensions {
    pub verbosity: ScoredTrait,
    pub reasoning_visibility: ScoredTrait,
    pub formality: ScoredTrait,
    pub certainty_expression: ScoredTrait,
    pub patient_centeredness: ScoredTrait,
    pub defensiveness: ScoredTrait,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardPhrasings {
    pub hpi_openings: Vec<String>,
    pub transition_phrases: Vec<String>,
    pub assessment_language: Vec<String>,
    pub plan_language: Vec<String>,
    pub closing_safety_net: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitTypeVariations {
    pub acute_visits: String,
    pub chronic_follow_up: String,
    pub well_visits: String,
    pub mental_health: String,
    pub complex_diagnostic: String,
}

/// Synthesized description of how a provider writes clinical notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentationStyleProfile {
    pub structural_patterns: StructuralPatterns,
    pub voice_dimensions: VoiceDimensions,
    pub negative_constraints: NegativeConstraints,
    pub standard_phrasings: StandardPhrasings,
    pub visit_type_variations: VisitTypeVariations,
    pub signature_moves: Vec<String>,
    pub voice_summary: String,
    pub example_fragments: Vec<String>,
}

/// Everything captured on the documentation track.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentationProfile {
    pub structure: DocumentationStructure,
    pub cold_responses: DocumentationColdResponses,
    pub pair_selections: DocumentationPairSelections,
    pub anti_examples: DocumentationAntiExamples,
    pub edit_capture: DocumentationEditCapture,
    pub values: DocumentationValues,
    pub specialty: DocumentationSpecialty,
    pub generated_profile: Option<DocumentationStyleProfile>,
    pub user_corrections: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl DocumentationProfile {
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::SectionPatch;

    #[test]
    fn test_defaults() {
        let profile = DocumentationProfile::default();
        assert_eq!(profile.structure.template_usage, 5);
        assert_eq!(profile.values.billing_considerations, 5);
        assert!(!profile.specialty.has_practice_type());
        assert!(!profile.is_completed());
    }

    #[test]
    fn test_specialty_optional_fields_omitted_when_unset() {
        let json = serde_json::to_value(DocumentationSpecialty::default()).unwrap();
        assert_eq!(json, serde_json::json!({ "practiceType": "" }));

        let parsed: DocumentationSpecialty =
            serde_json::from_value(serde_json::json!({ "practiceType": "pediatrics" })).unwrap();
        assert_eq!(parsed.practice_type, "pediatrics");
        assert_eq!(parsed.growth_doc_style, None);
    }

    #[test]
    fn test_specialty_patch_can_clear_optional_field() {
        let mut specialty = DocumentationSpecialty {
            practice_type: "pediatrics".into(),
            growth_doc_style: Some("percentiles only".into()),
            ..Default::default()
        };
        DocumentationSpecialtyPatch {
            growth_doc_style: Some(None),
            ..Default::default()
        }
        .apply_to(&mut specialty);
        assert_eq!(specialty.practice_type, "pediatrics");
        assert_eq!(specialty.growth_doc_style, None);
    }

    #[test]
    fn test_wire_keys() {
        let json = serde_json::to_value(DocumentationProfile::default()).unwrap();
        assert!(json["structure"].get("hpiConstruction").is_some());
        assert!(json["coldResponses"].get("apDiagnosticUncertainty").is_some());
        assert!(json["pairSelections"].get("pair3C").is_some());
        assert!(json["editCapture"].get("scenario5A").is_some());
        assert_eq!(json["values"]["medicolegalAwareness"], 5);
    }
}
