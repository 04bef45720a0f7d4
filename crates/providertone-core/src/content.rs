//! Static scenario content.
//!
//! Immutable configuration consumed by prompt assembly, the synthesis brief,
//! and the CLI. The wizard never authors or mutates any of it.

use crate::profile::{EditScenarioId, EditSlot, PairChoice};
use crate::track::Track;

/// A scenario whose generated draft the provider edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditScenario {
    pub id: EditScenarioId,
    pub title: &'static str,
    pub description: &'static str,
    /// Incoming portal message (messaging) or clinical context (documentation).
    pub incoming: &'static str,
}

/// A cold-generation scenario, keyed by its stored field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColdScenario {
    pub key: &'static str,
    pub title: &'static str,
    /// Lead-in used when the answer is quoted as a style example.
    pub example_lead: &'static str,
}

/// Short style descriptions for both sides of a contrastive pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairStyles {
    pub key: &'static str,
    pub title: &'static str,
    /// What the preference applies to, e.g. `scenario type A`.
    pub topic: &'static str,
    pub option_a: &'static str,
    pub option_b: &'static str,
}

impl PairStyles {
    pub fn style(&self, choice: PairChoice) -> &'static str {
        match choice {
            PairChoice::A => self.option_a,
            PairChoice::B => self.option_b,
        }
    }
}

const fn edit(
    track: Track,
    slot: EditSlot,
    title: &'static str,
    description: &'static str,
    incoming: &'static str,
) -> EditScenario {
    EditScenario {
        id: EditScenarioId { track, slot },
        title,
        description,
        incoming,
    }
}

pub const MESSAGING_EDIT_SCENARIOS: [EditScenario; 3] = [
    edit(
        Track::Messaging,
        EditSlot::A,
        "Pediatric: Developmental Concern",
        "Parent worried about 18-month-old not talking yet, asking about autism",
        "Hi, I'm worried about my 18-month-old. He's not really saying any words yet, just babbling. \
My sister's kid was talking in sentences by this age. The internet says this could be autism. \
Should we be concerned?",
    ),
    edit(
        Track::Messaging,
        EditSlot::B,
        "Family Medicine: Chronic Disease Management",
        "Adult patient with diabetes asking about rising blood sugar levels",
        "My blood sugar has been running higher than usual the past few weeks, mostly 150s-170s \
fasting when it's usually around 120. I haven't changed my diet really. My A1c was 7.1 last time. \
Should I adjust my metformin or come in?",
    ),
    edit(
        Track::Messaging,
        EditSlot::C,
        "Mixed: Sensitive Decline",
        "Parent requesting ADHD medication for teenager without proper evaluation",
        "My daughter is 16 and she wants to get tested for ADHD. She says she can't focus in school. \
Honestly I think she's just on her phone too much and doesn't want to put in the effort. \
Can we just get her the medication so she'll try harder? Her grades are suffering.",
    ),
];

pub const DOCUMENTATION_EDIT_SCENARIOS: [EditScenario; 3] = [
    edit(
        Track::Documentation,
        EditSlot::A,
        "Pediatric Acute Visit: Complete Note",
        "2-year-old with viral symptoms (runny nose, cough, low-grade fever)",
        "2-year-old male with 2 days of runny nose, cough, and low-grade fever (100.5°F). \
Eating and drinking okay. No respiratory distress. Sleeping more than usual. No sick contacts known. \
Exam: mild clear rhinorrhea, mildly erythematous posterior pharynx, TMs clear, lungs clear, \
no increased work of breathing.",
    ),
    edit(
        Track::Documentation,
        EditSlot::B,
        "Adult Chronic Disease Follow-up: Complete Note",
        "62-year-old with HTN, T2DM, hypothyroidism for routine follow-up with suboptimal BP",
        "62-year-old female with HTN, T2DM, and hypothyroidism for routine follow-up. \
BP today 148/92, was 138/86 last visit. Taking lisinopril 10mg daily as prescribed. \
Recent A1c 7.4% (stable). TSH normal. Patient reports occasional headaches, worse in morning. \
No chest pain, visual changes, or edema. Weight stable. You're considering uptitrating lisinopril.",
    ),
    edit(
        Track::Documentation,
        EditSlot::C,
        "Mental Health Visit: Complete Note",
        "34-year-old with GAD on sertraline for follow-up",
        "34-year-old female established patient with generalized anxiety disorder on sertraline \
100mg daily, presenting for follow-up. Reports anxiety \"better but not gone\": less panic, \
still ruminates at night, affecting sleep. PHQ-9: 6 (mild). GAD-7: 10 (moderate). \
Tolerating medication well, no side effects. Interested in adding therapy. You discuss options \
including dose increase vs. adding therapy vs. both.",
    ),
];

pub const MESSAGING_COLD_SCENARIOS: [ColdScenario; 3] = [
    ColdScenario {
        key: "scenario1A",
        title: "Pediatric: Anxious Parent with Acute Symptoms",
        example_lead: "Example response to anxious parent",
    },
    ColdScenario {
        key: "scenario1B",
        title: "Family Medicine: Routine Medication Request",
        example_lead: "Example response to routine request",
    },
    ColdScenario {
        key: "scenario1C",
        title: "Family Medicine: Frustrated Patient About Results",
        example_lead: "Example response to frustrated patient",
    },
];

pub const DOCUMENTATION_COLD_SCENARIOS: [ColdScenario; 5] = [
    ColdScenario {
        key: "hpiPediatricAcute",
        title: "HPI: Pediatric Acute Visit",
        example_lead: "Example HPI for a pediatric acute visit",
    },
    ColdScenario {
        key: "hpiAdultChronic",
        title: "HPI: Adult Chronic Disease",
        example_lead: "Example HPI for an adult chronic disease visit",
    },
    ColdScenario {
        key: "apPediatricWellChild",
        title: "Assessment & Plan: Pediatric Well Child",
        example_lead: "Example assessment and plan for a well child check",
    },
    ColdScenario {
        key: "apDiagnosticUncertainty",
        title: "Assessment & Plan: Diagnostic Uncertainty",
        example_lead: "Example assessment and plan under diagnostic uncertainty",
    },
    ColdScenario {
        key: "apMentalHealth",
        title: "Assessment & Plan: Mental Health",
        example_lead: "Example assessment and plan for a mental health visit",
    },
];

const fn pair(
    key: &'static str,
    title: &'static str,
    topic: &'static str,
    option_a: &'static str,
    option_b: &'static str,
) -> PairStyles {
    PairStyles {
        key,
        title,
        topic,
        option_a,
        option_b,
    }
}

pub const MESSAGING_PAIRS: [PairStyles; 6] = [
    pair("pair2A", "Reassurance: Warm vs. Efficient", "scenario type A", "warm and thorough", "efficient and concise"),
    pair("pair2B", "Triage-Up: Directive vs. Collaborative", "scenario type B", "directive and urgent", "collaborative and explanatory"),
    pair("pair2C", "Medication/Clinical Detail: Thorough vs. Concise", "scenario type C", "thorough with context", "brief and actionable"),
    pair("pair2D", "Mental Health: Validating vs. Action-Oriented", "scenario type D", "validating emotions first", "action-oriented"),
    pair("pair2E", "Admin/Scheduling: Accommodating vs. Boundary-Setting", "scenario type E", "empathetic but boundaried", "direct about boundaries"),
    pair("pair2F", "After-Hours/Boundary: Available vs. Contained", "scenario type F", "warm and available", "concise and contained"),
];

pub const DOCUMENTATION_PAIRS: [PairStyles; 6] = [
    pair("pair3A", "HPI Verbosity", "HPI verbosity", "detailed narrative", "concise, essential facts"),
    pair("pair3B", "Assessment Reasoning", "assessment reasoning", "differential-focused", "working diagnosis with brief rationale"),
    pair("pair3C", "Plan Specificity", "plan specificity", "highly specific", "action-oriented, less granular"),
    pair("pair3D", "Documenting Uncertainty", "documenting uncertainty", "explicit uncertainty", "confident working assessment"),
    pair("pair3E", "Physical Exam: Level of Detail", "physical exam detail", "comprehensive documentation", "focused, abnormal-oriented"),
    pair("pair3F", "Counseling Documentation", "counseling documentation", "detailed", "summary"),
];

pub fn edit_scenarios(track: Track) -> &'static [EditScenario] {
    match track {
        Track::Messaging => &MESSAGING_EDIT_SCENARIOS,
        Track::Documentation => &DOCUMENTATION_EDIT_SCENARIOS,
    }
}

pub fn edit_scenario(id: EditScenarioId) -> &'static EditScenario {
    let index = match id.slot {
        EditSlot::A => 0,
        EditSlot::B => 1,
        EditSlot::C => 2,
    };
    &edit_scenarios(id.track)[index]
}

pub fn cold_scenarios(track: Track) -> &'static [ColdScenario] {
    match track {
        Track::Messaging => &MESSAGING_COLD_SCENARIOS,
        Track::Documentation => &DOCUMENTATION_COLD_SCENARIOS,
    }
}

pub fn cold_scenario(track: Track, key: &str) -> Option<&'static ColdScenario> {
    cold_scenarios(track).iter().find(|s| s.key == key)
}

pub fn pair_styles(track: Track) -> &'static [PairStyles] {
    match track {
        Track::Messaging => &MESSAGING_PAIRS,
        Track::Documentation => &DOCUMENTATION_PAIRS,
    }
}

pub fn pair_style(track: Track, key: &str) -> Option<&'static PairStyles> {
    pair_styles(track).iter().find(|p| p.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;

    #[test]
    fn test_edit_scenarios_are_indexed_by_slot() {
        for track in Track::ALL {
            for id in EditScenarioId::all(track) {
                assert_eq!(edit_scenario(id).id, id);
            }
        }
        assert!(
            edit_scenario("scenario4B".parse().unwrap())
                .incoming
                .contains("metformin")
        );
    }

    #[test]
    fn test_catalog_keys_match_stored_fields() {
        let state = AppState::default();
        let stored: Vec<&str> = state
            .messaging_profile
            .cold_responses
            .entries()
            .iter()
            .map(|(k, _)| *k)
            .collect();
        let catalog: Vec<&str> = MESSAGING_COLD_SCENARIOS.iter().map(|s| s.key).collect();
        assert_eq!(stored, catalog);

        let stored: Vec<&str> = state
            .documentation_profile
            .pair_selections
            .entries()
            .iter()
            .map(|(k, _)| *k)
            .collect();
        let catalog: Vec<&str> = DOCUMENTATION_PAIRS.iter().map(|p| p.key).collect();
        assert_eq!(stored, catalog);
    }

    #[test]
    fn test_pair_style_lookup() {
        let styles = pair_style(Track::Messaging, "pair2D").unwrap();
        assert_eq!(styles.style(PairChoice::A), "validating emotions first");
        assert_eq!(styles.style(PairChoice::B), "action-oriented");
        assert!(pair_style(Track::Documentation, "pair2D").is_none());
    }
}
