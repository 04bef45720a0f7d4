//! Request shapes for the two external generation calls.

use serde::Serialize;

use crate::content;
use crate::profile::{EditScenarioId, PairChoice, PairSelection};
use crate::state::AppState;
use crate::track::Track;

/// A free-text answer with the label it is quoted under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabeledText {
    pub key: String,
    pub label: String,
    pub text: String,
}

/// One contrastive pair as the provider answered it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairPreference {
    pub pair_id: String,
    pub choice: Option<PairChoice>,
    pub edits: Option<String>,
    /// Description of the chosen side, e.g. `warm and thorough`.
    pub style: Option<String>,
    pub topic: String,
}

/// Anti-example answers of either track in a common shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AntiExampleDigest {
    pub forbidden_phrases: String,
    pub closers_never_used: Vec<String>,
    pub openers_never_used: Vec<String>,
    pub patterns_avoided: Vec<String>,
    pub stylistic_aversions: Vec<String>,
    pub pet_peeves: String,
}

/// Inputs for drafting one edit-capture scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftRequest {
    pub track: Track,
    pub scenario_id: EditScenarioId,
    pub incoming_message: String,
    pub cold_responses: Vec<LabeledText>,
    pub pair_selections: Vec<PairPreference>,
    pub anti_examples: AntiExampleDigest,
}

fn labeled<'a>(track: Track, entries: impl IntoIterator<Item = (&'static str, &'a str)>) -> Vec<LabeledText> {
    entries
        .into_iter()
        .map(|(key, text)| LabeledText {
            key: key.to_string(),
            label: content::cold_scenario(track, key)
                .map(|s| s.example_lead.to_string())
                .unwrap_or_else(|| key.to_string()),
            text: text.to_string(),
        })
        .collect()
}

fn preferences<'a>(
    track: Track,
    entries: impl IntoIterator<Item = (&'static str, &'a PairSelection)>,
) -> Vec<PairPreference> {
    entries
        .into_iter()
        .map(|(key, selection)| {
            let styles = content::pair_style(track, key);
            PairPreference {
                pair_id: key.to_string(),
                choice: selection.selected,
                edits: selection.edits.clone(),
                style: match (styles, selection.selected) {
                    (Some(styles), Some(choice)) => Some(styles.style(choice).to_string()),
                    _ => None,
                },
                topic: styles
                    .map(|s| s.topic.to_string())
                    .unwrap_or_else(|| key.to_string()),
            }
        })
        .collect()
}

impl DraftRequest {
    /// Builds the request from the answers as they are right now.
    pub fn from_state(state: &AppState, scenario_id: EditScenarioId) -> Self {
        let track = scenario_id.track;
        let incoming_message = content::edit_scenario(scenario_id).incoming.to_string();

        match track {
            Track::Messaging => {
                let profile = &state.messaging_profile;
                let anti = &profile.anti_examples;
                Self {
                    track,
                    scenario_id,
                    incoming_message,
                    cold_responses: labeled(track, profile.cold_responses.entries()),
                    pair_selections: preferences(track, profile.pair_selections.entries()),
                    anti_examples: AntiExampleDigest {
                        forbidden_phrases: anti.forbidden_phrases.clone(),
                        closers_never_used: anti.closers_never_used.clone(),
                        openers_never_used: anti.openers_never_used.clone(),
                        patterns_avoided: Vec::new(),
                        stylistic_aversions: anti.stylistic_aversions.clone(),
                        pet_peeves: anti.pet_peeves.clone(),
                    },
                }
            }
            Track::Documentation => {
                let profile = &state.documentation_profile;
                let anti = &profile.anti_examples;
                Self {
                    track,
                    scenario_id,
                    incoming_message,
                    cold_responses: labeled(track, profile.cold_responses.entries()),
                    pair_selections: preferences(track, profile.pair_selections.entries()),
                    anti_examples: AntiExampleDigest {
                        forbidden_phrases: anti.forbidden_phrases.clone(),
                        closers_never_used: Vec::new(),
                        openers_never_used: Vec::new(),
                        patterns_avoided: anti.patterns_avoided.clone(),
                        stylistic_aversions: anti.style_aversions.clone(),
                        pet_peeves: anti.documentation_pet_peeves.clone(),
                    },
                }
            }
        }
    }
}

/// Inputs for synthesizing a track's style profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SynthesisRequest {
    pub track: Track,
    /// Human-readable brief of every captured answer.
    pub brief: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::*;
    use crate::store::ProfileStore;

    #[test]
    fn test_messaging_request_from_state() {
        let mut store = ProfileStore::new();
        store.set_section(
            MessagingColdResponsesPatch::default()
                .scenario_1a("Sounds viral, keep her hydrated.")
                .into(),
        );
        store.set_section(
            MessagingPairSelectionsPatch::default()
                .pair_2b(PairSelection::chosen(PairChoice::B))
                .into(),
        );
        store.set_section(
            MessagingAntiExamplesPatch::default()
                .openers_never_used(vec!["Great question!".to_string()])
                .into(),
        );

        let id: EditScenarioId = "scenario4A".parse().unwrap();
        let request = DraftRequest::from_state(store.state(), id);

        assert_eq!(request.track, Track::Messaging);
        assert!(request.incoming_message.contains("18-month-old"));
        assert_eq!(request.cold_responses.len(), 3);
        assert_eq!(request.cold_responses[0].label, "Example response to anxious parent");
        assert_eq!(request.cold_responses[0].text, "Sounds viral, keep her hydrated.");

        let pair = &request.pair_selections[1];
        assert_eq!(pair.pair_id, "pair2B");
        assert_eq!(pair.style.as_deref(), Some("collaborative and explanatory"));
        assert_eq!(pair.topic, "scenario type B");
        assert!(request.pair_selections[0].style.is_none());
        assert_eq!(
            request.anti_examples.openers_never_used,
            vec!["Great question!".to_string()]
        );
    }

    #[test]
    fn test_documentation_request_maps_anti_examples() {
        let mut store = ProfileStore::new();
        store.set_section(
            DocumentationAntiExamplesPatch::default()
                .patterns_avoided(vec!["Copy-forward without meaningful updates".to_string()])
                .style_aversions(vec!["All caps for headers".to_string()])
                .documentation_pet_peeves("denies everything")
                .into(),
        );
        let id: EditScenarioId = "scenario5C".parse().unwrap();
        let request = DraftRequest::from_state(store.state(), id);

        assert_eq!(request.cold_responses.len(), 5);
        assert!(request.incoming_message.contains("sertraline"));
        assert_eq!(request.anti_examples.patterns_avoided.len(), 1);
        assert_eq!(
            request.anti_examples.stylistic_aversions,
            vec!["All caps for headers".to_string()]
        );
        assert_eq!(request.anti_examples.pet_peeves, "denies everything");
        assert!(request.anti_examples.closers_never_used.is_empty());
    }
}
