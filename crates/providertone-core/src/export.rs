//! Downloadable snapshot of completed tracks for external review.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::Result;
use crate::profile::*;
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagingRawResponses {
    pub cold_responses: MessagingColdResponses,
    pub pair_selections: MessagingPairSelections,
    pub anti_examples: MessagingAntiExamples,
    pub edit_capture: MessagingEditCapture,
    pub values: MessagingValues,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentationRawResponses {
    pub structure: DocumentationStructure,
    pub cold_responses: DocumentationColdResponses,
    pub pair_selections: DocumentationPairSelections,
    pub anti_examples: DocumentationAntiExamples,
    pub edit_capture: DocumentationEditCapture,
    pub values: DocumentationValues,
    pub specialty: DocumentationSpecialty,
}

/// One completed track.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackExport<P, R> {
    pub completed_at: DateTime<Utc>,
    pub generated_profile: Option<P>,
    pub user_corrections: Option<String>,
    pub raw_responses: R,
}

/// Export document. Tracks that are not completed serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileExport {
    pub exported_at: DateTime<Utc>,
    pub messaging: Option<TrackExport<MessagingStyleProfile, MessagingRawResponses>>,
    pub documentation: Option<TrackExport<DocumentationStyleProfile, DocumentationRawResponses>>,
}

impl ProfileExport {
    pub fn from_state(state: &AppState, exported_at: DateTime<Utc>) -> Self {
        let m = &state.messaging_profile;
        let messaging = m.completed_at.map(|completed_at| TrackExport {
            completed_at,
            generated_profile: m.generated_profile.clone(),
            user_corrections: m.user_corrections.clone(),
            raw_responses: MessagingRawResponses {
                cold_responses: m.cold_responses.clone(),
                pair_selections: m.pair_selections.clone(),
                anti_examples: m.anti_examples.clone(),
                edit_capture: m.edit_capture.clone(),
                values: m.values.clone(),
            },
        });

        let d = &state.documentation_profile;
        let documentation = d.completed_at.map(|completed_at| TrackExport {
            completed_at,
            generated_profile: d.generated_profile.clone(),
            user_corrections: d.user_corrections.clone(),
            raw_responses: DocumentationRawResponses {
                structure: d.structure.clone(),
                cold_responses: d.cold_responses.clone(),
                pair_selections: d.pair_selections.clone(),
                anti_examples: d.anti_examples.clone(),
                edit_capture: d.edit_capture.clone(),
                values: d.values.clone(),
                specialty: d.specialty.clone(),
            },
        });

        Self {
            exported_at,
            messaging,
            documentation,
        }
    }

    /// True when neither track is completed.
    pub fn is_empty(&self) -> bool {
        self.messaging.is_none() && self.documentation.is_none()
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// `provider-style-profile-YYYY-MM-DD.json`, dated by `exported_at`.
    pub fn default_file_name(&self) -> String {
        format!(
            "provider-style-profile-{}.json",
            self.exported_at.format("%Y-%m-%d")
        )
    }
}
