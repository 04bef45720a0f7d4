//! Track Completion Gate.
//!
//! Pure predicates over `AppState` deciding whether a step's required fields
//! are filled. Nothing here is cached.

use crate::profile::{EditCapture, EditScenarioId, PairSelection};
use crate::state::AppState;
use crate::track::Track;

fn blank_texts<'a>(
    section: &str,
    entries: impl IntoIterator<Item = (&'static str, &'a str)>,
) -> Vec<String> {
    entries
        .into_iter()
        .filter(|(_, text)| text.trim().is_empty())
        .map(|(key, _)| format!("{}.{}", section, key))
        .collect()
}

fn unselected_pairs<'a>(entries: impl IntoIterator<Item = (&'static str, &'a PairSelection)>) -> Vec<String> {
    entries
        .into_iter()
        .filter(|(_, pair)| !pair.is_selected())
        .map(|(key, _)| format!("pairSelections.{}.selected", key))
        .collect()
}

fn unedited<'a>(entries: impl IntoIterator<Item = (String, &'a EditCapture)>) -> Vec<String> {
    entries
        .into_iter()
        .filter(|(_, capture)| capture.edited.trim().is_empty())
        .map(|(key, _)| format!("editCapture.{}.edited", key))
        .collect()
}

/// Field paths still required before leaving `step`, e.g.
/// `coldResponses.scenario1B`.
///
/// Steps without requirements, and out-of-range steps, yield an empty list;
/// use [`can_proceed`] for navigation decisions.
pub fn missing_fields(state: &AppState, track: Track, step: u32) -> Vec<String> {
    match track {
        Track::Messaging => {
            let profile = &state.messaging_profile;
            match step {
                1 => blank_texts("coldResponses", profile.cold_responses.entries()),
                2 => unselected_pairs(profile.pair_selections.entries()),
                4 => unedited(
                    EditScenarioId::all(track)
                        .map(|id| (id.to_string(), profile.edit_capture.get(id.slot))),
                ),
                _ => Vec::new(),
            }
        }
        Track::Documentation => {
            let profile = &state.documentation_profile;
            match step {
                2 => blank_texts("coldResponses", profile.cold_responses.entries()),
                3 => unselected_pairs(profile.pair_selections.entries()),
                5 => unedited(
                    EditScenarioId::all(track)
                        .map(|id| (id.to_string(), profile.edit_capture.get(id.slot))),
                ),
                _ => Vec::new(),
            }
        }
    }
}

/// Whether navigation may move forward from `step`.
pub fn can_proceed(state: &AppState, track: Track, step: u32) -> bool {
    track.check_step(step).is_ok() && missing_fields(state, track, step).is_empty()
}

/// Whether profile synthesis may be triggered for the track.
///
/// Documentation needs a practice type; messaging is always ready.
pub fn can_generate_profile(state: &AppState, track: Track) -> bool {
    match track {
        Track::Messaging => true,
        Track::Documentation => state.documentation_profile.specialty.has_practice_type(),
    }
}
