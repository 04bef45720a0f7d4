//! Profile Store: the wizard's state machine.
//!
//! All operations are synchronous and perform no I/O. Persistence and
//! generation observe the store through [`StoreHandle`].

mod handle;

pub use handle::{Snapshot, StoreHandle};

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::Result;
use crate::profile::{GeneratedProfile, SectionUpdate};
use crate::state::AppState;
use crate::track::Track;

/// Owns the `AppState` and counts every change to it.
#[derive(Debug, Clone, Default)]
pub struct ProfileStore {
    state: AppState,
    revision: u64,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Increases by one for every mutation that changed the state.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn bump(&mut self) {
        self.revision += 1;
    }

    /// Shallow-merges a partial payload into one section.
    ///
    /// An empty patch leaves the revision untouched.
    pub fn set_section(&mut self, update: SectionUpdate) -> &AppState {
        if update.is_empty() {
            return &self.state;
        }
        debug!(
            "[ProfileStore] set_section {}.{}",
            update.track(),
            update.section_name()
        );
        update.apply(
            &mut self.state.messaging_profile,
            &mut self.state.documentation_profile,
        );
        self.bump();
        &self.state
    }

    /// Replaces the generated profile of the profile's track wholesale.
    pub fn set_generated_profile(&mut self, profile: GeneratedProfile) -> &AppState {
        debug!("[ProfileStore] set_generated_profile {}", profile.track());
        match profile {
            GeneratedProfile::Messaging(p) => {
                self.state.messaging_profile.generated_profile = Some(p);
            }
            GeneratedProfile::Documentation(p) => {
                self.state.documentation_profile.generated_profile = Some(p);
            }
        }
        self.bump();
        &self.state
    }

    pub fn set_user_corrections(&mut self, track: Track, corrections: Option<String>) -> &AppState {
        debug!("[ProfileStore] set_user_corrections {}", track);
        *self.state.user_corrections_mut(track) = corrections;
        self.bump();
        &self.state
    }

    /// Marks a track complete now. See [`ProfileStore::complete_at`].
    pub fn complete(&mut self, track: Track) -> bool {
        self.complete_at(track, Utc::now())
    }

    /// Sets `completedAt` if it is unset.
    ///
    /// The first completion wins: returns `false` and keeps the existing
    /// timestamp when the track is already complete.
    pub fn complete_at(&mut self, track: Track, at: DateTime<Utc>) -> bool {
        let slot = self.state.completed_at_mut(track);
        if slot.is_some() {
            debug!("[ProfileStore] {} already completed, keeping timestamp", track);
            return false;
        }
        *slot = Some(at);
        debug!("[ProfileStore] {} completed at {}", track, at);
        self.bump();
        true
    }

    /// Moves a track's step cursor. Out-of-range values are rejected.
    pub fn set_step(&mut self, track: Track, step: u32) -> Result<&AppState> {
        track.check_step(step)?;
        let cursor = self.state.step_mut(track);
        if *cursor != step {
            *cursor = step;
            debug!("[ProfileStore] {} step -> {}", track, step);
            self.bump();
        }
        Ok(&self.state)
    }

    /// Replaces the whole root, e.g. when rehydrating.
    ///
    /// The incoming state is validated first; on error the store is unchanged.
    pub fn load_state(&mut self, state: AppState) -> Result<&AppState> {
        state.validate()?;
        self.state = state;
        self.bump();
        debug!("[ProfileStore] state loaded (revision {})", self.revision);
        Ok(&self.state)
    }

    /// Back to fresh defaults for both tracks.
    pub fn reset_all(&mut self) -> &AppState {
        self.state = AppState::default();
        self.bump();
        debug!("[ProfileStore] reset to defaults");
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::*;
    use chrono::TimeZone;

    #[test]
    fn test_merge_preserves_other_fields_all_sections() {
        let mut store = ProfileStore::new();
        store.set_section(
            MessagingAntiExamplesPatch::default()
                .forbidden_phrases("per my last message")
                .closers_never_used(vec!["Best,".to_string()])
                .into(),
        );
        store.set_section(
            MessagingAntiExamplesPatch::default()
                .pet_peeves("exclamation marks")
                .into(),
        );
        let anti = &store.state().messaging_profile.anti_examples;
        assert_eq!(anti.forbidden_phrases, "per my last message");
        assert_eq!(anti.closers_never_used, vec!["Best,".to_string()]);
        assert_eq!(anti.pet_peeves, "exclamation marks");

        store.set_section(DocumentationValuesPatch::default().verbosity(9u8).into());
        store.set_section(
            DocumentationValuesPatch::default()
                .documentation_philosophy("write for the next clinician")
                .into(),
        );
        let values = &store.state().documentation_profile.values;
        assert_eq!(values.verbosity, 9);
        assert_eq!(values.reasoning_visibility, 5);
        assert_eq!(values.documentation_philosophy, "write for the next clinician");

        store.set_section(
            DocumentationPairSelectionsPatch::default()
                .pair_3a(PairSelection::chosen(PairChoice::A))
                .into(),
        );
        store.set_section(
            DocumentationPairSelectionsPatch::default()
                .pair_3f(PairSelection::chosen(PairChoice::B).with_edits("tighter"))
                .into(),
        );
        let pairs = &store.state().documentation_profile.pair_selections;
        assert_eq!(pairs.pair_3a.selected, Some(PairChoice::A));
        assert_eq!(pairs.pair_3f.edits.as_deref(), Some("tighter"));
        assert_eq!(pairs.pair_3c, PairSelection::default());
    }

    #[test]
    fn test_section_update_leaves_other_track_alone() {
        let mut store = ProfileStore::new();
        store.set_section(
            MessagingColdResponsesPatch::default()
                .scenario_1a("hello")
                .into(),
        );
        assert_eq!(
            store.state().documentation_profile,
            DocumentationProfile::default()
        );
    }

    #[test]
    fn test_empty_patch_does_not_bump_revision() {
        let mut store = ProfileStore::new();
        store.set_section(MessagingValuesPatch::default().into());
        assert_eq!(store.revision(), 0);
        store.set_section(MessagingValuesPatch::default().warmth(3u8).into());
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn test_complete_is_monotonic_and_first_wins() {
        let mut store = ProfileStore::new();
        let first = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).unwrap();

        assert!(store.complete_at(Track::Messaging, first));
        assert!(!store.complete_at(Track::Messaging, later));
        assert!(!store.complete(Track::Messaging));
        assert_eq!(store.state().completed_at(Track::Messaging), Some(first));
        assert!(!store.state().is_completed(Track::Documentation));
    }

    #[test]
    fn test_set_step_rejects_out_of_range() {
        let mut store = ProfileStore::new();
        assert!(store.set_step(Track::Messaging, 6).is_ok());
        assert_eq!(store.state().messaging_step, 6);

        let err = store.set_step(Track::Messaging, 7).unwrap_err();
        assert!(err.is_invalid_step());
        assert!(store.set_step(Track::Documentation, 0).is_err());
        assert_eq!(store.state().messaging_step, 6);
        assert_eq!(store.state().documentation_step, 1);
    }

    #[test]
    fn test_load_state_validates() {
        let mut store = ProfileStore::new();
        let bad = AppState {
            messaging_step: 42,
            ..AppState::default()
        };
        assert!(store.load_state(bad).is_err());
        assert_eq!(store.revision(), 0);

        let good = AppState {
            documentation_step: 7,
            ..AppState::default()
        };
        store.load_state(good.clone()).unwrap();
        assert_eq!(store.state(), &good);
    }

    #[test]
    fn test_reset_all_clears_completion() {
        let mut store = ProfileStore::new();
        store.complete(Track::Documentation);
        store.set_user_corrections(Track::Documentation, Some("less hedging".into()));
        store.set_step(Track::Documentation, 4).unwrap();
        store.reset_all();
        assert_eq!(store.state(), &AppState::default());
    }

    #[test]
    fn test_user_corrections_replace_wholesale() {
        let mut store = ProfileStore::new();
        store.set_user_corrections(Track::Messaging, Some("warmer".into()));
        assert_eq!(store.state().user_corrections(Track::Messaging), Some("warmer"));
        store.set_user_corrections(Track::Messaging, None);
        assert_eq!(store.state().user_corrections(Track::Messaging), None);
    }
}
