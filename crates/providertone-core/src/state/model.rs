//! Application state domain model.
//!
//! `AppState` is the single root of everything the wizard captures. It
//! round-trips through JSON without loss.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::profile::{DocumentationProfile, GeneratedProfile, MessagingProfile};
use crate::track::Track;

/// Both tracks' answers plus a step cursor for each.
///
/// # File Location
///
/// - Linux: `~/.local/share/providertone/providertone_profile_state.json`
/// - macOS: `~/Library/Application Support/providertone/providertone_profile_state.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub messaging_profile: MessagingProfile,
    pub documentation_profile: DocumentationProfile,
    /// 1-based cursor, `1..=6`.
    pub messaging_step: u32,
    /// 1-based cursor, `1..=7`.
    pub documentation_step: u32,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            messaging_profile: MessagingProfile::default(),
            documentation_profile: DocumentationProfile::default(),
            messaging_step: 1,
            documentation_step: 1,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self, track: Track) -> u32 {
        match track {
            Track::Messaging => self.messaging_step,
            Track::Documentation => self.documentation_step,
        }
    }

    pub(crate) fn step_mut(&mut self, track: Track) -> &mut u32 {
        match track {
            Track::Messaging => &mut self.messaging_step,
            Track::Documentation => &mut self.documentation_step,
        }
    }

    pub fn completed_at(&self, track: Track) -> Option<DateTime<Utc>> {
        match track {
            Track::Messaging => self.messaging_profile.completed_at,
            Track::Documentation => self.documentation_profile.completed_at,
        }
    }

    pub(crate) fn completed_at_mut(&mut self, track: Track) -> &mut Option<DateTime<Utc>> {
        match track {
            Track::Messaging => &mut self.messaging_profile.completed_at,
            Track::Documentation => &mut self.documentation_profile.completed_at,
        }
    }

    pub fn is_completed(&self, track: Track) -> bool {
        self.completed_at(track).is_some()
    }

    pub fn user_corrections(&self, track: Track) -> Option<&str> {
        match track {
            Track::Messaging => self.messaging_profile.user_corrections.as_deref(),
            Track::Documentation => self.documentation_profile.user_corrections.as_deref(),
        }
    }

    pub(crate) fn user_corrections_mut(&mut self, track: Track) -> &mut Option<String> {
        match track {
            Track::Messaging => &mut self.messaging_profile.user_corrections,
            Track::Documentation => &mut self.documentation_profile.user_corrections,
        }
    }

    /// The stored generated profile of a track, if any.
    pub fn generated_profile(&self, track: Track) -> Option<GeneratedProfile> {
        match track {
            Track::Messaging => self
                .messaging_profile
                .generated_profile
                .clone()
                .map(GeneratedProfile::Messaging),
            Track::Documentation => self
                .documentation_profile
                .generated_profile
                .clone()
                .map(GeneratedProfile::Documentation),
        }
    }

    /// Checks the invariants that the type system cannot express.
    ///
    /// Currently the step cursors: each must lie within its track's range.
    pub fn validate(&self) -> Result<()> {
        for track in Track::ALL {
            track.check_step(self.step(track))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let state = AppState::new();
        assert_eq!(state.messaging_step, 1);
        assert_eq!(state.documentation_step, 1);
        assert!(!state.is_completed(Track::Messaging));
        assert!(state.generated_profile(Track::Documentation).is_none());
        assert!(state.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range_cursor() {
        let state = AppState {
            documentation_step: 8,
            ..AppState::default()
        };
        assert!(state.validate().unwrap_err().is_invalid_step());

        let state = AppState {
            messaging_step: 0,
            ..AppState::default()
        };
        assert!(state.validate().is_err());
    }

    #[test]
    fn test_root_keys() {
        let json = serde_json::to_value(AppState::default()).unwrap();
        let mut keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "documentationProfile",
                "documentationStep",
                "messagingProfile",
                "messagingStep"
            ]
        );
    }
}
