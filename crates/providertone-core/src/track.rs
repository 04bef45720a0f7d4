//! The two independent wizard flows and their step catalogs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, ToneError};

/// One of the two independent wizard flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Track {
    /// Portal-messaging style capture.
    Messaging,
    /// Clinical-documentation style capture.
    Documentation,
}

impl Track {
    pub const ALL: [Track; 2] = [Track::Messaging, Track::Documentation];

    pub fn as_str(&self) -> &'static str {
        match self {
            Track::Messaging => "messaging",
            Track::Documentation => "documentation",
        }
    }

    /// Human-facing track title.
    pub fn title(&self) -> &'static str {
        match self {
            Track::Messaging => "Portal Messages",
            Track::Documentation => "Clinical Documentation",
        }
    }

    /// Ordered step catalog for this track.
    pub fn steps(&self) -> &'static [StepInfo] {
        match self {
            Track::Messaging => MESSAGING_STEPS,
            Track::Documentation => DOCUMENTATION_STEPS,
        }
    }

    /// Number of steps in this track (6 for messaging, 7 for documentation).
    pub fn step_count(&self) -> u32 {
        self.steps().len() as u32
    }

    /// Returns the step with the given 1-based number.
    pub fn step(&self, number: u32) -> Option<&'static StepInfo> {
        self.steps().iter().find(|s| s.number == number)
    }

    /// Rejects step cursors outside `1..=step_count`.
    pub fn check_step(&self, step: u32) -> Result<()> {
        if (1..=self.step_count()).contains(&step) {
            Ok(())
        } else {
            Err(ToneError::invalid_step(self.as_str(), step, self.step_count()))
        }
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Track {
    type Err = ToneError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "messaging" => Ok(Track::Messaging),
            "documentation" => Ok(Track::Documentation),
            other => Err(ToneError::config(format!("Unknown track '{}'", other))),
        }
    }
}

/// A single wizard step as shown in navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepInfo {
    pub number: u32,
    pub title: &'static str,
    pub short_title: &'static str,
}

const fn step(number: u32, title: &'static str, short_title: &'static str) -> StepInfo {
    StepInfo {
        number,
        title,
        short_title,
    }
}

pub const MESSAGING_STEPS: &[StepInfo] = &[
    step(1, "Cold Generation", "Write"),
    step(2, "Contrastive Pairs", "Choose"),
    step(3, "Anti-Examples", "Avoid"),
    step(4, "Edit Capture", "Refine"),
    step(5, "Values Calibration", "Calibrate"),
    step(6, "Summary", "Review"),
];

pub const DOCUMENTATION_STEPS: &[StepInfo] = &[
    step(1, "Structure Preferences", "Structure"),
    step(2, "Cold Generation", "Write"),
    step(3, "Contrastive Pairs", "Choose"),
    step(4, "Anti-Examples", "Avoid"),
    step(5, "Edit Capture", "Refine"),
    step(6, "Values Calibration", "Calibrate"),
    step(7, "Summary", "Review"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_counts() {
        assert_eq!(Track::Messaging.step_count(), 6);
        assert_eq!(Track::Documentation.step_count(), 7);
    }

    #[test]
    fn test_check_step_bounds() {
        assert!(Track::Messaging.check_step(1).is_ok());
        assert!(Track::Messaging.check_step(6).is_ok());
        assert!(Track::Messaging.check_step(0).is_err());
        assert!(Track::Messaging.check_step(7).is_err());
        assert!(Track::Documentation.check_step(7).is_ok());
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("Messaging".parse::<Track>().unwrap(), Track::Messaging);
        assert_eq!(Track::Documentation.to_string(), "documentation");
        assert!("billing".parse::<Track>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Track::Documentation).unwrap();
        assert_eq!(json, "\"documentation\"");
    }
}
