//! Answer shapes shared by both tracks.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, ToneError};
use crate::track::Track;

/// Side chosen in a contrastive pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PairChoice {
    A,
    B,
}

impl PairChoice {
    pub fn as_str(&self) -> &'static str {
        match self {
            PairChoice::A => "A",
            PairChoice::B => "B",
        }
    }
}

impl fmt::Display for PairChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A forced choice between two pre-written variants, with optional edited text.
///
/// `edits` is only expected to be set once `selected` is. The store does not
/// enforce this; consumers of the answers rely on callers respecting it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairSelection {
    pub selected: Option<PairChoice>,
    pub edits: Option<String>,
}

impl PairSelection {
    pub fn chosen(choice: PairChoice) -> Self {
        Self {
            selected: Some(choice),
            edits: None,
        }
    }

    pub fn with_edits(mut self, edits: impl Into<String>) -> Self {
        self.edits = Some(edits.into());
        self
    }

    pub fn is_selected(&self) -> bool {
        self.selected.is_some()
    }
}

/// A generated draft together with the provider's edited version of it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditCapture {
    pub original: String,
    pub edited: String,
}

impl EditCapture {
    /// A freshly generated draft: both sides start as the draft text.
    pub fn generated(draft: impl Into<String>) -> Self {
        let draft = draft.into();
        Self {
            original: draft.clone(),
            edited: draft,
        }
    }

    /// Keeps the original draft and replaces the edited side.
    pub fn with_edited(&self, edited: impl Into<String>) -> Self {
        Self {
            original: self.original.clone(),
            edited: edited.into(),
        }
    }
}

/// A 1-10 score with a short behavioral description, as produced by synthesis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredTrait {
    pub score: f64,
    pub description: String,
}

/// Things the generated voice must never do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NegativeConstraints {
    pub never_use_phrases: Vec<String>,
    pub never_use_patterns: Vec<String>,
    pub avoid: Vec<String>,
}

/// Which of the three edit-capture slots of a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditSlot {
    A,
    B,
    C,
}

impl EditSlot {
    pub const ALL: [EditSlot; 3] = [EditSlot::A, EditSlot::B, EditSlot::C];

    fn letter(&self) -> char {
        match self {
            EditSlot::A => 'A',
            EditSlot::B => 'B',
            EditSlot::C => 'C',
        }
    }
}

/// Identifies one edit-capture scenario, e.g. `scenario4A` (messaging) or
/// `scenario5C` (documentation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EditScenarioId {
    pub track: Track,
    pub slot: EditSlot,
}

impl EditScenarioId {
    pub fn new(track: Track, slot: EditSlot) -> Self {
        Self { track, slot }
    }

    /// The three edit scenarios of a track, in display order.
    pub fn all(track: Track) -> [EditScenarioId; 3] {
        EditSlot::ALL.map(|slot| EditScenarioId::new(track, slot))
    }

    fn step_digit(track: Track) -> char {
        match track {
            Track::Messaging => '4',
            Track::Documentation => '5',
        }
    }
}

impl fmt::Display for EditScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "scenario{}{}",
            Self::step_digit(self.track),
            self.slot.letter()
        )
    }
}

impl FromStr for EditScenarioId {
    type Err = ToneError;

    fn from_str(s: &str) -> Result<Self> {
        Track::ALL
            .iter()
            .flat_map(|track| EditScenarioId::all(*track))
            .find(|id| id.to_string() == s)
            .ok_or_else(|| ToneError::config(format!("Unknown edit scenario '{}'", s)))
    }
}
