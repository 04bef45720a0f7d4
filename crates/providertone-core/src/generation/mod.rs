//! Contracts for the two external generation calls.

pub mod request;

pub use request::{AntiExampleDigest, DraftRequest, LabeledText, PairPreference, SynthesisRequest};

use async_trait::async_trait;

use crate::error::Result;

/// Drafts one edit-capture response in the provider's voice.
#[async_trait]
pub trait DraftGenerator: Send + Sync {
    /// Returns the draft text. Any failure, including an empty draft, is an error.
    async fn generate_draft(&self, request: &DraftRequest) -> Result<String>;
}

/// Turns a track's brief into raw style-profile text.
///
/// The answer is expected to contain a single JSON object; parsing it is the
/// caller's concern.
#[async_trait]
pub trait ProfileSynthesizer: Send + Sync {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<String>;
}
