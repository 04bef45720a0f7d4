//! Turns the synthesis answer into a typed style profile.
//!
//! Order of attempts:
//! 1. the whole (trimmed) text as JSON;
//! 2. the slice from the first `{` to the last `}`;
//! 3. the first balanced top-level object, scanning with string awareness.
//!
//! A profile is only returned when one attempt yields a complete object of the
//! track's shape; anything else is `MalformedResponse`.

use providertone_core::error::{Result, ToneError};
use providertone_core::profile::{
    DocumentationStyleProfile, GeneratedProfile, MessagingStyleProfile,
};
use providertone_core::track::Track;
use serde::de::DeserializeOwned;
use tracing::debug;

pub fn parse_style_profile(track: Track, text: &str) -> Result<GeneratedProfile> {
    match track {
        Track::Messaging => parse_with_fallbacks::<MessagingStyleProfile>(text)
            .map(GeneratedProfile::Messaging),
        Track::Documentation => parse_with_fallbacks::<DocumentationStyleProfile>(text)
            .map(GeneratedProfile::Documentation),
    }
}

fn parse_with_fallbacks<T: DeserializeOwned>(text: &str) -> Result<T> {
    let trimmed = text.trim();

    let strict_error = match serde_json::from_str::<T>(trimmed) {
        Ok(parsed) => return Ok(parsed),
        Err(e) => e,
    };

    if let Some(slice) = outer_braces(trimmed) {
        if let Ok(parsed) = serde_json::from_str::<T>(slice) {
            debug!("[ProfileParser] Parsed outer brace slice");
            return Ok(parsed);
        }
    }

    if let Some(slice) = first_balanced_object(trimmed) {
        if let Ok(parsed) = serde_json::from_str::<T>(slice) {
            debug!("[ProfileParser] Parsed first balanced object");
            return Ok(parsed);
        }
    }

    Err(ToneError::malformed_response(format!(
        "No style profile object found in response ({} chars): {}",
        text.len(),
        strict_error
    )))
}

/// The largest brace-delimited slice: first `{` through last `}`.
fn outer_braces(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// The first `{ ... }` whose braces balance, ignoring braces inside strings.
fn first_balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }
    None
}
