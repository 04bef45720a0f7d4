//! Human-readable synthesis brief for one track.
//!
//! The brief is a formatted document, not raw JSON: every captured answer is
//! quoted under a heading, and empty answers get an explicit placeholder so
//! the model never has to guess whether a field was skipped.

use minijinja::{Environment, Value, context};
use providertone_core::content;
use providertone_core::error::{Result, ToneError};
use providertone_core::generation::SynthesisRequest;
use providertone_core::state::AppState;
use providertone_core::track::Track;
use serde_json::json;

const MESSAGING_TEMPLATE: &str = "messaging_brief";
const DOCUMENTATION_TEMPLATE: &str = "documentation_brief";

/// Renders synthesis briefs from the current answers.
pub struct BriefRenderer {
    env: Environment<'static>,
}

impl BriefRenderer {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.add_filter("placeholder", placeholder);
        env.add_template(
            MESSAGING_TEMPLATE,
            include_str!("../templates/messaging_brief.md.j2"),
        )
        .map_err(template_error)?;
        env.add_template(
            DOCUMENTATION_TEMPLATE,
            include_str!("../templates/documentation_brief.md.j2"),
        )
        .map_err(template_error)?;
        Ok(Self { env })
    }

    pub fn render(&self, state: &AppState, track: Track) -> Result<String> {
        let corrections = state
            .user_corrections(track)
            .map(str::trim)
            .filter(|c| !c.is_empty());

        let (name, ctx) = match track {
            Track::Messaging => (
                MESSAGING_TEMPLATE,
                context! {
                    profile => Value::from_serialize(&state.messaging_profile),
                    corrections => corrections,
                },
            ),
            Track::Documentation => {
                let cold_scenarios: Vec<_> = content::cold_scenarios(track)
                    .iter()
                    .map(|s| json!({ "key": s.key, "title": s.title }))
                    .collect();
                let pairs: Vec<_> = content::pair_styles(track)
                    .iter()
                    .map(|p| json!({ "key": p.key, "title": p.title }))
                    .collect();
                (
                    DOCUMENTATION_TEMPLATE,
                    context! {
                        profile => Value::from_serialize(&state.documentation_profile),
                        cold_scenarios => cold_scenarios,
                        pairs => pairs,
                        corrections => corrections,
                    },
                )
            }
        };

        let rendered = self
            .env
            .get_template(name)
            .and_then(|template| template.render(ctx))
            .map_err(template_error)?;
        Ok(rendered.trim_end().to_string())
    }

    /// Builds the synthesis request for `track` from the answers as they are now.
    pub fn synthesis_request(&self, state: &AppState, track: Track) -> Result<SynthesisRequest> {
        Ok(SynthesisRequest {
            track,
            brief: self.render(state, track)?,
        })
    }
}

/// Substitutes `fallback` for missing, null, blank or empty values.
fn placeholder(value: Value, fallback: String) -> Value {
    let blank = value.is_undefined()
        || value.is_none()
        || value.as_str().is_some_and(|s| s.trim().is_empty())
        || value.len() == Some(0);
    if blank { Value::from(fallback) } else { value }
}

fn template_error(err: minijinja::Error) -> ToneError {
    ToneError::Serialization {
        format: "template".to_string(),
        message: err.to_string(),
    }
}
