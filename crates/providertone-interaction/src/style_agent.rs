//! Generation service backed by the Claude Messages API.

use async_trait::async_trait;
use providertone_core::error::{Result, ToneError};
use providertone_core::generation::{
    DraftGenerator, DraftRequest, ProfileSynthesizer, SynthesisRequest,
};
use tracing::{debug, info};

use crate::claude_api_agent::ClaudeApiAgent;
use crate::error::AgentError;
use crate::prompts;

pub const DRAFT_MAX_TOKENS: u32 = 1024;
pub const SYNTHESIS_MAX_TOKENS: u32 = 4096;

/// Drafts edit-capture responses and synthesizes style profiles.
#[derive(Debug, Clone)]
pub struct StyleAgent {
    agent: ClaudeApiAgent,
}

impl StyleAgent {
    pub fn new(agent: ClaudeApiAgent) -> Self {
        Self { agent }
    }

    /// Resolves credentials from secret.json or the environment.
    pub fn try_from_env() -> Result<Self> {
        let agent = ClaudeApiAgent::try_from_env().map_err(|e| match e {
            AgentError::ExecutionFailed(message) => ToneError::config(message),
            other => other.into(),
        })?;
        info!("[StyleAgent] Using model {}", agent.model());
        Ok(Self::new(agent))
    }
}

#[async_trait]
impl DraftGenerator for StyleAgent {
    async fn generate_draft(&self, request: &DraftRequest) -> Result<String> {
        debug!("[StyleAgent] Drafting {}", request.scenario_id);
        let system = prompts::draft_system_prompt(request);
        let user = prompts::draft_user_message(request);

        let draft = self.agent.complete(&system, &user, DRAFT_MAX_TOKENS).await?;
        let draft = draft.trim();
        if draft.is_empty() {
            return Err(ToneError::generation(format!(
                "Empty draft returned for {}",
                request.scenario_id
            )));
        }
        Ok(draft.to_string())
    }
}

#[async_trait]
impl ProfileSynthesizer for StyleAgent {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<String> {
        debug!(
            "[StyleAgent] Synthesizing {} profile from a {} byte brief",
            request.track,
            request.brief.len()
        );
        let system = prompts::synthesis_system_prompt(request.track);
        let user = prompts::synthesis_user_message(request);

        Ok(self
            .agent
            .complete(&system, &user, SYNTHESIS_MAX_TOKENS)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use providertone_core::state::AppState;

    #[tokio::test]
    async fn test_unreachable_service_is_a_generation_failure() {
        // Nothing listens on the discard port.
        let agent = ClaudeApiAgent::new("test-key", "test-model").with_base_url("http://127.0.0.1:9");
        let style_agent = StyleAgent::new(agent);

        let request = DraftRequest::from_state(&AppState::default(), "scenario4B".parse().unwrap());
        let err = style_agent.generate_draft(&request).await.unwrap_err();
        assert!(err.is_generation_failure());
    }
}
