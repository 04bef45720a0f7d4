//! ClaudeApiAgent - Direct REST API client for the Claude Messages API.
//!
//! Configuration priority: ~/.config/providertone/secret.json > environment variables

use providertone_core::config::ClaudeConfig;
use providertone_infrastructure::storage::SecretStorage;
use reqwest::{Client, StatusCode, header::HeaderValue};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::AgentError;

pub const DEFAULT_CLAUDE_MODEL: &str = "claude-sonnet-4-20250514";
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const MESSAGES_PATH: &str = "/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Client for one-shot, text-only Messages API calls.
#[derive(Clone)]
pub struct ClaudeApiAgent {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl fmt::Debug for ClaudeApiAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClaudeApiAgent")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ClaudeApiAgent {
    /// Creates a new agent with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Builds an agent from the `claude` section of secret.json.
    pub fn from_config(config: ClaudeConfig) -> Self {
        let model = config
            .model_name
            .unwrap_or_else(|| DEFAULT_CLAUDE_MODEL.to_string());
        let agent = Self::new(config.api_key, model);
        match config.base_url {
            Some(base_url) => agent.with_base_url(base_url),
            None => agent,
        }
    }

    /// Loads configuration from ~/.config/providertone/secret.json or environment variables.
    ///
    /// Priority:
    /// 1. ~/.config/providertone/secret.json
    /// 2. Environment variables (ANTHROPIC_API_KEY, ANTHROPIC_BASE_URL, CLAUDE_MODEL_NAME)
    ///
    /// Model name defaults to `claude-sonnet-4-20250514` if not specified.
    pub fn try_from_env() -> Result<Self, AgentError> {
        match SecretStorage::new().and_then(|storage| storage.load_optional()) {
            Ok(Some(secret_config)) => {
                if let Some(claude_config) = secret_config.claude {
                    debug!("[ClaudeApiAgent] Using credentials from secret.json");
                    return Ok(Self::from_config(claude_config));
                }
            }
            Ok(None) => {}
            Err(e) => warn!("[ClaudeApiAgent] Ignoring unreadable secret.json: {}", e),
        }

        // Fallback to environment variables
        let api_key = env::var("ANTHROPIC_API_KEY").map_err(|_| {
            AgentError::ExecutionFailed(
                "ANTHROPIC_API_KEY not found in ~/.config/providertone/secret.json or environment variables"
                    .into(),
            )
        })?;

        let model = env::var("CLAUDE_MODEL_NAME").unwrap_or_else(|_| DEFAULT_CLAUDE_MODEL.into());
        let agent = Self::new(api_key, model);
        Ok(match env::var("ANTHROPIC_BASE_URL") {
            Ok(base_url) if !base_url.trim().is_empty() => agent.with_base_url(base_url),
            _ => agent,
        })
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Points the agent at another API root, e.g. a proxy.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn messages_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), MESSAGES_PATH)
    }

    /// Sends one system + user exchange and returns the first text block.
    pub async fn complete(
        &self,
        system: &str,
        user: &str,
        max_tokens: u32,
    ) -> Result<String, AgentError> {
        if user.trim().is_empty() {
            return Err(AgentError::ExecutionFailed(
                "Claude request must include user text".into(),
            ));
        }

        let request = CreateMessageRequest {
            model: self.model.clone(),
            messages: vec![Message {
                role: "user".to_string(),
                content: vec![ContentBlock::Text {
                    text: user.to_string(),
                }],
            }],
            max_tokens,
            system: (!system.is_empty()).then(|| system.to_string()),
        };

        self.send_request(&request).await
    }

    async fn send_request(&self, body: &CreateMessageRequest) -> Result<String, AgentError> {
        debug!(
            "[ClaudeApiAgent] POST {} (model: {}, max_tokens: {})",
            self.messages_url(),
            body.model,
            body.max_tokens
        );

        let response = self
            .client
            .post(self.messages_url())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|err| AgentError::ProcessError {
                status_code: None,
                message: format!("Claude API request failed: {err}"),
                is_retryable: err.is_connect() || err.is_timeout(),
                retry_after: None,
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let retry_after = parse_retry_after(response.headers().get("retry-after"));
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Claude error body".to_string());
            return Err(map_http_error(status, body_text, retry_after));
        }

        let parsed: CreateMessageResponse = response
            .json()
            .await
            .map_err(|err| AgentError::Other(format!("Failed to parse Claude response: {err}")))?;

        extract_text_response(parsed)
    }
}

#[derive(Serialize)]
struct CreateMessageRequest {
    model: String,
    messages: Vec<Message>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
}

#[derive(Serialize)]
struct Message {
    role: String,
    content: Vec<ContentBlock>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum ContentBlock {
    Text { text: String },
}

#[derive(Deserialize)]
struct CreateMessageResponse {
    content: Vec<ContentBlockResponse>,
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum ContentBlockResponse {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Unsupported,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[allow(dead_code)]
    r#type: String,
    message: String,
}

fn extract_text_response(response: CreateMessageResponse) -> Result<String, AgentError> {
    response
        .content
        .into_iter()
        .find_map(|block| match block {
            ContentBlockResponse::Text { text } => Some(text),
            ContentBlockResponse::Unsupported => None,
        })
        .ok_or_else(|| {
            AgentError::ExecutionFailed(
                "Claude API returned no text in the response content".into(),
            )
        })
}

fn map_http_error(status: StatusCode, body: String, retry_after: Option<Duration>) -> AgentError {
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|wrapper| wrapper.error.message)
        .unwrap_or_else(|_| body.clone());

    let is_retryable = matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    );

    if let Some(delay) = retry_after {
        AgentError::process_error_with_retry_after(status.as_u16(), message, is_retryable, delay)
    } else {
        AgentError::ProcessError {
            status_code: Some(status.as_u16()),
            message,
            is_retryable,
            retry_after: None,
        }
    }
}

fn parse_retry_after(header: Option<&HeaderValue>) -> Option<Duration> {
    let value = header?.to_str().ok()?;
    // HTTP-date values are not supported
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let request = CreateMessageRequest {
            model: "m".into(),
            messages: vec![Message {
                role: "user".into(),
                content: vec![ContentBlock::Text { text: "hi".into() }],
            }],
            max_tokens: 1024,
            system: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["messages"][0]["content"][0]["type"], "text");
        assert_eq!(value["messages"][0]["content"][0]["text"], "hi");
        assert_eq!(value["max_tokens"], 1024);
        assert!(value.get("system").is_none());
    }

    #[test]
    fn test_extract_first_text_block() {
        let response: CreateMessageResponse = serde_json::from_str(
            r#"{"content":[{"type":"thinking","thinking":"..."},{"type":"text","text":"Hello"}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text_response(response).unwrap(), "Hello");

        let empty: CreateMessageResponse = serde_json::from_str(r#"{"content":[]}"#).unwrap();
        assert!(matches!(
            extract_text_response(empty),
            Err(AgentError::ExecutionFailed(_))
        ));
    }

    #[test]
    fn test_map_http_error() {
        let body = r#"{"type":"error","error":{"type":"overloaded_error","message":"Overloaded"}}"#;
        let err = map_http_error(
            StatusCode::SERVICE_UNAVAILABLE,
            body.to_string(),
            Some(Duration::from_secs(5)),
        );
        match err {
            AgentError::ProcessError {
                status_code,
                message,
                is_retryable,
                retry_after,
            } => {
                assert_eq!(status_code, Some(503));
                assert_eq!(message, "Overloaded");
                assert!(is_retryable);
                assert_eq!(retry_after, Some(Duration::from_secs(5)));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = map_http_error(StatusCode::UNAUTHORIZED, "nope".to_string(), None);
        assert!(!err.is_retryable());
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_parse_retry_after() {
        assert_eq!(
            parse_retry_after(Some(&HeaderValue::from_static("7"))),
            Some(Duration::from_secs(7))
        );
        assert_eq!(
            parse_retry_after(Some(&HeaderValue::from_static(
                "Wed, 21 Oct 2015 07:28:00 GMT"
            ))),
            None
        );
        assert_eq!(parse_retry_after(None), None);
    }

    #[test]
    fn test_from_config() {
        let agent = ClaudeApiAgent::from_config(ClaudeConfig {
            api_key: "secret-key".into(),
            model_name: None,
            base_url: Some("http://localhost:8080/".into()),
        });
        assert_eq!(agent.model(), DEFAULT_CLAUDE_MODEL);
        assert_eq!(agent.messages_url(), "http://localhost:8080/v1/messages");
        assert!(!format!("{agent:?}").contains("secret-key"));
    }
}
