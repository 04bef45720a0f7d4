//! Secret configuration domain model (`secret.json`).

use serde::{Deserialize, Serialize};

/// Root of `secret.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretConfig {
    /// Claude API configuration
    #[serde(default)]
    pub claude: Option<ClaudeConfig>,
}

/// Claude API configuration.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaudeConfig {
    pub api_key: String,
    #[serde(default)]
    pub model_name: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
}

// Keeps the key out of logs and panics.
impl std::fmt::Debug for ClaudeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClaudeConfig")
            .field("api_key", &"***")
            .field("model_name", &self.model_name)
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_secret() {
        let config: SecretConfig =
            serde_json::from_str(r#"{ "claude": { "api_key": "sk-test" } }"#).unwrap();
        let claude = config.claude.unwrap();
        assert_eq!(claude.api_key, "sk-test");
        assert!(claude.model_name.is_none());
        assert!(!format!("{:?}", claude).contains("sk-test"));
    }

    #[test]
    fn test_empty_secret() {
        let config: SecretConfig = serde_json::from_str("{}").unwrap();
        assert!(config.claude.is_none());
    }
}
