//! Secret configuration file storage.
//!
//! Loads `~/.config/providertone/secret.json`. Read-only: this storage never
//! writes secrets and never validates keys.
//!
//! # Security Note
//!
//! The file is plaintext JSON and should have mode 600.

use std::path::{Path, PathBuf};

use providertone_core::config::SecretConfig;
use providertone_core::error::{Result, ToneError};

use crate::paths::TonePaths;

pub struct SecretStorage {
    path: PathBuf,
}

impl SecretStorage {
    /// Uses the default path (`~/.config/providertone/secret.json`).
    pub fn new() -> Result<Self> {
        Ok(Self {
            path: TonePaths::secret_file()?,
        })
    }

    /// Creates a SecretStorage with a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Loads and parses the file. A missing file is a `Config` error.
    pub fn load(&self) -> Result<SecretConfig> {
        if !self.path.exists() {
            return Err(ToneError::config(format!(
                "Configuration file not found at: {}",
                self.path.display()
            )));
        }

        let content = std::fs::read_to_string(&self.path)?;
        // serde_json errors carry line/column only, never the file content.
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Like [`SecretStorage::load`], but a missing file yields `Ok(None)`.
    pub fn load_optional(&self) -> Result<Option<SecretConfig>> {
        if !self.path.exists() {
            return Ok(None);
        }
        self.load().map(Some)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = SecretStorage::with_path(temp_dir.path().join("secret.json"));

        assert!(!storage.exists());
        assert!(matches!(storage.load(), Err(ToneError::Config(_))));
        assert!(storage.load_optional().unwrap().is_none());
    }

    #[test]
    fn test_load_valid_json() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("secret.json");

        let json_content = r#"{
            "claude": {
                "api_key": "test-key-123",
                "model_name": "claude-sonnet-4-20250514"
            }
        }"#;
        fs::write(&file_path, json_content).unwrap();

        let storage = SecretStorage::with_path(file_path);
        let claude = storage.load().unwrap().claude.unwrap();
        assert_eq!(claude.api_key, "test-key-123");
        assert_eq!(claude.model_name.as_deref(), Some("claude-sonnet-4-20250514"));
        assert!(claude.base_url.is_none());
    }

    #[test]
    fn test_load_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("secret.json");
        fs::write(&file_path, r#"{ invalid json"#).unwrap();

        let storage = SecretStorage::with_path(file_path);
        assert!(storage.load().unwrap_err().is_serialization());
    }
}
