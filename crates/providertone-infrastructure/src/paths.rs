//! Unified path management for providertone files.
//!
//! All paths are resolved via `AppPaths` from the version-migrate crate so
//! every platform gets its conventional location.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/providertone/                    # Config directory
//! └── secret.json                            # API keys
//!
//! ~/.local/share/providertone/               # Data directory
//! └── providertone_profile_state.json        # Persisted wizard state
//! ```

use std::path::PathBuf;
use version_migrate::AppPaths;

use providertone_core::error::{Result, ToneError};

/// Storage key of the persisted wizard state.
pub const STATE_KEY: &str = "providertone_profile_state";

pub struct TonePaths;

impl TonePaths {
    fn app_paths() -> AppPaths {
        AppPaths::new("providertone")
    }

    /// e.g. `~/.config/providertone/`
    pub fn config_dir() -> Result<PathBuf> {
        Self::app_paths()
            .config_dir()
            .map_err(|e| ToneError::config(format!("Cannot resolve config directory: {}", e)))
    }

    /// e.g. `~/.local/share/providertone/`
    pub fn data_dir() -> Result<PathBuf> {
        Self::app_paths()
            .data_dir()
            .map_err(|e| ToneError::config(format!("Cannot resolve data directory: {}", e)))
    }

    /// Path to `secret.json`.
    ///
    /// The file holds an API key in plaintext and should be mode 600.
    pub fn secret_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("secret.json"))
    }

    /// Path to the persisted wizard state.
    pub fn state_file() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join(format!("{}.json", STATE_KEY)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names() {
        // Resolution can fail on hosts without a home directory; only check names when it works.
        if let Ok(path) = TonePaths::state_file() {
            assert!(path.ends_with("providertone_profile_state.json"));
        }
        if let Ok(path) = TonePaths::secret_file() {
            assert!(path.ends_with("secret.json"));
        }
    }
}
