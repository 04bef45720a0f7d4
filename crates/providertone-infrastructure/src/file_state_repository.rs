//! File-backed state repository.
//!
//! Stores the whole `AppState` as one versioned JSON blob. Uses version-migrate
//! for schema versioning.
//!
//! File location: `{data_dir}/providertone_profile_state.json`

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;
use version_migrate::Migrator;

use providertone_core::error::{Result, ToneError};
use providertone_core::state::{AppState, StateRepository};

use crate::dto::{APP_STATE_ENTITY, create_app_state_migrator, tag_legacy_blob};
use crate::paths::TonePaths;

/// File-based state repository with version migration support.
pub struct FileStateRepository {
    path: PathBuf,
    migrator: Migrator,
}

impl FileStateRepository {
    /// Creates a repository at the platform default location.
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(TonePaths::state_file()?))
    }

    /// Creates a repository at a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            migrator: create_app_state_migrator(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> Result<PathBuf> {
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| ToneError::io(format!("Path has no file name: {}", self.path.display())))?;
        let mut tmp_name = file_name.to_os_string();
        tmp_name.push(".tmp");
        Ok(self.path.with_file_name(tmp_name))
    }

    /// Parses a stored blob into a validated state.
    fn decode(&self, content: &str) -> Result<AppState> {
        let mut value: serde_json::Value = serde_json::from_str(content)?;
        if tag_legacy_blob(&mut value) {
            debug!("[FileStateRepository] Unversioned blob, reading as legacy layout");
        }

        let state: AppState = self
            .migrator
            .load_flat_from(APP_STATE_ENTITY, value)
            .map_err(|e| ToneError::migration(format!("Failed to migrate app state: {}", e)))?;

        state.validate()?;
        Ok(state)
    }
}

#[async_trait]
impl StateRepository for FileStateRepository {
    async fn load(&self) -> Result<Option<AppState>> {
        if !fs::try_exists(&self.path).await? {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| ToneError::io(format!("Failed to read app state: {}", e)))?;

        if content.trim().is_empty() {
            return Ok(None);
        }

        self.decode(&content).map(Some)
    }

    async fn save(&self, state: &AppState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ToneError::io(format!("Failed to create directory: {}", e)))?;
        }

        // Serialize using migrator (includes version info)
        let serialized = self.migrator.save_domain_flat(APP_STATE_ENTITY, state.clone())?;

        // Write to a sibling temp file, then rename over the target
        let tmp_path = self.temp_path()?;
        let mut tmp_file = fs::File::create(&tmp_path).await?;
        tmp_file.write_all(serialized.as_bytes()).await?;
        tmp_file.sync_all().await?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| ToneError::io(format!("Failed to replace app state: {}", e)))?;

        debug!("[FileStateRepository] Saved app state to {}", self.path.display());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use providertone_core::profile::*;
    use providertone_core::store::ProfileStore;
    use providertone_core::track::Track;
    use tempfile::TempDir;

    fn repo_in(dir: &TempDir) -> FileStateRepository {
        FileStateRepository::with_path(dir.path().join("providertone_profile_state.json"))
    }

    #[tokio::test]
    async fn test_load_none_when_not_exists() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repo_in(&temp_dir);
        assert!(repo.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_round_trip_fully_populated_state() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repo_in(&temp_dir);

        let mut store = ProfileStore::new();
        store.set_section(
            MessagingColdResponsesPatch::default()
                .scenario_1a("a")
                .scenario_1b("b")
                .scenario_1c("c")
                .into(),
        );
        store.set_section(
            MessagingPairSelectionsPatch::default()
                .pair_2a(PairSelection::chosen(PairChoice::A).with_edits("shorter"))
                .into(),
        );
        store.set_section(
            MessagingAntiExamplesPatch::default()
                .closers_never_used(vec!["Best,".to_string(), "Thanks!".to_string()])
                .into(),
        );
        store.set_section(SectionUpdate::edit_capture(
            "scenario5B".parse().unwrap(),
            EditCapture::generated("note").with_edited("my note"),
        ));
        store.set_section(
            DocumentationSpecialtyPatch::default()
                .practice_type("family-medicine")
                .chronic_disease_doc_style(Some("problem list".to_string()))
                .into(),
        );
        store.set_user_corrections(Track::Messaging, Some("less formal".into()));
        store.complete(Track::Messaging);
        store.set_step(Track::Documentation, 6).unwrap();

        repo.save(store.state()).await.unwrap();
        let loaded = repo.load().await.unwrap().unwrap();
        assert_eq!(&loaded, store.state());
    }

    #[tokio::test]
    async fn test_saved_blob_has_version_and_no_temp_file_left() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repo_in(&temp_dir);
        repo.save(&AppState::default()).await.unwrap();

        let content = std::fs::read_to_string(repo.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["version"], "1.0.0");
        assert!(!temp_dir.path().join("providertone_profile_state.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_legacy_unversioned_blob_is_read() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repo_in(&temp_dir);

        let mut legacy = serde_json::to_value(AppState::default()).unwrap();
        legacy["messagingStep"] = serde_json::json!(3);
        legacy["messagingProfile"]["coldResponses"]["scenario1A"] = serde_json::json!("hi");
        std::fs::write(repo.path(), legacy.to_string()).unwrap();

        let loaded = repo.load().await.unwrap().unwrap();
        assert_eq!(loaded.messaging_step, 3);
        assert_eq!(loaded.messaging_profile.cold_responses.scenario_1a, "hi");
    }

    #[tokio::test]
    async fn test_corrupt_or_invalid_blob_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repo_in(&temp_dir);

        std::fs::write(repo.path(), "{ not json").unwrap();
        assert!(repo.load().await.unwrap_err().is_serialization());

        let mut bad_step = serde_json::to_value(AppState::default()).unwrap();
        bad_step["documentationStep"] = serde_json::json!(12);
        std::fs::write(repo.path(), bad_step.to_string()).unwrap();
        assert!(repo.load().await.unwrap_err().is_invalid_step());
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repo_in(&temp_dir);
        repo.save(&AppState::default()).await.unwrap();
        repo.clear().await.unwrap();
        assert!(repo.load().await.unwrap().is_none());
        repo.clear().await.unwrap();
    }
}
