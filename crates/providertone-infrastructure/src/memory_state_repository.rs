//! In-memory state repository for tests and ephemeral sessions.
//!
//! Holds the serialized blob rather than the value so that saves and loads go
//! through the same JSON round trip as the file repository.

use async_trait::async_trait;
use tokio::sync::Mutex;

use providertone_core::error::Result;
use providertone_core::state::{AppState, StateRepository};

#[derive(Default)]
pub struct MemoryStateRepository {
    blob: Mutex<Option<String>>,
    saves: Mutex<usize>,
}

impl MemoryStateRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with a raw stored blob, e.g. to simulate corrupt storage.
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Mutex::new(Some(blob.into())),
            saves: Mutex::new(0),
        }
    }

    /// The stored blob, if any.
    pub async fn blob(&self) -> Option<String> {
        self.blob.lock().await.clone()
    }

    /// Number of successful saves so far.
    pub async fn save_count(&self) -> usize {
        *self.saves.lock().await
    }
}

#[async_trait]
impl StateRepository for MemoryStateRepository {
    async fn load(&self) -> Result<Option<AppState>> {
        let blob = self.blob.lock().await;
        match blob.as_deref() {
            None => Ok(None),
            Some(content) => {
                let state: AppState = serde_json::from_str(content)?;
                state.validate()?;
                Ok(Some(state))
            }
        }
    }

    async fn save(&self, state: &AppState) -> Result<()> {
        let serialized = serde_json::to_string(state)?;
        *self.blob.lock().await = Some(serialized);
        *self.saves.lock().await += 1;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.blob.lock().await = None;
        Ok(())
    }
}
