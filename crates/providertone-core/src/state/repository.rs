//! State repository trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::state::model::AppState;

/// Durable slot holding the whole `AppState` as one unit.
#[async_trait]
pub trait StateRepository: Send + Sync {
    /// Reads the stored state.
    ///
    /// Returns `Ok(None)` when nothing has been stored yet. A stored blob that
    /// cannot be understood is an error; callers decide whether to fail open.
    async fn load(&self) -> Result<Option<AppState>>;

    /// Overwrites the stored state.
    async fn save(&self, state: &AppState) -> Result<()>;

    /// Removes the stored state.
    async fn clear(&self) -> Result<()>;
}
