//! Persistence adapter.
//!
//! Restores the store from the repository at startup and mirrors every later
//! change back to it. Read failures fall back to defaults; write failures are
//! logged and the in-memory state stays authoritative.

use std::sync::Arc;

use providertone_core::error::Result;
use providertone_core::state::StateRepository;
use providertone_core::store::{Snapshot, StoreHandle};
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Whether startup found a usable stored state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HydrateOutcome {
    Restored,
    /// Nothing was stored yet.
    Empty,
    /// The stored state was unreadable or invalid; defaults are in use.
    Discarded,
}

/// Serializes writes and remembers the newest revision on disk.
struct Writer {
    repository: Arc<dyn StateRepository>,
    saved_revision: Mutex<Option<u64>>,
}

impl Writer {
    /// Saves `snapshot` unless a newer or equal revision is already stored.
    async fn write(&self, snapshot: &Snapshot) -> Result<bool> {
        let mut saved = self.saved_revision.lock().await;
        if saved.is_some_and(|revision| revision >= snapshot.revision) {
            return Ok(false);
        }
        self.repository.save(&snapshot.state).await?;
        *saved = Some(snapshot.revision);
        Ok(true)
    }
}

pub struct PersistenceAdapter {
    store: StoreHandle,
    writer: Arc<Writer>,
    task: Option<JoinHandle<()>>,
}

impl PersistenceAdapter {
    pub fn new(store: StoreHandle, repository: Arc<dyn StateRepository>) -> Self {
        Self {
            store,
            writer: Arc::new(Writer {
                repository,
                saved_revision: Mutex::new(None),
            }),
            task: None,
        }
    }

    /// Loads the stored state into the store. Never fails.
    pub async fn hydrate(&self) -> HydrateOutcome {
        match self.writer.repository.load().await {
            Ok(Some(state)) => match self.store.load_state(state) {
                Ok(_) => {
                    info!("[Persistence] Restored saved wizard state");
                    HydrateOutcome::Restored
                }
                Err(e) => {
                    warn!("[Persistence] Ignoring stored state: {}", e);
                    HydrateOutcome::Discarded
                }
            },
            Ok(None) => {
                debug!("[Persistence] No stored state, starting fresh");
                HydrateOutcome::Empty
            }
            Err(e) => {
                warn!("[Persistence] Could not read stored state, starting fresh: {}", e);
                HydrateOutcome::Discarded
            }
        }
    }

    /// Starts mirroring store changes made from now on.
    ///
    /// Writes run on a background task; mutations never wait for them, and
    /// bursts of changes collapse into a write of the latest snapshot.
    pub fn start(&mut self) {
        if self.task.is_some() {
            return;
        }
        // Subscribing here, before the task is polled, marks only the
        // current snapshot as seen; later mutations still wake the mirror.
        let receiver = self.store.subscribe();
        let writer = self.writer.clone();
        self.task = Some(tokio::spawn(mirror(receiver, writer)));
        debug!("[Persistence] Mirroring store changes");
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Writes the current snapshot now if it is newer than what is stored.
    pub async fn flush(&self) -> Result<()> {
        let snapshot = self.store.snapshot();
        if self.writer.write(&snapshot).await? {
            debug!("[Persistence] Flushed revision {}", snapshot.revision);
        }
        Ok(())
    }

    /// Flushes pending changes and stops mirroring.
    pub async fn shutdown(&mut self) -> Result<()> {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.flush().await
    }
}

impl Drop for PersistenceAdapter {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn mirror(mut receiver: watch::Receiver<Snapshot>, writer: Arc<Writer>) {
    while receiver.changed().await.is_ok() {
        let snapshot = receiver.borrow_and_update().clone();
        match writer.write(&snapshot).await {
            Ok(true) => debug!("[Persistence] Saved revision {}", snapshot.revision),
            Ok(false) => {}
            Err(e) => warn!("[Persistence] Failed to save state: {}", e),
        }
    }
}
