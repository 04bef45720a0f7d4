use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use super::ProfileStore;
use crate::error::Result;
use crate::profile::{GeneratedProfile, SectionUpdate};
use crate::state::AppState;
use crate::track::Track;

/// An immutable view of the store after a given revision.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub revision: u64,
    pub state: Arc<AppState>,
}

/// Shared, cloneable access to a single [`ProfileStore`].
///
/// This is the only mutation channel: the orchestrator and the persistence
/// adapter both go through it. Every mutation that changes the revision
/// publishes a fresh [`Snapshot`] to subscribers.
#[derive(Clone)]
pub struct StoreHandle {
    store: Arc<Mutex<ProfileStore>>,
    snapshots: Arc<watch::Sender<Snapshot>>,
}

impl Default for StoreHandle {
    fn default() -> Self {
        Self::new(ProfileStore::new())
    }
}

impl StoreHandle {
    pub fn new(store: ProfileStore) -> Self {
        let initial = Snapshot {
            revision: store.revision(),
            state: Arc::new(store.state().clone()),
        };
        let (tx, _rx) = watch::channel(initial);
        Self {
            store: Arc::new(Mutex::new(store)),
            snapshots: Arc::new(tx),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ProfileStore> {
        // Store operations cannot leave the state half-written, so a poisoned
        // lock still guards a consistent value.
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `f` against the store and publishes a snapshot if it changed anything.
    pub fn update<R>(&self, f: impl FnOnce(&mut ProfileStore) -> R) -> R {
        let mut store = self.lock();
        let before = store.revision();
        let result = f(&mut store);
        if store.revision() != before {
            self.snapshots.send_replace(Snapshot {
                revision: store.revision(),
                state: Arc::new(store.state().clone()),
            });
        }
        result
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.snapshots.borrow().clone()
    }

    pub fn state(&self) -> Arc<AppState> {
        self.snapshots.borrow().state.clone()
    }

    pub fn revision(&self) -> u64 {
        self.snapshots.borrow().revision
    }

    /// Receives every snapshot published after this call.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshots.subscribe()
    }

    pub fn set_section(&self, update: impl Into<SectionUpdate>) -> Arc<AppState> {
        let update = update.into();
        self.update(|store| {
            store.set_section(update);
        });
        self.state()
    }

    pub fn set_generated_profile(&self, profile: GeneratedProfile) -> Arc<AppState> {
        self.update(|store| {
            store.set_generated_profile(profile);
        });
        self.state()
    }

    pub fn set_user_corrections(&self, track: Track, corrections: Option<String>) -> Arc<AppState> {
        self.update(|store| {
            store.set_user_corrections(track, corrections);
        });
        self.state()
    }

    pub fn complete(&self, track: Track) -> bool {
        self.update(|store| store.complete(track))
    }

    pub fn complete_at(&self, track: Track, at: DateTime<Utc>) -> bool {
        self.update(|store| store.complete_at(track, at))
    }

    pub fn set_step(&self, track: Track, step: u32) -> Result<Arc<AppState>> {
        self.update(|store| store.set_step(track, step).map(|_| ()))?;
        Ok(self.state())
    }

    pub fn load_state(&self, state: AppState) -> Result<Arc<AppState>> {
        self.update(|store| store.load_state(state).map(|_| ()))?;
        Ok(self.state())
    }

    pub fn reset_all(&self) -> Arc<AppState> {
        self.update(|store| {
            store.reset_all();
        });
        self.state()
    }
}
