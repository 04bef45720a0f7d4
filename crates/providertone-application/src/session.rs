//! Composition root for one wizard session.

use std::sync::Arc;

use chrono::Utc;
use providertone_core::error::Result;
use providertone_core::export::ProfileExport;
use providertone_core::gate;
use providertone_core::generation::{DraftGenerator, ProfileSynthesizer};
use providertone_core::state::StateRepository;
use providertone_core::store::StoreHandle;
use providertone_core::track::Track;
use providertone_infrastructure::FileStateRepository;
use providertone_interaction::StyleAgent;
use tracing::info;

use crate::orchestrator::GenerationOrchestrator;
use crate::persistence::{HydrateOutcome, PersistenceAdapter};

/// Owns the store and its persistence for the lifetime of a session.
pub struct ToneSession {
    store: StoreHandle,
    persistence: PersistenceAdapter,
    hydrated: HydrateOutcome,
}

impl ToneSession {
    /// Restores saved answers from `repository` and starts mirroring changes.
    pub async fn open(repository: Arc<dyn StateRepository>) -> Self {
        let store = StoreHandle::default();
        let mut persistence = PersistenceAdapter::new(store.clone(), repository);
        let hydrated = persistence.hydrate().await;
        persistence.start();
        info!("[ToneSession] Session opened ({:?})", hydrated);
        Self {
            store,
            persistence,
            hydrated,
        }
    }

    /// Opens a session backed by the state file in the platform data dir.
    pub async fn open_default() -> Result<Self> {
        let repository = FileStateRepository::new()?;
        info!("[ToneSession] State file: {}", repository.path().display());
        Ok(Self::open(Arc::new(repository)).await)
    }

    pub fn store(&self) -> &StoreHandle {
        &self.store
    }

    pub fn hydrated(&self) -> HydrateOutcome {
        self.hydrated
    }

    /// An orchestrator that writes its results into this session's store.
    pub fn orchestrator<G>(&self, generator: Arc<G>) -> Result<GenerationOrchestrator>
    where
        G: DraftGenerator + ProfileSynthesizer + 'static,
    {
        GenerationOrchestrator::new(self.store.clone(), generator.clone(), generator)
    }

    /// An orchestrator backed by the Claude API, configured from secret.json
    /// or the environment.
    pub fn style_orchestrator(&self) -> Result<GenerationOrchestrator> {
        self.orchestrator(Arc::new(StyleAgent::try_from_env()?))
    }

    /// Whether the current step of `track` has all its required answers.
    pub fn can_proceed(&self, track: Track) -> bool {
        let state = self.store.state();
        gate::can_proceed(&state, track, state.step(track))
    }

    pub fn export(&self) -> ProfileExport {
        ProfileExport::from_state(&self.store.state(), Utc::now())
    }

    /// Writes any pending change and stops mirroring.
    pub async fn close(mut self) -> Result<()> {
        self.persistence.shutdown().await?;
        info!("[ToneSession] Session closed");
        Ok(())
    }
}
