//! Generation orchestrator.
//!
//! Bridges the asynchronous generation calls into the synchronous profile
//! store. Every issued request gets a fresh id per [`GenerationKey`]; a
//! completion is committed only if it is still the latest request for its
//! key, so a slow, superseded response can never overwrite a newer one.
//! Nothing is written when a request starts, and failures leave the state
//! untouched.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::join_all;
use providertone_core::error::{Result, ToneError};
use providertone_core::gate;
use providertone_core::generation::{DraftGenerator, DraftRequest, ProfileSynthesizer};
use providertone_core::profile::{EditCapture, EditScenarioId, GeneratedProfile, SectionUpdate};
use providertone_core::store::StoreHandle;
use providertone_core::track::Track;
use tracing::{debug, info, warn};

use crate::brief::BriefRenderer;
use crate::profile_parser::parse_style_profile;

/// What a generation request writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationKey {
    /// One edit-capture scenario.
    Draft(EditScenarioId),
    /// A track's synthesized style profile.
    Profile(Track),
}

impl GenerationKey {
    pub fn track(&self) -> Track {
        match self {
            GenerationKey::Draft(id) => id.track,
            GenerationKey::Profile(track) => *track,
        }
    }
}

impl fmt::Display for GenerationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationKey::Draft(id) => write!(f, "draft:{}", id),
            GenerationKey::Profile(track) => write!(f, "profile:{}", track),
        }
    }
}

/// How one generation request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// The result was written to the store.
    Applied,
    /// The call failed or its answer was unusable; nothing was written.
    Failed,
    /// A newer request for the same key was issued; the result was discarded.
    Superseded,
}

impl GenerationOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, GenerationOutcome::Applied)
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct KeyState {
    in_flight: bool,
    has_generated: bool,
    latest: u64,
}

/// Per-key request bookkeeping.
#[derive(Debug, Default)]
struct GenerationRegistry {
    keys: HashMap<GenerationKey, KeyState>,
    next_id: u64,
}

impl GenerationRegistry {
    fn issue(&mut self, key: GenerationKey) -> u64 {
        self.next_id += 1;
        let entry = self.keys.entry(key).or_default();
        entry.latest = self.next_id;
        entry.in_flight = true;
        self.next_id
    }

    fn is_latest(&self, key: GenerationKey, request_id: u64) -> bool {
        self.keys.get(&key).is_some_and(|k| k.latest == request_id)
    }

    /// Clears the in-flight flag; only the latest request may do so.
    fn settle(&mut self, key: GenerationKey, request_id: u64, succeeded: bool) {
        if let Some(entry) = self.keys.get_mut(&key) {
            if entry.latest == request_id {
                entry.in_flight = false;
                entry.has_generated |= succeeded;
            }
        }
    }

    fn get(&self, key: GenerationKey) -> KeyState {
        self.keys.get(&key).copied().unwrap_or_default()
    }
}

enum Commit {
    Section(SectionUpdate),
    Profile(GeneratedProfile),
}

pub struct GenerationOrchestrator {
    store: StoreHandle,
    drafts: Arc<dyn DraftGenerator>,
    synthesizer: Arc<dyn ProfileSynthesizer>,
    briefs: BriefRenderer,
    registry: Mutex<GenerationRegistry>,
}

impl GenerationOrchestrator {
    pub fn new(
        store: StoreHandle,
        drafts: Arc<dyn DraftGenerator>,
        synthesizer: Arc<dyn ProfileSynthesizer>,
    ) -> Result<Self> {
        Ok(Self {
            store,
            drafts,
            synthesizer,
            briefs: BriefRenderer::new()?,
            registry: Mutex::new(GenerationRegistry::default()),
        })
    }

    fn registry(&self) -> MutexGuard<'_, GenerationRegistry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_generating(&self, key: GenerationKey) -> bool {
        self.registry().get(key).in_flight
    }

    /// Sticky for the orchestrator's lifetime once a request for `key` succeeded.
    pub fn has_generated(&self, key: GenerationKey) -> bool {
        self.registry().get(key).has_generated
    }

    pub fn any_generating(&self, track: Track) -> bool {
        self.registry()
            .keys
            .iter()
            .any(|(key, state)| key.track() == track && state.in_flight)
    }

    /// Drafts one edit-capture scenario and stores it as both the original
    /// and the editable text.
    pub async fn generate_draft(&self, scenario_id: EditScenarioId) -> GenerationOutcome {
        let key = GenerationKey::Draft(scenario_id);
        let request_id = self.registry().issue(key);
        debug!("[Orchestrator] Issued {} (request {})", key, request_id);

        let request = DraftRequest::from_state(&self.store.state(), scenario_id);
        let result = self
            .drafts
            .generate_draft(&request)
            .await
            .and_then(|draft| {
                if draft.trim().is_empty() {
                    Err(ToneError::generation("Draft generation returned no text"))
                } else {
                    Ok(draft)
                }
            })
            .map(|draft| {
                Commit::Section(SectionUpdate::edit_capture(
                    scenario_id,
                    EditCapture::generated(draft),
                ))
            });

        self.finish(key, request_id, result)
    }

    /// Drafts all three edit-capture scenarios of `track` concurrently.
    ///
    /// Each scenario settles on its own; one failure does not affect the others.
    pub async fn generate_all_drafts(
        &self,
        track: Track,
    ) -> Vec<(EditScenarioId, GenerationOutcome)> {
        let ids = EditScenarioId::all(track);
        let outcomes = join_all(ids.iter().map(|id| self.generate_draft(*id))).await;
        ids.into_iter().zip(outcomes).collect()
    }

    /// Synthesizes the style profile for `track` from every captured answer.
    pub async fn generate_profile(&self, track: Track) -> GenerationOutcome {
        let key = GenerationKey::Profile(track);
        let state = self.store.state();
        if !gate::can_generate_profile(&state, track) {
            warn!("[Orchestrator] {} profile is not ready to generate", track);
            return GenerationOutcome::Failed;
        }

        let request_id = self.registry().issue(key);
        debug!("[Orchestrator] Issued {} (request {})", key, request_id);

        let result = match self.briefs.synthesis_request(&state, track) {
            Ok(request) => self
                .synthesizer
                .synthesize(&request)
                .await
                .and_then(|text| parse_style_profile(track, &text))
                .map(Commit::Profile),
            Err(e) => Err(e),
        };

        self.finish(key, request_id, result)
    }

    fn finish(
        &self,
        key: GenerationKey,
        request_id: u64,
        result: Result<Commit>,
    ) -> GenerationOutcome {
        // The registry lock is held across the store write so that the
        // latest-request check and the commit cannot interleave with another
        // completion for the same key.
        let mut registry = self.registry();

        if !registry.is_latest(key, request_id) {
            match &result {
                Ok(_) => debug!("[Orchestrator] Discarding superseded result for {}", key),
                Err(e) => debug!("[Orchestrator] Superseded request for {} failed: {}", key, e),
            }
            return GenerationOutcome::Superseded;
        }

        match result {
            Ok(commit) => {
                match commit {
                    Commit::Section(update) => {
                        self.store.set_section(update);
                    }
                    Commit::Profile(profile) => {
                        self.store.set_generated_profile(profile);
                    }
                }
                registry.settle(key, request_id, true);
                info!("[Orchestrator] Applied {}", key);
                GenerationOutcome::Applied
            }
            Err(e) => {
                registry.settle(key, request_id, false);
                warn!("[Orchestrator] {} did not complete: {}", key, e);
                GenerationOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use providertone_core::generation::SynthesisRequest;
    use providertone_core::profile::DocumentationSpecialtyPatch;

    struct EchoGenerator;

    #[async_trait]
    impl DraftGenerator for EchoGenerator {
        async fn generate_draft(&self, request: &DraftRequest) -> Result<String> {
            if request.scenario_id.to_string() == "scenario4B" {
                return Ok("   ".to_string());
            }
            Ok(format!("draft for {}", request.scenario_id))
        }
    }

    #[async_trait]
    impl ProfileSynthesizer for EchoGenerator {
        async fn synthesize(&self, _request: &SynthesisRequest) -> Result<String> {
            Ok("no json here".to_string())
        }
    }

    fn orchestrator(store: &StoreHandle) -> GenerationOrchestrator {
        let generator = Arc::new(EchoGenerator);
        GenerationOrchestrator::new(store.clone(), generator.clone(), generator).unwrap()
    }

    #[test]
    fn test_registry_tracks_latest_request() {
        let mut registry = GenerationRegistry::default();
        let key = GenerationKey::Profile(Track::Messaging);

        let first = registry.issue(key);
        let second = registry.issue(key);
        assert!(!registry.is_latest(key, first));

        registry.settle(key, first, true);
        assert!(registry.get(key).in_flight);
        assert!(!registry.get(key).has_generated);

        registry.settle(key, second, true);
        assert!(!registry.get(key).in_flight);
        assert!(registry.get(key).has_generated);

        registry.issue(key);
        registry.settle(key, 3, false);
        assert!(registry.get(key).has_generated);
    }

    #[tokio::test]
    async fn test_blank_draft_is_a_failure() {
        let store = StoreHandle::default();
        let orchestrator = orchestrator(&store);

        let results = orchestrator.generate_all_drafts(Track::Messaging).await;
        let outcomes: Vec<_> = results.iter().map(|(_, o)| *o).collect();
        assert_eq!(
            outcomes,
            vec![
                GenerationOutcome::Applied,
                GenerationOutcome::Failed,
                GenerationOutcome::Applied
            ]
        );

        let state = store.state();
        let capture = &state.messaging_profile.edit_capture;
        assert_eq!(capture.scenario_4a.original, "draft for scenario4A");
        assert_eq!(capture.scenario_4a.edited, "draft for scenario4A");
        assert_eq!(capture.scenario_4b, EditCapture::default());

        let id_b: EditScenarioId = "scenario4B".parse().unwrap();
        assert!(!orchestrator.has_generated(GenerationKey::Draft(id_b)));
        assert!(!orchestrator.any_generating(Track::Messaging));
    }

    #[tokio::test]
    async fn test_profile_requires_ready_track() {
        let store = StoreHandle::default();
        let orchestrator = orchestrator(&store);

        // No practice type yet.
        assert_eq!(
            orchestrator.generate_profile(Track::Documentation).await,
            GenerationOutcome::Failed
        );
        assert!(!orchestrator.is_generating(GenerationKey::Profile(Track::Documentation)));

        store.set_section(DocumentationSpecialtyPatch::default().practice_type("pediatrics"));
        let revision = store.revision();
        assert_eq!(
            orchestrator.generate_profile(Track::Documentation).await,
            GenerationOutcome::Failed
        );
        assert!(store.state().documentation_profile.generated_profile.is_none());
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn test_key_display() {
        let id: EditScenarioId = "scenario5C".parse().unwrap();
        assert_eq!(GenerationKey::Draft(id).to_string(), "draft:scenario5C");
        assert_eq!(
            GenerationKey::Profile(Track::Messaging).to_string(),
            "profile:messaging"
        );
        assert_eq!(GenerationKey::Draft(id).track(), Track::Documentation);
    }
}
