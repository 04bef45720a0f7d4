//! Application layer: generation orchestration, persistence and the
//! session that wires them to the profile store.

pub mod brief;
pub mod orchestrator;
pub mod persistence;
pub mod profile_parser;
pub mod session;

pub use brief::BriefRenderer;
pub use orchestrator::{GenerationKey, GenerationOrchestrator, GenerationOutcome};
pub use persistence::{HydrateOutcome, PersistenceAdapter};
pub use profile_parser::parse_style_profile;
pub use session::ToneSession;
