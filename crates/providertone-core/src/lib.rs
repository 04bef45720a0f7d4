//! Domain core for ProviderTone: the answer schema, the profile store state
//! machine, the completion gate, and the contracts for external generation.

pub mod config;
pub mod content;
pub mod error;
pub mod export;
pub mod gate;
pub mod generation;
pub mod profile;
pub mod state;
pub mod store;
pub mod track;

// Re-export common types
pub use error::{Result, ToneError};
pub use state::{AppState, StateRepository};
pub use store::{ProfileStore, Snapshot, StoreHandle};
pub use track::Track;
