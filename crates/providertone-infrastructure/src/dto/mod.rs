//! Versioned DTOs for persisted data.

pub mod app_state;

pub use app_state::{
    APP_STATE_ENTITY, AppStateV1_0_0, LEGACY_VERSION, create_app_state_migrator,
    tag_legacy_blob,
};
