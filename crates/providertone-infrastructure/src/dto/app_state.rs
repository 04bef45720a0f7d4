//! Persisted app state DTOs and migrations
//!
//! ## Version History
//! - **1.0.0**: Whole wizard state, field layout identical to the unversioned
//!   browser blob. Blobs without a `version` field are read as 1.0.0.

use serde::{Deserialize, Serialize};
use version_migrate::{FromDomain, IntoDomain, Versioned};

use providertone_core::profile::{DocumentationProfile, MessagingProfile};
use providertone_core::state::AppState;

/// Entity name used by the migrator.
pub const APP_STATE_ENTITY: &str = "app_state";

/// Version assumed for blobs written before versioning existed.
pub const LEGACY_VERSION: &str = "1.0.0";

/// App state DTO V1.0.0
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
#[serde(rename_all = "camelCase", default)]
pub struct AppStateV1_0_0 {
    pub messaging_profile: MessagingProfile,
    pub documentation_profile: DocumentationProfile,
    pub messaging_step: u32,
    pub documentation_step: u32,
}

impl Default for AppStateV1_0_0 {
    fn default() -> Self {
        AppStateV1_0_0::from_domain(AppState::default())
    }
}

impl IntoDomain<AppState> for AppStateV1_0_0 {
    fn into_domain(self) -> AppState {
        AppState {
            messaging_profile: self.messaging_profile,
            documentation_profile: self.documentation_profile,
            messaging_step: self.messaging_step,
            documentation_step: self.documentation_step,
        }
    }
}

impl FromDomain<AppState> for AppStateV1_0_0 {
    fn from_domain(state: AppState) -> Self {
        AppStateV1_0_0 {
            messaging_profile: state.messaging_profile,
            documentation_profile: state.documentation_profile,
            messaging_step: state.messaging_step,
            documentation_step: state.documentation_step,
        }
    }
}

/// Adds `"version": "1.0.0"` to an unversioned blob. Returns whether it did.
pub fn tag_legacy_blob(value: &mut serde_json::Value) -> bool {
    match value.as_object_mut() {
        Some(object) if !object.contains_key("version") => {
            object.insert(
                "version".to_string(),
                serde_json::Value::String(LEGACY_VERSION.to_string()),
            );
            true
        }
        _ => false,
    }
}

/// Creates a Migrator for AppState entities.
pub fn create_app_state_migrator() -> version_migrate::Migrator {
    version_migrate::migrator!("app_state" => [
        AppStateV1_0_0,
        AppState
    ], save = true)
    .expect("Failed to create app_state migrator")
}
