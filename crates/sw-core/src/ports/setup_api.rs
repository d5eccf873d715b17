use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::ApiError;
use crate::setup::{LibraryType, PrivacyLevel, SetupStatus};

#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerRequest {
    pub email: String,
    pub password: String,
    pub display_name: String,
}

impl std::fmt::Debug for OwnerRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OwnerRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("display_name", &self.display_name)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerCreated {
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryRequest {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub library_type: LibraryType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryCreated {
    pub id: String,
}

/// Server operations consumed by the wizard.
#[async_trait]
pub trait SetupApiPort: Send + Sync {
    async fn get_setup_status(&self) -> Result<SetupStatus, ApiError>;

    /// Fails with `Validation` or `Conflict` (owner already exists).
    async fn create_owner(&self, request: OwnerRequest) -> Result<OwnerCreated, ApiError>;

    /// Fails with `Validation` (duplicate name/path) or `Io`.
    async fn create_library(&self, request: LibraryRequest) -> Result<LibraryCreated, ApiError>;

    async fn save_privacy_settings(&self, level: PrivacyLevel) -> Result<(), ApiError>;

    /// Best effort; callers proceed regardless of the outcome.
    async fn complete_setup(&self) -> Result<(), ApiError>;
}
