use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::ApiError;
use crate::setup::PathCheck;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathCreated {
    pub success: bool,
}

/// Checks and creates directories where the server will read media from.
#[async_trait]
pub trait PathProbePort: Send + Sync {
    /// Fails with `Io` (unreadable parent, permission denied).
    async fn check_path(&self, path: &str) -> Result<PathCheck, ApiError>;

    /// Fails with `Io`.
    async fn create_path(&self, path: &str) -> Result<PathCreated, ApiError>;
}
