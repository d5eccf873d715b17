//! Local filesystem path probe
//!
//! Used when the wizard runs on the same host as the media server, so the
//! library directories can be inspected directly instead of through the API.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::Path;
use sw_core::ports::{ApiError, PathCreated, PathProbePort};
use sw_core::setup::PathCheck;
use tokio::fs;
use tracing::{debug, warn};
use uuid::Uuid;

const WRITE_PROBE_PREFIX: &str = ".sw-write-probe-";

#[derive(Debug, Default, Clone)]
pub struct LocalPathProbe;

impl LocalPathProbe {
    pub fn new() -> Self {
        Self
    }

    /// Creates and removes a uniquely named file inside `dir`.
    async fn is_dir_writable(dir: &Path) -> bool {
        let probe = dir.join(format!("{WRITE_PROBE_PREFIX}{}", Uuid::new_v4()));
        match fs::File::create(&probe).await {
            Ok(file) => {
                drop(file);
                if let Err(e) = fs::remove_file(&probe).await {
                    warn!(path = %probe.display(), error = %e, "failed to remove write probe");
                }
                true
            }
            Err(e) => {
                debug!(dir = %dir.display(), error = %e, "directory is not writable");
                false
            }
        }
    }

    fn require_absolute(path: &str) -> Result<&Path, ApiError> {
        let path = Path::new(path);
        if path.is_absolute() {
            Ok(path)
        } else {
            Err(ApiError::Validation(format!(
                "path must be absolute: {}",
                path.display()
            )))
        }
    }
}

#[async_trait]
impl PathProbePort for LocalPathProbe {
    async fn check_path(&self, path: &str) -> Result<PathCheck, ApiError> {
        let path = Self::require_absolute(path)?;
        let mut check = PathCheck::default();

        match fs::metadata(path).await {
            Ok(meta) => {
                check.exists = true;
                check.is_directory = meta.is_dir();
                check.is_writable = if meta.is_dir() {
                    Self::is_dir_writable(path).await
                } else {
                    !meta.permissions().readonly()
                };
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                return Err(ApiError::Io(format!(
                    "cannot read {}: {e}",
                    path.display()
                )))
            }
        }

        if let Some(parent) = path.parent() {
            match fs::metadata(parent).await {
                Ok(meta) if meta.is_dir() => {
                    check.parent_exists = true;
                    check.parent_writable = Self::is_dir_writable(parent).await;
                }
                Ok(_) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(ApiError::Io(format!(
                        "cannot read {}: {e}",
                        parent.display()
                    )))
                }
            }
        }

        Ok(check)
    }

    async fn create_path(&self, path: &str) -> Result<PathCreated, ApiError> {
        let path = Self::require_absolute(path)?;
        fs::create_dir_all(path)
            .await
            .map_err(|e| ApiError::Io(format!("failed to create {}: {e}", path.display())))?;
        Ok(PathCreated { success: true })
    }
}
