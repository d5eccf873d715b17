//! File-based wizard state repository
//!
//! Persists the wizard progress blob as JSON and the "setup in progress" flag
//! as a marker file, both inside one state directory.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use sw_core::ports::WizardStateStorePort;
use sw_core::setup::WizardState;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

pub const DEFAULT_WIZARD_STATE_FILE: &str = "wizard_state.json";
pub const DEFAULT_IN_PROGRESS_FILE: &str = ".setup_in_progress";

pub struct FileWizardStateRepository {
    state_file_path: PathBuf,
    flag_file_path: PathBuf,
}

impl FileWizardStateRepository {
    /// Create repository with custom file paths
    pub fn new(state_file_path: PathBuf, flag_file_path: PathBuf) -> Self {
        Self {
            state_file_path,
            flag_file_path,
        }
    }

    /// Create repository with defaults
    pub fn with_defaults(base_dir: PathBuf) -> Self {
        Self {
            state_file_path: base_dir.join(DEFAULT_WIZARD_STATE_FILE),
            flag_file_path: base_dir.join(DEFAULT_IN_PROGRESS_FILE),
        }
    }

    async fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    async fn write_file(path: &Path, content: &[u8]) -> anyhow::Result<()> {
        Self::ensure_parent_dir(path).await?;

        let mut file = fs::File::create(path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create {}: {e}", path.display()))?;

        file.write_all(content)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to write {}: {e}", path.display()))?;

        file.sync_all()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to sync {}: {e}", path.display()))?;

        Ok(())
    }

    async fn remove_if_exists(path: &Path) -> anyhow::Result<()> {
        match fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(anyhow::anyhow!("Failed to remove {}: {e}", path.display())),
        }
    }
}

#[async_trait]
impl WizardStateStorePort for FileWizardStateRepository {
    async fn load(&self) -> Option<WizardState> {
        let content = match fs::read_to_string(&self.state_file_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %self.state_file_path.display(), error = %e, "Failed to read wizard state");
                return None;
            }
        };

        if content.trim().is_empty() {
            return None;
        }

        match serde_json::from_str(&content) {
            Ok(state) => Some(state),
            Err(e) => {
                warn!(
                    path = %self.state_file_path.display(),
                    error = %e,
                    "Discarding corrupt wizard state"
                );
                None
            }
        }
    }

    async fn save(&self, state: &WizardState) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(state)
            .map_err(|e| anyhow::anyhow!("Failed to serialize wizard state: {e}"))?;

        Self::write_file(&self.state_file_path, json.as_bytes()).await?;
        debug!(step = %state.step, "wizard state saved");
        Ok(())
    }

    async fn clear(&self) -> anyhow::Result<()> {
        Self::remove_if_exists(&self.state_file_path).await?;
        Self::remove_if_exists(&self.flag_file_path).await?;
        debug!("wizard state cleared");
        Ok(())
    }

    async fn mark_setup_in_progress(&self) -> anyhow::Result<()> {
        Self::write_file(&self.flag_file_path, b"1").await
    }

    async fn is_setup_in_progress(&self) -> anyhow::Result<bool> {
        fs::try_exists(&self.flag_file_path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to check setup flag: {e}"))
    }
}
