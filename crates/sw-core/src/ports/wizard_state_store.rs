use async_trait::async_trait;

use crate::setup::WizardState;

/// Key/value persistence for wizard progress.
///
/// Two keys: the serialized [`WizardState`] blob and a "setup in progress"
/// flag. The flag outlives a lost or corrupt blob so the host app can still
/// tell an interrupted first run exists. No validation happens here.
#[async_trait]
pub trait WizardStateStorePort: Send + Sync {
    /// `None` when nothing is stored or the blob cannot be decoded.
    async fn load(&self) -> Option<WizardState>;

    async fn save(&self, state: &WizardState) -> anyhow::Result<()>;

    /// Remove both the blob and the in-progress flag.
    async fn clear(&self) -> anyhow::Result<()>;

    async fn mark_setup_in_progress(&self) -> anyhow::Result<()>;

    async fn is_setup_in_progress(&self) -> anyhow::Result<bool>;
}
