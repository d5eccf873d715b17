//! In-memory wizard state store
//!
//! For hosts that cannot write to disk (and for tests). Progress is lost when
//! the process exits.

use async_trait::async_trait;
use sw_core::ports::WizardStateStorePort;
use sw_core::setup::WizardState;
use tokio::sync::Mutex;

#[derive(Default)]
pub struct InMemoryWizardStateStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    state: Option<WizardState>,
    in_progress: bool,
}

impl InMemoryWizardStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from previously saved progress.
    pub fn with_state(state: WizardState, in_progress: bool) -> Self {
        Self {
            inner: Mutex::new(Inner {
                state: Some(state),
                in_progress,
            }),
        }
    }
}

#[async_trait]
impl WizardStateStorePort for InMemoryWizardStateStore {
    async fn load(&self) -> Option<WizardState> {
        self.inner.lock().await.state.clone()
    }

    async fn save(&self, state: &WizardState) -> anyhow::Result<()> {
        self.inner.lock().await.state = Some(state.clone());
        Ok(())
    }

    async fn clear(&self) -> anyhow::Result<()> {
        let mut inner = self.inner.lock().await;
        inner.state = None;
        inner.in_progress = false;
        Ok(())
    }

    async fn mark_setup_in_progress(&self) -> anyhow::Result<()> {
        self.inner.lock().await.in_progress = true;
        Ok(())
    }

    async fn is_setup_in_progress(&self) -> anyhow::Result<bool> {
        Ok(self.inner.lock().await.in_progress)
    }
}
