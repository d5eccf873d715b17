use std::sync::Arc;

use sw_core::ports::{SetupApiPort, WizardStateStorePort};
use tracing::{info, warn};

/// Use case for finishing setup.
///
/// Finalizes on the server, then clears all persisted wizard state. Neither
/// step can fail the caller: finishing is always possible from Ready.
pub struct FinishSetup {
    api: Arc<dyn SetupApiPort>,
    store: Arc<dyn WizardStateStorePort>,
}

impl FinishSetup {
    pub fn new(api: Arc<dyn SetupApiPort>, store: Arc<dyn WizardStateStorePort>) -> Self {
        Self { api, store }
    }

    pub async fn execute(&self) {
        match self.api.complete_setup().await {
            Ok(()) => info!("setup marked complete on server"),
            Err(err) => warn!(error = %err, "complete_setup failed, finishing anyway"),
        }

        if let Err(err) = self.store.clear().await {
            warn!(error = %err, "failed to clear persisted wizard state");
        }
    }
}
