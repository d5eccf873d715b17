//! Server status reconciliation.
//!
//! Corrects the locally resumed step against the server's setup status,
//! exactly once per mount.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use sw_core::ports::WizardStateStorePort;
use sw_core::setup::{reconcile_resumed_step, ReconcileDecision, SetupStatus, WizardState, WizardStep};
use tracing::{info, warn};

use super::session::{ExitReason, WizardSession};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Already reconciled on this mount; nothing was touched.
    AlreadyReconciled,
    Exited,
    ResetToAccount,
    Kept,
}

/// One-shot reconciler owned by a single controller.
pub struct ServerStatusReconciler {
    store: Arc<dyn WizardStateStorePort>,
    reconciled: AtomicBool,
}

impl ServerStatusReconciler {
    pub fn new(store: Arc<dyn WizardStateStorePort>) -> Self {
        Self {
            store,
            reconciled: AtomicBool::new(false),
        }
    }

    pub fn has_run(&self) -> bool {
        self.reconciled.load(Ordering::SeqCst)
    }

    /// Apply the reconciliation rule to `session`.
    ///
    /// Only the first call per reconciler does anything; later calls (status
    /// refetches, re-renders) return [`ReconcileOutcome::AlreadyReconciled`].
    pub async fn reconcile(
        &self,
        session: &mut WizardSession,
        status: &SetupStatus,
        initial: &WizardState,
    ) -> ReconcileOutcome {
        if self.reconciled.swap(true, Ordering::SeqCst) {
            return ReconcileOutcome::AlreadyReconciled;
        }

        if status.has_owner {
            session.account_created = true;
        }

        let resumed = session.state.step;
        match reconcile_resumed_step(resumed, status) {
            ReconcileDecision::ExitComplete => {
                info!(resumed = %resumed, "setup already complete on server, leaving wizard");
                session.exit = Some(ExitReason::SetupAlreadyComplete);
                ReconcileOutcome::Exited
            }
            ReconcileDecision::ResetToAccount => {
                warn!(
                    resumed = %resumed,
                    "server has no owner account, discarding stale wizard progress"
                );
                session.reset_to(initial.clone(), WizardStep::Account);
                if let Err(err) = self.store.clear().await {
                    warn!(error = %err, "failed to clear persisted wizard state");
                }
                ReconcileOutcome::ResetToAccount
            }
            ReconcileDecision::Keep => {
                if !status.has_owner && session.account_created {
                    warn!(
                        resumed = %resumed,
                        "server has no owner account, forgetting the remembered one"
                    );
                    session.account_created = false;
                    session.state.account_email = None;
                    if let Err(err) = self.store.clear().await {
                        warn!(error = %err, "failed to clear setup-in-progress flag");
                    }
                }
                ReconcileOutcome::Kept
            }
        }
    }
}
