//! Reconciliation of the locally resumed step against server status.

use super::{SetupStatus, WizardStep};

/// Outcome of comparing the resumed step with the server's setup status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileDecision {
    /// Setup already finished on the server; leave the wizard.
    ExitComplete,
    /// Local progress claims an account the server does not know about.
    ResetToAccount,
    /// Local progress is consistent; keep the resumed step.
    Keep,
}

/// Pure reconciliation rule, evaluated in priority order.
pub fn reconcile_resumed_step(resumed: WizardStep, status: &SetupStatus) -> ReconcileDecision {
    if status.is_complete {
        return ReconcileDecision::ExitComplete;
    }
    if !status.has_owner && resumed.requires_owner() {
        #[cfg(feature = "tracing")]
        tracing::debug!(resumed = %resumed, "resumed step requires an owner the server does not have");
        return ReconcileDecision::ResetToAccount;
    }
    ReconcileDecision::Keep
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_OWNER: SetupStatus = SetupStatus {
        is_complete: false,
        has_owner: false,
    };

    #[test]
    fn complete_status_exits_regardless_of_step() {
        for step in WizardStep::ALL {
            let status = SetupStatus {
                is_complete: true,
                has_owner: false,
            };
            assert_eq!(
                reconcile_resumed_step(step, &status),
                ReconcileDecision::ExitComplete
            );
        }
    }

    #[test]
    fn missing_owner_resets_post_account_steps() {
        assert_eq!(
            reconcile_resumed_step(WizardStep::Ready, &NO_OWNER),
            ReconcileDecision::ResetToAccount
        );
        assert_eq!(
            reconcile_resumed_step(WizardStep::Library, &NO_OWNER),
            ReconcileDecision::ResetToAccount
        );
    }

    #[test]
    fn early_steps_are_kept_without_owner() {
        assert_eq!(
            reconcile_resumed_step(WizardStep::Account, &NO_OWNER),
            ReconcileDecision::Keep
        );
        assert_eq!(
            reconcile_resumed_step(WizardStep::Welcome, &NO_OWNER),
            ReconcileDecision::Keep
        );
    }

    #[test]
    fn owner_present_keeps_any_step() {
        let status = SetupStatus {
            is_complete: false,
            has_owner: true,
        };
        assert_eq!(
            reconcile_resumed_step(WizardStep::Privacy, &status),
            ReconcileDecision::Keep
        );
    }
}
