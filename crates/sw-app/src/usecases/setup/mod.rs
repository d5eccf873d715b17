//! Setup use cases.
//!
//! This module exposes the wizard controller and the capability use cases it
//! composes.

mod context;
pub mod controller;
pub mod error;
pub mod finish;
pub mod path_validation;
pub mod provisioner;
pub mod reconciler;
pub mod session;

pub use controller::WizardController;
pub use error::WizardError;
pub use finish::FinishSetup;
pub use path_validation::{JustCreatedTimers, PathValidationFlow, Revalidation};
pub use provisioner::{LibraryProvisioner, ProvisioningOutcome};
pub use reconciler::{ReconcileOutcome, ServerStatusReconciler};
pub use session::{ExitReason, WizardSession, WizardView};
