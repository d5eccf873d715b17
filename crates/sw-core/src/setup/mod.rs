//! Setup domain module.
//!
//! This module defines the first-run wizard types, the step transition
//! table, the per-step guards and the server reconciliation rule.

pub mod account;
pub mod error;
pub mod library;
pub mod path_validation;
pub mod privacy;
pub mod reconcile;
pub mod state;
pub mod status;
pub mod step;
pub mod validator;

pub use account::AccountForm;
pub use error::ValidationError;
pub use library::{LibraryType, LibraryTypeData, LibraryTypeMap};
pub use path_validation::{PathCheck, PathValidationMap, PathValidationState};
pub use privacy::PrivacyLevel;
pub use reconcile::{reconcile_resumed_step, ReconcileDecision};
pub use state::WizardState;
pub use status::SetupStatus;
pub use step::WizardStep;
pub use validator::{StepValidator, MIN_PASSWORD_LEN};
