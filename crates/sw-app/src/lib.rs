//! Setup wizard application layer
//!
//! This crate contains the first-run wizard use cases and the controller that
//! orchestrates them. All side effects go through the ports in `sw_core::ports`.

pub mod usecases;

pub use usecases::setup::{WizardController, WizardError, WizardView};
