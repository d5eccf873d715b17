//! # setup-wizard
//!
//! First-run setup wizard core for a self-hosted media server.
//!
//! The wizard logic lives in the workspace crates:
//! - `sw-core`: domain types, validation rules and ports
//! - `sw-app`: the wizard controller and its use cases
//! - `sw-infra`: state persistence, path probing and the HTTP API client
//!
//! This crate only assembles them: configuration loading, tracing setup and
//! dependency wiring live in [`bootstrap`].

pub mod bootstrap;

pub use bootstrap::{build_wizard_controller, init_tracing_subscriber, load_config};
pub use sw_app::{WizardController, WizardError, WizardView};
pub use sw_core::WizardConfig;
