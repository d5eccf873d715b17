//! # sw-core
//!
//! Core domain models and business rules for the first-run setup wizard.
//!
//! This crate contains pure business logic without any infrastructure dependencies.
//! Side effects (server calls, path probing, persistence) are reached only
//! through the traits in [`ports`].

pub mod config;
pub mod ports;
pub mod setup;

pub use config::WizardConfig;
pub use setup::{
    LibraryType, LibraryTypeData, LibraryTypeMap, PathValidationState, PrivacyLevel, SetupStatus,
    WizardState, WizardStep,
};
