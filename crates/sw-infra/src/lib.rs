//! # sw-infra
//!
//! Adapters for the ports declared in `sw-core`: wizard state persistence,
//! path probing and the media server HTTP API.

pub mod fs;
pub mod http;
pub mod memory_state;
pub mod wizard_state;

pub use fs::LocalPathProbe;
pub use http::HttpSetupApi;
pub use memory_state::InMemoryWizardStateStore;
pub use wizard_state::FileWizardStateRepository;
