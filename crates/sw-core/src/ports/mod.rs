//! Port interfaces for the application layer
//!
//! Ports define the contract between the wizard use cases and the
//! infrastructure that talks to the media server, probes paths and persists
//! wizard progress. Implementations live in `sw-infra`; tests substitute
//! in-memory mocks.

pub mod errors;
pub mod path_probe;
pub mod setup_api;
pub mod wizard_state_store;

pub use errors::ApiError;
pub use path_probe::{PathCreated, PathProbePort};
pub use setup_api::{LibraryCreated, LibraryRequest, OwnerCreated, OwnerRequest, SetupApiPort};
pub use wizard_state_store::WizardStateStorePort;
