pub mod config;
pub mod tracing;
pub mod wiring;

pub use self::config::load_config;
pub use self::tracing::init_tracing_subscriber;
pub use self::wiring::{build_wizard_controller, wire_dependencies, WizardDeps, WiringError};
