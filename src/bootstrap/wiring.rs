//! # Dependency Injection / 依赖注入模块
//!
//! ## Responsibilities / 职责
//!
//! - Create the infra adapters (HTTP client, state files, path probe) / 创建 infra 层具体实现
//! - Inject them into the [`WizardController`] through the port traits / 通过 Port trait 注入
//!
//! No business decisions happen here: the controller decides what to do with
//! a missing owner or a stale state file, not the wiring.

use std::sync::Arc;

use sw_app::WizardController;
use sw_core::config::WizardConfig;
use sw_core::ports::{PathProbePort, SetupApiPort, WizardStateStorePort};
use sw_infra::fs::state_dir;
use sw_infra::{FileWizardStateRepository, HttpSetupApi, LocalPathProbe};
use tracing::info;

/// Result type for wiring operations
pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during dependency injection
/// 依赖注入错误（基础设施初始化失败）
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("HTTP client initialization failed: {0}")]
    HttpClient(String),

    #[error("State directory resolution failed: {0}")]
    StateDir(String),
}

/// Ports the controller runs against.
#[derive(Clone)]
pub struct WizardDeps {
    pub api: Arc<dyn SetupApiPort>,
    pub probe: Arc<dyn PathProbePort>,
    pub store: Arc<dyn WizardStateStorePort>,
}

impl WizardDeps {
    /// Probe library paths on this host instead of asking the server.
    pub fn with_local_probe(mut self) -> Self {
        self.probe = Arc::new(LocalPathProbe::new());
        self
    }

    pub fn into_controller(self, config: &WizardConfig) -> WizardController {
        WizardController::new(self.api, self.probe, self.store, config)
    }
}

/// Create the server-backed adapters and the file state store.
///
/// The HTTP client serves both the setup API and path probing, so path facts
/// are those of the media server host.
pub fn wire_dependencies(config: &WizardConfig) -> WiringResult<WizardDeps> {
    let http = Arc::new(
        HttpSetupApi::from_config(config).map_err(|e| WiringError::HttpClient(format!("{e:#}")))?,
    );

    let state_dir =
        state_dir(&config.state_dir).map_err(|e| WiringError::StateDir(format!("{e:#}")))?;
    info!(
        api = %config.api_base_url,
        state_dir = %state_dir.display(),
        "wiring setup wizard"
    );
    let store = Arc::new(FileWizardStateRepository::with_defaults(state_dir));

    Ok(WizardDeps {
        api: http.clone(),
        probe: http,
        store,
    })
}

pub fn build_wizard_controller(config: &WizardConfig) -> WiringResult<WizardController> {
    Ok(wire_dependencies(config)?.into_controller(config))
}
