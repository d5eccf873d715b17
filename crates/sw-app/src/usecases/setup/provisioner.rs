//! Sequential library provisioning with partial-success semantics.

use std::sync::Arc;

use sw_core::ports::{ApiError, LibraryRequest, SetupApiPort};
use sw_core::setup::{LibraryType, LibraryTypeMap};
use tracing::{info, warn};

use super::error::WizardError;

/// Outcome of one provisioning attempt.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProvisioningOutcome {
    /// Types created by this attempt, in order.
    pub created: Vec<LibraryType>,
    /// First failure; iteration stopped there.
    pub failure: Option<(LibraryType, ApiError)>,
}

impl ProvisioningOutcome {
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }

    pub fn error(&self) -> Option<WizardError> {
        self.failure
            .as_ref()
            .map(|(library_type, source)| WizardError::Provisioning {
                library_type: *library_type,
                source: source.clone(),
            })
    }
}

pub struct LibraryProvisioner {
    api: Arc<dyn SetupApiPort>,
}

impl LibraryProvisioner {
    pub fn new(api: Arc<dyn SetupApiPort>) -> Self {
        Self { api }
    }

    /// Create one library per configured type, movie before tv, stopping at
    /// the first failure. Nothing is rolled back.
    pub async fn provision(&self, libraries: &LibraryTypeMap) -> ProvisioningOutcome {
        let mut outcome = ProvisioningOutcome::default();

        for library_type in libraries.libraries_to_create() {
            let data = libraries.get(library_type);
            let request = LibraryRequest {
                name: data.effective_name(library_type),
                path: data.trimmed_path().to_string(),
                library_type,
            };

            match self.api.create_library(request).await {
                Ok(created) => {
                    info!(%library_type, library_id = %created.id, "library created");
                    outcome.created.push(library_type);
                }
                Err(err) => {
                    warn!(%library_type, error = %err, "library creation failed, stopping");
                    outcome.failure = Some((library_type, err));
                    break;
                }
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex as StdMutex;
    use sw_core::ports::{LibraryCreated, OwnerCreated, OwnerRequest};
    use sw_core::setup::{PrivacyLevel, SetupStatus};

    /// Records library requests; fails for the listed types.
    #[derive(Default)]
    struct MockApi {
        fail_for: Vec<LibraryType>,
        requests: StdMutex<Vec<LibraryRequest>>,
    }

    #[async_trait]
    impl SetupApiPort for MockApi {
        async fn get_setup_status(&self) -> Result<SetupStatus, ApiError> {
            Ok(SetupStatus::default())
        }

        async fn create_owner(&self, _request: OwnerRequest) -> Result<OwnerCreated, ApiError> {
            Ok(OwnerCreated {
                user_id: "owner".into(),
            })
        }

        async fn create_library(&self, request: LibraryRequest) -> Result<LibraryCreated, ApiError> {
            let library_type = request.library_type;
            self.requests.lock().unwrap().push(request);
            if self.fail_for.contains(&library_type) {
                return Err(ApiError::Conflict("library already exists".into()));
            }
            Ok(LibraryCreated {
                id: format!("lib-{library_type}"),
            })
        }

        async fn save_privacy_settings(&self, _level: PrivacyLevel) -> Result<(), ApiError> {
            Ok(())
        }

        async fn complete_setup(&self) -> Result<(), ApiError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn creates_configured_types_in_order_with_default_names() {
        let api = Arc::new(MockApi::default());
        let provisioner = LibraryProvisioner::new(api.clone());
        let mut libraries = LibraryTypeMap::default();
        libraries.get_mut(LibraryType::Movie).name = "  ".into();
        libraries.get_mut(LibraryType::Tv).path = " /data/tv ".into();

        let outcome = provisioner.provision(&libraries).await;

        assert!(outcome.is_complete());
        assert_eq!(outcome.created, vec![LibraryType::Movie, LibraryType::Tv]);
        let requests = api.requests.lock().unwrap();
        assert_eq!(requests[0].name, "Movies");
        assert_eq!(requests[1].path, "/data/tv");
    }

    #[tokio::test]
    async fn stops_at_first_failure_and_keeps_earlier_successes() {
        let api = Arc::new(MockApi {
            fail_for: vec![LibraryType::Tv],
            ..MockApi::default()
        });
        let provisioner = LibraryProvisioner::new(api.clone());

        let outcome = provisioner.provision(&LibraryTypeMap::default()).await;

        assert_eq!(outcome.created, vec![LibraryType::Movie]);
        let err = outcome.error().expect("tv failure should surface");
        assert_eq!(err.library_type(), Some(LibraryType::Tv));
        assert!(err.to_string().contains("TV Shows"));
    }

    #[tokio::test]
    async fn movie_failure_skips_tv() {
        let api = Arc::new(MockApi {
            fail_for: vec![LibraryType::Movie],
            ..MockApi::default()
        });
        let provisioner = LibraryProvisioner::new(api.clone());

        let outcome = provisioner.provision(&LibraryTypeMap::default()).await;

        assert!(outcome.created.is_empty());
        assert_eq!(api.requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn every_attempt_sends_the_current_paths() {
        let api = Arc::new(MockApi::default());
        let provisioner = LibraryProvisioner::new(api.clone());

        provisioner
            .provision(&LibraryTypeMap::with_paths("/media/movies", "/media/tv"))
            .await;
        let outcome = provisioner
            .provision(&LibraryTypeMap::with_paths("/media/movies", "/srv/tv"))
            .await;

        assert_eq!(outcome.created, vec![LibraryType::Movie, LibraryType::Tv]);
        let requests = api.requests.lock().unwrap();
        assert_eq!(requests.len(), 4);
        assert_eq!(requests[3].library_type, LibraryType::Tv);
        assert_eq!(requests[3].path, "/srv/tv");
    }

    #[tokio::test]
    async fn blank_paths_are_not_provisioned() {
        let api = Arc::new(MockApi::default());
        let provisioner = LibraryProvisioner::new(api.clone());
        let libraries = LibraryTypeMap::with_paths("/media/movies", "   ");

        let outcome = provisioner.provision(&libraries).await;

        assert_eq!(outcome.created, vec![LibraryType::Movie]);
    }
}
