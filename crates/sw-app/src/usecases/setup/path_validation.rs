//! Library path checks, directory creation and the `just_created` timers.

use std::collections::HashMap;
use std::sync::Arc;

use sw_core::ports::{ApiError, PathCreated, PathProbePort};
use sw_core::setup::{LibraryType, LibraryTypeMap, PathValidationMap, PathValidationState};
use tokio::sync::Mutex;
use tokio::task::AbortHandle;
use tokio::time::{sleep, Duration};
use tracing::{debug, warn};

use super::error::WizardError;
use super::session::WizardSession;

/// Result of the submission-time re-check.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Revalidation {
    /// States produced by checks run during this pass, in check order.
    pub checked: Vec<(LibraryType, PathValidationState)>,
    /// First path that blocks submission.
    pub failure: Option<WizardError>,
}

pub struct PathValidationFlow {
    probe: Arc<dyn PathProbePort>,
}

impl PathValidationFlow {
    pub fn new(probe: Arc<dyn PathProbePort>) -> Self {
        Self { probe }
    }

    /// Check one path. Failures land in `error`; nothing is cached here, so
    /// checking an unchanged path twice yields the same state.
    pub async fn check(&self, path: &str) -> PathValidationState {
        match self.probe.check_path(path).await {
            Ok(check) => {
                debug!(path, ?check, "path checked");
                PathValidationState::from_check(check)
            }
            Err(err) => {
                warn!(path, error = %err, "path check failed");
                PathValidationState::failed(err.to_string())
            }
        }
    }

    pub async fn create(&self, path: &str) -> Result<(), ApiError> {
        match self.probe.create_path(path).await? {
            PathCreated { success: true } => Ok(()),
            PathCreated { success: false } => Err(ApiError::Io(format!(
                "the server could not create {path}"
            ))),
        }
    }

    /// Check every configured path not yet checked this session, one at a
    /// time in provisioning order, and stop at the first path that is
    /// missing or could not be checked.
    pub async fn revalidate(
        &self,
        libraries: &LibraryTypeMap,
        validation: &PathValidationMap,
    ) -> Revalidation {
        let mut result = Revalidation::default();
        for library_type in libraries.libraries_to_create() {
            let current = validation.get(library_type);
            let state = if current.checked && !current.is_checking {
                current.clone()
            } else {
                let path = libraries.get(library_type).trimmed_path();
                let state = self.check(path).await;
                result.checked.push((library_type, state.clone()));
                state
            };

            if let Some(message) = state.error {
                result.failure = Some(WizardError::PathCheckFailed {
                    library_type,
                    message,
                });
                break;
            }
            if !state.exists {
                result.failure = Some(WizardError::PathNotFound { library_type });
                break;
            }
        }
        result
    }
}

/// Per-type timers that clear `just_created` after a fixed delay.
///
/// Scheduling again for the same type replaces the pending timer;
/// [`JustCreatedTimers::cancel_all`] aborts everything on unmount.
pub struct JustCreatedTimers {
    ttl: Duration,
    timers: Arc<Mutex<HashMap<LibraryType, AbortHandle>>>,
}

impl JustCreatedTimers {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            timers: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub async fn schedule(&self, library_type: LibraryType, session: Arc<Mutex<WizardSession>>) {
        let timers = Arc::clone(&self.timers);
        let ttl = self.ttl;

        let mut timers_guard = self.timers.lock().await;
        if let Some(existing) = timers_guard.remove(&library_type) {
            existing.abort();
        }

        let handle = tokio::spawn(async move {
            sleep(ttl).await;
            // A stale timer only clears a display flag.
            session
                .lock()
                .await
                .validation
                .get_mut(library_type)
                .just_created = false;
            timers.lock().await.remove(&library_type);
        });

        timers_guard.insert(library_type, handle.abort_handle());
        debug!(%library_type, ttl_ms = ttl.as_millis() as u64, "just_created timer started");
    }

    pub async fn cancel_all(&self) {
        let mut timers_guard = self.timers.lock().await;
        for (library_type, handle) in timers_guard.drain() {
            handle.abort();
            debug!(%library_type, "just_created timer cancelled");
        }
    }

    pub async fn pending(&self) -> usize {
        self.timers.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex as StdMutex;
    use sw_core::setup::{PathCheck, WizardState};

    struct MockProbe {
        checks: StdMutex<HashMap<String, Result<PathCheck, ApiError>>>,
        check_calls: AtomicUsize,
    }

    impl MockProbe {
        fn new(entries: Vec<(&str, Result<PathCheck, ApiError>)>) -> Self {
            Self {
                checks: StdMutex::new(
                    entries
                        .into_iter()
                        .map(|(path, result)| (path.to_string(), result))
                        .collect(),
                ),
                check_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl PathProbePort for MockProbe {
        async fn check_path(&self, path: &str) -> Result<PathCheck, ApiError> {
            self.check_calls.fetch_add(1, Ordering::SeqCst);
            self.checks
                .lock()
                .unwrap()
                .get(path)
                .cloned()
                .unwrap_or(Ok(PathCheck::default()))
        }

        async fn create_path(&self, _path: &str) -> Result<PathCreated, ApiError> {
            Ok(PathCreated { success: false })
        }
    }

    fn existing_dir() -> PathCheck {
        PathCheck {
            exists: true,
            is_directory: true,
            is_writable: true,
            parent_exists: true,
            parent_writable: true,
        }
    }

    #[tokio::test]
    async fn checking_unchanged_path_twice_is_identical() {
        let flow = PathValidationFlow::new(Arc::new(MockProbe::new(vec![(
            "/media/movies",
            Ok(existing_dir()),
        )])));

        let first = flow.check("/media/movies").await;
        let second = flow.check("/media/movies").await;

        assert_eq!(first, second);
        assert!(first.checked && first.exists);
    }

    #[tokio::test]
    async fn check_failure_is_recorded_as_error() {
        let flow = PathValidationFlow::new(Arc::new(MockProbe::new(vec![(
            "/root/secret",
            Err(ApiError::Io("permission denied".into())),
        )])));

        let state = flow.check("/root/secret").await;

        assert!(state.checked);
        assert_eq!(state.error.as_deref(), Some("permission denied"));
    }

    #[tokio::test]
    async fn create_reporting_failure_is_io_error() {
        let flow = PathValidationFlow::new(Arc::new(MockProbe::new(vec![])));
        let err = flow.create("/media/new").await.unwrap_err();
        assert!(matches!(err, ApiError::Io(_)));
    }

    #[tokio::test]
    async fn revalidate_skips_checked_paths_and_stops_at_missing_one() {
        let probe = Arc::new(MockProbe::new(vec![
            ("/media/movies", Ok(existing_dir())),
            ("/media/tv", Ok(PathCheck::default())),
        ]));
        let flow = PathValidationFlow::new(probe.clone());
        let libraries = LibraryTypeMap::with_paths("/media/movies", "/media/tv");
        let mut validation = PathValidationMap::default();
        validation.movie = PathValidationState::from_check(existing_dir());

        let result = flow.revalidate(&libraries, &validation).await;

        assert_eq!(probe.check_calls.load(Ordering::SeqCst), 1);
        assert_eq!(result.checked.len(), 1);
        assert_eq!(result.checked[0].0, LibraryType::Tv);
        assert_eq!(
            result.failure,
            Some(WizardError::PathNotFound {
                library_type: LibraryType::Tv
            })
        );
    }

    #[tokio::test]
    async fn revalidate_ignores_blank_paths() {
        let probe = Arc::new(MockProbe::new(vec![("/media/movies", Ok(existing_dir()))]));
        let flow = PathValidationFlow::new(probe.clone());
        let libraries = LibraryTypeMap::with_paths("/media/movies", "");

        let result = flow
            .revalidate(&libraries, &PathValidationMap::default())
            .await;

        assert!(result.failure.is_none());
        assert_eq!(probe.check_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn timer_clears_just_created_after_ttl() {
        let timers = JustCreatedTimers::new(Duration::from_secs(3));
        let session = Arc::new(Mutex::new(WizardSession::new(WizardState::default())));
        session.lock().await.validation.movie.just_created = true;

        timers.schedule(LibraryType::Movie, session.clone()).await;
        sleep(Duration::from_millis(2_900)).await;
        assert!(session.lock().await.validation.movie.just_created);

        sleep(Duration::from_millis(200)).await;
        assert!(!session.lock().await.validation.movie.just_created);
        assert_eq!(timers.pending().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_all_keeps_flag_set() {
        let timers = JustCreatedTimers::new(Duration::from_secs(3));
        let session = Arc::new(Mutex::new(WizardSession::new(WizardState::default())));
        session.lock().await.validation.tv.just_created = true;

        timers.schedule(LibraryType::Tv, session.clone()).await;
        timers.cancel_all().await;
        sleep(Duration::from_secs(10)).await;

        assert!(session.lock().await.validation.tv.just_created);
        assert_eq!(timers.pending().await, 0);
    }
}
