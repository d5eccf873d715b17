use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use super::session::WizardSession;

/// Shared wizard context containing the session and the dispatch lock.
///
/// ## Lock Ordering
/// When acquiring both locks, acquire `dispatch_lock` first, then `session`.
/// - `dispatch_lock`: held for the whole of one user action, serializing actions.
/// - `session`: short critical sections; never held across a port call except
///   for persistence.
#[derive(Clone)]
pub(crate) struct WizardContext {
    session: Arc<Mutex<WizardSession>>,
    dispatch_lock: Arc<Mutex<()>>,
}

impl WizardContext {
    pub(crate) fn new(session: WizardSession) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            dispatch_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Locks the session. Does NOT acquire `dispatch_lock`.
    pub(crate) async fn session(&self) -> MutexGuard<'_, WizardSession> {
        self.session.lock().await
    }

    /// Handle for background tasks (the `just_created` timers).
    pub(crate) fn shared_session(&self) -> Arc<Mutex<WizardSession>> {
        Arc::clone(&self.session)
    }

    pub(crate) async fn acquire_dispatch_lock(&self) -> MutexGuard<'_, ()> {
        self.dispatch_lock.lock().await
    }
}
