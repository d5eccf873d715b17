//! Setup wizard controller.
//!
//! Owns the current step and form data, runs the side effects of each step
//! through the ports, and drives transitions. Every user action is
//! serialized through the context's dispatch lock.

use std::sync::Arc;

use sw_core::config::WizardConfig;
use sw_core::ports::{OwnerRequest, PathProbePort, SetupApiPort, WizardStateStorePort};
use sw_core::setup::{
    LibraryType, PathValidationState, PrivacyLevel, SetupStatus, StepValidator, WizardState,
    WizardStep,
};
use tokio::time::Duration;
use tracing::{debug, info, info_span, warn, Instrument};

use super::context::WizardContext;
use super::error::WizardError;
use super::finish::FinishSetup;
use super::path_validation::{JustCreatedTimers, PathValidationFlow};
use super::provisioner::LibraryProvisioner;
use super::reconciler::ServerStatusReconciler;
use super::session::{ExitReason, WizardSession, WizardView};

/// Orchestrator for the five-step first-run wizard.
pub struct WizardController {
    context: WizardContext,
    initial: WizardState,
    validator: StepValidator,

    api: Arc<dyn SetupApiPort>,
    store: Arc<dyn WizardStateStorePort>,

    reconciler: ServerStatusReconciler,
    paths: PathValidationFlow,
    provisioner: LibraryProvisioner,
    finish_setup: FinishSetup,
    timers: JustCreatedTimers,
}

impl WizardController {
    pub fn new(
        api: Arc<dyn SetupApiPort>,
        probe: Arc<dyn PathProbePort>,
        store: Arc<dyn WizardStateStorePort>,
        config: &WizardConfig,
    ) -> Self {
        let initial =
            WizardState::with_library_paths(config.movie_path.clone(), config.tv_path.clone());
        Self {
            context: WizardContext::new(WizardSession::new(initial.clone())),
            initial,
            validator: StepValidator::new(config.min_password_len),
            reconciler: ServerStatusReconciler::new(Arc::clone(&store)),
            paths: PathValidationFlow::new(probe),
            provisioner: LibraryProvisioner::new(Arc::clone(&api)),
            finish_setup: FinishSetup::new(Arc::clone(&api), Arc::clone(&store)),
            timers: JustCreatedTimers::new(Duration::from_secs(config.just_created_clear_secs)),
            api,
            store,
        }
    }

    pub async fn view(&self) -> WizardView {
        self.context.session().await.view(&self.validator)
    }

    pub async fn exit_reason(&self) -> Option<ExitReason> {
        self.context.session().await.exit
    }

    /// Restore persisted progress and reconcile it against the server.
    ///
    /// A network failure while fetching the status is swallowed: the wizard
    /// keeps the last-known local step.
    pub async fn mount(&self) -> WizardView {
        let span = info_span!("usecase.setup_wizard.mount");
        async {
            let _dispatch_guard = self.context.acquire_dispatch_lock().await;

            let restored = self.store.load().await;
            let in_progress = self.store.is_setup_in_progress().await.unwrap_or_else(|err| {
                warn!(error = %err, "failed to read setup-in-progress flag");
                false
            });
            {
                let mut session = self.context.session().await;
                if let Some(state) = restored {
                    info!(step = %state.step, "resuming wizard from persisted state");
                    session.state = state;
                }
                session.account_created = in_progress || session.state.account_email.is_some();
            }

            match self.api.get_setup_status().await {
                Ok(status) => {
                    let mut session = self.context.session().await;
                    let outcome = self
                        .reconciler
                        .reconcile(&mut session, &status, &self.initial)
                        .await;
                    debug!(?outcome, ?status, "setup status reconciled");
                }
                Err(err) => {
                    warn!(error = %err, "could not fetch setup status, keeping local progress");
                }
            }

            self.check_paths_on_library_entry().await;
            self.view().await
        }
        .instrument(span)
        .await
    }

    /// Watch for server status changes after mount.
    ///
    /// `is_complete` exits immediately, however often it is reported. The
    /// reconciliation rule itself still runs at most once per mount; this
    /// only gives it its first chance when the mount-time fetch failed.
    pub async fn on_status_update(&self, status: SetupStatus) -> WizardView {
        if status.is_complete {
            let exited = {
                let mut session = self.context.session().await;
                if session.exit.is_none() {
                    info!("setup completed elsewhere, leaving wizard");
                    session.exit = Some(ExitReason::SetupAlreadyComplete);
                    true
                } else {
                    false
                }
            };
            if exited {
                self.timers.cancel_all().await;
            }
            return self.view().await;
        }

        let _dispatch_guard = self.context.acquire_dispatch_lock().await;
        let mut session = self.context.session().await;
        if session.exit.is_none() {
            if status.has_owner {
                session.account_created = true;
            }
            self.reconciler
                .reconcile(&mut session, &status, &self.initial)
                .await;
        }
        session.view(&self.validator)
    }

    // ===== navigation =====

    pub async fn go_next(&self) -> Result<WizardView, WizardError> {
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;
        let state = {
            let mut session = self.context.session().await;
            if session.exit.is_some() {
                return Ok(session.view(&self.validator));
            }

            let from = session.state.step;
            let to = match from {
                WizardStep::Welcome => WizardStep::Account,
                WizardStep::Account => {
                    if !session.account_created {
                        // Next on the account step is the account submission.
                        drop(session);
                        return self.submit_account_inner().await;
                    }
                    WizardStep::Library
                }
                WizardStep::Library => {
                    if let Err(err) = self
                        .validator
                        .validate_library(&session.state.library_type_data)
                    {
                        return Err(Self::reject(&mut session, err.into()));
                    }
                    WizardStep::Privacy
                }
                WizardStep::Privacy | WizardStep::Ready => {
                    return Err(Self::reject(
                        &mut session,
                        WizardError::NotAllowed {
                            step: from,
                            action: "next",
                        },
                    ));
                }
            };

            Self::transition(&mut session, to);
            session.state.clone()
        };

        self.persist(state).await;
        self.check_paths_on_library_entry().await;
        Ok(self.view().await)
    }

    pub async fn go_back(&self) -> Result<WizardView, WizardError> {
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;
        let state = {
            let mut session = self.context.session().await;
            if session.exit.is_some() {
                return Ok(session.view(&self.validator));
            }
            let Some(to) = session.state.step.prev() else {
                return Ok(session.view(&self.validator));
            };
            Self::transition(&mut session, to);
            session.state.clone()
        };

        self.persist(state).await;
        self.check_paths_on_library_entry().await;
        Ok(self.view().await)
    }

    // ===== account step =====

    pub async fn set_email(&self, email: impl Into<String>) -> WizardView {
        let email = email.into();
        self.edit(move |session| session.account.email = email).await
    }

    pub async fn set_password(&self, password: impl Into<String>) -> WizardView {
        let password = password.into();
        self.edit(move |session| session.account.password = password)
            .await
    }

    pub async fn set_password_confirm(&self, password: impl Into<String>) -> WizardView {
        let password = password.into();
        self.edit(move |session| session.account.password_confirm = password)
            .await
    }

    pub async fn set_display_name(&self, name: impl Into<String>) -> WizardView {
        let name = name.into();
        self.edit(move |session| session.account.display_name = name)
            .await
    }

    pub async fn submit_account(&self) -> Result<WizardView, WizardError> {
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;
        self.submit_account_inner().await
    }

    async fn submit_account_inner(&self) -> Result<WizardView, WizardError> {
        let span = info_span!("usecase.setup_wizard.submit_account");
        async {
            let request = {
                let mut session = self.context.session().await;
                if session.exit.is_some() {
                    return Ok(session.view(&self.validator));
                }
                Self::require_step(&mut session, WizardStep::Account, "account submission")?;
                if let Err(err) = self.validator.validate_account(&session.account) {
                    return Err(Self::reject(&mut session, err.into()));
                }
                session.busy = true;
                OwnerRequest {
                    email: session.account.email.trim().to_string(),
                    password: session.account.password.clone(),
                    display_name: session.account.effective_display_name(),
                }
            };

            let email = request.email.clone();
            match self.api.create_owner(request).await {
                Ok(created) => {
                    info!(user_id = %created.user_id, "administrator account created");
                    if let Err(err) = self.store.mark_setup_in_progress().await {
                        warn!(error = %err, "failed to set setup-in-progress flag");
                    }

                    let state = {
                        let mut session = self.context.session().await;
                        if session.exit.is_some() {
                            return Ok(session.view(&self.validator));
                        }
                        session.busy = false;
                        session.account_created = true;
                        session.state.account_email = Some(email);
                        session.account.password.clear();
                        session.account.password_confirm.clear();
                        Self::transition(&mut session, WizardStep::Library);
                        session.state.clone()
                    };
                    self.persist(state).await;
                    self.check_paths_on_library_entry().await;
                    Ok(self.view().await)
                }
                Err(err) => {
                    let mut session = self.context.session().await;
                    Err(Self::reject(&mut session, err.into()))
                }
            }
        }
        .instrument(span)
        .await
    }

    // ===== library step =====

    pub async fn set_library_name(
        &self,
        library_type: LibraryType,
        name: impl Into<String>,
    ) -> WizardView {
        let name = name.into();
        self.edit(move |session| {
            session.state.library_type_data.get_mut(library_type).name = name;
        })
        .await
    }

    /// Changing the path string resets that type's validation to unchecked.
    pub async fn set_library_path(
        &self,
        library_type: LibraryType,
        path: impl Into<String>,
    ) -> WizardView {
        let path = path.into();
        self.edit(move |session| {
            let data = session.state.library_type_data.get_mut(library_type);
            if data.path != path {
                data.path = path;
                session.validation.reset(library_type);
            }
        })
        .await
    }

    pub async fn select_library_type(&self, library_type: LibraryType) -> WizardView {
        self.edit(move |session| session.state.selected_library_type = library_type)
            .await
    }

    /// Check every pre-filled absolute path that has not been checked yet.
    pub async fn enter_library_step(&self) -> WizardView {
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;
        self.check_paths_on_library_entry().await;
        self.view().await
    }

    /// Path field lost focus; check it when it looks absolute.
    pub async fn blur_path(&self, library_type: LibraryType) -> WizardView {
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;
        let absolute = {
            let session = self.context.session().await;
            session
                .state
                .library_type_data
                .get(library_type)
                .trimmed_path()
                .starts_with('/')
        };
        if absolute {
            self.check_paths(&[library_type]).await;
        }
        self.view().await
    }

    /// Create the missing directory for `library_type`.
    ///
    /// Only honored when the last check offered it (missing path, writable parent).
    pub async fn create_directory(
        &self,
        library_type: LibraryType,
    ) -> Result<WizardView, WizardError> {
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;
        let span = info_span!("usecase.setup_wizard.create_directory", %library_type);
        async {
            let path = {
                let mut session = self.context.session().await;
                if session.exit.is_some() {
                    return Ok(session.view(&self.validator));
                }
                Self::require_step(&mut session, WizardStep::Library, "directory creation")?;
                if !session.validation.get(library_type).can_create_directory() {
                    return Err(Self::reject(
                        &mut session,
                        WizardError::DirectoryNotCreatable { library_type },
                    ));
                }
                session.busy = true;
                session
                    .state
                    .library_type_data
                    .get(library_type)
                    .trimmed_path()
                    .to_string()
            };

            let result = self.paths.create(&path).await;

            let mut session = self.context.session().await;
            if session.exit.is_some() {
                return Ok(session.view(&self.validator));
            }
            match result {
                Ok(()) => {
                    info!(path = %path, "library directory created");
                    session.busy = false;
                    session.error = None;
                    session.validation.get_mut(library_type).mark_created();
                    let view = session.view(&self.validator);
                    drop(session);
                    self.timers
                        .schedule(library_type, self.context.shared_session())
                        .await;
                    Ok(view)
                }
                Err(source) => {
                    session.validation.get_mut(library_type).error = Some(source.to_string());
                    Err(Self::reject(
                        &mut session,
                        WizardError::DirectoryCreateFailed {
                            library_type,
                            source,
                        },
                    ))
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Re-check unchecked paths, then create the configured libraries.
    ///
    /// Every configured type is sent on each attempt. A partial result is
    /// shown as `provisioned`; `created_libraries` is replaced only when all
    /// of them succeed.
    pub async fn submit_libraries(&self) -> Result<WizardView, WizardError> {
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;
        let span = info_span!("usecase.setup_wizard.submit_libraries");
        async {
            let (libraries, validation) = {
                let mut session = self.context.session().await;
                if session.exit.is_some() {
                    return Ok(session.view(&self.validator));
                }
                Self::require_step(&mut session, WizardStep::Library, "library submission")?;
                if let Err(err) = self
                    .validator
                    .validate_library(&session.state.library_type_data)
                {
                    return Err(Self::reject(&mut session, err.into()));
                }
                session.busy = true;
                (
                    session.state.library_type_data.clone(),
                    session.validation.clone(),
                )
            };

            let revalidation = self.paths.revalidate(&libraries, &validation).await;
            {
                let mut session = self.context.session().await;
                if session.exit.is_some() {
                    return Ok(session.view(&self.validator));
                }
                for (library_type, state) in revalidation.checked {
                    *session.validation.get_mut(library_type) = state;
                }
                if let Some(err) = revalidation.failure {
                    if let Some(library_type) = err.library_type() {
                        session.state.selected_library_type = library_type;
                    }
                    let err = Self::reject(&mut session, err);
                    let state = session.state.clone();
                    drop(session);
                    self.persist(state).await;
                    return Err(err);
                }
            }

            let outcome = self.provisioner.provision(&libraries).await;

            let mut session = self.context.session().await;
            if session.exit.is_some() {
                return Ok(session.view(&self.validator));
            }
            session.provisioned = outcome.created.clone();

            let result = match outcome.error() {
                Some(err) => {
                    if let Some(library_type) = err.library_type() {
                        session.state.selected_library_type = library_type;
                    }
                    Err(Self::reject(&mut session, err))
                }
                None => {
                    session.busy = false;
                    session.state.created_libraries = outcome.created;
                    Self::transition(&mut session, WizardStep::Privacy);
                    Ok(session.view(&self.validator))
                }
            };
            let state = session.state.clone();
            drop(session);
            self.persist(state).await;
            result
        }
        .instrument(span)
        .await
    }

    /// Skip library creation; forgets previously recorded libraries.
    pub async fn skip_libraries(&self) -> Result<WizardView, WizardError> {
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;
        let state = {
            let mut session = self.context.session().await;
            if session.exit.is_some() {
                return Ok(session.view(&self.validator));
            }
            Self::require_step(&mut session, WizardStep::Library, "skip")?;
            session.state.created_libraries.clear();
            session.provisioned.clear();
            Self::transition(&mut session, WizardStep::Privacy);
            session.state.clone()
        };
        self.persist(state).await;
        Ok(self.view().await)
    }

    // ===== privacy step =====

    pub async fn select_privacy(&self, level: PrivacyLevel) -> WizardView {
        self.edit(move |session| session.state.privacy_level = level)
            .await
    }

    pub async fn submit_privacy(&self) -> Result<WizardView, WizardError> {
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;
        let span = info_span!("usecase.setup_wizard.submit_privacy");
        async {
            let level = {
                let mut session = self.context.session().await;
                if session.exit.is_some() {
                    return Ok(session.view(&self.validator));
                }
                Self::require_step(&mut session, WizardStep::Privacy, "privacy submission")?;
                session.busy = true;
                session.state.privacy_level
            };

            let result = self.api.save_privacy_settings(level).await;

            let mut session = self.context.session().await;
            if session.exit.is_some() {
                return Ok(session.view(&self.validator));
            }
            match result {
                Ok(()) => {
                    info!(level = %level, "privacy settings saved");
                    session.busy = false;
                    Self::transition(&mut session, WizardStep::Ready);
                    let view = session.view(&self.validator);
                    let state = session.state.clone();
                    drop(session);
                    self.persist(state).await;
                    Ok(view)
                }
                Err(err) => Err(Self::reject(&mut session, err.into())),
            }
        }
        .instrument(span)
        .await
    }

    pub async fn skip_privacy(&self) -> Result<WizardView, WizardError> {
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;
        let state = {
            let mut session = self.context.session().await;
            if session.exit.is_some() {
                return Ok(session.view(&self.validator));
            }
            Self::require_step(&mut session, WizardStep::Privacy, "skip")?;
            Self::transition(&mut session, WizardStep::Ready);
            session.state.clone()
        };
        self.persist(state).await;
        Ok(self.view().await)
    }

    // ===== ready step =====

    /// Finalize and exit. Always exits once started, whatever the server says.
    pub async fn finish(&self) -> Result<WizardView, WizardError> {
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;
        let span = info_span!("usecase.setup_wizard.finish");
        async {
            {
                let mut session = self.context.session().await;
                if session.exit.is_some() {
                    return Ok(session.view(&self.validator));
                }
                Self::require_step(&mut session, WizardStep::Ready, "finish")?;
                session.busy = true;
            }

            self.finish_setup.execute().await;
            self.timers.cancel_all().await;

            let mut session = self.context.session().await;
            session.busy = false;
            session.exit.get_or_insert(ExitReason::Finished);
            info!("setup wizard finished");
            Ok(session.view(&self.validator))
        }
        .instrument(span)
        .await
    }

    /// Leave the wizard without finishing: cancel timers, ignore late results.
    pub async fn unmount(&self) {
        self.timers.cancel_all().await;
        let mut session = self.context.session().await;
        session.exit.get_or_insert(ExitReason::Unmounted);
        debug!(exit = ?session.exit, "setup wizard unmounted");
    }

    // ===== helpers =====

    /// Apply a field edit: clears the step-local error and persists.
    async fn edit<F>(&self, apply: F) -> WizardView
    where
        F: FnOnce(&mut WizardSession),
    {
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;
        let (view, state) = {
            let mut session = self.context.session().await;
            if session.exit.is_some() {
                return session.view(&self.validator);
            }
            apply(&mut *session);
            session.error = None;
            (session.view(&self.validator), session.state.clone())
        };
        self.persist(state).await;
        view
    }

    async fn check_paths_on_library_entry(&self) {
        let pending: Vec<LibraryType> = {
            let session = self.context.session().await;
            if session.exit.is_some() || session.state.step != WizardStep::Library {
                return;
            }
            session
                .state
                .library_type_data
                .iter()
                .filter(|(library_type, data)| {
                    data.trimmed_path().starts_with('/')
                        && !session.validation.get(*library_type).checked
                })
                .map(|(library_type, _)| library_type)
                .collect()
        };
        self.check_paths(&pending).await;
    }

    async fn check_paths(&self, library_types: &[LibraryType]) {
        for &library_type in library_types {
            let path = {
                let mut session = self.context.session().await;
                if session.exit.is_some() {
                    return;
                }
                *session.validation.get_mut(library_type) = PathValidationState::checking();
                session
                    .state
                    .library_type_data
                    .get(library_type)
                    .trimmed_path()
                    .to_string()
            };

            let state = self.paths.check(&path).await;

            let mut session = self.context.session().await;
            if session.exit.is_some() {
                return;
            }
            if session.state.library_type_data.get(library_type).trimmed_path() == path {
                *session.validation.get_mut(library_type) = state;
            }
        }
    }

    async fn persist(&self, state: WizardState) {
        if let Err(err) = self.store.save(&state).await {
            warn!(error = %err, step = %state.step, "failed to persist wizard state");
        }
    }

    fn transition(session: &mut WizardSession, to: WizardStep) {
        let from = session.state.step;
        if from != to {
            info!(from = %from, to = %to, "wizard step transition");
        }
        session.state.step = to;
        session.error = None;
    }

    fn require_step(
        session: &mut WizardSession,
        step: WizardStep,
        action: &'static str,
    ) -> Result<(), WizardError> {
        let current = session.state.step;
        if current == step {
            Ok(())
        } else {
            Err(Self::reject(
                session,
                WizardError::NotAllowed {
                    step: current,
                    action,
                },
            ))
        }
    }

    /// Record `err` as the step-local message and hand it back.
    fn reject(session: &mut WizardSession, err: WizardError) -> WizardError {
        debug!(step = %session.state.step, error = %err, "wizard action rejected");
        session.busy = false;
        session.error = Some(err.to_string());
        err
    }
}
