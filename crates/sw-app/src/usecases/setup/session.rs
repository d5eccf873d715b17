//! In-memory wizard session and the read-only view handed to UI layers.

use serde::Serialize;
use sw_core::setup::{
    AccountForm, LibraryType, LibraryTypeMap, PathValidationMap, PrivacyLevel, StepValidator,
    WizardState, WizardStep,
};

/// Why the wizard stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ExitReason {
    /// The server reported setup as complete; the host app leaves wizard mode.
    SetupAlreadyComplete,
    /// The user finished the Ready step.
    Finished,
    /// The wizard was unmounted; late results are ignored.
    Unmounted,
}

/// Everything the controller owns for one wizard mount.
#[derive(Debug, Clone)]
pub struct WizardSession {
    /// Persisted part; written through the store after every mutation.
    pub state: WizardState,
    pub account: AccountForm,
    /// Owner exists, either created here, remembered locally, or server-confirmed.
    pub account_created: bool,
    pub validation: PathValidationMap,
    /// Step-local message, cleared on any field edit.
    pub error: Option<String>,
    pub busy: bool,
    /// Types created by the latest submission attempt.
    pub provisioned: Vec<LibraryType>,
    pub exit: Option<ExitReason>,
}

impl WizardSession {
    pub fn new(state: WizardState) -> Self {
        Self {
            state,
            account: AccountForm::default(),
            account_created: false,
            validation: PathValidationMap::default(),
            error: None,
            busy: false,
            provisioned: Vec::new(),
            exit: None,
        }
    }

    /// Drop everything and start over from `initial` at the given step.
    pub(crate) fn reset_to(&mut self, initial: WizardState, step: WizardStep) {
        *self = Self::new(WizardState { step, ..initial });
    }

    pub fn can_go_next(&self, validator: &StepValidator) -> bool {
        match self.state.step {
            WizardStep::Welcome => true,
            WizardStep::Account => {
                self.account_created
                    || validator.can_advance(
                        WizardStep::Account,
                        &self.account,
                        &self.state.library_type_data,
                    )
            }
            WizardStep::Library => validator.can_advance(
                WizardStep::Library,
                &self.account,
                &self.state.library_type_data,
            ),
            WizardStep::Privacy | WizardStep::Ready => false,
        }
    }

    pub fn view(&self, validator: &StepValidator) -> WizardView {
        WizardView {
            step: self.state.step,
            account_email: if self.account_created {
                self.state.account_email.clone()
            } else {
                Some(self.account.email.clone()).filter(|email| !email.is_empty())
            },
            display_name: self.account.display_name.clone(),
            account_created: self.account_created,
            libraries: self.state.library_type_data.clone(),
            selected_library_type: self.state.selected_library_type,
            validation: self.validation.clone(),
            libraries_to_create: self.state.library_type_data.libraries_to_create(),
            created_libraries: self.state.created_libraries.clone(),
            provisioned: self.provisioned.clone(),
            privacy_level: self.state.privacy_level,
            error: self.error.clone(),
            busy: self.busy,
            can_go_next: self.exit.is_none() && !self.busy && self.can_go_next(validator),
            can_go_back: self.exit.is_none() && !self.busy && self.state.step.prev().is_some(),
            exit: self.exit,
        }
    }
}

/// Snapshot of the wizard for rendering. Password fields are never included.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardView {
    pub step: WizardStep,
    pub account_email: Option<String>,
    pub display_name: String,
    pub account_created: bool,
    pub libraries: LibraryTypeMap,
    pub selected_library_type: LibraryType,
    pub validation: PathValidationMap,
    pub libraries_to_create: Vec<LibraryType>,
    pub created_libraries: Vec<LibraryType>,
    pub provisioned: Vec<LibraryType>,
    pub privacy_level: PrivacyLevel,
    pub error: Option<String>,
    pub busy: bool,
    pub can_go_next: bool,
    pub can_go_back: bool,
    pub exit: Option<ExitReason>,
}

impl WizardView {
    pub fn has_exited(&self) -> bool {
        self.exit.is_some()
    }
}
