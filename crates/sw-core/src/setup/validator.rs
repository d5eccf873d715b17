//! Per-step guards evaluated before `go_next` or a submission.

use super::{AccountForm, LibraryTypeMap, ValidationError, WizardStep};

pub const MIN_PASSWORD_LEN: usize = 8;

/// Pure step guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepValidator {
    min_password_len: usize,
}

impl StepValidator {
    pub fn new(min_password_len: usize) -> Self {
        Self { min_password_len }
    }

    pub fn min_password_len(&self) -> usize {
        self.min_password_len
    }

    pub fn validate_account(&self, form: &AccountForm) -> Result<(), ValidationError> {
        if form.email.trim().is_empty() || form.password.is_empty() {
            return Err(ValidationError::MissingCredentials);
        }
        if form.password != form.password_confirm {
            return Err(ValidationError::PasswordMismatch);
        }
        if form.password.chars().count() < self.min_password_len {
            return Err(ValidationError::PasswordTooShort {
                min_len: self.min_password_len,
            });
        }
        Ok(())
    }

    pub fn validate_library(&self, libraries: &LibraryTypeMap) -> Result<(), ValidationError> {
        let has_absolute = libraries
            .iter()
            .any(|(_, data)| data.trimmed_path().starts_with('/'));
        if has_absolute {
            Ok(())
        } else {
            Err(ValidationError::NoLibraryPath)
        }
    }

    /// Guard for the given step. Welcome, Privacy and Ready carry no form guard.
    pub fn validate(
        &self,
        step: WizardStep,
        account: &AccountForm,
        libraries: &LibraryTypeMap,
    ) -> Result<(), ValidationError> {
        match step {
            WizardStep::Account => self.validate_account(account),
            WizardStep::Library => self.validate_library(libraries),
            WizardStep::Welcome | WizardStep::Privacy | WizardStep::Ready => Ok(()),
        }
    }

    pub fn can_advance(
        &self,
        step: WizardStep,
        account: &AccountForm,
        libraries: &LibraryTypeMap,
    ) -> bool {
        self.validate(step, account, libraries).is_ok()
    }
}

impl Default for StepValidator {
    fn default() -> Self {
        Self::new(MIN_PASSWORD_LEN)
    }
}
