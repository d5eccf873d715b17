use sw_core::ports::ApiError;
use sw_core::setup::{LibraryType, ValidationError, WizardStep};

/// Errors produced by wizard actions.
///
/// Every variant's `Display` text is what the controller stores as the
/// step-local error message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("{} ({library_type}) path does not exist; create it or choose another folder", .library_type.label())]
    PathNotFound { library_type: LibraryType },

    #[error("{} ({library_type}) path could not be checked: {message}", .library_type.label())]
    PathCheckFailed {
        library_type: LibraryType,
        message: String,
    },

    #[error("cannot create the {} ({library_type}) directory here", .library_type.label())]
    DirectoryNotCreatable { library_type: LibraryType },

    #[error("failed to create the {} ({library_type}) directory: {source}", .library_type.label())]
    DirectoryCreateFailed {
        library_type: LibraryType,
        source: ApiError,
    },

    #[error("failed to create the {} ({library_type}) library: {source}", .library_type.label())]
    Provisioning {
        library_type: LibraryType,
        source: ApiError,
    },

    #[error("create the administrator account before continuing")]
    AccountRequired,

    #[error("{action} is not available on the {step} step")]
    NotAllowed {
        step: WizardStep,
        action: &'static str,
    },
}

impl WizardError {
    /// Content type the error is about, if any; the UI selects that tab.
    pub fn library_type(&self) -> Option<LibraryType> {
        match self {
            WizardError::PathNotFound { library_type }
            | WizardError::PathCheckFailed { library_type, .. }
            | WizardError::DirectoryNotCreatable { library_type }
            | WizardError::DirectoryCreateFailed { library_type, .. }
            | WizardError::Provisioning { library_type, .. } => Some(*library_type),
            _ => None,
        }
    }
}
