use serde::{Deserialize, Serialize};

use super::{LibraryType, LibraryTypeMap, PrivacyLevel, WizardStep};

/// Persisted wizard snapshot.
///
/// 向导持久化快照。Survives reloads; written after every controller mutation
/// and cleared on finish or when the server contradicts it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WizardState {
    pub step: WizardStep,
    pub library_type_data: LibraryTypeMap,
    pub selected_library_type: LibraryType,
    pub created_libraries: Vec<LibraryType>,
    pub privacy_level: PrivacyLevel,
    pub account_email: Option<String>,
}

impl WizardState {
    pub fn with_library_paths(movie_path: impl Into<String>, tv_path: impl Into<String>) -> Self {
        Self {
            library_type_data: LibraryTypeMap::with_paths(movie_path, tv_path),
            ..Self::default()
        }
    }
}
