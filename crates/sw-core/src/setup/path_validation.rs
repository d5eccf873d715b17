//! Per-type path validation facts.

use serde::{Deserialize, Serialize};

use super::LibraryType;

/// Facts reported by a path check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathCheck {
    pub exists: bool,
    pub is_directory: bool,
    pub is_writable: bool,
    pub parent_exists: bool,
    pub parent_writable: bool,
}

/// Validation state for one content type's path.
///
/// 路径校验状态。Not persisted; reset whenever the path string changes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathValidationState {
    pub checked: bool,
    pub exists: bool,
    pub is_directory: bool,
    pub is_writable: bool,
    pub parent_exists: bool,
    pub parent_writable: bool,
    pub is_checking: bool,
    pub error: Option<String>,
    pub just_created: bool,
}

impl PathValidationState {
    pub fn unchecked() -> Self {
        Self::default()
    }

    pub fn checking() -> Self {
        Self {
            is_checking: true,
            ..Self::default()
        }
    }

    pub fn from_check(check: PathCheck) -> Self {
        Self {
            checked: true,
            exists: check.exists,
            is_directory: check.is_directory,
            is_writable: check.is_writable,
            parent_exists: check.parent_exists,
            parent_writable: check.parent_writable,
            is_checking: false,
            error: None,
            just_created: false,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            checked: true,
            error: Some(error.into()),
            ..Self::default()
        }
    }

    /// Directory creation is offered only for a missing path under a writable parent.
    pub fn can_create_directory(&self) -> bool {
        self.checked
            && !self.is_checking
            && !self.exists
            && self.parent_exists
            && self.parent_writable
    }

    pub fn mark_created(&mut self) {
        self.exists = true;
        self.is_directory = true;
        self.is_writable = true;
        self.just_created = true;
        self.error = None;
    }
}

/// One [`PathValidationState`] per [`LibraryType`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PathValidationMap {
    pub movie: PathValidationState,
    pub tv: PathValidationState,
}

impl PathValidationMap {
    pub fn get(&self, library_type: LibraryType) -> &PathValidationState {
        match library_type {
            LibraryType::Movie => &self.movie,
            LibraryType::Tv => &self.tv,
        }
    }

    pub fn get_mut(&mut self, library_type: LibraryType) -> &mut PathValidationState {
        match library_type {
            LibraryType::Movie => &mut self.movie,
            LibraryType::Tv => &mut self.tv,
        }
    }

    pub fn reset(&mut self, library_type: LibraryType) {
        *self.get_mut(library_type) = PathValidationState::unchecked();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_with_writable_parent_offers_creation() {
        let state = PathValidationState::from_check(PathCheck {
            exists: false,
            parent_exists: true,
            parent_writable: true,
            ..PathCheck::default()
        });
        assert!(state.can_create_directory());
    }

    #[test]
    fn read_only_parent_offers_no_creation() {
        let state = PathValidationState::from_check(PathCheck {
            exists: false,
            parent_exists: true,
            parent_writable: false,
            ..PathCheck::default()
        });
        assert!(!state.can_create_directory());
        assert!(!PathValidationState::unchecked().can_create_directory());
    }

    #[test]
    fn mark_created_sets_directory_facts() {
        let mut state = PathValidationState::from_check(PathCheck {
            parent_exists: true,
            parent_writable: true,
            ..PathCheck::default()
        });
        state.mark_created();
        assert!(state.exists && state.is_directory && state.is_writable && state.just_created);
        assert!(!state.can_create_directory());
    }
}
