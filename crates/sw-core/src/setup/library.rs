//! Content library types and the per-type form data.

use serde::{Deserialize, Serialize};

/// Supported content type for a library.
///
/// 媒体库内容类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LibraryType {
    Movie,
    Tv,
}

impl LibraryType {
    /// Provisioning order: movies before tv.
    pub const ALL: [LibraryType; 2] = [LibraryType::Movie, LibraryType::Tv];

    pub fn as_str(self) -> &'static str {
        match self {
            LibraryType::Movie => "movie",
            LibraryType::Tv => "tv",
        }
    }

    /// Human-readable label used in messages.
    pub fn label(self) -> &'static str {
        match self {
            LibraryType::Movie => "Movies",
            LibraryType::Tv => "TV Shows",
        }
    }

    pub fn default_name(self) -> &'static str {
        self.label()
    }

    pub fn default_path(self) -> &'static str {
        match self {
            LibraryType::Movie => "/media/movies",
            LibraryType::Tv => "/media/tv",
        }
    }
}

impl Default for LibraryType {
    fn default() -> Self {
        LibraryType::Movie
    }
}

impl std::fmt::Display for LibraryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name and path entered for one content type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryTypeData {
    pub name: String,
    pub path: String,
}

impl LibraryTypeData {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    pub fn defaults_for(library_type: LibraryType) -> Self {
        Self::new(library_type.default_name(), library_type.default_path())
    }

    pub fn trimmed_path(&self) -> &str {
        self.path.trim()
    }

    pub fn is_configured(&self) -> bool {
        !self.trimmed_path().is_empty()
    }

    /// Name sent to the server, falling back to the type's default when blank.
    pub fn effective_name(&self, library_type: LibraryType) -> String {
        let name = self.name.trim();
        if name.is_empty() {
            library_type.default_name().to_string()
        } else {
            name.to_string()
        }
    }
}

/// Exactly one [`LibraryTypeData`] per [`LibraryType`].
///
/// Entries are never added or removed, only mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryTypeMap {
    pub movie: LibraryTypeData,
    pub tv: LibraryTypeData,
}

impl LibraryTypeMap {
    pub fn with_paths(movie_path: impl Into<String>, tv_path: impl Into<String>) -> Self {
        Self {
            movie: LibraryTypeData::new(LibraryType::Movie.default_name(), movie_path),
            tv: LibraryTypeData::new(LibraryType::Tv.default_name(), tv_path),
        }
    }

    pub fn get(&self, library_type: LibraryType) -> &LibraryTypeData {
        match library_type {
            LibraryType::Movie => &self.movie,
            LibraryType::Tv => &self.tv,
        }
    }

    pub fn get_mut(&mut self, library_type: LibraryType) -> &mut LibraryTypeData {
        match library_type {
            LibraryType::Movie => &mut self.movie,
            LibraryType::Tv => &mut self.tv,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (LibraryType, &LibraryTypeData)> {
        LibraryType::ALL.into_iter().map(move |t| (t, self.get(t)))
    }

    /// Types with a non-empty path, in provisioning order.
    pub fn libraries_to_create(&self) -> Vec<LibraryType> {
        self.iter()
            .filter(|(_, data)| data.is_configured())
            .map(|(library_type, _)| library_type)
            .collect()
    }
}

impl Default for LibraryTypeMap {
    fn default() -> Self {
        Self {
            movie: LibraryTypeData::defaults_for(LibraryType::Movie),
            tv: LibraryTypeData::defaults_for(LibraryType::Tv),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn libraries_to_create_skips_blank_paths() {
        let map = LibraryTypeMap::with_paths("/media/movies", "   ");
        assert_eq!(map.libraries_to_create(), vec![LibraryType::Movie]);
    }

    #[test]
    fn libraries_to_create_keeps_fixed_order() {
        let map = LibraryTypeMap::with_paths("/a", "/b");
        assert_eq!(
            map.libraries_to_create(),
            vec![LibraryType::Movie, LibraryType::Tv]
        );
    }

    #[test]
    fn effective_name_defaults_when_blank() {
        let data = LibraryTypeData::new("  ", "/media/tv");
        assert_eq!(data.effective_name(LibraryType::Tv), "TV Shows");

        let data = LibraryTypeData::new("Cartoons", "/media/tv");
        assert_eq!(data.effective_name(LibraryType::Tv), "Cartoons");
    }
}
