//! Wizard configuration domain model

use std::path::PathBuf;

use crate::setup::{LibraryType, MIN_PASSWORD_LEN};

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8096";
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_JUST_CREATED_CLEAR_SECS: u64 = 3;

/// Wizard configuration
///
/// Pure data; missing values in the source map to the defaults below.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardConfig {
    /// Base URL of the media server API
    pub api_base_url: String,

    /// Request timeout for server calls
    pub api_timeout_secs: u64,

    /// Directory holding the persisted wizard state. Empty means platform default.
    pub state_dir: PathBuf,

    /// Pre-filled movie library path
    pub movie_path: String,

    /// Pre-filled tv library path
    pub tv_path: String,

    /// Delay before the "directory created" affordance is cleared
    pub just_created_clear_secs: u64,

    /// Minimum administrator password length
    pub min_password_len: usize,
}

impl WizardConfig {
    /// Create WizardConfig from a parsed TOML value
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let defaults = Self::default();
        let section = |name: &str, key: &str| toml_value.get(name).and_then(|s| s.get(key));

        let api_timeout_secs = match section("api", "timeout_secs").and_then(|v| v.as_integer()) {
            Some(v) => u64::try_from(v)
                .map_err(|_| anyhow::anyhow!("api.timeout_secs must not be negative: {v}"))?,
            None => defaults.api_timeout_secs,
        };
        let just_created_clear_secs =
            match section("wizard", "just_created_clear_secs").and_then(|v| v.as_integer()) {
                Some(v) => u64::try_from(v).map_err(|_| {
                    anyhow::anyhow!("wizard.just_created_clear_secs must not be negative: {v}")
                })?,
                None => defaults.just_created_clear_secs,
            };
        let min_password_len =
            match section("wizard", "min_password_len").and_then(|v| v.as_integer()) {
                Some(v) => usize::try_from(v).map_err(|_| {
                    anyhow::anyhow!("wizard.min_password_len must not be negative: {v}")
                })?,
                None => defaults.min_password_len,
            };

        Ok(Self {
            api_base_url: section("api", "base_url")
                .and_then(|v| v.as_str())
                .unwrap_or(defaults.api_base_url.as_str())
                .to_string(),
            api_timeout_secs,
            state_dir: section("storage", "state_dir")
                .and_then(|v| v.as_str())
                .map(PathBuf::from)
                .unwrap_or(defaults.state_dir),
            movie_path: section("libraries", "movie_path")
                .and_then(|v| v.as_str())
                .unwrap_or(defaults.movie_path.as_str())
                .to_string(),
            tv_path: section("libraries", "tv_path")
                .and_then(|v| v.as_str())
                .unwrap_or(defaults.tv_path.as_str())
                .to_string(),
            just_created_clear_secs,
            min_password_len,
        })
    }
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_timeout_secs: DEFAULT_API_TIMEOUT_SECS,
            state_dir: PathBuf::new(),
            movie_path: LibraryType::Movie.default_path().to_string(),
            tv_path: LibraryType::Tv.default_path().to_string(),
            just_created_clear_secs: DEFAULT_JUST_CREATED_CLEAR_SECS,
            min_password_len: MIN_PASSWORD_LEN,
        }
    }
}
