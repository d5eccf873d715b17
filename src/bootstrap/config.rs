//! # Configuration Loader / 配置加载器
//!
//! ## Responsibilities / 职责
//!
//! - Read the TOML configuration file / 读取 TOML 配置文件
//! - Parse it into [`WizardConfig`] / 解析为 WizardConfig
//! - Report I/O and parsing errors with context / 报告带上下文的 I/O 和解析错误
//!
//! Missing keys fall back to the defaults in `sw-core`; nothing here decides
//! what a value means.

use anyhow::Context;
use std::path::PathBuf;
use sw_core::config::WizardConfig;

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// # Errors / 错误
///
/// Returns error if:
/// - File cannot be read (I/O error)
/// - Content is not valid TOML (parse error)
/// - A numeric value is negative
pub fn load_config(config_path: PathBuf) -> anyhow::Result<WizardConfig> {
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    WizardConfig::from_toml(&toml_value)
        .with_context(|| format!("Invalid config file: {}", config_path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();
        temp_file
    }

    /// 测试有效 TOML 被正确解析
    #[test]
    fn test_load_config_reads_valid_toml() {
        let temp_file = write_config(
            r#"
            [api]
            base_url = "http://media.local:8096"
            timeout_secs = 30

            [storage]
            state_dir = "/var/lib/media/setup"

            [libraries]
            movie_path = "/srv/films"
            tv_path = ""

            [wizard]
            just_created_clear_secs = 5
            min_password_len = 12
        "#,
        );

        let config = load_config(temp_file.path().to_path_buf()).unwrap();

        assert_eq!(config.api_base_url, "http://media.local:8096");
        assert_eq!(config.api_timeout_secs, 30);
        assert_eq!(config.state_dir, PathBuf::from("/var/lib/media/setup"));
        assert_eq!(config.movie_path, "/srv/films");
        assert_eq!(config.tv_path, "");
        assert_eq!(config.just_created_clear_secs, 5);
        assert_eq!(config.min_password_len, 12);
    }

    /// 测试缺失的值使用默认值
    #[test]
    fn test_load_config_uses_defaults_when_missing() {
        let temp_file = write_config("[api]\n");

        let config = load_config(temp_file.path().to_path_buf()).unwrap();

        assert_eq!(config, WizardConfig::default());
    }

    #[test]
    fn test_load_config_fails_on_missing_file() {
        let result = load_config(PathBuf::from("/nonexistent/setup-wizard.toml"));

        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_load_config_fails_on_invalid_toml() {
        let temp_file = write_config("[api\nbase_url = ");

        let err = load_config(temp_file.path().to_path_buf()).unwrap_err();

        assert!(err.to_string().contains("Failed to parse config as TOML"));
    }

    #[test]
    fn test_load_config_rejects_negative_timeout() {
        let temp_file = write_config("[api]\ntimeout_secs = -1\n");

        let err = load_config(temp_file.path().to_path_buf()).unwrap_err();

        assert!(format!("{err:#}").contains("must not be negative"));
    }
}
