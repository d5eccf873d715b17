use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_DIR_NAME: &str = "setup-wizard";

/// Get the setup wizard data root directory.
///
/// 获取安装向导数据根目录。
///
/// # Platform-specific Paths / 平台特定路径
/// - macOS: ~/Library/Application Support/setup-wizard
/// - Windows: %LOCALAPPDATA%\setup-wizard
/// - Linux: $XDG_DATA_HOME/setup-wizard or ~/.local/share/setup-wizard
///
/// # Behavior / 行为
/// - This function does not create the directory; the state repository does
///   so on first write.
/// - 此函数不自动创建目录。
pub fn app_data_dir() -> Result<PathBuf> {
    let base_dir =
        get_platform_data_dir().context("Failed to get platform-specific data directory")?;

    Ok(base_dir.join(APP_DIR_NAME))
}

/// 获取向导状态存储目录
///
/// `configured` wins when non-empty.
pub fn state_dir(configured: &std::path::Path) -> Result<PathBuf> {
    if configured.as_os_str().is_empty() {
        app_data_dir()
    } else {
        Ok(configured.to_path_buf())
    }
}

/// 根据平台获取基础数据目录
fn get_platform_data_dir() -> Result<PathBuf> {
    #[cfg(target_os = "linux")]
    {
        // 优先使用 XDG_DATA_HOME，如果不存在则使用 ~/.local/share
        if let Some(xdg_data_home) = std::env::var_os("XDG_DATA_HOME") {
            return Ok(PathBuf::from(xdg_data_home));
        }
    }

    dirs::data_local_dir().ok_or_else(|| anyhow::anyhow!("Unable to get local data directory"))
}
