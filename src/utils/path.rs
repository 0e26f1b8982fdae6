//! # 路径工具函数
//!
//! 提供与设置文件路径相关的工具函数：
//! - 由宿主配置目录拼出插件设置文件路径（`<config>/plugins/python-good-code/python-good-code.conf`）
//! - 宿主无法提供配置目录时的后备目录

use std::path::{Path, PathBuf};

/// 插件名称：同时用作设置文件所在目录名、文件名主干以及设置分组名
pub const PLUGIN_NAME: &str = "python-good-code";

/// 由宿主配置目录得到插件设置文件的绝对路径
///
/// # 示例
/// - Linux: `~/.config/<identifier>/plugins/python-good-code/python-good-code.conf`
pub fn settings_file_path(host_config_dir: &Path) -> PathBuf {
    host_config_dir
        .join("plugins")
        .join(PLUGIN_NAME)
        .join(format!("{}.conf", PLUGIN_NAME))
}

/// 获取后备宿主配置目录
///
/// 使用 `dirs` crate 获取跨平台的用户配置目录，再拼上插件名称。
///
/// # 错误
/// 无法确定用户配置目录时（如缺少 HOME / XDG 环境变量）返回错误信息。
pub fn fallback_host_config_dir() -> Result<PathBuf, String> {
    let config = dirs::config_dir().ok_or_else(|| "无法获取用户配置目录".to_string())?;
    Ok(config.join(PLUGIN_NAME))
}
