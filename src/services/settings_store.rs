//! # 设置存储服务
//!
//! 负责插件设置文件的读取和写入：
//! - `load()` - 读取设置；文件或键缺失时静默使用默认值，从不失败
//! - `save()` - 读回已有文件保留无关键，覆写已知键，必要时递归创建目录后写回
//!
//! 设置文件格式见 `key_file` 模块，所有键位于 `[python-good-code]` 分组下。

use std::path::{Path, PathBuf};

use crate::error::PluginError;
use crate::models::settings::{DEFAULT_COMMAND, Settings};
use crate::services::key_file::KeyFile;
use crate::utils::path::{self, PLUGIN_NAME};

const KEY_COMMAND: &str = "command";
const KEY_GENERATE_REPORT: &str = "generate-report";
const KEY_TIMEOUT_SECS: &str = "timeout-secs";
const KEY_ROUTE_ON_NONZERO_EXIT: &str = "route-on-nonzero-exit";

/// 设置文件存储
#[derive(Debug, Clone)]
pub struct SettingsStore {
    /// 设置文件的绝对路径
    path: PathBuf,
}

impl SettingsStore {
    /// 使用指定的设置文件路径创建存储
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 由宿主配置目录创建存储，文件位于 `<dir>/plugins/python-good-code/python-good-code.conf`
    pub fn for_host_config_dir(host_config_dir: &Path) -> Self {
        Self::new(path::settings_file_path(host_config_dir))
    }

    /// 设置文件路径
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 读取设置
    ///
    /// 文件不存在、无法读取或某个键缺失/无法解析时，对应字段使用默认值。
    /// 文件缺失不是错误，只是应用默认值的情形。
    pub async fn load(&self) -> Settings {
        let file = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => KeyFile::parse(&content),
            Err(e) => {
                log::debug!("未读取到设置文件 {}，使用默认设置: {}", self.path.display(), e);
                KeyFile::new()
            }
        };

        let defaults = Settings::default();
        Settings {
            command: file
                .get_string(PLUGIN_NAME, KEY_COMMAND)
                .unwrap_or_else(|| DEFAULT_COMMAND.to_string()),
            generate_report: file
                .get_bool(PLUGIN_NAME, KEY_GENERATE_REPORT)
                .unwrap_or(defaults.generate_report),
            timeout_secs: file
                .get_u64(PLUGIN_NAME, KEY_TIMEOUT_SECS)
                .unwrap_or(defaults.timeout_secs),
            route_on_nonzero_exit: file
                .get_bool(PLUGIN_NAME, KEY_ROUTE_ON_NONZERO_EXIT)
                .unwrap_or(defaults.route_on_nonzero_exit),
        }
    }

    /// 保存设置
    ///
    /// 执行流程：
    /// 1. 读回已有文件（不存在时从空文件开始），保留其他分组和未知键
    /// 2. 覆写插件的已知键
    /// 3. 设置目录不存在时递归创建
    /// 4. 写回文件
    ///
    /// # 错误
    /// 目录创建失败或文件写入失败时返回 `PluginError::Persistence`。
    /// 调用方负责展示错误对话框；内存中的设置不受影响。
    pub async fn save(&self, settings: &Settings) -> Result<(), PluginError> {
        let mut file = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => KeyFile::parse(&content),
            Err(_) => KeyFile::new(),
        };

        file.set_string(PLUGIN_NAME, KEY_COMMAND, &settings.command);
        file.set_bool(PLUGIN_NAME, KEY_GENERATE_REPORT, settings.generate_report);
        file.set_u64(PLUGIN_NAME, KEY_TIMEOUT_SECS, settings.timeout_secs);
        file.set_bool(
            PLUGIN_NAME,
            KEY_ROUTE_ON_NONZERO_EXIT,
            settings.route_on_nonzero_exit,
        );

        // 确保设置目录存在，递归创建所有缺失的父目录（已存在时为空操作）
        if let Some(dir) = self.path.parent() {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|source| PluginError::Persistence {
                    path: dir.to_path_buf(),
                    source,
                })?;
        }

        tokio::fs::write(&self.path, file.to_data())
            .await
            .map_err(|source| PluginError::Persistence {
                path: self.path.clone(),
                source,
            })?;

        log::info!("设置已保存到 {}", self.path.display());
        Ok(())
    }
}
