//! # Python Good Code - Tauri 应用核心初始化模块
//!
//! 将当前文档交给外部代码检查工具（flake8、pep8 等），并把工具输出展示在编辑器中：
//! 逐行写入诊断面板，或生成一份独立的报告文档。
//!
//! 本模块负责 Tauri 应用的完整初始化流程，包括：
//! - 注册 Tauri 官方插件（对话框、日志）
//! - 从设置文件加载插件设置并注册应用全局状态
//! - 注册自定义 Tauri commands（代码检查、设置读写）
//!
//! ## 模块结构
//! - `commands/` - Tauri command 处理函数（IPC 接口层）
//! - `models/` - 数据模型
//! - `services/` - 核心业务逻辑（设置存储、执行、路由、工作流）
//! - `utils/` - 通用工具函数
//! - `error` - 错误分类

mod commands;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

use tauri::Manager;

use services::settings_store::SettingsStore;
use services::state::PluginState;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
/// Tauri 应用启动函数
///
/// 1. 注册对话框插件（另存为、错误消息框）
/// 2. 注册所有自定义 Tauri commands
/// 3. 在 `setup` 钩子中注册日志插件（仅调试构建），
///    定位设置文件并加载设置，注册 PluginState
/// 4. 生成应用上下文并启动主事件循环
///
/// # Panics
/// Tauri 应用启动失败时通过 `.expect()` 触发 panic。
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .invoke_handler(tauri::generate_handler![
            // 代码检查 commands
            commands::control::run_code_control,
            commands::control::can_run_code_control,
            commands::control::plugin_info,
            // 设置对话框 commands
            commands::settings::read_plugin_settings,
            commands::settings::save_plugin_settings,
        ])
        .setup(|app| {
            if cfg!(debug_assertions) {
                app.handle().plugin(
                    tauri_plugin_log::Builder::default()
                        .level(log::LevelFilter::Info)
                        .build(),
                )?;
            }

            // 宿主配置目录：优先使用 Tauri 解析的应用配置目录
            let host_config_dir = match app.path().app_config_dir() {
                Ok(dir) => dir,
                Err(e) => {
                    log::warn!("无法获取应用配置目录，使用后备目录: {}", e);
                    utils::path::fallback_host_config_dir()?
                }
            };

            let store = SettingsStore::for_host_config_dir(&host_config_dir);
            let settings = tauri::async_runtime::block_on(store.load());
            log::info!(
                "已加载设置 {}: command={:?}, generate-report={}",
                store.path().display(),
                settings.command,
                settings.generate_report
            );

            app.manage(PluginState::new(store, settings));
            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
