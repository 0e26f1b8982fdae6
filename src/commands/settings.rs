//! # 插件设置 Tauri Commands
//!
//! 设置对话框包含两个主要字段（检查命令文本框、生成报告复选框）：
//! - `read_plugin_settings` - 打开对话框时读取当前设置用于预填
//! - `save_plugin_settings` - 点击确定 / 应用时替换内存设置并写入设置文件

use tauri::{AppHandle, State};

use crate::models::settings::Settings;
use crate::services::host_editor::HostEditor;
use crate::services::state::PluginState;

/// 读取当前内存中的设置
#[tauri::command]
pub async fn read_plugin_settings(state: State<'_, PluginState>) -> Result<Settings, String> {
    Ok(state.workflow.settings())
}

/// 确认设置对话框
///
/// 新设置立即对下一次检查生效；写入设置文件失败时弹出错误对话框，
/// 但内存中的设置保持为新值。
///
/// # 错误
/// 设置目录创建失败或设置文件写入失败时返回错误描述
#[tauri::command]
pub async fn save_plugin_settings(
    app: AppHandle,
    settings: Settings,
    state: State<'_, PluginState>,
) -> Result<(), String> {
    let editor = HostEditor::new(app, None);
    state
        .workflow
        .confirm_settings(&state.store, &editor, settings)
        .await
        .map_err(|e| e.to_string())
}
