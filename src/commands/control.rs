//! # 代码检查 Tauri Commands
//!
//! 菜单项和快捷键在前端都调用同一个 `run_code_control`：
//! - `run_code_control` - 执行一次 保存 → 检查 → 展示 工作流
//! - `can_run_code_control` - 菜单项是否可用（有打开的文档且没有正在进行的检查）
//! - `plugin_info` - 插件名称、描述、版本和作者

use tauri::{AppHandle, State};

use crate::models::plugin::PluginInfo;
use crate::services::host_editor::{DocumentSnapshot, HostEditor};
use crate::services::router::Routed;
use crate::services::state::PluginState;
use crate::services::workflow::WorkflowState;

/// 对活动文档执行代码检查
///
/// 检查工具在 tokio 运行时中异步执行，期间 UI 保持响应；
/// 面板条目、报告文档和状态栏文本通过事件推送给前端。
///
/// # 参数
/// - `document` - 前端活动文档的快照；没有打开文档时为 null
///
/// # 返回值
/// 返回输出的去向（报告文档或诊断面板条目数）
///
/// # 错误
/// 检查未完成时返回错误描述（状态栏已同步更新）
#[tauri::command]
pub async fn run_code_control(
    app: AppHandle,
    document: Option<DocumentSnapshot>,
    state: State<'_, PluginState>,
) -> Result<Routed, String> {
    let editor = HostEditor::new(app, document);
    state
        .workflow
        .trigger(&editor)
        .await
        .map_err(|e| e.to_string())
}

/// 菜单项是否可用
///
/// 只有打开了文档、且没有正在进行的检查时才可触发。
#[tauri::command]
pub async fn can_run_code_control(
    document: Option<DocumentSnapshot>,
    state: State<'_, PluginState>,
) -> Result<bool, String> {
    Ok(document.is_some() && state.workflow.state() == WorkflowState::Idle)
}

/// 获取插件元信息
#[tauri::command]
pub fn plugin_info() -> PluginInfo {
    PluginInfo::current()
}
