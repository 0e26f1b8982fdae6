//! # 插件全局状态
//!
//! 通过 Tauri 的 `manage()` 注册，所有 command 函数可通过 `State<PluginState>` 访问。
//! 设置只在这里保存一份，由工作流持有，不使用全局可变变量。

use crate::models::settings::Settings;
use crate::services::runner::ProcessRunner;
use crate::services::settings_store::SettingsStore;
use crate::services::workflow::Workflow;

/// 插件全局状态
pub struct PluginState {
    /// 代码检查工作流（持有当前设置和忙碌标志）
    pub workflow: Workflow,
    /// 设置文件存储
    pub store: SettingsStore,
}

impl PluginState {
    /// 以启动时加载的设置创建状态，使用真实的子进程执行器
    pub fn new(store: SettingsStore, settings: Settings) -> Self {
        Self {
            workflow: Workflow::new(settings, ProcessRunner),
            store,
        }
    }
}
