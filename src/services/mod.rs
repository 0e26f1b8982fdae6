//! # 业务逻辑服务模块
//!
//! 包含插件的核心逻辑，与 Tauri command 层解耦：
//! - `key_file` - INI 风格键值配置文件的解析和生成
//! - `settings_store` - 设置文件的读取和保存
//! - `runner` - 检查工具的异步执行
//! - `router` - 输出路由：报告文档或诊断面板
//! - `editor` - 宿主编辑器协作接口
//! - `workflow` - 保存 → 检查 → 展示 工作流及忙碌标志
//! - `host_editor` - 编辑器接口的 Tauri 宿主实现
//! - `state` - 注册为 Tauri managed state 的插件全局状态

pub mod editor;
pub mod host_editor;
pub mod key_file;
pub mod router;
pub mod runner;
pub mod settings_store;
pub mod state;
pub mod workflow;
