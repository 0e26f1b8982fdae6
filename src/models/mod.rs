//! # 数据模型模块
//!
//! 定义了插件使用的 Rust 数据结构，需要经过 Tauri IPC 传输的类型均派生 `Serialize`：
//! - `settings` - 插件设置及默认值
//! - `analysis` - 检查工具的调用描述和执行结果
//! - `document` - 活动文档和消息面板标签
//! - `plugin` - 插件元信息

pub mod analysis;
pub mod document;
pub mod plugin;
pub mod settings;
