//! # Tauri Command 处理模块
//!
//! 本模块包含所有注册到 Tauri 的 command 处理函数。
//! 每个子模块对应一个功能域：
//! - `control` - 触发代码检查、查询是否可触发、插件元信息
//! - `settings` - 设置对话框的读取和确认

pub mod control;
pub mod settings;
