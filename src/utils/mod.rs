//! # 通用工具函数模块
//!
//! - `path` - 设置文件路径构造

pub mod path;
