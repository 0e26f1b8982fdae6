//! # 插件元信息
//!
//! 插件名称、描述、版本和作者，供前端"关于"区域和插件管理器展示。

use serde::Serialize;

/// 插件元信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub version: &'static str,
    pub author: &'static str,
}

impl PluginInfo {
    /// 当前构建的插件元信息，版本号取自 Cargo 包版本
    pub const fn current() -> Self {
        Self {
            name: "Python Good Code",
            description: "A plugin to pass your code to some tool as pep8, flake8 and others",
            version: env!("CARGO_PKG_VERSION"),
            author: "Francesco OpenCode Apruzzese <opencode@e-ware.org>",
        }
    }
}
