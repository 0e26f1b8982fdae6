//! # 编辑器文档数据模型
//!
//! 定义了工作流从编辑器获取的活动文档（ActiveDocument）和消息面板标签（PanelTab）。

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// 新建报告文档使用的名称
pub const REPORT_DOCUMENT_NAME: &str = "code_control_report";

/// 编辑器中的活动文档
///
/// 对应前端 TypeScript 接口：
/// ```typescript
/// interface ActiveDocument {
///   name: string;
///   path: string | null;
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveDocument {
    /// 文档显示名称（通常为文件名，草稿为 "untitled"）
    pub name: String,

    /// 文档在磁盘上的路径；尚未保存过的草稿为 None
    pub path: Option<PathBuf>,
}

impl ActiveDocument {
    /// 是否已有可供检查工具读取的磁盘路径
    pub fn has_durable_path(&self) -> bool {
        self.path
            .as_ref()
            .is_some_and(|p| !p.as_os_str().is_empty())
    }
}

/// 宿主消息面板中的标签页
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelTab {
    /// 编译器 / 检查工具输出标签页，诊断条目都写入这里
    Compiler,
}
