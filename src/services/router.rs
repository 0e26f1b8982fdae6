//! # 输出路由服务
//!
//! 根据 `generate_report` 设置把检查工具的输出送到两个互斥的目的地之一：
//! - **报告文档**：新建名为 `code_control_report` 的文档，内容为原始输出，不做任何拆分
//! - **诊断面板**：清空编译器标签页，按行拆分输出逐条追加，最后切换到该标签页
//!
//! ## 拆分规则
//! 按 `\n` 拆分；输出以换行结尾时产生的最后一个空段被丢弃，
//! 每段末尾的 `\r` 被去掉，中间的空行保留。

use serde::Serialize;

use crate::models::analysis::AnalysisResult;
use crate::models::document::{ActiveDocument, PanelTab, REPORT_DOCUMENT_NAME};
use crate::services::editor::Editor;

/// 路由结果，作为 `run_code_control` 的返回值传给前端
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum Routed {
    /// 已新建报告文档
    Report,
    /// 已向诊断面板追加 `entries` 条诊断
    Panel { entries: usize },
}

/// 将输出拆分为诊断行
pub fn diagnostic_lines(output: &str) -> Vec<&str> {
    if output.is_empty() {
        return Vec::new();
    }
    let body = output.strip_suffix('\n').unwrap_or(output);
    body.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// 将执行结果路由到报告文档或诊断面板
///
/// # 参数
/// - `editor` - 宿主编辑器
/// - `result` - 检查工具执行结果，只使用其中的 `output`
/// - `generate_report` - 为 true 时新建报告文档，否则写入诊断面板
/// - `source` - 被检查的文档，诊断条目与其关联
pub fn route<E: Editor + ?Sized>(
    editor: &E,
    result: &AnalysisResult,
    generate_report: bool,
    source: &ActiveDocument,
) -> Routed {
    if generate_report {
        editor.create_document(REPORT_DOCUMENT_NAME, &result.output);
        return Routed::Report;
    }

    editor.clear_panel_tab(PanelTab::Compiler);
    let lines = diagnostic_lines(&result.output);
    for line in &lines {
        editor.append_panel_entry(PanelTab::Compiler, source, line);
    }
    editor.focus_panel_tab(PanelTab::Compiler);

    Routed::Panel {
        entries: lines.len(),
    }
}
