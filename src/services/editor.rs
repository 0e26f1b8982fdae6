//! # 编辑器协作接口
//!
//! 工作流只通过 `Editor` trait 与宿主编辑器交互：获取/保存文档、新建报告文档、
//! 操作诊断面板、更新状态栏和弹出错误对话框。
//!
//! 这些方法由宿主实现（见 `host_editor`），工作流只调用、不实现。
//! 宿主的 UI 操作都是同步的，只有检查工具的执行是异步的。

use crate::models::document::{ActiveDocument, PanelTab};

/// 宿主编辑器
pub trait Editor {
    /// 当前活动文档；没有打开任何文档时返回 None
    fn active_document(&self) -> Option<ActiveDocument>;

    /// 将文档保存到其磁盘路径
    ///
    /// # 错误
    /// 文档没有路径或写入失败时返回错误描述
    fn save_document(&self, doc: &ActiveDocument) -> Result<(), String>;

    /// 弹出另存为对话框；用户可能取消，调用方需重新读取活动文档确认结果
    fn prompt_save_as(&self);

    /// 新建一个未保存的文档
    fn create_document(&self, name: &str, content: &str);

    /// 清空消息面板中的指定标签页
    fn clear_panel_tab(&self, tab: PanelTab);

    /// 向消息面板追加一条与源文档关联的条目
    fn append_panel_entry(&self, tab: PanelTab, doc: &ActiveDocument, text: &str);

    /// 切换到消息面板中的指定标签页
    fn focus_panel_tab(&self, tab: PanelTab);

    /// 更新状态栏文本
    fn set_status_bar(&self, text: &str);

    /// 弹出模态错误对话框
    fn show_error_dialog(&self, text: &str);
}
