//! # Tauri 宿主编辑器
//!
//! `Editor` trait 在 Tauri 宿主中的实现。编辑器缓冲区位于前端 webview，
//! 每次调用时前端把活动文档的快照（名称、路径、内容）一并传入：
//! - 保存文档：将快照内容写入文档路径
//! - 另存为：弹出原生保存对话框（`tauri-plugin-dialog`），选中的路径写回快照
//! - 面板、报告文档、状态栏：通过事件通知前端渲染
//! - 错误对话框：原生消息框
//!
//! ## 事件
//! | 事件名 | 载荷 |
//! |--------|------|
//! | `code-control://panel-clear` | `{ tab }` |
//! | `code-control://panel-entry` | `{ tab, document, path, text }` |
//! | `code-control://panel-focus` | `{ tab }` |
//! | `code-control://report` | `{ name, content }` |
//! | `code-control://status` | 状态文本 |
//! | `code-control://document-path` | `{ name, path }`（另存为选中新路径后） |

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tauri::{AppHandle, Emitter};
use tauri_plugin_dialog::{DialogExt, MessageDialogKind};

use crate::models::document::{ActiveDocument, PanelTab};
use crate::services::editor::Editor;

pub const EVENT_PANEL_CLEAR: &str = "code-control://panel-clear";
pub const EVENT_PANEL_ENTRY: &str = "code-control://panel-entry";
pub const EVENT_PANEL_FOCUS: &str = "code-control://panel-focus";
pub const EVENT_REPORT: &str = "code-control://report";
pub const EVENT_STATUS: &str = "code-control://status";
pub const EVENT_DOCUMENT_PATH: &str = "code-control://document-path";

/// 错误对话框标题
const DIALOG_TITLE: &str = "Python Good Code";

/// 前端传入的活动文档快照
///
/// 对应前端 TypeScript 接口：
/// ```typescript
/// interface DocumentSnapshot {
///   name: string;
///   path: string | null;
///   content: string;
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSnapshot {
    pub name: String,
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub content: String,
}

impl DocumentSnapshot {
    fn as_active(&self) -> ActiveDocument {
        ActiveDocument {
            name: self.name.clone(),
            path: self.path.clone(),
        }
    }
}

/// Tauri 宿主编辑器
pub struct HostEditor {
    app: AppHandle,
    document: Mutex<Option<DocumentSnapshot>>,
}

impl HostEditor {
    /// 以前端传入的活动文档创建；没有打开文档时传 None
    pub fn new(app: AppHandle, document: Option<DocumentSnapshot>) -> Self {
        Self {
            app,
            document: Mutex::new(document),
        }
    }

    fn snapshot(&self) -> Option<DocumentSnapshot> {
        match self.document.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn set_snapshot_path(&self, path: PathBuf) {
        let mut guard = match self.document.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(doc) = guard.as_mut() {
            if let Some(file_name) = path.file_name() {
                doc.name = file_name.to_string_lossy().to_string();
            }
            doc.path = Some(path);
        }
    }

    fn emit<S: Serialize + Clone>(&self, event: &str, payload: S) {
        if let Err(e) = self.app.emit(event, payload) {
            log::warn!("发送事件 {} 失败: {}", event, e);
        }
    }
}

impl Editor for HostEditor {
    fn active_document(&self) -> Option<ActiveDocument> {
        self.snapshot().map(|doc| doc.as_active())
    }

    fn save_document(&self, doc: &ActiveDocument) -> Result<(), String> {
        let path = doc
            .path
            .as_deref()
            .ok_or_else(|| format!("文档 {} 没有保存路径", doc.name))?;
        let content = self.snapshot().map(|s| s.content).unwrap_or_default();

        write_document(path, &content)
    }

    fn prompt_save_as(&self) {
        let Some(doc) = self.snapshot() else {
            return;
        };

        // 对话框阻塞等待用户选择，期间让出当前运行时工作线程
        let picked = tokio::task::block_in_place(|| {
            self.app
                .dialog()
                .file()
                .set_file_name(&doc.name)
                .add_filter("Python", &["py"])
                .blocking_save_file()
        });

        // 用户取消时保持草稿状态，由工作流决定是否继续
        let Some(picked) = picked else {
            log::info!("另存为对话框被取消");
            return;
        };

        match picked.into_path() {
            Ok(path) => {
                self.set_snapshot_path(path.clone());
                let name = file_name_of(&path);
                self.emit(EVENT_DOCUMENT_PATH, json!({ "name": name, "path": path }));
            }
            Err(e) => log::warn!("无法解析另存为路径: {}", e),
        }
    }

    fn create_document(&self, name: &str, content: &str) {
        self.emit(EVENT_REPORT, json!({ "name": name, "content": content }));
    }

    fn clear_panel_tab(&self, tab: PanelTab) {
        self.emit(EVENT_PANEL_CLEAR, json!({ "tab": tab }));
    }

    fn append_panel_entry(&self, tab: PanelTab, doc: &ActiveDocument, text: &str) {
        self.emit(
            EVENT_PANEL_ENTRY,
            json!({
                "tab": tab,
                "document": doc.name,
                "path": doc.path,
                "text": text,
            }),
        );
    }

    fn focus_panel_tab(&self, tab: PanelTab) {
        self.emit(EVENT_PANEL_FOCUS, json!({ "tab": tab }));
    }

    fn set_status_bar(&self, text: &str) {
        self.emit(EVENT_STATUS, text.to_string());
    }

    fn show_error_dialog(&self, text: &str) {
        self.app
            .dialog()
            .message(text)
            .kind(MessageDialogKind::Error)
            .title(DIALOG_TITLE)
            .show(|_| {});
    }
}

/// 将缓冲区内容写入磁盘
///
/// `Editor` 是同步接口，而调用方运行在 Tauri 的 tokio 运行时中，
/// 写入通过 `block_in_place` 执行，不占住运行时的工作线程。
fn write_document(path: &Path, content: &str) -> Result<(), String> {
    tokio::task::block_in_place(|| std::fs::write(path, content))
        .map_err(|e| format!("写入 {} 失败: {}", path.display(), e))
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_from_webview_payload() {
        let snapshot: DocumentSnapshot =
            serde_json::from_str(r#"{"name":"untitled","path":null}"#).unwrap();
        assert_eq!(snapshot.content, "");
        assert!(!snapshot.as_active().has_durable_path());

        let snapshot: DocumentSnapshot =
            serde_json::from_str(r#"{"name":"x.py","path":"/tmp/x.py","content":"import os\n"}"#)
                .unwrap();
        assert_eq!(
            snapshot.as_active(),
            ActiveDocument {
                name: "x.py".to_string(),
                path: Some(PathBuf::from("/tmp/x.py")),
            }
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_write_document_inside_runtime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.py");

        write_document(&path, "import os\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "import os\n");

        let err = write_document(dir.path(), "x").unwrap_err();
        assert!(err.starts_with("写入 "));
    }

    #[test]
    fn test_file_name_of() {
        assert_eq!(file_name_of(Path::new("/tmp/dir/new.py")), "new.py");
        assert_eq!(file_name_of(Path::new("/")), "");
    }
}
