//! # 代码检查工作流
//!
//! 响应一次用户操作（菜单 / 快捷键），完成 保存 → 检查 → 展示 的完整流程：
//!
//! 1. 获取活动文档；草稿文档先弹出另存为对话框
//! 2. 保存文档，保证磁盘上的内容与将被检查的内容一致
//! 3. 未配置检查命令时报告配置错误并结束，不启动进程
//! 4. 执行检查工具
//! 5. 输出可展示时交给输出路由，并更新状态栏
//!
//! ## 状态
//! `Idle -> Running -> Idle`。运行中再次触发会被忙碌标志拒绝，
//! 不会调用执行器，也不会写入面板或新建文档。任何错误之后都回到 `Idle`。
//!
//! ## 设置
//! 设置在构造时注入，设置对话框确认后通过 `apply_settings` 重新注入；
//! 每次执行开始时取一份快照，执行期间保存设置不会影响本次执行。

use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::error::PluginError;
use crate::models::settings::Settings;
use crate::services::editor::Editor;
use crate::services::router::{self, Routed};
use crate::services::runner::{self, ProcessRunner, Runner};
use crate::services::settings_store::SettingsStore;

/// 检查完成并已展示输出
pub const STATUS_EXECUTED: &str = "Control on the code executed!";
/// 配置错误、执行失败、超时或保存失败
pub const STATUS_FAILED: &str =
    "Could not execute control on the code. Please check your configuration.";
/// 另存为之后文档仍然没有磁盘路径
pub const STATUS_UNSAVED: &str = "Please save the document before running the code control.";
/// 上一次检查尚未结束
pub const STATUS_BUSY: &str = "Code control already running.";

/// 设置目录创建失败时的错误对话框文本
pub const DIALOG_CONFIG_DIR_FAILED: &str = "Plugin configuration directory could not be created.";
/// 设置文件写入失败时的错误对话框文本
pub const DIALOG_CONFIG_WRITE_FAILED: &str = "Plugin configuration could not be saved.";

/// 工作流状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Idle,
    Running,
}

/// 错误对应的状态栏文本
pub fn status_for(err: &PluginError) -> &'static str {
    match err {
        PluginError::NoDocument => STATUS_UNSAVED,
        PluginError::Busy => STATUS_BUSY,
        PluginError::Configuration(_)
        | PluginError::Execution(_)
        | PluginError::Save(_)
        | PluginError::Persistence { .. } => STATUS_FAILED,
    }
}

/// 忙碌标志守卫：离开作用域时自动复位，保证任何返回路径都回到 Idle
struct RunGuard<'a> {
    busy: &'a AtomicBool,
}

impl<'a> RunGuard<'a> {
    /// 标志已被占用时返回 None
    fn acquire(busy: &'a AtomicBool) -> Option<Self> {
        busy.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { busy })
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

/// 代码检查工作流
pub struct Workflow<R: Runner = ProcessRunner> {
    /// 当前设置；设置对话框保存与执行开始时的读取互斥
    settings: RwLock<Settings>,
    /// 忙碌标志
    busy: AtomicBool,
    runner: R,
}

impl<R: Runner> Workflow<R> {
    pub fn new(settings: Settings, runner: R) -> Self {
        Self {
            settings: RwLock::new(settings),
            busy: AtomicBool::new(false),
            runner,
        }
    }

    /// 当前设置的快照
    pub fn settings(&self) -> Settings {
        match self.settings.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// 替换当前设置（设置对话框确认后调用）
    pub fn apply_settings(&self, settings: Settings) {
        match self.settings.write() {
            Ok(mut guard) => *guard = settings,
            Err(poisoned) => *poisoned.into_inner() = settings,
        }
    }

    pub fn state(&self) -> WorkflowState {
        if self.busy.load(Ordering::Acquire) {
            WorkflowState::Running
        } else {
            WorkflowState::Idle
        }
    }

    /// 执行一次完整的代码检查
    ///
    /// 无论成功与否都会更新状态栏；错误同时写入日志并返回给调用方。
    ///
    /// # 错误
    /// - `Busy` - 上一次检查尚未结束
    /// - `NoDocument` - 没有活动文档，或另存为被取消
    /// - `Save` - 文档保存失败
    /// - `Configuration` - 未配置命令或命令无法解析
    /// - `Execution` - 检查工具启动失败、被终止、超时，或退出状态不允许展示输出
    pub async fn trigger<E: Editor + Sync>(&self, editor: &E) -> Result<Routed, PluginError> {
        let Some(_guard) = RunGuard::acquire(&self.busy) else {
            log::info!("代码检查正在进行中，忽略本次触发");
            editor.set_status_bar(STATUS_BUSY);
            return Err(PluginError::Busy);
        };

        let outcome = self.run_once(editor).await;
        match &outcome {
            Ok(_) => editor.set_status_bar(STATUS_EXECUTED),
            Err(e) => {
                log::warn!("代码检查未完成: {}", e);
                editor.set_status_bar(status_for(e));
            }
        }
        outcome
    }

    /// 设置对话框确认
    ///
    /// 先替换内存中的设置，再持久化；持久化失败时弹出错误对话框并返回错误，
    /// 内存中的设置不回滚。
    pub async fn confirm_settings<E: Editor + Sync>(
        &self,
        store: &SettingsStore,
        editor: &E,
        settings: Settings,
    ) -> Result<(), PluginError> {
        self.apply_settings(settings.clone());

        if let Err(e) = store.save(&settings).await {
            log::error!("{}", e);
            let text = match &e {
                PluginError::Persistence { path, .. } if path.as_path() == store.path() => {
                    DIALOG_CONFIG_WRITE_FAILED
                }
                _ => DIALOG_CONFIG_DIR_FAILED,
            };
            editor.show_error_dialog(text);
            return Err(e);
        }

        Ok(())
    }

    async fn run_once<E: Editor + Sync>(&self, editor: &E) -> Result<Routed, PluginError> {
        let mut doc = editor.active_document().ok_or(PluginError::NoDocument)?;

        // 草稿文档：先让用户选择保存位置，再确认确实得到了路径
        if !doc.has_durable_path() {
            editor.prompt_save_as();
            doc = editor
                .active_document()
                .filter(|d| d.has_durable_path())
                .ok_or(PluginError::NoDocument)?;
        }

        editor.save_document(&doc).map_err(PluginError::Save)?;

        let settings = self.settings();
        if !settings.has_command() {
            return Err(PluginError::Configuration("未配置检查命令".to_string()));
        }

        let path = doc.path.as_deref().ok_or(PluginError::NoDocument)?;
        let invocation = runner::build_invocation(&settings.command, path)?;
        let timeout =
            (settings.timeout_secs > 0).then(|| Duration::from_secs(settings.timeout_secs));

        let result = self.runner.run(&invocation, timeout).await;

        if !result.error_output.is_empty() {
            log::debug!("检查工具标准错误输出: {}", result.error_output.trim_end());
        }
        if !result.is_routable(settings.route_on_nonzero_exit) {
            return Err(PluginError::Execution(result.failure_detail()));
        }
        if !result.succeeded {
            log::info!(
                "检查工具以状态码 {:?} 退出，按发现问题处理并展示输出",
                result.exit_code
            );
        }

        Ok(router::route(editor, &result, settings.generate_report, &doc))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::sync::Notify;

    use super::*;
    use crate::models::analysis::AnalysisResult;
    use crate::models::document::ActiveDocument;
    use crate::services::editor::recording::{Call, RecordingEditor};
    use crate::services::runner::scripted::ScriptedRunner;

    fn settings(command: &str, generate_report: bool) -> Settings {
        Settings {
            command: command.to_string(),
            generate_report,
            ..Settings::default()
        }
    }

    fn draft() -> ActiveDocument {
        ActiveDocument {
            name: "untitled".to_string(),
            path: None,
        }
    }

    #[tokio::test]
    async fn test_empty_command_never_spawns() {
        let workflow = Workflow::new(settings("", false), ScriptedRunner::succeeding("x"));
        let editor = RecordingEditor::with_saved("x.py", "/tmp/x.py");

        let err = workflow.trigger(&editor).await.unwrap_err();

        assert!(matches!(err, PluginError::Configuration(_)));
        assert!(workflow.runner.calls().is_empty());
        // 配置检查在保存之后
        assert_eq!(editor.calls().first(), Some(&Call::Save("x.py".to_string())));
        assert_eq!(editor.last_status().as_deref(), Some(STATUS_FAILED));
        assert_eq!(workflow.state(), WorkflowState::Idle);
    }

    #[tokio::test]
    async fn test_panel_run_end_to_end() {
        let workflow = Workflow::new(
            settings("flake8 --select=F", false),
            ScriptedRunner::succeeding("x.py:1:1: F401\nx.py:2:1: F811\n"),
        );
        let editor = RecordingEditor::with_saved("x.py", "/tmp/my dir/x.py");

        let routed = workflow.trigger(&editor).await.unwrap();

        assert_eq!(routed, Routed::Panel { entries: 2 });
        assert_eq!(
            editor.panel_entries(),
            vec!["x.py:1:1: F401", "x.py:2:1: F811"]
        );
        assert_eq!(editor.last_status().as_deref(), Some(STATUS_EXECUTED));

        let calls = workflow.runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0.program, "flake8");
        assert_eq!(calls[0].0.args, vec!["--select=F", "/tmp/my dir/x.py"]);
        assert_eq!(calls[0].1, None);
    }

    #[tokio::test]
    async fn test_report_run_creates_document() {
        let workflow = Workflow::new(
            settings("flake8", true),
            ScriptedRunner::succeeding("line1\nline2"),
        );
        let editor = RecordingEditor::with_saved("x.py", "/tmp/x.py");

        assert_eq!(workflow.trigger(&editor).await.unwrap(), Routed::Report);
        assert!(editor.calls().contains(&Call::CreateDocument {
            name: "code_control_report".to_string(),
            content: "line1\nline2".to_string(),
        }));
        assert!(editor.panel_entries().is_empty());
    }

    #[tokio::test]
    async fn test_draft_is_saved_as_before_running() {
        let workflow = Workflow::new(settings("flake8", false), ScriptedRunner::succeeding(""));
        let editor = RecordingEditor::with_document(draft()).save_as_to("/tmp/new.py");

        workflow.trigger(&editor).await.unwrap();

        let calls = editor.calls();
        assert_eq!(calls[0], Call::PromptSaveAs);
        assert_eq!(calls[1], Call::Save("untitled".to_string()));
        assert_eq!(
            workflow.runner.calls()[0].0.args,
            vec!["/tmp/new.py".to_string()]
        );
    }

    #[tokio::test]
    async fn test_cancelled_save_as_aborts() {
        let workflow = Workflow::new(settings("flake8", false), ScriptedRunner::succeeding(""));
        let editor = RecordingEditor::with_document(draft());

        let err = workflow.trigger(&editor).await.unwrap_err();

        assert!(matches!(err, PluginError::NoDocument));
        assert!(workflow.runner.calls().is_empty());
        assert!(!editor.calls().iter().any(|c| matches!(c, Call::Save(_))));
        assert_eq!(editor.last_status().as_deref(), Some(STATUS_UNSAVED));
    }

    #[tokio::test]
    async fn test_save_failure_aborts() {
        let workflow = Workflow::new(settings("flake8", false), ScriptedRunner::succeeding(""));
        let editor = RecordingEditor::with_saved("x.py", "/tmp/x.py").failing_save();

        let err = workflow.trigger(&editor).await.unwrap_err();

        assert!(matches!(err, PluginError::Save(_)));
        assert!(workflow.runner.calls().is_empty());
        assert_eq!(editor.last_status().as_deref(), Some(STATUS_FAILED));
    }

    #[tokio::test]
    async fn test_no_active_document() {
        let workflow = Workflow::new(Settings::default(), ScriptedRunner::succeeding(""));
        let editor = RecordingEditor::default();

        let err = workflow.trigger(&editor).await.unwrap_err();
        assert!(matches!(err, PluginError::NoDocument));
        assert!(workflow.runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_nonzero_exit_routes_findings_when_enabled() {
        let findings = AnalysisResult {
            succeeded: false,
            exit_code: Some(1),
            output: "x.py:1:1: F401\n".to_string(),
            ..AnalysisResult::default()
        };

        let workflow = Workflow::new(Settings::default(), ScriptedRunner::new(findings.clone()));
        let editor = RecordingEditor::with_saved("x.py", "/tmp/x.py");
        assert_eq!(
            workflow.trigger(&editor).await.unwrap(),
            Routed::Panel { entries: 1 }
        );

        let strict = Workflow::new(
            Settings {
                route_on_nonzero_exit: false,
                ..Settings::default()
            },
            ScriptedRunner::new(findings),
        );
        let editor = RecordingEditor::with_saved("x.py", "/tmp/x.py");
        let err = strict.trigger(&editor).await.unwrap_err();
        assert!(matches!(err, PluginError::Execution(_)));
        assert!(editor.panel_entries().is_empty());
        assert_eq!(editor.last_status().as_deref(), Some(STATUS_FAILED));
    }

    #[tokio::test]
    async fn test_spawn_failure_reports_generic_status() {
        let workflow = Workflow::new(
            Settings::default(),
            ScriptedRunner::new(AnalysisResult::spawn_failed("No such file or directory")),
        );
        let editor = RecordingEditor::with_saved("x.py", "/tmp/x.py");

        let err = workflow.trigger(&editor).await.unwrap_err();

        assert!(matches!(err, PluginError::Execution(_)));
        assert_eq!(editor.last_status().as_deref(), Some(STATUS_FAILED));
        assert!(!editor.calls().iter().any(|c| matches!(c, Call::ClearPanel(_))));
    }

    #[tokio::test]
    async fn test_timeout_setting_is_passed_to_runner() {
        let workflow = Workflow::new(
            Settings {
                timeout_secs: 30,
                ..Settings::default()
            },
            ScriptedRunner::succeeding(""),
        );
        let editor = RecordingEditor::with_saved("x.py", "/tmp/x.py");

        workflow.trigger(&editor).await.unwrap();
        assert_eq!(
            workflow.runner.calls()[0].1,
            Some(Duration::from_secs(30))
        );
    }

    #[tokio::test]
    async fn test_apply_settings_is_used_by_next_run() {
        let workflow = Workflow::new(Settings::default(), ScriptedRunner::succeeding(""));
        workflow.apply_settings(settings("pylint", true));
        assert_eq!(workflow.settings().command, "pylint");

        let editor = RecordingEditor::with_saved("x.py", "/tmp/x.py");
        assert_eq!(workflow.trigger(&editor).await.unwrap(), Routed::Report);
        assert_eq!(workflow.runner.calls()[0].0.program, "pylint");
    }

    #[tokio::test]
    async fn test_second_trigger_while_running_is_rejected() {
        let gate = Arc::new(Notify::new());
        let runner = ScriptedRunner::succeeding("a\nb\n").gated(gate.clone());
        let started = runner.started.clone();
        let workflow = Arc::new(Workflow::new(Settings::default(), runner));
        let editor = Arc::new(RecordingEditor::with_saved("x.py", "/tmp/x.py"));

        let first = {
            let workflow = workflow.clone();
            let editor = editor.clone();
            tokio::spawn(async move { workflow.trigger(&*editor).await })
        };

        // 等待第一次执行进入执行器
        started.notified().await;
        assert_eq!(workflow.state(), WorkflowState::Running);

        let second = workflow.trigger(&*editor).await;
        assert!(matches!(second, Err(PluginError::Busy)));
        assert_eq!(editor.last_status().as_deref(), Some(STATUS_BUSY));
        // 被拒绝的触发没有写入面板
        assert!(editor.panel_entries().is_empty());

        gate.notify_one();
        let routed = first.await.unwrap().unwrap();

        assert_eq!(routed, Routed::Panel { entries: 2 });
        assert_eq!(workflow.runner.calls().len(), 1);
        assert_eq!(workflow.state(), WorkflowState::Idle);
        assert_eq!(editor.last_status().as_deref(), Some(STATUS_EXECUTED));
    }

    #[tokio::test]
    async fn test_confirm_settings_persists_and_reinjects() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::for_host_config_dir(dir.path());
        let workflow = Workflow::new(Settings::default(), ScriptedRunner::succeeding(""));
        let editor = RecordingEditor::default();

        let updated = settings("pep8", true);
        workflow
            .confirm_settings(&store, &editor, updated.clone())
            .await
            .unwrap();

        assert_eq!(workflow.settings(), updated);
        assert_eq!(store.load().await, updated);
        assert!(editor.calls().is_empty());
    }

    #[tokio::test]
    async fn test_confirm_settings_failure_keeps_memory_and_shows_dialog() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("plugins"), "not a directory").unwrap();
        let store = SettingsStore::for_host_config_dir(dir.path());
        let workflow = Workflow::new(Settings::default(), ScriptedRunner::succeeding(""));
        let editor = RecordingEditor::default();

        let updated = settings("pylint", false);
        let err = workflow
            .confirm_settings(&store, &editor, updated.clone())
            .await
            .unwrap_err();

        assert!(matches!(err, PluginError::Persistence { .. }));
        assert_eq!(workflow.settings(), updated);
        assert_eq!(
            editor.calls(),
            vec![Call::ErrorDialog(DIALOG_CONFIG_DIR_FAILED.to_string())]
        );
    }

    #[tokio::test]
    async fn test_confirm_settings_write_failure_shows_save_dialog() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::for_host_config_dir(dir.path());
        // 设置文件路径被目录占用，目录已存在但文件无法写入
        std::fs::create_dir_all(store.path()).unwrap();
        let workflow = Workflow::new(Settings::default(), ScriptedRunner::succeeding(""));
        let editor = RecordingEditor::default();

        let updated = settings("flake8 --select=E", true);
        let err = workflow
            .confirm_settings(&store, &editor, updated.clone())
            .await
            .unwrap_err();

        assert!(matches!(err, PluginError::Persistence { .. }));
        assert_eq!(workflow.settings(), updated);
        assert_eq!(
            editor.calls(),
            vec![Call::ErrorDialog(DIALOG_CONFIG_WRITE_FAILED.to_string())]
        );
    }
}
