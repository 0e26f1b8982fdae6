//! # 插件设置数据模型
//!
//! 定义了插件设置（Settings）的 Rust 结构体以及各字段的默认值。
//!
//! 对应设置文件 `<配置目录>/plugins/python-good-code/python-good-code.conf`
//! 中 `[python-good-code]` 分组下的键，同时也是前端设置对话框通过 IPC 读写的类型。

use serde::{Deserialize, Serialize};

/// `command` 键的默认值：未配置时使用 flake8
pub const DEFAULT_COMMAND: &str = "flake8";

/// 插件设置数据结构
///
/// 进程级别唯一的一份设置，启动时从设置文件加载一次，
/// 之后只在设置对话框确认时被替换并持久化。
///
/// 对应前端 TypeScript 接口：
/// ```typescript
/// interface Settings {
///   command: string;
///   generateReport: boolean;
///   timeoutSecs: number;
///   routeOnNonzeroExit: boolean;
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// 检查工具命令（如 "flake8"、"pep8 --max-line-length=120"）
    ///
    /// 按 shell 规则拆分为程序和参数，文档路径作为最后一个参数追加。
    /// 为空时工作流直接报告配置错误，不启动任何进程。
    pub command: String,

    /// 是否生成报告文档
    ///
    /// - `true`：将工具输出原样写入新文档 `code_control_report`
    /// - `false`：按行拆分输出，逐条追加到诊断面板
    pub generate_report: bool,

    /// 检查工具的最长执行时间（秒），`0` 表示无限等待
    pub timeout_secs: u64,

    /// 工具以非零状态码退出时是否仍然展示其输出
    ///
    /// flake8 等检查工具在发现问题时以非零状态码退出，
    /// 为 `false` 时所有非零退出都视为执行失败并丢弃输出。
    pub route_on_nonzero_exit: bool,
}

impl Settings {
    /// 是否已配置检查命令（全空白视为未配置）
    pub fn has_command(&self) -> bool {
        !self.command.trim().is_empty()
    }
}

/// Settings 默认值：flake8 + 诊断面板模式 + 无超时 + 非零退出仍展示输出
impl Default for Settings {
    fn default() -> Self {
        Self {
            command: DEFAULT_COMMAND.to_string(),
            generate_report: false,
            timeout_secs: 0,
            route_on_nonzero_exit: true,
        }
    }
}
