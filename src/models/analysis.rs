//! # 检查执行数据模型
//!
//! 定义了一次检查工具调用的输入（Invocation）和输出（AnalysisResult）。
//! 两者都只存在于单次工作流执行期间，不做持久化。

use serde::Serialize;

/// 结构化的进程调用描述：程序 + 参数列表
///
/// 不再把命令和文件路径拼接成一条命令行字符串，
/// 文件路径始终作为独立的最后一个参数传递，包含空格的路径也能正确处理。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
    /// 可执行程序（如 "flake8"、"/usr/bin/pep8"）
    pub program: String,
    /// 参数列表，最后一项为待检查文件的路径
    pub args: Vec<String>,
}

impl Invocation {
    /// 用于日志展示的命令行文本
    pub fn display_line(&self) -> String {
        let mut parts = Vec::with_capacity(self.args.len() + 1);
        parts.push(self.program.as_str());
        parts.extend(self.args.iter().map(String::as_str));
        shell_words::join(parts)
    }
}

/// 检查工具的执行结果
///
/// 每次工作流执行都会新建一个实例，执行完毕后即被丢弃。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// 进程是否成功启动并以状态码 0 退出
    pub succeeded: bool,
    /// 进程退出状态码；被信号终止、超时或启动失败时为 None
    pub exit_code: Option<i32>,
    /// 标准输出（按 UTF-8 有损解码）
    pub output: String,
    /// 标准错误输出，只写入日志，不展示给用户
    pub error_output: String,
    /// 是否因超过 `timeout-secs` 而被终止
    pub timed_out: bool,
    /// 进程启动失败时的错误详情（如 "No such file or directory"）
    pub spawn_error: Option<String>,
}

impl AnalysisResult {
    /// 进程启动失败时的结果
    pub fn spawn_failed(detail: impl Into<String>) -> Self {
        Self {
            spawn_error: Some(detail.into()),
            ..Self::default()
        }
    }

    /// 进程超时被终止时的结果
    pub fn timed_out() -> Self {
        Self {
            timed_out: true,
            ..Self::default()
        }
    }

    /// 进程是否正常运行结束（不论退出状态码是否为 0）
    pub fn ran_to_completion(&self) -> bool {
        self.spawn_error.is_none() && !self.timed_out && self.exit_code.is_some()
    }

    /// 输出是否应该交给输出路由展示
    ///
    /// - 状态码 0：始终展示
    /// - 非零状态码：仅当 `route_on_nonzero_exit` 开启且确实有输出时展示，
    ///   对应检查工具"发现问题即非零退出"的约定
    /// - 启动失败 / 超时 / 被信号终止：从不展示
    pub fn is_routable(&self, route_on_nonzero_exit: bool) -> bool {
        if self.succeeded {
            return true;
        }
        route_on_nonzero_exit && self.ran_to_completion() && !self.output.is_empty()
    }

    /// 写入日志用的失败原因描述
    pub fn failure_detail(&self) -> String {
        if let Some(err) = &self.spawn_error {
            return format!("启动进程失败: {}", err);
        }
        if self.timed_out {
            return "执行超时，进程已被终止".to_string();
        }
        match self.exit_code {
            Some(code) => format!("退出状态码 {}: {}", code, self.error_output.trim()),
            None => "进程被信号终止".to_string(),
        }
    }
}
