//! # 检查工具执行服务
//!
//! 将配置的命令与文档路径组装为结构化调用（Invocation），
//! 在 tokio 运行时中异步启动子进程并等待其结束，收集标准输出、标准错误和退出状态。
//!
//! ## 失败策略
//! 启动失败、非零退出和超时都不会返回 `Err`，而是体现在 `AnalysisResult` 的字段中，
//! 由工作流决定展示什么状态文本。
//!
//! ## 超时
//! `timeout` 为 None 时无限等待；
//! 设置了超时且到期时，子进程因 `kill_on_drop` 随 future 一起被终止。

use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;

use crate::error::PluginError;
use crate::models::analysis::{AnalysisResult, Invocation};

/// 执行函数返回的 future 类型
pub type RunFuture<'a> = Pin<Box<dyn Future<Output = AnalysisResult> + Send + 'a>>;

/// 检查工具执行器
///
/// 工作流通过此 trait 调用检查工具，测试中可替换为脚本化的实现。
pub trait Runner: Send + Sync {
    /// 执行一次调用并等待结束
    fn run<'a>(&'a self, invocation: &'a Invocation, timeout: Option<Duration>) -> RunFuture<'a>;
}

/// 由命令字符串和文件路径组装结构化调用
///
/// 命令按 shell 规则拆分（支持引号），文件路径作为独立的最后一个参数追加，
/// 不再与命令拼接成一条命令行。
///
/// # 错误
/// 命令为空白或引号不配对时返回 `PluginError::Configuration`
pub fn build_invocation(command: &str, file_path: &Path) -> Result<Invocation, PluginError> {
    let mut words = shell_words::split(command)
        .map_err(|e| PluginError::Configuration(format!("无法解析命令 `{}`: {}", command, e)))?;

    if words.is_empty() {
        return Err(PluginError::Configuration("未配置检查命令".to_string()));
    }

    let program = words.remove(0);
    words.push(file_path.to_string_lossy().to_string());

    Ok(Invocation {
        program,
        args: words,
    })
}

/// 基于 `tokio::process` 的真实执行器
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl Runner for ProcessRunner {
    fn run<'a>(&'a self, invocation: &'a Invocation, timeout: Option<Duration>) -> RunFuture<'a> {
        Box::pin(run_process(invocation, timeout))
    }
}

/// 启动子进程并收集输出
async fn run_process(invocation: &Invocation, timeout: Option<Duration>) -> AnalysisResult {
    log::info!("执行代码检查: {}", invocation.display_line());

    let child = Command::new(&invocation.program)
        .args(&invocation.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn();

    let child = match child {
        Ok(child) => child,
        Err(e) => return AnalysisResult::spawn_failed(e.to_string()),
    };

    let waited = match timeout {
        Some(limit) => match tokio::time::timeout(limit, child.wait_with_output()).await {
            Ok(waited) => waited,
            Err(_) => {
                log::warn!("代码检查超过 {} 秒未结束，已终止", limit.as_secs());
                return AnalysisResult::timed_out();
            }
        },
        None => child.wait_with_output().await,
    };

    match waited {
        Ok(out) => AnalysisResult {
            succeeded: out.status.success(),
            exit_code: out.status.code(),
            output: String::from_utf8_lossy(&out.stdout).to_string(),
            error_output: String::from_utf8_lossy(&out.stderr).to_string(),
            timed_out: false,
            spawn_error: None,
        },
        Err(e) => AnalysisResult::spawn_failed(format!("等待进程结束失败: {}", e)),
    }
}
