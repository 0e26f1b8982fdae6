//! # 错误分类
//!
//! 插件内部服务统一使用 `PluginError`；Tauri command 层按照 IPC 约定
//! 通过 `to_string()` 转换为 `String` 返回给前端。
//!
//! 所有错误都不会影响宿主进程，工作流在任何错误后都会回到空闲状态。

use std::path::PathBuf;

/// 插件错误类型
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    /// 未配置检查命令，或命令无法按 shell 规则解析
    #[error("检查命令配置无效: {0}")]
    Configuration(String),

    /// 设置目录创建失败或设置文件写入失败（内存中的设置不回滚）
    #[error("保存设置失败 ({}): {source}", .path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 检查工具启动失败、异常退出或超时
    #[error("执行检查工具失败: {0}")]
    Execution(String),

    /// 没有活动文档，或另存为之后文档仍然没有磁盘路径
    #[error("没有可检查的已保存文档")]
    NoDocument,

    /// 编辑器保存文档失败
    #[error("保存文档失败: {0}")]
    Save(String),

    /// 上一次检查尚未结束
    #[error("代码检查正在进行中")]
    Busy,
}
