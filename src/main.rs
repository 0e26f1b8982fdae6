//! # Python Good Code - Tauri 桌面应用原生入口点
//!
//! Rust 编译器从此处的 `main()` 开始执行，随后调用 `python_good_code_lib::run()`
//! 完成插件注册、设置加载与事件循环启动。
//!
//! `main.rs` 只负责启动应用；代码检查工作流、设置存储等核心逻辑都位于库 crate
//! （`lib.rs`）中，便于桌面端与移动端共享，也便于在单元测试中直接调用。

// Prevents additional console window on Windows in release, DO NOT REMOVE!!
// 在 Windows 平台的 Release 构建中隐藏控制台窗口，请勿移除此属性！
// 仅在非调试模式下生效，将 Windows 子系统设置为 "windows"（GUI 模式）。
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

/// 应用程序主入口函数
///
/// 调用 `python_good_code_lib::run()` 启动 Tauri 应用；
/// 对话框与日志插件、代码检查 commands 和全局状态均在其中注册。
fn main() {
  python_good_code_lib::run();
}
