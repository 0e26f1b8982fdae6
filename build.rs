//! # Python Good Code - Tauri Cargo 构建脚本
//!
//! Cargo 在编译主项目之前执行本脚本，由 Tauri 完成构建准备工作：
//! - 读取 `tauri.conf.json`，生成运行时所需的上下文绑定代码
//! - 处理 `icons/` 下的应用图标与 `capabilities/` 下的权限清单
//! - 在 Windows 平台上生成应用程序清单（manifest）和资源文件（.rc）

/// 构建脚本入口函数
///
/// 调用 `tauri_build::build()` 执行 Tauri 所需的全部构建前处理步骤，
/// 配置或资源缺失时构建失败并给出提示。
fn main() {
  tauri_build::build()
}
