//! 上游刷新模块：生成前更新图标源（默认 `git submodule update --remote ...`）

use anyhow::{bail, Context, Result};
use std::process::Command;
use tracing::info;

/// 默认刷新命令
pub(crate) fn default_command() -> Vec<String> {
    ["git", "submodule", "update", "--remote", "--init", "--force", "--recursive"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// 执行刷新命令（继承标准输入输出），非零退出视为失败
pub(crate) fn refresh_upstream(command: &[String]) -> Result<()> {
    let Some((program, args)) = command.split_first() else {
        bail!("刷新命令为空");
    };
    let line = command.join(" ");
    info!("🔄 更新上游图标源: {}", line);
    let status = Command::new(program)
        .args(args)
        .status()
        .with_context(|| format!("无法启动刷新命令: {}", line))?;
    if !status.success() {
        bail!("刷新命令执行失败（{}）: {}", status, line);
    }
    info!("✅ 上游图标源已更新");
    Ok(())
}
