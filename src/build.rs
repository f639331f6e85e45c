//! 构建流程模块：
//! - convert：汇总 SVG 并写出中间模块
//! - generate：（可选）刷新上游后读取中间模块并生成组件
//! - build：刷新 -> convert -> generate，严格顺序执行

use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

use crate::{aggregate, emit, refresh};

/// 各阶段的有效参数（已合并 CLI / 环境变量 / 配置 / 默认值）
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Settings {
    pub(crate) icons_dir: PathBuf,
    pub(crate) module: PathBuf,
    pub(crate) out_dir: PathBuf,
    pub(crate) templates_dir: Option<PathBuf>,
    /// None 表示跳过上游刷新
    pub(crate) refresh: Option<Vec<String>>,
}

fn refresh_if_enabled(settings: &Settings) -> Result<()> {
    match &settings.refresh {
        Some(command) => refresh::refresh_upstream(command),
        None => {
            info!("已跳过上游刷新");
            Ok(())
        }
    }
}

/// 汇总 SVG 源文件并写出中间模块
pub(crate) fn run_convert(settings: &Settings) -> Result<()> {
    aggregate::convert(&settings.icons_dir, &settings.module)?;
    Ok(())
}

/// 读取中间模块并生成组件；刷新失败时不会开始生成
pub(crate) fn run_generate(settings: &Settings) -> Result<()> {
    refresh_if_enabled(settings)?;
    generate_from_module(settings)
}

/// 刷新 -> convert -> generate
pub(crate) fn run_build(settings: &Settings) -> Result<()> {
    refresh_if_enabled(settings)?;
    run_convert(settings)?;
    generate_from_module(settings)
}

fn generate_from_module(settings: &Settings) -> Result<()> {
    let templates = emit::Templates::load(settings.templates_dir.as_deref())?;
    let collection = aggregate::read_module(&settings.module)?;
    info!(
        "读取中间模块: {}（{} 个图标）",
        settings.module.display(),
        collection.len()
    );
    emit::generate(&collection, &settings.out_dir, &templates)?;
    info!("✅ 生成完成 -> {}", settings.out_dir.display());
    Ok(())
}
