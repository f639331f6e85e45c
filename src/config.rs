//! 配置与加载模块：
//! - 定义 `Config`/`RefreshSettings` 等数据结构（YAML）
//! - 提供 `load_config`：显式路径 > 自动发现 `zappgen.yaml` > 内置默认值
//! - 暴露配置来源信息，便于日志打印

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::refresh;

pub(crate) const CONFIG_CANDIDATES: [&str; 2] = ["zappgen.yaml", "zappgen.yml"];

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Config {
    /// SVG 源目录，下含每个变体一个子目录
    #[serde(default = "default_icons_dir")]
    pub(crate) icons_dir: PathBuf,
    /// 中间模块路径（convert 写出，generate 读取）
    #[serde(default = "default_module")]
    pub(crate) module: PathBuf,
    /// 组件输出目录（icons/、variants/、lib/、index.ts）
    #[serde(default = "default_out_dir")]
    pub(crate) out_dir: PathBuf,
    /// 模板目录（可选），缺失的模板使用内置版本
    #[serde(default)]
    pub(crate) templates_dir: Option<PathBuf>,
    /// 上游刷新设置
    #[serde(default)]
    pub(crate) refresh: RefreshSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RefreshSettings {
    #[serde(default = "default_true")]
    pub(crate) enabled: bool,
    #[serde(default = "refresh::default_command")]
    pub(crate) command: Vec<String>,
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self { enabled: true, command: refresh::default_command() }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            icons_dir: default_icons_dir(),
            module: default_module(),
            out_dir: default_out_dir(),
            templates_dir: None,
            refresh: RefreshSettings::default(),
        }
    }
}

fn default_icons_dir() -> PathBuf { PathBuf::from("core/icons") }
fn default_module() -> PathBuf { PathBuf::from("core/src/index.ts") }
fn default_out_dir() -> PathBuf { PathBuf::from("src") }
fn default_true() -> bool { true }

/// 配置来源（用于打印和调试）
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ConfigSource {
    LocalExplicit(String),
    LocalAuto(String),
    Defaults,
}

/// 人类可读的来源描述
pub(crate) fn describe_source(src: &ConfigSource) -> String {
    match src {
        ConfigSource::LocalExplicit(p) => format!("本地文件: {}", p),
        ConfigSource::LocalAuto(p) => format!("本地文件(自动发现): {}", p),
        ConfigSource::Defaults => "内置默认值".to_string(),
    }
}

fn resolve_local_config_path(dir: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(|cand| dir.join(cand))
        .find(|p| p.is_file())
}

fn read_config(path: &Path) -> Result<Config> {
    let text = fs::read_to_string(path).with_context(|| format!("读取配置失败: {}", path.display()))?;
    parse_config(&text).with_context(|| format!("解析 YAML 失败: {}", path.display()))
}

pub(crate) fn parse_config(text: &str) -> Result<Config> {
    if text.trim().is_empty() {
        return Ok(Config::default());
    }
    Ok(serde_yaml::from_str(text)?)
}

/// 加载配置：显式路径必须存在；否则在 `dir` 中自动发现；都没有则使用默认值
pub(crate) fn load_config(explicit: Option<&Path>, dir: &Path) -> Result<(Config, ConfigSource)> {
    if let Some(path) = explicit {
        if !path.is_file() {
            bail!("配置文件不存在: {}", path.display());
        }
        let cfg = read_config(path)?;
        return Ok((cfg, ConfigSource::LocalExplicit(path.display().to_string())));
    }
    if let Some(path) = resolve_local_config_path(dir) {
        let cfg = read_config(&path)?;
        return Ok((cfg, ConfigSource::LocalAuto(path.display().to_string())));
    }
    Ok((Config::default(), ConfigSource::Defaults))
}
