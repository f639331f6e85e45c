//! 初始化脚手架模块
//! - `zappgen init` 写出示例配置与内置模板，便于按项目定制

use anyhow::{Context, Result};
use std::{fs, path::Path};
use tracing::{info, warn};

use crate::emit::embedded_templates;

// 内置示例（用于 init）
pub(crate) const SAMPLE_CONFIG: &str = include_str!("assets/sample.zappgen.yaml");

/// 初始化示例配置与模板目录
pub(crate) fn init_scaffold(dir: &Path, force: bool) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir).with_context(|| format!("创建目录失败: {}", dir.display()))?;
    }

    // 写入示例配置
    let cfg_path = dir.join("zappgen.yaml");
    if cfg_path.exists() && !force {
        warn!("跳过: {} 已存在，使用 --force 可覆盖", cfg_path.display());
    } else {
        fs::write(&cfg_path, SAMPLE_CONFIG.as_bytes())
            .with_context(|| format!("写入示例配置失败: {}", cfg_path.display()))?;
        info!("写入: {}", cfg_path.display());
    }

    // 写入模板目录
    let templates_root = dir.join("templates");
    if templates_root.exists() && !force {
        warn!("跳过: {} 已存在，使用 --force 可覆盖", templates_root.display());
    } else {
        write_default_templates(&templates_root)?;
        info!("写入: {}", templates_root.display());
    }

    info!("✅ 初始化完成，在根目录运行: zappgen build");
    Ok(())
}

/// 将内置模板写出到指定目录（保留子目录结构）
pub(crate) fn write_default_templates(target_dir: &Path) -> Result<()> {
    for (rel, contents) in embedded_templates() {
        let out_path = target_dir.join(&rel);
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&out_path, contents)
            .with_context(|| format!("写出模板文件失败: {}", out_path.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::parse_config, emit::Templates};
    use tempfile::TempDir;

    #[test]
    fn sample_config_parses() {
        let cfg = parse_config(SAMPLE_CONFIG).unwrap();
        assert_eq!(cfg.out_dir, std::path::PathBuf::from("src"));
        assert!(cfg.refresh.enabled);
    }

    #[test]
    fn scaffold_writes_config_and_templates() {
        let tmp = TempDir::new().unwrap();
        init_scaffold(tmp.path(), false).unwrap();
        assert!(tmp.path().join("zappgen.yaml").is_file());
        assert!(tmp.path().join("templates").join("component.tsx.tera").is_file());
        assert!(tmp.path().join("templates").join("lib").join("icon-base.tsx.tera").is_file());

        // 写出的模板可直接作为模板目录使用
        assert!(Templates::load(Some(&tmp.path().join("templates"))).is_ok());
    }

    #[test]
    fn existing_files_are_kept_without_force() {
        let tmp = TempDir::new().unwrap();
        let cfg = tmp.path().join("zappgen.yaml");
        fs::write(&cfg, "out_dir: mine\n").unwrap();

        init_scaffold(tmp.path(), false).unwrap();
        assert_eq!(fs::read_to_string(&cfg).unwrap(), "out_dir: mine\n");

        init_scaffold(tmp.path(), true).unwrap();
        assert_eq!(fs::read_to_string(&cfg).unwrap(), SAMPLE_CONFIG);
    }
}
