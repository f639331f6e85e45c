//! 命令调度模块：
//! - 接收解析好的 CLI 参数，计算“有效参数”（CLI > 环境变量 > 配置文件 > 默认值）
//! - 调用 convert / generate / build / init 等模块

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::{
    build::{run_build, run_convert, run_generate, Settings},
    cli::{Cli, Command, ConvertArgs, GenerateArgs},
    config::{self, Config},
    init::init_scaffold,
    utils::{env_bool_truthy, env_opt_path},
};

/// 运行指定的子命令
pub(crate) fn run(cli: Cli) -> Result<()> {
    let (phase, convert, generate) = match cli.command {
        Command::Init { force, dir } => {
            let dir = dir.unwrap_or_else(|| PathBuf::from("."));
            return init_scaffold(&dir, force);
        }
        Command::Convert { convert } => (Phase::Convert, convert, GenerateArgs::default()),
        Command::Generate { module, generate } => {
            (Phase::Generate, ConvertArgs { icons: None, module }, generate)
        }
        Command::Build { convert, generate } => (Phase::Build, convert, generate),
    };

    let explicit = cli.config.or_else(|| env_opt_path("ZAPPGEN_CONFIG"));
    let (config, source) = config::load_config(explicit.as_deref(), Path::new("."))?;
    info!("ℹ️ 本次使用的配置来源: {}", config::describe_source(&source));

    let settings = effective_settings(config, convert, generate, &EnvOverrides::from_env());
    match phase {
        Phase::Convert => run_convert(&settings),
        Phase::Generate => run_generate(&settings),
        Phase::Build => run_build(&settings),
    }
}

enum Phase {
    Convert,
    Generate,
    Build,
}

/// 环境变量覆盖（若 CLI 未指定）
#[derive(Debug, Default)]
pub(crate) struct EnvOverrides {
    pub(crate) icons_dir: Option<PathBuf>,
    pub(crate) module: Option<PathBuf>,
    pub(crate) out_dir: Option<PathBuf>,
    pub(crate) templates_dir: Option<PathBuf>,
    pub(crate) skip_refresh: bool,
}

impl EnvOverrides {
    pub(crate) fn from_env() -> Self {
        Self {
            icons_dir: env_opt_path("ZAPPGEN_ICONS_DIR"),
            module: env_opt_path("ZAPPGEN_MODULE"),
            out_dir: env_opt_path("ZAPPGEN_OUT"),
            templates_dir: env_opt_path("ZAPPGEN_TEMPLATES"),
            skip_refresh: env_bool_truthy("ZAPPGEN_SKIP_REFRESH").unwrap_or(false),
        }
    }
}

/// 合并各来源得到最终参数
pub(crate) fn effective_settings(
    config: Config,
    convert: ConvertArgs,
    generate: GenerateArgs,
    env: &EnvOverrides,
) -> Settings {
    let skip_refresh = generate.skip_refresh || env.skip_refresh || !config.refresh.enabled;
    Settings {
        icons_dir: convert.icons.or_else(|| env.icons_dir.clone()).unwrap_or(config.icons_dir),
        module: convert.module.or_else(|| env.module.clone()).unwrap_or(config.module),
        out_dir: generate.out.or_else(|| env.out_dir.clone()).unwrap_or(config.out_dir),
        templates_dir: generate
            .templates
            .or_else(|| env.templates_dir.clone())
            .or(config.templates_dir),
        refresh: if skip_refresh { None } else { Some(config.refresh.command) },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;

    #[test]
    fn cli_beats_env_beats_config() {
        let config = parse_config("icons_dir: cfg/icons\nmodule: cfg.ts\nout_dir: cfg-out\n").unwrap();
        let env = EnvOverrides {
            module: Some(PathBuf::from("env.ts")),
            out_dir: Some(PathBuf::from("env-out")),
            ..Default::default()
        };
        let generate = GenerateArgs { out: Some(PathBuf::from("cli-out")), ..Default::default() };
        let s = effective_settings(config, ConvertArgs::default(), generate, &env);
        assert_eq!(s.icons_dir, PathBuf::from("cfg/icons"));
        assert_eq!(s.module, PathBuf::from("env.ts"));
        assert_eq!(s.out_dir, PathBuf::from("cli-out"));
        assert!(s.templates_dir.is_none());
    }

    #[test]
    fn refresh_can_be_disabled_from_any_source() {
        let enabled = effective_settings(
            Config::default(),
            ConvertArgs::default(),
            GenerateArgs::default(),
            &EnvOverrides::default(),
        );
        assert!(enabled.refresh.is_some());

        let by_flag = effective_settings(
            Config::default(),
            ConvertArgs::default(),
            GenerateArgs { skip_refresh: true, ..Default::default() },
            &EnvOverrides::default(),
        );
        assert!(by_flag.refresh.is_none());

        let by_env = effective_settings(
            Config::default(),
            ConvertArgs::default(),
            GenerateArgs::default(),
            &EnvOverrides { skip_refresh: true, ..Default::default() },
        );
        assert!(by_env.refresh.is_none());

        let by_config = effective_settings(
            parse_config("refresh:\n  enabled: false\n").unwrap(),
            ConvertArgs::default(),
            GenerateArgs::default(),
            &EnvOverrides::default(),
        );
        assert!(by_config.refresh.is_none());
    }

    #[test]
    fn custom_refresh_command_is_kept() {
        let config = parse_config("refresh:\n  command: [make, fetch-icons]\n").unwrap();
        let s = effective_settings(config, ConvertArgs::default(), GenerateArgs::default(), &EnvOverrides::default());
        assert_eq!(s.refresh, Some(vec!["make".to_string(), "fetch-icons".to_string()]));
    }
}
