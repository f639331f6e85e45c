//! CLI 定义模块：仅负责命令行参数结构体与解析
//! 将 clap 的声明与业务逻辑解耦，便于在其它模块中复用参数。

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// 顶层 CLI 入口
#[derive(Parser, Debug)]
#[command(name = "zappgen", about = "SVG 图标集 -> React / React Native 组件生成器", version)]
pub(crate) struct Cli {
    /// 配置文件路径，默认：zappgen.yaml / zappgen.yml（均不存在时使用内置默认值）
    #[arg(short, long, global = true)]
    pub(crate) config: Option<PathBuf>,
    #[command(subcommand)]
    pub(crate) command: Command,
}

/// convert 阶段参数
#[derive(Args, Debug, Clone, Default)]
pub(crate) struct ConvertArgs {
    /// SVG 源目录（每个变体一个子目录），默认：core/icons
    #[arg(long, value_name = "DIR")]
    pub(crate) icons: Option<PathBuf>,
    /// 中间模块路径，默认：core/src/index.ts
    #[arg(long, value_name = "FILE")]
    pub(crate) module: Option<PathBuf>,
}

/// generate 阶段参数
#[derive(Args, Debug, Clone, Default)]
pub(crate) struct GenerateArgs {
    /// 组件输出目录，默认：src
    #[arg(short, long, value_name = "DIR")]
    pub(crate) out: Option<PathBuf>,
    /// 模板目录，覆盖同名内置模板
    #[arg(long, value_name = "DIR")]
    pub(crate) templates: Option<PathBuf>,
    /// 跳过生成前的上游刷新（git submodule update）
    #[arg(long)]
    pub(crate) skip_refresh: bool,
}

/// 子命令定义
#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// 汇总 SVG 源文件并写出中间模块
    Convert {
        #[command(flatten)]
        convert: ConvertArgs,
    },
    /// 从中间模块生成组件、变体映射与 index
    Generate {
        /// 中间模块路径，默认：core/src/index.ts
        #[arg(long, value_name = "FILE")]
        module: Option<PathBuf>,
        #[command(flatten)]
        generate: GenerateArgs,
    },
    /// 依次执行上游刷新、convert 与 generate
    Build {
        #[command(flatten)]
        convert: ConvertArgs,
        #[command(flatten)]
        generate: GenerateArgs,
    },
    /// 初始化示例配置与内置模板
    Init {
        /// 强制覆盖已存在文件
        #[arg(long)]
        force: bool,
        /// 目标目录（默认当前目录）
        #[arg(value_name = "DIR")]
        dir: Option<PathBuf>,
    },
}
