mod aggregate;
mod build;
mod cli;
mod commands;
mod config;
mod emit;
mod init;
mod refresh;
mod render;
mod svg;
mod utils;
mod variant;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "zappgen=info".into()))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    let cli = cli::Cli::parse();
    commands::run(cli)
}
