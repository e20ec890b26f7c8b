/*
[INPUT]:  CLI arguments, YAML configuration file, API token environment variable
[OUTPUT]: Exchange API responses printed as JSON
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, startup flow, or subcommands
*/

mod commands;
mod config;

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::commands::Command;
use crate::config::{API_TOKEN_ENV, CliConfig};

#[derive(Parser, Debug)]
#[command(name = "bitpanda-cli", version, about = "Bitpanda exchange REST client")]
struct Cli {
    #[arg(long = "config", value_name = "PATH")]
    config_path: PathBuf,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    log_level: String,
    #[arg(long = "dry-run")]
    dry_run: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(&args.log_level)?;

    info!(
        config_path = %args.config_path.display(),
        dry_run = args.dry_run,
        "starting bitpanda-cli"
    );

    let config = load_config(&args.config_path)?
        .with_token_override(std::env::var(API_TOKEN_ENV).ok());
    info!(
        api_base = %config.api_base,
        has_token = config.api_token.is_some(),
        "configuration loaded"
    );

    if args.dry_run {
        info!("dry-run requested; configuration validated");
        return Ok(());
    }

    let Some(command) = args.command else {
        bail!("no command given; see --help");
    };

    let client = config.build_client()?;
    let output = commands::run(&client, command).await?;
    println!(
        "{}",
        serde_json::to_string_pretty(&output).context("render output")?
    );

    Ok(())
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

fn load_config(path: &PathBuf) -> Result<CliConfig> {
    let path_str = path
        .to_str()
        .context("config path must be valid utf-8")?;
    CliConfig::from_file(path_str).context("load config")
}
