/*
[INPUT]:  CLI arguments, layered configuration, OS interrupt signals
[OUTPUT]: Executed dashboard command with recovery hints on failure
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, startup flow, or error reporting
*/

mod cli;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use console::style;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

use amdash_dashboard::{ClientStateError, DashboardConfig};

use crate::cli::{App, Command};

#[derive(Parser, Debug)]
#[command(name = "amdash", version, about = "Mentee and mentor task dashboard")]
struct Cli {
    #[arg(long = "config", value_name = "PATH", global = true)]
    config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn", global = true)]
    log_level: String,
    #[arg(long = "api-url", value_name = "URL", global = true)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Cli::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Cli) -> Result<()> {
    let mut config = DashboardConfig::load(args.config_path.as_deref()).context("load config")?;
    if let Some(api_url) = args.api_url {
        config.api_url = api_url.trim().trim_end_matches('/').to_string();
    }
    let _guard = init_tracing(&args.log_level, config.log_file.as_deref())?;
    debug!(api_url = %config.api_url, data_dir = %config.data_dir.display(), "configuration loaded");

    let shutdown = CancellationToken::new();
    if matches!(args.command, Command::Leaderboard { watch: true, .. }) {
        setup_signal_handlers(shutdown.clone());
    }

    let app = App::new(config, shutdown).await?;
    cli::run(&app, args.command).await
}

fn report(err: &anyhow::Error) {
    eprintln!("{} {err:#}", style("error:").red().bold());
    debug!(error = ?err, "command failed");
    if let Some(state) = err.downcast_ref::<ClientStateError>() {
        eprintln!("{} {}", style("hint:").yellow(), state.recovery_hint());
    }
}

fn init_tracing(log_level: &str, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .context("invalid log level")?;

    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|err| anyhow!(err))
            .context("initialize tracing subscriber")?;
        return Ok(None);
    };

    let directory = path.parent().filter(|dir| !dir.as_os_str().is_empty());
    let file_name = path
        .file_name()
        .context("log_file must name a file")?;
    if let Some(directory) = directory {
        std::fs::create_dir_all(directory)
            .with_context(|| format!("create log directory {}", directory.display()))?;
    }
    let appender = tracing_appender::rolling::never(directory.unwrap_or(Path::new(".")), file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(writer.and(std::io::stderr))
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    info!(path = %path.display(), "logging to file");
    Ok(Some(guard))
}

fn setup_signal_handlers(shutdown: CancellationToken) {
    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to install SIGINT handler");
            return;
        }
        info!("received SIGINT");
        shutdown.cancel();
    });
}
