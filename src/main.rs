use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use active_triphones::triphones::cli::Cli;
use active_triphones::triphones::pipeline;
use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let trace_args = cli.command.trace_args();
    init_tracing(trace_args.silent, trace_args.log_file.as_deref())
        .context("Failed to initialise logging")?;

    let config = cli.command.to_config();
    config
        .validate()
        .context("Failed to validate command-line arguments")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    pipeline::run(&config, &mut out).with_context(|| {
        format!(
            "Failed to extract active triphones from {}",
            config.input.display()
        )
    })?;
    Ok(())
}

/// Installs the global subscriber. `RUST_LOG` wins over the `--silent` default.
fn init_tracing(silent: bool, log_file: Option<&Path>) -> Result<()> {
    let default_level = if silent { "warn" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {:?}", path))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(io::stderr).try_init(),
    }
    .map_err(|err| anyhow::anyhow!("{err}"))
}
