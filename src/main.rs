// Binary entry point - import modules directly
mod cli;
mod config;
mod core;
mod manager;
mod utils;

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

use cli::Cli;
use config::Config;
use utils::{AppError, OutputStyle, report_error};

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    // Load configuration, writing defaults on first run
    let config_path = cli.config.clone().unwrap_or_else(Config::config_file_path);
    let config = match &cli.config {
        Some(path) => Config::load_custom(path)?,
        None => Config::load()?,
    };

    if !config.general.color {
        colored::control::set_override(false);
    }

    tracing::debug!(student_file = %config.general.student_file.display(), "starting");
    cli.command.execute(config, &config_path)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<AppError>() {
                Some(app_err) if err.chain().count() == 1 => report_error(app_err),
                _ => eprintln!("❌ {}", OutputStyle::error(&format!("{:#}", err))),
            }
            ExitCode::FAILURE
        }
    }
}
