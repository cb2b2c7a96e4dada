// envcap: Shell Environment Capture & Pipeline Export
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Logging --> Command Dispatch
//!   Export (default) | Options | Version
//! ```

use std::process::ExitCode;

use envcap::cli::export::ExportArgs;
use envcap::cli::global::GlobalOptions;
use envcap::cli::{self, Command};
use envcap::cmd::export::run_export_command;
use envcap::cmd::options::run_options_command;
use envcap::config::Config;
use envcap::config::loader::ConfigLoader;
use envcap::logging::{LogConfig, LogLevel, init_logging, runner_debug};
use tracing::{debug, error};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let log_config = build_log_config(&cli.global);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli).await
}

fn build_log_config(global: &GlobalOptions) -> LogConfig {
    // Runners ask for verbose output with RUNNER_DEBUG=1 rather than a flag.
    let default_level = if runner_debug() {
        LogLevel::DEBUG
    } else {
        LogLevel::INFO
    };

    let console_level = global
        .log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(default_level);

    let file_level = global
        .file_log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(console_level);

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(file_level)
        .maybe_with_log_file(global.log_file.as_ref().map(|p| p.display().to_string()))
        .build()
}

async fn dispatch_command(cli: &cli::Cli) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Options) => {
            load_config(&cli.global, None).map(|config| run_options_command(&config))
        }
        Some(Command::Export(args)) => run_export(cli, args).await,
        None => run_export(cli, &ExportArgs::default()).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!(error = ?e, "command failed");
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

async fn run_export(cli: &cli::Cli, args: &ExportArgs) -> envcap::error::Result<()> {
    let config = load_config(&cli.global, Some(args))?;
    run_export_command(&config, cli.global.dry).await
}

fn load_config(
    global: &GlobalOptions,
    args: Option<&ExportArgs>,
) -> envcap::error::Result<Config> {
    let mut loader = ConfigLoader::new();

    if !global.no_default_config {
        loader = loader.add_toml_file_optional("envcap.toml");
    }
    for config_path in &global.configs {
        loader = loader.add_toml_file(config_path);
    }
    loader = loader.with_env_prefix("INPUT");

    for (key, value) in global.parsed_overrides()? {
        loader = loader.set(&key, value)?;
    }
    if let Some(args) = args {
        for (key, value) in args.to_config_overrides() {
            loader = loader.set(&key, value)?;
        }
    }

    loader.build()
}
