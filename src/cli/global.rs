// envcap: Shell Environment Capture & Pipeline Export
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! --config FILE     ← Additional config files (can repeat)
//! --dry             ← Plan and log, export nothing
//! --log-level N     ← Console verbosity (0-5)
//! --file-log-level  ← File verbosity (overrides --log-level)
//! --set KEY=VALUE   ← Direct input override
//!
//! Precedence: subcommand flags > --set > INPUT_* env > --config > defaults
//! ```

use clap::Args;
use std::path::PathBuf;

use crate::error::ConfigError;

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to additional TOML configuration file(s).
    /// Can be specified multiple times.
    #[arg(short = 'c', long = "config", value_name = "FILE", action = clap::ArgAction::Append)]
    pub configs: Vec<PathBuf>,

    /// Plans and logs the exports without writing any of them.
    /// Useful to preview what a filter would let through.
    #[arg(long)]
    pub dry: bool,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=5)
    )]
    pub log_level: Option<u8>,

    /// File log level, overrides --log-level for the log file.
    #[arg(long = "file-log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=5)
    )]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Sets an input, such as 'filter=^CI_' or 'shell=zsh'.
    /// Can be specified multiple times.
    #[arg(short = 's', long = "set", value_name = "KEY=VALUE", action = clap::ArgAction::Append)]
    pub options: Vec<String>,

    /// Disables auto loading of envcap.toml, only uses --config.
    #[arg(long = "no-default-config")]
    pub no_default_config: bool,
}

impl GlobalOptions {
    /// Splits every `--set KEY=VALUE` into a (key, value) pair, with the
    /// key trimmed and lowercased to match the loader's keyspace.
    ///
    /// # Errors
    ///
    /// Returns an error if an option is missing the `=`.
    pub fn parsed_overrides(&self) -> Result<Vec<(String, String)>, ConfigError> {
        self.options
            .iter()
            .map(|option| {
                option
                    .split_once('=')
                    .map(|(key, value)| (key.trim().to_lowercase(), value.to_string()))
                    .ok_or_else(|| ConfigError::InvalidValue {
                        key: option.clone(),
                        message: "expected key=value".to_string(),
                    })
            })
            .collect()
    }
}
