// envcap: Shell Environment Capture & Pipeline Export
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for envcap using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! envcap [global options] [command]
//! export [--shell --args --filter --include-filter --path-separator --env-file]
//! options
//! version
//! ```
//!
//! Running without a command runs `export` with its defaults.

pub mod export;
pub mod global;


use crate::cli::export::ExportArgs;
use crate::cli::global::GlobalOptions;
use clap::{Parser, Subcommand};

/// Shell Environment Capture & Pipeline Export
///
/// Captures the environment a shell produces and exports it to the
/// host pipeline.
#[derive(Debug, Parser)]
#[command(
    name = "envcap",
    author,
    version,
    about = "Shell environment capture and pipeline export",
    long_about = "envcap Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Runs a shell, captures the environment dump it prints, filters\n\
                  the variables by name, and exports the survivors to the host\n\
                  pipeline's persistent environment. PATH entries are appended,\n\
                  never replaced, and INPUT_ prefixes are stripped from exported\n\
                  names.\n\n\
                  Running `envcap` without a command is the same as\n\
                  `envcap export`. See `envcap <command> --help` for more\n\
                  information about a command.",
    after_help = "CONFIGURATION:\n\n\
                  By default, envcap looks for an `envcap.toml` in the current\n\
                  directory. Files given with --config load after it and\n\
                  override it, in order. INPUT_* environment variables (the\n\
                  form CI runners use to pass action inputs) override all\n\
                  files, --set KEY=VALUE overrides those, and export\n\
                  subcommand flags override everything. Use --no-default-config\n\
                  to skip the auto-detected file and only use --config."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all inputs and their effective values.
    Options,

    /// Captures the shell environment and exports it (the default).
    Export(ExportArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
