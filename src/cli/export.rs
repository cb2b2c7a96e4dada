// envcap: Shell Environment Capture & Pipeline Export
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments for the export command.

use clap::Args;
use std::path::PathBuf;

/// Arguments for the export command.
#[derive(Debug, Clone, Default, Args)]
pub struct ExportArgs {
    /// Shell used to produce the environment dump.
    #[arg(long, value_name = "PROGRAM")]
    pub shell: Option<String>,

    /// Arguments handed to the shell, whitespace-separated.
    #[arg(long, value_name = "ARGS")]
    pub args: Option<String>,

    /// Regular expression matched against variable names.
    #[arg(short = 'f', long, value_name = "REGEX")]
    pub filter: Option<String>,

    /// Whether matching names are exported (true) or dropped (false).
    #[arg(long = "include-filter", value_name = "BOOL")]
    pub include_filter: Option<String>,

    /// Separator used when appending to PATH.
    #[arg(long = "path-separator", value_name = "SEP")]
    pub path_separator: Option<String>,

    /// Pipeline env file to append exports to.
    #[arg(long = "env-file", value_name = "FILE")]
    pub env_file: Option<PathBuf>,
}

impl ExportArgs {
    /// Converts set flags to configuration overrides under the loader's
    /// lowercase keys.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<(String, String)> {
        let mut overrides = Vec::new();

        if let Some(ref shell) = self.shell {
            overrides.push(("shell".to_string(), shell.clone()));
        }
        if let Some(ref args) = self.args {
            overrides.push(("args".to_string(), args.clone()));
        }
        if let Some(ref filter) = self.filter {
            overrides.push(("filter".to_string(), filter.clone()));
        }
        if let Some(ref include_filter) = self.include_filter {
            overrides.push(("includefilter".to_string(), include_filter.clone()));
        }
        if let Some(ref path_separator) = self.path_separator {
            overrides.push(("pathseparator".to_string(), path_separator.clone()));
        }
        if let Some(ref env_file) = self.env_file {
            overrides.push(("envfile".to_string(), env_file.display().to_string()));
        }

        overrides
    }
}
