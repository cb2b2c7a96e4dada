// envcap: Shell Environment Capture & Pipeline Export
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for envcap.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. envcap.toml (cwd, optional)
//! 3. --config files (in order)
//! 4. INPUT_* environment variables
//! 5. --set KEY=VALUE overrides
//! 6. export subcommand flags
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! INPUT_SHELL=zsh            → shell = "zsh"
//! INPUT_FILTER=^CI_          → filter = "^CI_"
//! INPUT_INCLUDEFILTER=false  → includefilter = "false"
//! ```
//!
//! All inputs are strings, including the boolean-shaped `includefilter`;
//! [`Config::resolve`] validates them and produces typed
//! [`ResolvedInputs`] in one step, so a bad filter or polarity is
//! reported before any shell is spawned.

pub mod loader;

#[cfg(test)]
mod tests;

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::core::env::policy::{ExportPolicy, FilterPolarity};
use crate::error::{ConfigError, Result};

use loader::ConfigLoader;

/// Complete application configuration.
///
/// Field names squash to lowercase so TOML keys, `INPUT_*` environment
/// variables, and `--set` overrides all address the same entry.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Shell used to produce the environment dump.
    #[serde(default = "defaults::shell")]
    pub shell: String,
    /// Arguments handed to the shell, whitespace-separated.
    #[serde(default = "defaults::args")]
    pub args: String,
    /// Regular expression matched against variable names.
    #[serde(default = "defaults::filter")]
    pub filter: String,
    /// `"true"` exports matching names, `"false"` exports the rest.
    #[serde(default = "defaults::include_filter", rename = "includefilter")]
    pub include_filter: String,
    /// Separator used when appending to PATH.
    #[serde(default = "defaults::path_separator", rename = "pathseparator")]
    pub path_separator: String,
    /// Explicit pipeline env file path; falls back to the ambient
    /// `GITHUB_ENV` when unset.
    #[serde(default, rename = "envfile")]
    pub env_file: Option<String>,
}

mod defaults {
    pub(super) fn shell() -> String {
        "bash".to_string()
    }

    pub(super) fn args() -> String {
        "-c env".to_string()
    }

    pub(super) fn filter() -> String {
        ".*".to_string()
    }

    pub(super) fn include_filter() -> String {
        "true".to_string()
    }

    pub(super) fn path_separator() -> String {
        if cfg!(windows) { ";" } else { ":" }.to_string()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            shell: defaults::shell(),
            args: defaults::args(),
            filter: defaults::filter(),
            include_filter: defaults::include_filter(),
            path_separator: defaults::path_separator(),
            env_file: None,
        }
    }
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use envcap::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("envcap.toml")
    ///     .with_env_prefix("INPUT")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file (simple API).
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Validate the raw inputs and produce their typed form.
    ///
    /// # Errors
    ///
    /// Returns an error if the filter is not a valid regular expression
    /// or `includefilter` is not `true`/`false`.
    pub fn resolve(&self) -> Result<ResolvedInputs> {
        let polarity = parse_polarity(&self.include_filter)?;
        let policy = ExportPolicy::new(&self.filter, polarity, self.path_separator.as_str())?;

        Ok(ResolvedInputs {
            shell: self.shell.clone(),
            args: self.args.split_whitespace().map(String::from).collect(),
            policy,
            env_file: self
                .env_file
                .as_deref()
                .filter(|path| !path.is_empty())
                .map(PathBuf::from),
        })
    }

    /// Format configuration options for display.
    ///
    /// Returns a vector of formatted strings, one per option, under the
    /// same lowercase keys the loader accepts. Output is
    /// deterministically ordered using `BTreeMap`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        options.insert("shell".to_string(), self.shell.clone());
        options.insert("args".to_string(), self.args.clone());
        options.insert("filter".to_string(), self.filter.clone());
        options.insert("includefilter".to_string(), self.include_filter.clone());
        options.insert("pathseparator".to_string(), self.path_separator.clone());
        options.insert(
            "envfile".to_string(),
            self.env_file.clone().unwrap_or_default(),
        );

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}

/// Inputs after validation, ready to drive a capture run.
#[derive(Debug, Clone)]
pub struct ResolvedInputs {
    shell: String,
    args: Vec<String>,
    policy: ExportPolicy,
    env_file: Option<PathBuf>,
}

impl ResolvedInputs {
    /// Returns the shell program name.
    #[must_use]
    pub fn shell(&self) -> &str {
        &self.shell
    }

    /// Returns the shell argument list.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Returns the export policy.
    #[must_use]
    pub const fn policy(&self) -> &ExportPolicy {
        &self.policy
    }

    /// Returns the explicit env file path, if configured.
    #[must_use]
    pub fn env_file(&self) -> Option<&Path> {
        self.env_file.as_deref()
    }
}

fn parse_polarity(value: &str) -> std::result::Result<FilterPolarity, ConfigError> {
    if value.eq_ignore_ascii_case("true") {
        Ok(FilterPolarity::Include)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(FilterPolarity::Exclude)
    } else {
        Err(ConfigError::InvalidValue {
            key: "includefilter".to_string(),
            message: format!("expected true or false, got '{value}'"),
        })
    }
}
