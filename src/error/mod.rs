// envcap: Shell Environment Capture & Pipeline Export
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//! anyhow::Error (propagation, context at I/O boundaries)
//!        |
//!   +----+----------+----------+
//!   v               v          v
//! ConfigError  CaptureError  ExportError
//! InvalidFilter ExecutableNotFound InvalidName
//! InvalidValue  SpawnFailed        InvalidValue
//!               NonZeroExit        Write
//!
//! NonZeroExit keeps the full stdout/stderr of the failed
//! capture command so the diagnostic shows what the shell
//! printed before dying.
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The variable filter is not a valid regular expression.
    #[error("invalid filter pattern '{pattern}': {source}")]
    InvalidFilter {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Invalid configuration value.
    #[error("invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Environment capture errors.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// Shell executable not found in PATH.
    #[error("shell not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn the capture process.
    #[error("failed to spawn '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The capture process exited with a non-zero status.
    ///
    /// Both captured streams ride along so callers can show what the
    /// shell printed before failing.
    #[error("'{command}' exited with code {code}\n{stdout}\n\n{stderr}")]
    NonZeroExit {
        command: String,
        code: i32,
        stdout: String,
        stderr: String,
    },
}

/// Export sink errors.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The variable name cannot be written in the target format.
    #[error("cannot export '{name}': {message}")]
    InvalidName { name: String, message: String },

    /// The variable value cannot be written in the target format.
    #[error("cannot export value of '{name}': {message}")]
    InvalidValue { name: String, message: String },

    /// Failed to write to the environment file.
    #[error("failed to write environment file '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests;
