// envcap: Shell Environment Capture & Pipeline Export
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Export sinks: where planned exports actually land.
//!
//! ```text
//! ExportSink
//!   +- EnvFileSink  append heredoc records to a runner env file
//!   +- ScriptSink   print `export NAME='VALUE'` lines to stdout
//!   +- MemorySink   collect pairs in memory (tests, embedding)
//!   +- NullSink     accept and discard everything (dry runs)
//! ```
//!
//! The env file format is the heredoc dialect CI runners consume:
//!
//! ```text
//! NAME<<ghadelimiter_{uuid}
//! VALUE
//! ghadelimiter_{uuid}
//! ```
//!
//! A fresh random delimiter per record keeps multi-line values from
//! forging a record boundary; a value that still contains the delimiter
//! is rejected rather than written.

use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use tracing::warn;
use uuid::Uuid;

use crate::error::ExportError;

/// Ambient variable holding the pipeline env file path.
pub const ENV_FILE_VAR: &str = "GITHUB_ENV";

/// What a sink did with one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The record landed in the sink.
    Written,
    /// The sink declined the record, e.g. a name it cannot represent.
    Skipped,
}

/// Destination for planned exports.
pub trait ExportSink {
    /// Writes one variable to the sink, reporting whether it landed or
    /// was declined.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable cannot be represented in the
    /// sink's format or the underlying write fails.
    fn export(&mut self, name: &str, value: &str) -> Result<ExportOutcome, ExportError>;
}

/// Appends heredoc records to a runner environment file.
#[derive(Debug, Clone)]
pub struct EnvFileSink {
    path: PathBuf,
}

impl EnvFileSink {
    /// Creates a sink writing to `path`. The file is created on first
    /// export and appended to thereafter.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the env file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ExportSink for EnvFileSink {
    fn export(&mut self, name: &str, value: &str) -> Result<ExportOutcome, ExportError> {
        // The runner parses `name<<delimiter`; an `=` in the name would
        // turn the record into a plain assignment line.
        if name.contains('=') {
            return Err(ExportError::InvalidName {
                name: name.to_string(),
                message: "name must not contain '='".to_string(),
            });
        }
        let delimiter = format!("ghadelimiter_{}", Uuid::new_v4());
        if name.contains(&delimiter) {
            return Err(ExportError::InvalidName {
                name: name.to_string(),
                message: format!("name must not contain the delimiter '{delimiter}'"),
            });
        }
        if value.contains(&delimiter) {
            return Err(ExportError::InvalidValue {
                name: name.to_string(),
                message: format!("value must not contain the delimiter '{delimiter}'"),
            });
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| ExportError::Write {
                path: self.path.display().to_string(),
                source,
            })?;
        file.write_all(format!("{name}<<{delimiter}\n{value}\n{delimiter}\n").as_bytes())
            .map_err(|source| ExportError::Write {
                path: self.path.display().to_string(),
                source,
            })?;
        Ok(ExportOutcome::Written)
    }
}

/// Prints POSIX `export` statements to stdout, for `eval`-style
/// consumption outside a CI runner.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptSink;

impl ScriptSink {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ExportSink for ScriptSink {
    fn export(&mut self, name: &str, value: &str) -> Result<ExportOutcome, ExportError> {
        // Shells reject non-identifier names (bash function exports such
        // as `BASH_FUNC_x%%` produce them), so those are skipped rather
        // than poisoning the whole script.
        if !is_posix_name(name) {
            warn!(name = %name, "not a valid shell identifier, skipping");
            return Ok(ExportOutcome::Skipped);
        }
        println!("{}", format_export_line(name, value));
        Ok(ExportOutcome::Written)
    }
}

/// Collects exports in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    exports: Vec<(String, String)>,
}

impl MemorySink {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            exports: Vec::new(),
        }
    }

    /// Returns the collected (name, value) pairs in export order.
    #[must_use]
    pub fn exports(&self) -> &[(String, String)] {
        &self.exports
    }
}

impl ExportSink for MemorySink {
    fn export(&mut self, name: &str, value: &str) -> Result<ExportOutcome, ExportError> {
        self.exports.push((name.to_string(), value.to_string()));
        Ok(ExportOutcome::Written)
    }
}

/// Discards every export. Used by dry runs, where the plan is logged but
/// nothing may land. Reports `Written` so the summary still counts what
/// a real run would export.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl NullSink {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ExportSink for NullSink {
    fn export(&mut self, _name: &str, _value: &str) -> Result<ExportOutcome, ExportError> {
        Ok(ExportOutcome::Written)
    }
}

/// Whether `name` is a valid POSIX shell identifier.
pub(crate) fn is_posix_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Formats one `export` statement with a single-quoted value.
pub(crate) fn format_export_line(name: &str, value: &str) -> String {
    format!("export {name}='{}'", posix_quote(value))
}

/// Escapes embedded single quotes for a single-quoted shell string.
pub(crate) fn posix_quote(value: &str) -> String {
    value.replace('\'', "'\\''")
}
