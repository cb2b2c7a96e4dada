// envcap: Shell Environment Capture & Pipeline Export
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Point-in-time environment snapshot.
//!
//! # Architecture
//!
//! ```text
//! EnvSnapshot (BTreeMap<String, String>)
//! keys exact-case, deterministic iteration order
//! get / get_ignore_case / set / append_path / iter
//!
//! PATH is special: matched case-insensitively, rewritten
//! under the canonical "PATH" spelling when appended to.
//! ```

use std::collections::BTreeMap;

/// Canonical spelling for the executable search path variable.
pub const PATH_NAME: &str = "PATH";

/// An explicit copy of a process environment.
///
/// The pipeline takes a snapshot as input and returns a transformed one,
/// so nothing in the planning stage reads or writes the real process
/// environment behind the caller's back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: BTreeMap<String, String>,
}

impl EnvSnapshot {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vars: BTreeMap::new(),
        }
    }

    /// Creates a snapshot from a map of variables.
    #[must_use]
    pub const fn from_map(vars: BTreeMap<String, String>) -> Self {
        Self { vars }
    }

    /// Gets a variable value by exact key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Gets a variable value, matching the key case-insensitively.
    ///
    /// The first match in key order wins when several keys differ only
    /// in case.
    #[must_use]
    pub fn get_ignore_case(&self, key: &str) -> Option<&str> {
        self.vars
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Current PATH value, looked up case-insensitively.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        self.get_ignore_case(PATH_NAME)
    }

    /// Sets a variable, replacing any exact-case match.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    /// Appends a segment to PATH, joined by `separator`.
    ///
    /// The existing entry is matched case-insensitively and rewritten under
    /// the canonical `PATH` spelling. A missing or empty PATH degenerates to
    /// the segment alone, with no leading separator. Returns the merged
    /// value.
    pub fn append_path(&mut self, segment: &str, separator: &str) -> String {
        let merged = match self.path() {
            Some(current) if !current.is_empty() => format!("{current}{separator}{segment}"),
            _ => segment.to_owned(),
        };
        self.vars.retain(|key, _| !key.eq_ignore_ascii_case(PATH_NAME));
        self.vars.insert(PATH_NAME.to_owned(), merged.clone());
        merged
    }

    /// Returns an iterator over variables in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns true if no variables are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }
}
