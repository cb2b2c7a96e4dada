// envcap: Shell Environment Capture & Pipeline Export
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment dump parsing.
//!
//! ```text
//! "KEY=VALUE\nOTHER = spaced \n..."
//!        |
//!        v
//!   parse_dump()
//!   split CR/LF, first '=' is the delimiter
//!   trim both sides, drop empty keys
//!        |
//!        v
//!   VariableMap (insertion order, last value wins)
//! ```

use indexmap::IndexMap;
use tracing::trace;

/// Ordered key/value mapping parsed from an environment dump.
///
/// Keys keep the position of their first occurrence; a repeated key
/// overwrites the value in place.
pub type VariableMap = IndexMap<String, String>;

/// Parses the textual output of an environment dump.
///
/// Each line holds one variable. The first `=` separates the key from the
/// value; whitespace around both is trimmed; the value may itself contain
/// `=`. Lines without a delimiter or with an empty key are dropped. There
/// is no quoting or multi-line interpretation: continuation lines of
/// multi-line values (exported shell functions, for instance) fall out as
/// non-matching lines.
#[must_use]
pub fn parse_dump(text: &str) -> VariableMap {
    let mut vars = VariableMap::new();

    for line in text.split(['\r', '\n']) {
        if line.is_empty() {
            continue;
        }

        let Some(eq_pos) = line.find('=') else {
            trace!(line = %line, "dropped dump line without delimiter");
            continue;
        };

        let key = line[..eq_pos].trim();
        let value = line[eq_pos + 1..].trim();

        if key.is_empty() {
            trace!(line = %line, "dropped dump line with empty key");
            continue;
        }

        vars.insert(key.to_owned(), value.to_owned());
    }

    vars
}
