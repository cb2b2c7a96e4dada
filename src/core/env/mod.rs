// envcap: Shell Environment Capture & Pipeline Export
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment domain: dump parsing, export policy, sinks.
//!
//! # Architecture
//!
//! ```text
//! dump:     raw text -> VariableMap (parse order, last value wins)
//! snapshot: EnvSnapshot (case-insensitive PATH lookup, append merge)
//! policy:   VariableMap + EnvSnapshot -> ExportPlan -> apply to sink
//! export:   ExportSink (env file heredoc / script / memory / null)
//! ```

pub mod dump;
pub mod export;
pub mod policy;
pub mod snapshot;


/// Captures the current process environment.
///
/// Non-UTF-8 names or values are lossily converted; the capture never
/// fails on them.
#[must_use]
pub fn capture_ambient() -> snapshot::EnvSnapshot {
    let vars = std::env::vars_os()
        .map(|(key, value)| {
            (
                key.to_string_lossy().into_owned(),
                value.to_string_lossy().into_owned(),
            )
        })
        .collect();
    snapshot::EnvSnapshot::from_map(vars)
}
