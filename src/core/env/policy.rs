// envcap: Shell Environment Capture & Pipeline Export
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Export planning: reserved names, prefix stripping, filtering, PATH merge.
//!
//! ```text
//! plan_exports(vars, ambient, policy)
//!   per key, in parse order:
//!     reserved input name?            -> Skip(ReservedName)
//!     strip INPUT_ prefix, empty?     -> Skip(EmptyName)
//!     filter mismatch on export name? -> Skip(FilterMismatch)
//!     name is PATH (any case)?        -> MergePath (append, never replace)
//!     otherwise                       -> Export
//!   --> ExportPlan { decisions, resulting_env }
//!
//! apply_plan(plan, sink)
//!   log every decision, write exports through the sink
//!   --> ExportSummary { exported, skipped }
//! ```
//!
//! Planning is pure: it reads the parsed variables and an ambient
//! snapshot, and produces a value. The sink write in `apply_plan` is the
//! only side effect.

use regex::{Regex, RegexBuilder};
use tracing::{Level, debug, enabled, info, trace};

use super::dump::VariableMap;
use super::export::{ExportOutcome, ExportSink};
use super::snapshot::{EnvSnapshot, PATH_NAME};
use crate::error::{ConfigError, Result};

/// Configuration input names that are never exported.
///
/// These are the tool's own inputs; a dump line carrying one of them is
/// configuration echo, not user data. Compared case-insensitively.
pub const RESERVED_INPUT_NAMES: [&str; 6] = [
    "shell",
    "args",
    "filter",
    "includefilter",
    "pathseparator",
    "envfile",
];

/// Prefix carried by variables injected through the runner's input
/// mechanism.
pub const INPUT_PREFIX: &str = "INPUT_";

/// Case-insensitive membership test against [`RESERVED_INPUT_NAMES`].
#[must_use]
pub fn is_reserved_name(name: &str) -> bool {
    RESERVED_INPUT_NAMES
        .iter()
        .any(|reserved| name.eq_ignore_ascii_case(reserved))
}

/// Strips the input prefix from a raw key, case-insensitively.
///
/// Returns the key unchanged when the prefix is absent.
#[must_use]
pub fn strip_input_prefix(key: &str) -> &str {
    key.get(..INPUT_PREFIX.len())
        .filter(|head| head.eq_ignore_ascii_case(INPUT_PREFIX))
        .map_or(key, |_| &key[INPUT_PREFIX.len()..])
}

/// Filter polarity: whether a matching name is kept or dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterPolarity {
    /// Names matching the filter are exported.
    Include,
    /// Names matching the filter are dropped.
    Exclude,
}

/// Rules applied to every parsed variable before export.
#[derive(Debug, Clone)]
pub struct ExportPolicy {
    filter: Regex,
    polarity: FilterPolarity,
    path_separator: String,
}

impl ExportPolicy {
    /// Compiles the filter pattern and builds the policy.
    ///
    /// The pattern is compiled case-insensitively; variable names keep
    /// their case everywhere else.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::InvalidFilter` if the pattern is not a
    /// valid regular expression. Callers resolve the policy before any
    /// capture process is spawned.
    pub fn new(
        pattern: &str,
        polarity: FilterPolarity,
        path_separator: impl Into<String>,
    ) -> std::result::Result<Self, ConfigError> {
        let filter = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| ConfigError::InvalidFilter {
                pattern: pattern.to_string(),
                source,
            })?;

        Ok(Self {
            filter,
            polarity,
            path_separator: path_separator.into(),
        })
    }

    /// Evaluates the filter against an export name.
    ///
    /// With `Include` polarity a match keeps the variable; with `Exclude`
    /// a match drops it.
    #[must_use]
    pub fn passes_filter(&self, name: &str) -> bool {
        let matched = self.filter.is_match(name);
        match self.polarity {
            FilterPolarity::Include => matched,
            FilterPolarity::Exclude => !matched,
        }
    }

    /// Returns the filter polarity.
    #[must_use]
    pub const fn polarity(&self) -> FilterPolarity {
        self.polarity
    }

    /// Returns the PATH join separator.
    #[must_use]
    pub fn path_separator(&self) -> &str {
        &self.path_separator
    }
}

/// Why a parsed variable was not exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The raw key names a configuration input of the tool itself.
    ReservedName,
    /// Nothing remained after stripping the input prefix.
    EmptyName,
    /// The export name did not satisfy the filter.
    FilterMismatch,
}

impl SkipReason {
    /// Short string for log output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ReservedName => "reserved input name",
            Self::EmptyName => "empty name after prefix strip",
            Self::FilterMismatch => "filter mismatch",
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Planned outcome for a single parsed variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Export `value` under `name`.
    Export { name: String, value: String },
    /// Append to PATH; `merged` is the full joined value that gets
    /// exported under the canonical `PATH` name.
    MergePath { merged: String },
    /// Dropped.
    Skip { reason: SkipReason },
}

/// The planned outcome for every parsed variable, in parse order.
#[derive(Debug)]
pub struct ExportPlan {
    decisions: Vec<(String, Decision)>,
    resulting_env: EnvSnapshot,
}

impl ExportPlan {
    /// Returns (raw key, decision) pairs in parse order.
    #[must_use]
    pub fn decisions(&self) -> &[(String, Decision)] {
        &self.decisions
    }

    /// Returns the environment as it will look after the exports land.
    #[must_use]
    pub const fn resulting_env(&self) -> &EnvSnapshot {
        &self.resulting_env
    }
}

/// Counts of applied decisions. A record the sink declined counts as
/// skipped, not exported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub exported: usize,
    pub skipped: usize,
}

impl ExportSummary {
    fn count(&mut self, outcome: ExportOutcome) {
        match outcome {
            ExportOutcome::Written => self.exported += 1,
            ExportOutcome::Skipped => self.skipped += 1,
        }
    }
}

/// Plans the export of every parsed variable.
///
/// Pure with respect to the process environment: the ambient state comes
/// in as a snapshot and the result is a value. Identical inputs produce
/// identical plans.
///
/// PATH merges accumulate: a second PATH entry in the dump appends to the
/// value produced by the first, because each merge reads the working
/// snapshot rather than the original ambient one.
#[must_use]
pub fn plan_exports(
    vars: &VariableMap,
    ambient: &EnvSnapshot,
    policy: &ExportPolicy,
) -> ExportPlan {
    let mut env = ambient.clone();
    let mut decisions = Vec::with_capacity(vars.len());

    for (raw_key, value) in vars {
        let decision = if is_reserved_name(raw_key) {
            Decision::Skip {
                reason: SkipReason::ReservedName,
            }
        } else {
            let name = strip_input_prefix(raw_key);
            if name.is_empty() {
                Decision::Skip {
                    reason: SkipReason::EmptyName,
                }
            } else if !policy.passes_filter(name) {
                Decision::Skip {
                    reason: SkipReason::FilterMismatch,
                }
            } else if name.eq_ignore_ascii_case(PATH_NAME) {
                let merged = env.append_path(value, policy.path_separator());
                Decision::MergePath { merged }
            } else {
                env.set(name, value.as_str());
                Decision::Export {
                    name: name.to_owned(),
                    value: value.clone(),
                }
            }
        };
        decisions.push((raw_key.clone(), decision));
    }

    ExportPlan {
        decisions,
        resulting_env: env,
    }
}

/// Applies a plan: logs every decision and writes exports through the sink.
///
/// Decisions are logged at INFO; values only at TRACE.
///
/// # Errors
///
/// Returns an error if the sink rejects a variable or the underlying
/// write fails. Decisions already applied stay applied.
pub fn apply_plan(plan: &ExportPlan, sink: &mut dyn ExportSink) -> Result<ExportSummary> {
    let mut summary = ExportSummary::default();

    for (raw_key, decision) in plan.decisions() {
        match decision {
            Decision::Export { name, value } => {
                info!(key = %raw_key, name = %name, "export");
                if enabled!(Level::TRACE) {
                    trace!(name = %name, value = %value, "export value");
                }
                summary.count(sink.export(name, value)?);
            }
            Decision::MergePath { merged } => {
                info!(key = %raw_key, "appending to PATH");
                if enabled!(Level::TRACE) {
                    trace!(value = %merged, "merged PATH value");
                }
                summary.count(sink.export(PATH_NAME, merged)?);
            }
            Decision::Skip { reason } => {
                info!(key = %raw_key, reason = %reason, "skipped");
                summary.skipped += 1;
            }
        }
    }

    debug!(
        exported = summary.exported,
        skipped = summary.skipped,
        "export plan applied"
    );
    Ok(summary)
}
