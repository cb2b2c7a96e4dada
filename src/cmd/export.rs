// envcap: Shell Environment Capture & Pipeline Export
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The export command: capture, filter, export.
//!
//! ```text
//! run_export_command(config, dry)
//!   Config::resolve  --> ResolvedInputs
//!   capture_ambient  --> EnvSnapshot
//!   select_sink      --> env file | script | null (dry)
//!   export_with_sink
//!     ShellCommand::resolve(shell).args(args).run()
//!     parse_dump(stdout)
//!     plan_exports --> apply_plan --> ExportSummary
//! ```

use tracing::{Level, debug, enabled, info, trace};

use crate::config::{Config, ResolvedInputs};
use crate::core::env::capture_ambient;
use crate::core::env::dump::parse_dump;
use crate::core::env::export::{ENV_FILE_VAR, EnvFileSink, ExportSink, NullSink, ScriptSink};
use crate::core::env::policy::{ExportSummary, apply_plan, plan_exports};
use crate::core::env::snapshot::EnvSnapshot;
use crate::core::process::ShellCommand;
use crate::error::Result;

/// Handles the export command.
///
/// # Errors
///
/// Returns an error if the inputs fail validation, the shell cannot be
/// run or exits non-zero, or the sink rejects a write.
pub async fn run_export_command(config: &Config, dry: bool) -> Result<()> {
    let inputs = config.resolve()?;
    let ambient = capture_ambient();
    let mut sink = select_sink(&inputs, &ambient, dry);

    let summary = export_with_sink(&inputs, &ambient, sink.as_mut()).await?;
    info!(
        exported = summary.exported,
        skipped = summary.skipped,
        "export complete"
    );
    Ok(())
}

/// Runs the capture and exports the surviving variables through `sink`.
///
/// Split from [`run_export_command`] so tests can drive the full flow
/// against an in-memory sink and an explicit ambient snapshot.
///
/// # Errors
///
/// Returns an error if the shell cannot be resolved or spawned, exits
/// non-zero, or the sink rejects a write. A non-zero exit exports
/// nothing.
pub async fn export_with_sink(
    inputs: &ResolvedInputs,
    ambient: &EnvSnapshot,
    sink: &mut dyn ExportSink,
) -> Result<ExportSummary> {
    trace_env("ambient", ambient);

    let output = ShellCommand::resolve(inputs.shell())?
        .args(inputs.args())
        .run()
        .await?;
    if !output.stderr().is_empty() {
        debug!(stderr = %output.stderr(), "capture stderr");
    }

    let vars = parse_dump(output.stdout());
    debug!(count = vars.len(), "parsed environment dump");

    let plan = plan_exports(&vars, ambient, inputs.policy());
    let summary = apply_plan(&plan, sink)?;
    trace_env("resulting", plan.resulting_env());

    Ok(summary)
}

/// Picks where exports land: the null sink for dry runs, then the
/// configured env file, then the runner's ambient one, then stdout.
fn select_sink(inputs: &ResolvedInputs, ambient: &EnvSnapshot, dry: bool) -> Box<dyn ExportSink> {
    if dry {
        debug!("dry run, discarding exports");
        return Box::new(NullSink::new());
    }
    if let Some(path) = inputs.env_file() {
        debug!(path = %path.display(), "writing to configured env file");
        return Box::new(EnvFileSink::new(path));
    }
    if let Some(path) = ambient.get(ENV_FILE_VAR) {
        debug!(path = %path, "writing to runner env file");
        return Box::new(EnvFileSink::new(path));
    }
    debug!("no env file, printing export script");
    Box::new(ScriptSink::new())
}

fn trace_env(stage: &'static str, env: &EnvSnapshot) {
    if enabled!(Level::TRACE) {
        for (key, value) in env.iter() {
            trace!(stage = stage, key = %key, value = %value, "env");
        }
    }
}
