// envcap: Shell Environment Capture & Pipeline Export
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Async shell invocation for environment capture.
//!
//! ```text
//! ShellCommand::resolve("bash")       which lookup -> absolute path
//!   .args(["-c", "env"])
//!   .env(snapshot)                    optional clean-room environment
//!   .run()
//!       --> tokio::process::Command
//!           stream stdout/stderr line by line (TRACE)
//!       --> CaptureOutput { exit_code, stdout, stderr }
//! ```
//!
//! A non-zero exit is an error carrying both streams; the capture output
//! only exists for successful runs. There is no timeout: the shell is
//! expected to terminate on its own, and a hung dump is the pipeline's
//! problem to kill.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use crate::core::env::snapshot::EnvSnapshot;
use crate::error::CaptureError;

#[cfg(test)]
mod tests;

/// Output of a completed capture run.
#[derive(Debug, Clone)]
pub struct CaptureOutput {
    exit_code: i32,
    stdout: String,
    stderr: String,
}

impl CaptureOutput {
    pub(crate) const fn new(exit_code: i32, stdout: String, stderr: String) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
        }
    }

    /// Returns the process exit code.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.exit_code
    }

    /// Returns the accumulated standard output.
    #[must_use]
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    /// Returns the accumulated standard error.
    #[must_use]
    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    /// Returns `true` if the process exited with code zero.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// A shell invocation being assembled.
#[derive(Debug, Clone)]
pub struct ShellCommand {
    program: PathBuf,
    args: Vec<String>,
    env: Option<EnvSnapshot>,
}

impl ShellCommand {
    /// Looks up `program` on PATH and builds a command for it.
    ///
    /// # Errors
    ///
    /// Returns a `CaptureError::ExecutableNotFound` if the lookup fails.
    pub fn resolve(program: &str) -> Result<Self, CaptureError> {
        which::which(program).map_or_else(
            |_| {
                Err(CaptureError::ExecutableNotFound {
                    name: program.to_string(),
                })
            },
            |path| {
                debug!(program = %program, path = %path.display(), "resolved shell");
                Ok(Self::new(path))
            },
        )
    }

    /// Builds a command for an already-known program path.
    pub fn new(program: impl AsRef<Path>) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            env: None,
        }
    }

    /// Sets the argument list.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the child's environment with the given snapshot instead
    /// of inheriting this process's.
    #[must_use]
    pub fn env(mut self, env: EnvSnapshot) -> Self {
        self.env = Some(env);
        self
    }

    /// Returns the resolved program path.
    #[must_use]
    pub const fn program(&self) -> &PathBuf {
        &self.program
    }

    /// Renders the command line for logs and error messages.
    fn command_line(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in &self.args {
            if arg.contains(' ') {
                let _ = write!(line, " \"{arg}\"");
            } else {
                let _ = write!(line, " {arg}");
            }
        }
        line
    }

    /// Runs the command to completion, capturing both streams.
    ///
    /// # Errors
    ///
    /// Returns a `CaptureError::SpawnFailed` if the process cannot be
    /// started, and a `CaptureError::NonZeroExit` carrying both streams
    /// if it exits with a non-zero code.
    pub async fn run(self) -> crate::error::Result<CaptureOutput> {
        let command_line = self.command_line();
        debug!(cmd = %command_line, "exec");

        let mut command = Command::new(&self.program);
        command.args(&self.args);
        if let Some(env) = &self.env {
            command.env_clear();
            for (key, value) in env.iter() {
                command.env(key, value);
            }
        }
        command
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped())
            .kill_on_drop(true);

        let mut child = command.spawn().map_err(|source| CaptureError::SpawnFailed {
            command: command_line.clone(),
            source,
        })?;
        trace!(pid = child.id(), "spawned");

        let stdout_reader = spawn_reader(child.stdout.take(), "stdout");
        let stderr_reader = spawn_reader(child.stderr.take(), "stderr");

        let status = child
            .wait()
            .await
            .with_context(|| format!("waiting for '{command_line}'"))?;
        let stdout = join_reader(stdout_reader).await;
        let stderr = join_reader(stderr_reader).await;

        let code = status.code().unwrap_or(-1);
        if code != 0 {
            return Err(CaptureError::NonZeroExit {
                command: command_line,
                code,
                stdout,
                stderr,
            }
            .into());
        }

        trace!(cmd = %command_line, "completed");
        Ok(CaptureOutput::new(code, stdout, stderr))
    }
}

/// Spawns a task that drains one output stream, tracing each line, and
/// returns the accumulated text when joined. Lines are converted
/// lossily: a byte that is not valid UTF-8 becomes U+FFFD instead of
/// ending the read.
fn spawn_reader<R>(stream: Option<R>, stream_name: &'static str) -> Option<JoinHandle<String>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    stream.map(|stream| {
        tokio::spawn(async move {
            let mut reader = BufReader::new(stream);
            let mut accumulated = String::new();
            let mut buf = Vec::new();
            loop {
                buf.clear();
                match reader.read_until(b'\n', &mut buf).await {
                    Ok(0) => break,
                    Ok(_) => {
                        if buf.last() == Some(&b'\n') {
                            buf.pop();
                            if buf.last() == Some(&b'\r') {
                                buf.pop();
                            }
                        }
                        let line = String::from_utf8_lossy(&buf);
                        trace!(stream = stream_name, line = %line, "output");
                        if !accumulated.is_empty() {
                            accumulated.push('\n');
                        }
                        accumulated.push_str(&line);
                    }
                    Err(error) => {
                        debug!(stream = stream_name, error = %error, "stream read failed");
                        break;
                    }
                }
            }
            accumulated
        })
    })
}

async fn join_reader(handle: Option<JoinHandle<String>>) -> String {
    match handle {
        Some(handle) => handle.await.unwrap_or_default(),
        None => String::new(),
    }
}
