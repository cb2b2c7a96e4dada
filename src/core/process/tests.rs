// envcap: Shell Environment Capture & Pipeline Export
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

#![cfg(unix)]

use super::ShellCommand;
use crate::core::env::snapshot::EnvSnapshot;
use crate::error::CaptureError;

#[test]
fn test_resolve_finds_sh_on_path() {
    let command = ShellCommand::resolve("sh").expect("sh should be on PATH");
    assert!(command.program().exists());
}

#[test]
fn test_resolve_reports_missing_program() {
    let err = ShellCommand::resolve("definitely-not-a-shell-7f3a").unwrap_err();
    assert!(err.to_string().contains("definitely-not-a-shell-7f3a"));
}

#[tokio::test]
async fn test_capture_echo() {
    let output = ShellCommand::resolve("sh")
        .expect("sh should be on PATH")
        .args(["-c", "echo hello"])
        .run()
        .await
        .expect("echo should succeed");

    assert!(output.success());
    assert_eq!(output.stdout().trim(), "hello");
}

#[tokio::test]
async fn test_capture_separates_streams() {
    let output = ShellCommand::resolve("sh")
        .expect("sh should be on PATH")
        .args(["-c", "echo out; echo err >&2"])
        .run()
        .await
        .expect("process should complete");

    assert_eq!(output.stdout().trim(), "out");
    assert_eq!(output.stderr().trim(), "err");
}

#[tokio::test]
async fn test_capture_multiline_output() {
    let output = ShellCommand::resolve("sh")
        .expect("sh should be on PATH")
        .args(["-c", "printf 'A=1\\nB=2\\n'"])
        .run()
        .await
        .expect("process should complete");

    assert_eq!(output.stdout(), "A=1\nB=2");
}

#[tokio::test]
async fn test_capture_keeps_lines_after_invalid_utf8() {
    let output = ShellCommand::resolve("sh")
        .expect("sh should be on PATH")
        .args(["-c", "printf 'A=1\\nB=\\377\\nC=3\\n'"])
        .run()
        .await
        .expect("process should complete");

    assert_eq!(output.stdout(), "A=1\nB=\u{FFFD}\nC=3");
}

#[tokio::test]
async fn test_nonzero_exit_is_an_error_with_both_streams() {
    let err = ShellCommand::resolve("sh")
        .expect("sh should be on PATH")
        .args(["-c", "echo partial; echo oops >&2; exit 3"])
        .run()
        .await
        .unwrap_err();

    let capture = err
        .downcast_ref::<CaptureError>()
        .expect("error should be a capture error");
    match capture {
        CaptureError::NonZeroExit {
            code,
            stdout,
            stderr,
            ..
        } => {
            assert_eq!(*code, 3);
            assert_eq!(stdout.trim(), "partial");
            assert_eq!(stderr.trim(), "oops");
        }
        other => panic!("unexpected error variant: {other:?}"),
    }
    let rendered = err.to_string();
    assert!(rendered.contains("exited with code 3"));
    assert!(rendered.contains("partial"));
    assert!(rendered.contains("oops"));
}

#[tokio::test]
async fn test_explicit_env_replaces_inherited() {
    let mut env = EnvSnapshot::new();
    env.set("TEST_VALUE", "from_snapshot");
    // A minimal PATH so sh itself keeps working.
    env.set("PATH", "/usr/bin:/bin");

    let output = ShellCommand::resolve("sh")
        .expect("sh should be on PATH")
        .args(["-c", "echo V=$TEST_VALUE"])
        .env(env)
        .run()
        .await
        .expect("process should complete");

    assert_eq!(output.stdout().trim(), "V=from_snapshot");
}
