// envcap: Shell Environment Capture & Pipeline Export
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{CaptureError, ConfigError, ExportError};

#[test]
fn test_config_error_display() {
    let err = ConfigError::InvalidValue {
        key: "includefilter".to_string(),
        message: "expected true or false, got 'maybe'".to_string(),
    };
    insta::assert_snapshot!(
        err.to_string(),
        @"invalid value for 'includefilter': expected true or false, got 'maybe'"
    );
}

#[test]
fn test_invalid_filter_keeps_source() {
    let source = regex::Regex::new("(").unwrap_err();
    let err = ConfigError::InvalidFilter {
        pattern: "(".to_string(),
        source,
    };
    assert!(err.to_string().starts_with("invalid filter pattern '('"));
    assert!(
        std::error::Error::source(&err).is_some(),
        "regex error should be chained as the source"
    );
}

#[test]
fn test_non_zero_exit_carries_streams() {
    let err = CaptureError::NonZeroExit {
        command: "bash -c env".to_string(),
        code: 1,
        stdout: "PARTIAL=1".to_string(),
        stderr: "bash: boom".to_string(),
    };
    let message = err.to_string();
    assert!(message.contains("exited with code 1"));
    assert!(message.contains("PARTIAL=1"), "stdout should be in the diagnostic");
    assert!(message.contains("bash: boom"), "stderr should be in the diagnostic");
}

#[test]
fn test_executable_not_found_display() {
    let err = CaptureError::ExecutableNotFound {
        name: "zsh".to_string(),
    };
    insta::assert_snapshot!(err.to_string(), @"shell not found: 'zsh' (not in PATH)");
}

#[test]
fn test_export_write_error_keeps_source() {
    let err = ExportError::Write {
        path: "/tmp/env".to_string(),
        source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
    };
    assert!(err.to_string().contains("/tmp/env"));
    assert!(std::error::Error::source(&err).is_some());
}
