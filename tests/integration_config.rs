// envcap: Shell Environment Capture & Pipeline Export
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for configuration loading.
//!
//! Tests the Config module with realistic TOML configurations and
//! layered sources.

use envcap::config::Config;
use envcap::core::env::policy::FilterPolarity;
use std::io::Write as _;

fn write_toml(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

// =============================================================================
// Loading from TOML strings
// =============================================================================

#[test]
fn config_parse_minimal() {
    let toml = r#"
shell = "sh"
args = "-c env"
"#;
    let config = Config::parse(toml).unwrap();
    assert_eq!(config.shell, "sh");
    assert_eq!(config.args, "-c env");
    // Untouched inputs keep their defaults.
    assert_eq!(config.filter, ".*");
    assert_eq!(config.include_filter, "true");
}

#[test]
fn config_parse_full() {
    let toml = r#"
shell = "zsh"
args = "-lc env"
filter = "^(CI|GITHUB)_"
includefilter = "true"
pathseparator = ":"
envfile = "/tmp/github_env"
"#;
    let config = Config::parse(toml).unwrap();
    assert_eq!(config.shell, "zsh");
    assert_eq!(config.filter, "^(CI|GITHUB)_");
    assert_eq!(config.env_file.as_deref(), Some("/tmp/github_env"));
}

#[test]
fn config_parse_boolean_includefilter() {
    // TOML booleans coerce to the string form the inputs use.
    let config = Config::parse("includefilter = false").unwrap();
    assert_eq!(config.include_filter, "false");
}

#[test]
fn config_parse_invalid_toml_fails() {
    assert!(Config::parse("shell = [unclosed").is_err());
}

// =============================================================================
// Layered files
// =============================================================================

#[test]
fn config_later_file_overrides_earlier() {
    let dir = tempfile::tempdir().unwrap();
    let base = write_toml(&dir, "base.toml", "shell = \"zsh\"\nfilter = \"^A\"\n");
    let top = write_toml(&dir, "top.toml", "shell = \"fish\"\n");

    let config = Config::builder()
        .add_toml_file(&base)
        .add_toml_file(&top)
        .build()
        .unwrap();

    assert_eq!(config.shell, "fish");
    assert_eq!(config.filter, "^A");
}

#[test]
fn config_missing_required_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");
    assert!(Config::builder().add_toml_file(&missing).build().is_err());
}

#[test]
fn config_missing_optional_file_is_fine() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");
    let config = Config::builder()
        .add_toml_file_optional(&missing)
        .build()
        .unwrap();
    assert_eq!(config.shell, "bash");
}

#[test]
fn config_set_overrides_beat_files() {
    let dir = tempfile::tempdir().unwrap();
    let base = write_toml(&dir, "base.toml", "filter = \"^FROM_FILE\"\n");

    let config = Config::builder()
        .add_toml_file(&base)
        .set("filter", "^FROM_SET")
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(config.filter, "^FROM_SET");
}

// =============================================================================
// Resolution
// =============================================================================

#[test]
fn config_resolve_realistic_action_inputs() {
    let toml = r#"
shell = "bash"
args = "-c env"
filter = "^FOO"
includefilter = "true"
pathseparator = ":"
"#;
    let inputs = Config::parse(toml).unwrap().resolve().unwrap();

    assert_eq!(inputs.shell(), "bash");
    assert_eq!(inputs.args(), ["-c", "env"]);
    assert_eq!(inputs.policy().polarity(), FilterPolarity::Include);
    assert!(inputs.policy().passes_filter("FOOBAR"));
    assert!(!inputs.policy().passes_filter("BARFOO"));
}

#[test]
fn config_resolve_rejects_invalid_filter() {
    let config = Config::parse("filter = \"[unclosed\"").unwrap();
    let err = config.resolve().unwrap_err();
    assert!(err.to_string().contains("[unclosed"));
}

#[test]
fn config_resolve_rejects_invalid_polarity() {
    let config = Config::parse("includefilter = \"yes\"").unwrap();
    let err = config.resolve().unwrap_err();
    assert!(err.to_string().contains("includefilter"));
}
