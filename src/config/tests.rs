// envcap: Shell Environment Capture & Pipeline Export
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::Config;
use crate::core::env::policy::FilterPolarity;
use std::path::Path;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.shell, "bash");
    assert_eq!(config.args, "-c env");
    assert_eq!(config.filter, ".*");
    assert_eq!(config.include_filter, "true");
    assert_eq!(config.path_separator, if cfg!(windows) { ";" } else { ":" });
    assert_eq!(config.env_file, None);
}

#[test]
fn test_empty_toml_yields_defaults() {
    let config = Config::parse("").unwrap();
    assert_eq!(config.shell, "bash");
    assert_eq!(config.include_filter, "true");
}

#[test]
fn test_toml_uses_lowercase_keys() {
    let config = Config::parse(
        r#"
        shell = "zsh"
        args = "-lc env"
        filter = "^CI_"
        includefilter = "false"
        pathseparator = ";"
        envfile = "/tmp/env_file"
        "#,
    )
    .unwrap();

    assert_eq!(config.shell, "zsh");
    assert_eq!(config.args, "-lc env");
    assert_eq!(config.filter, "^CI_");
    assert_eq!(config.include_filter, "false");
    assert_eq!(config.path_separator, ";");
    assert_eq!(config.env_file.as_deref(), Some("/tmp/env_file"));
}

#[test]
fn test_toml_boolean_coerces_to_string() {
    let config = Config::parse("includefilter = false").unwrap();
    assert_eq!(config.include_filter, "false");
}

#[test]
fn test_unknown_keys_are_ignored() {
    // The INPUT_* environment source forwards every variable under the
    // prefix, not just the tool's own inputs.
    let config = Config::parse("custom_variable = \"I_AM_SPECIAL\"\nshell = \"sh\"").unwrap();
    assert_eq!(config.shell, "sh");
}

#[test]
fn test_later_source_wins() {
    let config = Config::builder()
        .add_toml_str("shell = \"zsh\"\nfilter = \"^A\"")
        .add_toml_str("shell = \"fish\"")
        .build()
        .unwrap();

    assert_eq!(config.shell, "fish");
    assert_eq!(config.filter, "^A");
}

#[test]
fn test_set_override_beats_sources() {
    let config = Config::builder()
        .add_toml_str("shell = \"zsh\"")
        .set("shell", "fish")
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(config.shell, "fish");
}

#[test]
fn test_later_set_override_wins() {
    let config = Config::builder()
        .set("filter", "^A")
        .unwrap()
        .set("filter", "^B")
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(config.filter, "^B");
}

#[test]
fn test_env_prefix_source_beats_files() {
    // SAFETY: This test runs in isolation (nextest runs each test in its own process)
    unsafe {
        std::env::set_var("ENVCAPTEST_SHELL", "zsh");
    }

    let config = Config::builder()
        .add_toml_str("shell = \"fish\"")
        .with_env_prefix("ENVCAPTEST")
        .build()
        .unwrap();

    // SAFETY: This test runs in isolation (nextest runs each test in its own process)
    unsafe {
        std::env::remove_var("ENVCAPTEST_SHELL");
    }

    assert_eq!(config.shell, "zsh");
}

#[test]
fn test_env_prefix_treats_empty_values_as_unset() {
    // SAFETY: This test runs in isolation (nextest runs each test in its own process)
    unsafe {
        std::env::set_var("ENVCAPEMPTY_SHELL", "");
        std::env::set_var("ENVCAPEMPTY_INCLUDEFILTER", "");
        std::env::set_var("ENVCAPEMPTY_FILTER", "^GO");
    }

    let config = Config::builder()
        .with_env_prefix("ENVCAPEMPTY")
        .build()
        .unwrap();

    // SAFETY: This test runs in isolation (nextest runs each test in its own process)
    unsafe {
        std::env::remove_var("ENVCAPEMPTY_SHELL");
        std::env::remove_var("ENVCAPEMPTY_INCLUDEFILTER");
        std::env::remove_var("ENVCAPEMPTY_FILTER");
    }

    // Runners materialize every declared input, empty when not provided.
    assert_eq!(config.shell, "bash");
    assert_eq!(config.include_filter, "true");
    assert_eq!(config.filter, "^GO");
    config.resolve().unwrap();
}

#[test]
fn test_resolve_defaults() {
    let inputs = Config::default().resolve().unwrap();
    assert_eq!(inputs.shell(), "bash");
    assert_eq!(inputs.args(), ["-c", "env"]);
    assert_eq!(inputs.policy().polarity(), FilterPolarity::Include);
    assert_eq!(inputs.policy().path_separator(), if cfg!(windows) { ";" } else { ":" });
    assert_eq!(inputs.env_file(), None);
}

#[test]
fn test_resolve_splits_args_on_whitespace() {
    let config = Config {
        args: "  -l  -c   env ".to_string(),
        ..Config::default()
    };
    let inputs = config.resolve().unwrap();
    assert_eq!(inputs.args(), ["-l", "-c", "env"]);
}

#[test]
fn test_resolve_polarity_is_case_insensitive() {
    let include = Config {
        include_filter: "TRUE".to_string(),
        ..Config::default()
    };
    assert_eq!(
        include.resolve().unwrap().policy().polarity(),
        FilterPolarity::Include
    );

    let exclude = Config {
        include_filter: "False".to_string(),
        ..Config::default()
    };
    assert_eq!(
        exclude.resolve().unwrap().policy().polarity(),
        FilterPolarity::Exclude
    );
}

#[test]
fn test_resolve_rejects_bad_polarity() {
    let config = Config {
        include_filter: "maybe".to_string(),
        ..Config::default()
    };
    let err = config.resolve().unwrap_err();
    assert!(err.to_string().contains("includefilter"));
    assert!(err.to_string().contains("maybe"));
}

#[test]
fn test_resolve_rejects_bad_filter() {
    let config = Config {
        filter: "(".to_string(),
        ..Config::default()
    };
    let err = config.resolve().unwrap_err();
    assert!(err.to_string().contains('('));
}

#[test]
fn test_resolve_treats_empty_env_file_as_unset() {
    let unset = Config {
        env_file: Some(String::new()),
        ..Config::default()
    };
    assert_eq!(unset.resolve().unwrap().env_file(), None);

    let set = Config {
        env_file: Some("/tmp/env_file".to_string()),
        ..Config::default()
    };
    assert_eq!(
        set.resolve().unwrap().env_file(),
        Some(Path::new("/tmp/env_file"))
    );
}

#[test]
fn test_format_options_is_sorted_and_aligned() {
    let options = Config::default().format_options();
    assert_eq!(options.len(), 6);

    let keys: Vec<&str> = options
        .iter()
        .map(|line| line.split_whitespace().next().unwrap())
        .collect();
    assert_eq!(
        keys,
        vec!["args", "envfile", "filter", "includefilter", "pathseparator", "shell"]
    );

    let equals_columns: Vec<Option<usize>> =
        options.iter().map(|line| line.find(" = ")).collect();
    assert!(equals_columns.iter().all(|col| *col == equals_columns[0]));
    assert!(options.iter().any(|line| line.ends_with("= bash")));
}
