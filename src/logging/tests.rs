// envcap: Shell Environment Capture & Pipeline Export
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{LogConfig, LogLevel};

#[test]
fn test_log_level_bounds() {
    assert!(LogLevel::new(0).is_ok());
    assert!(LogLevel::new(5).is_ok());
    assert!(LogLevel::new(6).is_err(), "levels above 5 are rejected");
}

#[test]
fn test_log_level_filter_strings() {
    let directives: Vec<_> = (0..=5)
        .map(|n| LogLevel::from_u8(n).unwrap().to_filter_string())
        .collect();
    insta::assert_snapshot!(directives.join(","), @"off,error,warn,info,debug,trace");
}

#[test]
fn test_log_level_from_u8_out_of_range() {
    assert!(LogLevel::from_u8(5).is_some());
    assert!(LogLevel::from_u8(6).is_none());
}

#[test]
fn test_log_level_round_trip() {
    let level = LogLevel::try_from(4u8).unwrap();
    assert_eq!(level, LogLevel::DEBUG);
    assert_eq!(u8::from(level), 4);
    assert_eq!(level.as_u8(), 4);
}

#[test]
fn test_log_config_defaults() {
    let config = LogConfig::default();
    assert_eq!(config.console_level(), LogLevel::INFO);
    assert_eq!(config.file_level(), LogLevel::TRACE);
    assert!(config.log_file().is_none());
    assert!(!config.show_target());
}

#[test]
fn test_log_config_builder() {
    let config = LogConfig::builder()
        .with_console_level(LogLevel::ERROR)
        .with_file_level(LogLevel::DEBUG)
        .with_log_file("capture.log".to_string())
        .with_show_target(true)
        .build();

    assert_eq!(config.console_level(), LogLevel::ERROR);
    assert_eq!(config.file_level(), LogLevel::DEBUG);
    assert_eq!(config.log_file(), Some("capture.log"));
    assert!(config.show_target());
}
