// envcap: Shell Environment Capture & Pipeline Export
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The options command: print the effective configuration.

use crate::config::Config;

/// Handles the options command by displaying every input with the value
/// it resolved to after all sources were merged.
pub fn run_options_command(config: &Config) {
    for line in config.format_options() {
        println!("{line}");
    }
}
