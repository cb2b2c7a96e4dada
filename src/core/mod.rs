// envcap: Shell Environment Capture & Pipeline Export
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core modules for capture and export.
//!
//! ```text
//!          core
//!           |
//!      +----+----+
//!      |         |
//!      v         v
//!   process     env
//!      |         |
//!  ShellCommand dump/snapshot
//!  CaptureOutput policy/export
//! ```

pub mod env;
pub mod process;
