// envcap: Shell Environment Capture & Pipeline Export
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   export, options
//! ```

pub mod export;
pub mod options;
