// envcap: Shell Environment Capture & Pipeline Export
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |            export / options
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |  TOML, INPUT_* env, --set |
//!              '------+-------------+-----'
//!                     |             |
//!                     v             v
//!               core::process   core::env
//!               shell capture   dump / policy
//!                               snapshot / sinks
//!
//!   +-----------------------------------------+
//!   |  foundation       error, logging        |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
