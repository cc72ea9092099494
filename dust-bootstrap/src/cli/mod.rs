// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Secure CLI
//!
//! Two-stage command-line handling: [`validator::SecureArgParser`] screens
//! raw arguments for injection/traversal patterns before [`parser::Cli`]
//! (clap) parses them into the `upload`/`restore` command surface (§6).

pub mod parser;
pub mod validator;

pub use parser::{parse_cli, parse_restore_version, Cli, Commands};
pub use validator::{ParseError, SecureArgParser};
