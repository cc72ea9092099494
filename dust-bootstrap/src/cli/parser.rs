// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # CLI Parser
//!
//! Command-line interface parsing using clap.
//!
//! This module defines the CLI structure and handles argument parsing.
//! Security validation happens in the validator module after parsing. The
//! surface mirrors the two collaborator commands the core protocol drives:
//! `upload` (C5) and `restore` (C6).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI structure
#[derive(Parser, Debug, Clone)]
#[command(name = "dust")]
#[command(about = concat!("Content-addressed, encrypted, versioned backup engine v", env!("CARGO_PKG_VERSION")))]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Root directory for the local reference remote store adapter
    #[arg(long)]
    pub remote_root: Option<PathBuf>,
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Chunk, dedup, encrypt, and upload a file, recording progress in its manifest
    Upload {
        /// Path to the source file
        file: PathBuf,

        /// Encryption passphrase (empty passphrases are rejected)
        passphrase: String,

        /// Target max chunk size in KB (default 90)
        chunk_kb: Option<u64>,
    },

    /// Reconstruct a file from its manifest and the remote store
    Restore {
        /// Path to the manifest document (`<name>.dust` or `<name>.sync.dust`)
        manifest: PathBuf,

        /// Version number to restore, or `latest` for the newest completed version
        #[arg(default_value = "latest")]
        version: String,

        /// Decryption passphrase
        passphrase: String,
    },
}

/// Parse CLI arguments
///
/// This is the entry point for CLI parsing. It uses clap to parse
/// arguments and returns the parsed CLI structure.
///
/// # Returns
///
/// Parsed `Cli` structure with all arguments
///
/// # Panics
///
/// Clap will exit the process with appropriate error message if parsing fails
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Parses the `restore` subcommand's `version` argument: `"latest"` or a
/// positive version number (§6 CLI surface).
pub fn parse_restore_version(version: &str) -> Result<Option<u32>, String> {
    if version.eq_ignore_ascii_case("latest") {
        return Ok(None);
    }
    version
        .parse::<u32>()
        .map(Some)
        .map_err(|_| format!("invalid version '{version}': expected 'latest' or a positive integer"))
}
