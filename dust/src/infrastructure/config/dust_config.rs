// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Ambient runtime configuration, loaded from `dust.toml` with environment
//! overrides (prefix `DUST_`), layered via the `config` crate.

use dust_domain::DustError;
use serde::{Deserialize, Serialize};

/// Default bounded concurrency for the uploader (§4.5).
pub const DEFAULT_UPLOAD_CONCURRENCY: usize = 3;
/// Default bounded concurrency for the reconstructor's parallel-gather mode (§4.6).
pub const DEFAULT_RESTORE_CONCURRENCY: usize = 5;
/// Default retry attempts for a single remote operation (§4.5/§4.6).
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;
/// Default base delay for the retry backoff, in milliseconds.
pub const DEFAULT_RETRY_BASE_DELAY_MS: u64 = 1000;
/// Default jitter ceiling added on top of the base delay, in milliseconds.
pub const DEFAULT_RETRY_JITTER_MS: u64 = 500;
/// Default target average chunk size, in KiB (§4.1).
pub const DEFAULT_CHUNK_KB: u64 = 90;
/// Advisory threshold above which an encrypted chunk logs a size warning (§4.5).
pub const DEFAULT_REMOTE_SIZE_WARNING_KB: u64 = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DustConfig {
    pub upload_concurrency: usize,
    pub restore_concurrency: usize,
    pub retry_attempts: u32,
    pub retry_base_delay_ms: u64,
    pub retry_jitter_ms: u64,
    pub default_chunk_kb: u64,
    pub remote_size_warning_kb: u64,
}

impl Default for DustConfig {
    fn default() -> Self {
        Self {
            upload_concurrency: DEFAULT_UPLOAD_CONCURRENCY,
            restore_concurrency: DEFAULT_RESTORE_CONCURRENCY,
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
            retry_base_delay_ms: DEFAULT_RETRY_BASE_DELAY_MS,
            retry_jitter_ms: DEFAULT_RETRY_JITTER_MS,
            default_chunk_kb: DEFAULT_CHUNK_KB,
            remote_size_warning_kb: DEFAULT_REMOTE_SIZE_WARNING_KB,
        }
    }
}

impl DustConfig {
    /// Loads from an optional `dust.toml` file, then layers `DUST_*`
    /// environment variables on top (e.g. `DUST_UPLOAD_CONCURRENCY=8`).
    /// Missing file and missing env vars both fall back to defaults.
    pub fn load(config_path: Option<&str>) -> Result<Self, DustError> {
        let mut builder = config::Config::builder()
            .add_source(config::Config::try_from(&DustConfig::default())
                .map_err(|e| DustError::config_error(format!("default config: {e}")))?);

        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        } else {
            builder = builder.add_source(config::File::with_name("dust").required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("DUST").separator("_"),
        );

        let built = builder
            .build()
            .map_err(|e| DustError::config_error(format!("failed to load config: {e}")))?;
        built
            .try_deserialize()
            .map_err(|e| DustError::config_error(format!("failed to parse config: {e}")))
    }
}
