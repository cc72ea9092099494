// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Content-defined-chunking bounds.

use crate::error::DustError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default target chunk size in KiB, chosen so post-encryption envelopes
/// stay below the 100 KB free-tier threshold of the remote adapter.
pub const DEFAULT_CHUNK_KB: u64 = 90;

/// Validated `(min_size, avg_size, max_size)` bounds for the gear-hash
/// chunker. Construction enforces `min <= avg <= max` and `avg > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkerConfig {
    min_size: usize,
    avg_size: usize,
    max_size: usize,
}

impl ChunkerConfig {
    pub fn new(min_size: usize, avg_size: usize, max_size: usize) -> Result<Self, DustError> {
        if avg_size == 0 {
            return Err(DustError::config_error("avg_size must be non-zero"));
        }
        if !(min_size <= avg_size && avg_size <= max_size) {
            return Err(DustError::config_error(format!(
                "chunker bounds must satisfy min <= avg <= max, got min={min_size} avg={avg_size} max={max_size}"
            )));
        }
        Ok(Self {
            min_size,
            avg_size,
            max_size,
        })
    }

    /// Derives chunker bounds from a target max-chunk-size in KiB, per the
    /// uploader's default derivation: `max = KB*1024`, `avg = max/2`,
    /// `min = avg/4`.
    pub fn from_max_kb(chunk_kb: u64) -> Result<Self, DustError> {
        if chunk_kb == 0 {
            return Err(DustError::config_error("chunk_kb must be non-zero"));
        }
        let max_size = (chunk_kb as usize) * 1024;
        let avg_size = max_size / 2;
        let min_size = avg_size / 4;
        Self::new(min_size, avg_size, max_size)
    }

    pub fn min_size(&self) -> usize {
        self.min_size
    }

    pub fn avg_size(&self) -> usize {
        self.avg_size
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        // Safe to unwrap: DEFAULT_CHUNK_KB is a non-zero crate constant.
        Self::from_max_kb(DEFAULT_CHUNK_KB).expect("default chunk size is always valid")
    }
}

impl fmt::Display for ChunkerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ChunkerConfig(min={}, avg={}, max={})",
            self.min_size, self.avg_size, self.max_size
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_order_bounds() {
        assert!(ChunkerConfig::new(16, 8, 4).is_err());
    }

    #[test]
    fn accepts_ordered_bounds() {
        let cfg = ChunkerConfig::new(4, 8, 16).unwrap();
        assert_eq!(cfg.min_size(), 4);
        assert_eq!(cfg.avg_size(), 8);
        assert_eq!(cfg.max_size(), 16);
    }

    #[test]
    fn derives_from_max_kb() {
        let cfg = ChunkerConfig::from_max_kb(90).unwrap();
        assert_eq!(cfg.max_size(), 90 * 1024);
        assert_eq!(cfg.avg_size(), 90 * 1024 / 2);
        assert_eq!(cfg.min_size(), 90 * 1024 / 8);
    }

    #[test]
    fn default_is_valid() {
        let cfg = ChunkerConfig::default();
        assert!(cfg.min_size() <= cfg.avg_size() && cfg.avg_size() <= cfg.max_size());
    }
}
