// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Content-defined chunking port (C1).

use crate::value_objects::ChunkerConfig;

/// Determines chunk boundaries within a byte window. Implementations are
/// pure and deterministic: the same window and config always produce the
/// same cut point (§8 invariant 2, chunker determinism).
pub trait ChunkerService: Send + Sync {
    /// Returns the length of the next chunk to emit from the start of
    /// `window`, which holds at most `config.max_size()` bytes read
    /// sequentially from the source (§4.5 step 4). The returned length is
    /// always in `[1, window.len()]`; it equals `window.len()` when the
    /// window is the final, possibly-short tail of the input.
    fn next_chunk_len(&self, window: &[u8], config: &ChunkerConfig) -> usize;
}
