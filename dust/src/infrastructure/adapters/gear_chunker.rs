// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! FastCDC gear-hash chunker (C1).
//!
//! Implements the content-defined chunking contract: a
//! fixed, deterministically-seeded 256-entry gear table, two masks
//! derived from `avg_size`, and the two-pass (mask_S then mask_L) cut
//! search that favors landing near `avg_size` before falling back to a
//! looser threshold and finally an exact cut at `max_size`.

use dust_domain::{ChunkerConfig, ChunkerService};

/// LCG constants from Knuth/Numerical Recipes' 64-bit MMIX generator,
/// used only to seed the gear table deterministically; no cryptographic
/// property is required of this table beyond every implementation
/// computing the same one.
const LCG_MULTIPLIER: u64 = 0x5851_F42D_4C95_7F2D;
const LCG_INCREMENT: u64 = 0x1405_7B7E_F767_814F;

fn build_gear_table() -> [u64; 256] {
    let mut table = [0u64; 256];
    let mut state: u64 = 0;
    for slot in table.iter_mut() {
        state = state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT);
        *slot = state;
    }
    table
}

fn masks_for_avg(avg_size: usize) -> (u64, u64) {
    let b = (avg_size.max(1) as f64).log2().floor() as u32;
    let mask_s = (1u64 << (b + 1)) - 1;
    let mask_l = if b == 0 { 0 } else { (1u64 << (b - 1)) - 1 };
    (mask_s, mask_l)
}

/// Gear-hash FastCDC chunker. Stateless and cheap to construct; the gear
/// table is rebuilt once per instance rather than cached globally, since
/// building it is a fixed 256-iteration loop.
pub struct GearHashChunker {
    gear: [u64; 256],
}

impl GearHashChunker {
    pub fn new() -> Self {
        Self {
            gear: build_gear_table(),
        }
    }
}

impl Default for GearHashChunker {
    fn default() -> Self {
        Self::new()
    }
}

impl ChunkerService for GearHashChunker {
    fn next_chunk_len(&self, window: &[u8], config: &ChunkerConfig) -> usize {
        let r = window.len();
        if r <= config.min_size() {
            return r;
        }

        let (mask_s, mask_l) = masks_for_avg(config.avg_size());
        let upper = config.max_size().min(r);

        let mut h: u64 = 0;
        let mut i = config.min_size();
        while i < upper {
            h = (h << 1).wrapping_add(self.gear[window[i] as usize]);
            let cut = if i < config.avg_size() {
                h & mask_s == 0
            } else {
                h & mask_l == 0
            };
            if cut {
                return i + 1;
            }
            i += 1;
        }
        upper
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn totality_check(data: &[u8], config: &ChunkerConfig) {
        let chunker = GearHashChunker::new();
        let mut offset = 0;
        let mut reconstructed = Vec::new();
        while offset < data.len() {
            let window_end = (offset + config.max_size()).min(data.len());
            let window = &data[offset..window_end];
            let len = chunker.next_chunk_len(window, config);
            assert!(len >= 1 && len <= window.len());
            if window.len() > config.min_size() {
                assert!(len <= config.max_size());
            }
            reconstructed.extend_from_slice(&window[..len]);
            offset += len;
        }
        assert_eq!(reconstructed, data);
    }

    #[test]
    fn empty_input_yields_nothing() {
        let chunker = GearHashChunker::new();
        let config = ChunkerConfig::new(4, 8, 16).unwrap();
        // An empty window has length 0, which is <= min_size, so the loop
        // in a caller never executes a single chunk emission.
        assert_eq!(chunker.next_chunk_len(&[], &config), 0);
    }

    #[test]
    fn short_input_yields_one_full_chunk() {
        let chunker = GearHashChunker::new();
        let config = ChunkerConfig::new(4, 8, 16).unwrap();
        let data = b"ab";
        assert_eq!(chunker.next_chunk_len(data, &config), data.len());
    }

    #[test]
    fn deterministic_across_repeated_calls() {
        let chunker = GearHashChunker::new();
        let config = ChunkerConfig::new(64, 256, 1024).unwrap();
        let data: Vec<u8> = (0..4096u32).map(|i| (i % 251) as u8).collect();
        let len1 = chunker.next_chunk_len(&data[..1024], &config);
        let len2 = chunker.next_chunk_len(&data[..1024], &config);
        assert_eq!(len1, len2);
    }

    #[test]
    fn s1_small_file_is_one_chunk_of_the_whole_input() {
        let chunker = GearHashChunker::new();
        let config = ChunkerConfig::new(4, 8, 16).unwrap();
        let data = b"hello world";
        let len = chunker.next_chunk_len(data, &config);
        assert_eq!(len, data.len());
    }

    proptest! {
        #[test]
        fn totality_holds_for_arbitrary_inputs(
            data in proptest::collection::vec(any::<u8>(), 0..8192),
            min in 4usize..64,
            avg_extra in 1usize..256,
            max_extra in 1usize..512,
        ) {
            let avg = min + avg_extra;
            let max = avg + max_extra;
            let config = ChunkerConfig::new(min, avg, max).unwrap();
            totality_check(&data, &config);
        }
    }
}
