// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! An immutable chunk-pool record: `PH -> {CH, url}`.

use super::CipherHash;
use serde::{Deserialize, Serialize};

/// One entry of the global chunk pool, keyed externally by `PlainHash`.
/// Entries are never mutated or deleted once inserted (§3 invariant ii).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolEntry {
    #[serde(rename = "hash")]
    pub cipher_hash: CipherHash,
    pub url: String,
    /// Length in bytes of the plaintext this entry decrypts to. Not used
    /// by the core today; recorded so a future preview-seeking consumer
    /// can build a per-chunk offset index without a manifest format change
    /// (see SPEC_FULL.md §9, "Dynamic chunk-size discovery").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plain_len: Option<u64>,
}

impl PoolEntry {
    pub fn new(cipher_hash: CipherHash, url: impl Into<String>, plain_len: Option<u64>) -> Self {
        Self {
            cipher_hash,
            url: url.into(),
            plain_len,
        }
    }
}
