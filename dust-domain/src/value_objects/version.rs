// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! A single backup snapshot of the source file.

use super::PlainHash;
use crate::error::DustError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionStatus {
    Pending,
    Completed,
}

/// One element of a manifest's `versions` sequence. `chunks[i]` is the
/// `PlainHash` of the i-th chunk of the source file at the time this
/// version was synced; a `None` marks a position reserved but not yet
/// resolved, which only ever occurs while `status == Pending`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    #[serde(rename = "version")]
    pub version_number: u32,
    pub timestamp: DateTime<Utc>,
    pub file_hash: String,
    pub total_size: u64,
    pub status: VersionStatus,
    pub chunks: Vec<Option<PlainHash>>,
}

impl Version {
    pub fn new_pending(
        version_number: u32,
        timestamp: DateTime<Utc>,
        file_hash: impl Into<String>,
        total_size: u64,
    ) -> Self {
        Self {
            version_number,
            timestamp,
            file_hash: file_hash.into(),
            total_size,
            status: VersionStatus::Pending,
            chunks: Vec::new(),
        }
    }

    /// Records the chunk at `position`, growing `chunks` with `None`
    /// placeholders if needed. Used by the uploader, which captures a
    /// chunk's position at submit time so completion order never affects
    /// the manifest (§4.5 "Concurrency / ordering").
    pub fn set_chunk_at(&mut self, position: usize, hash: PlainHash) {
        if position >= self.chunks.len() {
            self.chunks.resize(position + 1, None);
        }
        self.chunks[position] = Some(hash);
    }

    pub fn chunk_at(&self, position: usize) -> Option<&PlainHash> {
        self.chunks.get(position).and_then(|c| c.as_ref())
    }

    /// §8 invariant 6, strict-prefix variant: the set of resolved
    /// positions must form a contiguous prefix of `[0, len)` with no gaps.
    pub fn is_prefix_consistent(&self) -> bool {
        let mut seen_gap = false;
        for slot in &self.chunks {
            match (slot.is_some(), seen_gap) {
                (true, true) => return false,
                (false, _) => seen_gap = true,
                (true, false) => {}
            }
        }
        true
    }

    /// Marks the version `completed`. Fails if any chunk position is
    /// unresolved (§9 open question: never mark completed with gaps).
    pub fn mark_completed(&mut self) -> Result<(), DustError> {
        if self.chunks.iter().any(|c| c.is_none()) {
            return Err(DustError::internal_error(
                "cannot complete a version with unresolved chunk positions",
            ));
        }
        self.status = VersionStatus::Completed;
        Ok(())
    }

    pub fn is_completed(&self) -> bool {
        self.status == VersionStatus::Completed
    }

    pub fn resolved_chunks(&self) -> impl Iterator<Item = &PlainHash> {
        self.chunks.iter().filter_map(|c| c.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ph(byte: u8) -> PlainHash {
        PlainHash::from_digest_bytes(&[byte; 16])
    }

    #[test]
    fn set_chunk_at_grows_with_none_placeholders() {
        let mut v = Version::new_pending(1, Utc::now(), "deadbeef", 100);
        v.set_chunk_at(2, ph(1));
        assert_eq!(v.chunks.len(), 3);
        assert!(v.chunks[0].is_none());
        assert!(v.chunks[1].is_none());
        assert_eq!(v.chunk_at(2), Some(&ph(1)));
    }

    #[test]
    fn prefix_consistency_detects_gaps() {
        let mut v = Version::new_pending(1, Utc::now(), "deadbeef", 100);
        v.set_chunk_at(0, ph(1));
        v.set_chunk_at(1, ph(2));
        assert!(v.is_prefix_consistent());
        v.set_chunk_at(3, ph(3));
        assert!(!v.is_prefix_consistent());
    }

    #[test]
    fn mark_completed_requires_all_positions_resolved() {
        let mut v = Version::new_pending(1, Utc::now(), "deadbeef", 100);
        v.set_chunk_at(1, ph(1));
        assert!(v.mark_completed().is_err());
        v.set_chunk_at(0, ph(2));
        assert!(v.mark_completed().is_ok());
        assert!(v.is_completed());
    }
}
