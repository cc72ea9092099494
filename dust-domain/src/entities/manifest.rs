// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! The persisted document uniting filename, chunk pool, and versions.

use crate::error::DustError;
use crate::value_objects::{CipherHash, PlainHash, PoolEntry, Version, VersionStatus};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identified by `filename`; mutated in place across the life of a sync
/// relationship with one source file. Exclusively owned by the uploader
/// while a sync is running (single-writer assumption, §3 "Ownership").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub filename: String,
    pub pool: HashMap<PlainHash, PoolEntry>,
    pub versions: Vec<Version>,
}

impl Manifest {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            pool: HashMap::new(),
            versions: Vec::new(),
        }
    }

    /// §4.3: idempotent insert. Re-inserting the same `(PH, CH)` pair is a
    /// no-op; a differing `CH` for an already-known `PH` is a
    /// [`DustError::PoolConflict`] and must never occur under the
    /// invariants the pool is supposed to uphold.
    pub fn insert_pool_entry(
        &mut self,
        plain_hash: PlainHash,
        entry: PoolEntry,
    ) -> Result<(), DustError> {
        match self.pool.get(&plain_hash) {
            Some(existing) if existing.cipher_hash == entry.cipher_hash => Ok(()),
            Some(existing) => Err(DustError::pool_conflict(format!(
                "PH {plain_hash} already maps to CH {}, refusing to overwrite with CH {}",
                existing.cipher_hash, entry.cipher_hash
            ))),
            None => {
                self.pool.insert(plain_hash, entry);
                Ok(())
            }
        }
    }

    pub fn lookup_pool(&self, plain_hash: &PlainHash) -> Option<&PoolEntry> {
        self.pool.get(plain_hash)
    }

    /// §3 invariant (ii): at most one version has `status == pending`, and
    /// if present it is the last one.
    pub fn pending_version(&mut self) -> Option<&mut Version> {
        match self.versions.last_mut() {
            Some(v) if v.status == VersionStatus::Pending => Some(v),
            _ => None,
        }
    }

    pub fn last_completed_version(&self) -> Option<&Version> {
        self.versions
            .iter()
            .rev()
            .find(|v| v.status == VersionStatus::Completed)
    }

    pub fn version(&self, version_number: u32) -> Option<&Version> {
        self.versions
            .iter()
            .find(|v| v.version_number == version_number)
    }

    pub fn latest_completed(&self) -> Option<&Version> {
        self.last_completed_version()
    }

    pub fn next_version_number(&self) -> u32 {
        self.versions
            .last()
            .map(|v| v.version_number + 1)
            .unwrap_or(1)
    }

    pub fn push_version(&mut self, version: Version) {
        self.versions.push(version);
    }

    /// §3 invariant (i): every `PH` referenced by any version's `chunks`
    /// exists in the pool. Checked on load after the forward-compat
    /// upgrade step (§4.4).
    pub fn check_pool_references(&self) -> Result<(), DustError> {
        for version in &self.versions {
            for hash in version.resolved_chunks() {
                if !self.pool.contains_key(hash) {
                    return Err(DustError::manifest_corrupt(format!(
                        "version {} references PH {} not present in pool",
                        version.version_number, hash
                    )));
                }
            }
        }
        Ok(())
    }
}
