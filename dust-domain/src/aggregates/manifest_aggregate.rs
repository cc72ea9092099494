// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! The manifest aggregate root: resume decisions and version lifecycle.

use crate::entities::Manifest;
use crate::value_objects::Version;
use chrono::Utc;

/// What the uploader should do with the manifest it just loaded, given the
/// current source file's SHA-256 (§4.4 "Resume decision on open").
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResumeDecision {
    /// A pending version matches the current file; continue filling it in.
    ResumePending(u32),
    /// The last completed version already matches the current file; sync is a no-op.
    AlreadySynced(u32),
    /// Neither matched; a new pending version should be appended.
    NewVersion,
}

/// Wraps [`Manifest`] with the operations that must preserve its
/// invariants rather than exposing raw field mutation.
pub struct ManifestAggregate {
    manifest: Manifest,
}

impl ManifestAggregate {
    pub fn new(manifest: Manifest) -> Self {
        Self { manifest }
    }

    pub fn into_inner(self) -> Manifest {
        self.manifest
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn manifest_mut(&mut self) -> &mut Manifest {
        &mut self.manifest
    }

    /// §4.4: resume decision on open, evaluated against the file's current
    /// SHA-256 hex digest.
    pub fn resume_decision(&self, current_file_hash: &str) -> ResumeDecision {
        if let Some(pending) = self
            .manifest
            .versions
            .last()
            .filter(|v| !v.is_completed())
        {
            if pending.file_hash == current_file_hash {
                return ResumeDecision::ResumePending(pending.version_number);
            }
        }
        if let Some(completed) = self.manifest.last_completed_version() {
            if completed.file_hash == current_file_hash {
                return ResumeDecision::AlreadySynced(completed.version_number);
            }
        }
        ResumeDecision::NewVersion
    }

    /// Appends a fresh pending version for `total_size` bytes of
    /// `current_file_hash`, returning its 1-based version number.
    pub fn open_new_version(&mut self, current_file_hash: impl Into<String>, total_size: u64) -> u32 {
        let version_number = self.manifest.next_version_number();
        let version = Version::new_pending(version_number, Utc::now(), current_file_hash, total_size);
        self.manifest.push_version(version);
        version_number
    }
}
