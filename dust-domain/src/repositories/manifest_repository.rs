// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Manifest document persistence port (C4).

use crate::entities::Manifest;
use crate::error::DustError;
use async_trait::async_trait;
use std::path::Path;

/// Loads and atomically saves the manifest document. Implementations must
/// honor the atomic-save discipline of §4.4: every mutating save writes a
/// temp file and renames it over the target, so a crash mid-write leaves
/// the previous manifest generation intact.
#[async_trait]
pub trait ManifestRepository: Send + Sync {
    /// Returns `Ok(None)` if no manifest exists yet at `path` (a fresh
    /// sync). A parse failure is surfaced as `ManifestCorrupt`, which the
    /// uploader treats as "fall back to a new manifest, with a warning"
    /// rather than a hard failure (§7).
    async fn load(&self, path: &Path) -> Result<Option<Manifest>, DustError>;

    async fn save(&self, path: &Path, manifest: &Manifest) -> Result<(), DustError>;
}
