// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Manifest document persistence (C4): atomic save, forward-compat
//! upgrade of older embedded-descriptor layouts, and normalization of the
//! single-version `<name>.dust` format into the versioned in-memory form.

use async_trait::async_trait;
use dust_domain::entities::Manifest;
use dust_domain::repositories::ManifestRepository;
use dust_domain::value_objects::{CipherHash, PlainHash, PoolEntry, Version, VersionStatus};
use dust_domain::DustError;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use tokio::fs;

/// An embedded chunk descriptor as it appears in either the legacy
/// versioned layout or the current single-version `.dust` layout.
#[derive(Debug, Clone, Deserialize)]
struct EmbeddedChunkDescriptor {
    #[allow(dead_code)]
    part: Option<u32>,
    hash: String,
    plain_hash: String,
    url: String,
}

#[derive(Debug, Deserialize)]
struct SingleVersionDoc {
    filename: Option<String>,
    file_hash: String,
    total_size: u64,
    chunks: Vec<EmbeddedChunkDescriptor>,
}

pub struct JsonManifestStore;

impl JsonManifestStore {
    pub fn new() -> Self {
        Self
    }

    fn lift_descriptor(
        manifest: &mut Manifest,
        descriptor: &EmbeddedChunkDescriptor,
    ) -> Result<PlainHash, DustError> {
        let ph = PlainHash::from_hex(descriptor.plain_hash.clone())
            .map_err(|e| DustError::manifest_corrupt(format!("bad embedded plain_hash: {e}")))?;
        let ch = CipherHash::from_hex(descriptor.hash.clone())
            .map_err(|e| DustError::manifest_corrupt(format!("bad embedded hash: {e}")))?;
        manifest.insert_pool_entry(ph.clone(), PoolEntry::new(ch, descriptor.url.clone(), None))?;
        Ok(ph)
    }

    /// Normalizes the single-version `<name>.dust` layout (§6) into one
    /// completed version of an otherwise-empty manifest.
    fn normalize_single_version(doc: SingleVersionDoc) -> Result<Manifest, DustError> {
        let mut manifest = Manifest::new(doc.filename.unwrap_or_default());
        let mut version = Version::new_pending(1, chrono::Utc::now(), doc.file_hash, doc.total_size);
        for (i, descriptor) in doc.chunks.iter().enumerate() {
            let ph = Self::lift_descriptor(&mut manifest, descriptor)?;
            version.set_chunk_at(i, ph);
        }
        version.mark_completed()?;
        manifest.push_version(version);
        Ok(manifest)
    }

    /// Upgrades a single version's `chunks` array in place if it holds
    /// embedded descriptors instead of plain `PH` strings (§4.4 forward
    /// compatibility). Idempotent: a version already in the current
    /// format is returned unchanged.
    fn upgrade_version_chunks(
        manifest: &mut Manifest,
        raw_chunks: &[Value],
    ) -> Result<Vec<Option<PlainHash>>, DustError> {
        let mut upgraded = Vec::with_capacity(raw_chunks.len());
        for raw in raw_chunks {
            match raw {
                Value::Null => upgraded.push(None),
                Value::String(s) => upgraded.push(Some(PlainHash::from_hex(s.clone())?)),
                Value::Object(_) => {
                    let descriptor: EmbeddedChunkDescriptor =
                        serde_json::from_value(raw.clone())?;
                    let ph = Self::lift_descriptor(manifest, &descriptor)?;
                    upgraded.push(Some(ph));
                }
                other => {
                    return Err(DustError::manifest_corrupt(format!(
                        "unexpected chunk entry shape: {other}"
                    )))
                }
            }
        }
        Ok(upgraded)
    }

    fn parse_versioned(root: &Value) -> Result<Manifest, DustError> {
        let filename = root
            .get("filename")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let mut manifest = Manifest::new(filename);

        if let Some(pool) = root.get("pool").and_then(Value::as_object) {
            for (ph_hex, entry) in pool {
                let ph = PlainHash::from_hex(ph_hex.clone())?;
                let entry: PoolEntry = serde_json::from_value(entry.clone())?;
                manifest.insert_pool_entry(ph, entry)?;
            }
        }

        let versions = root
            .get("versions")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        for raw_version in versions {
            let version_number = raw_version
                .get("version")
                .and_then(Value::as_u64)
                .ok_or_else(|| DustError::manifest_corrupt("version missing 'version' field"))?
                as u32;
            let timestamp = raw_version
                .get("timestamp")
                .and_then(Value::as_str)
                .and_then(|s| s.parse::<chrono::DateTime<chrono::Utc>>().ok())
                .unwrap_or_else(chrono::Utc::now);
            let file_hash = raw_version
                .get("file_hash")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            let total_size = raw_version
                .get("total_size")
                .and_then(Value::as_u64)
                .unwrap_or(0);
            let status = match raw_version.get("status").and_then(Value::as_str) {
                Some("completed") => VersionStatus::Completed,
                _ => VersionStatus::Pending,
            };
            let raw_chunks = raw_version
                .get("chunks")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();
            let chunks = Self::upgrade_version_chunks(&mut manifest, &raw_chunks)?;

            let mut version = Version::new_pending(version_number, timestamp, file_hash, total_size);
            for (i, chunk) in chunks.into_iter().enumerate() {
                if let Some(ph) = chunk {
                    version.set_chunk_at(i, ph);
                }
            }
            if status == VersionStatus::Completed {
                version.mark_completed()?;
            }
            manifest.push_version(version);
        }

        manifest.check_pool_references()?;
        Ok(manifest)
    }
}

impl Default for JsonManifestStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ManifestRepository for JsonManifestStore {
    async fn load(&self, path: &Path) -> Result<Option<Manifest>, DustError> {
        let bytes = match fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let root: Value = serde_json::from_slice(&bytes)
            .map_err(|e| DustError::manifest_corrupt(format!("invalid manifest JSON: {e}")))?;

        let manifest = if root.get("pool").is_some() || root.get("versions").is_some() {
            Self::parse_versioned(&root)?
        } else {
            let doc: SingleVersionDoc = serde_json::from_value(root)
                .map_err(|e| DustError::manifest_corrupt(format!("invalid single-version manifest: {e}")))?;
            Self::normalize_single_version(doc)?
        };

        Ok(Some(manifest))
    }

    async fn save(&self, path: &Path, manifest: &Manifest) -> Result<(), DustError> {
        let serialized = serde_json::to_vec_pretty(manifest)?;

        let tmp_path = path.with_extension(format!(
            "{}.tmp",
            path.extension().and_then(|e| e.to_str()).unwrap_or("dust")
        ));
        fs::write(&tmp_path, &serialized).await?;
        fs::rename(&tmp_path, path).await?;
        Ok(())
    }
}
