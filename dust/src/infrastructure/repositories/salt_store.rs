// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Salt sidecar persistence (§6): `{ "salt": "<base64 32 bytes>" }` stored
//! next to the manifest. Its loss is unrecoverable, so writes use the same
//! atomic temp-then-rename discipline as the manifest itself.

use dust_domain::value_objects::Salt;
use dust_domain::DustError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

#[derive(Debug, Serialize, Deserialize)]
struct SaltSidecar {
    salt: String,
}

pub struct SaltSidecarStore;

impl SaltSidecarStore {
    pub fn new() -> Self {
        Self
    }

    /// The sidecar lives at `<manifest_path>.salt`.
    pub fn sidecar_path(manifest_path: &Path) -> PathBuf {
        let mut name = manifest_path.as_os_str().to_owned();
        name.push(".salt");
        PathBuf::from(name)
    }

    pub async fn load(&self, manifest_path: &Path) -> Result<Option<Salt>, DustError> {
        let path = Self::sidecar_path(manifest_path);
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let sidecar: SaltSidecar = serde_json::from_slice(&bytes)
            .map_err(|e| DustError::manifest_corrupt(format!("invalid salt sidecar: {e}")))?;
        Ok(Some(Salt::from_base64(&sidecar.salt)?))
    }

    pub async fn save(&self, manifest_path: &Path, salt: &Salt) -> Result<(), DustError> {
        let path = Self::sidecar_path(manifest_path);
        let sidecar = SaltSidecar {
            salt: salt.to_base64(),
        };
        let serialized = serde_json::to_vec_pretty(&sidecar)?;
        let tmp_path = {
            let mut p = path.as_os_str().to_owned();
            p.push(".tmp");
            PathBuf::from(p)
        };
        fs::write(&tmp_path, &serialized).await?;
        fs::rename(&tmp_path, &path).await?;
        Ok(())
    }
}

impl Default for SaltSidecarStore {
    fn default() -> Self {
        Self::new()
    }
}
