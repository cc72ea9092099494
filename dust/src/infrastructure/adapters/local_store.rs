// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Filesystem-backed reference implementation of the remote store port (C7).
//!
//! Ships so the uploader/reconstructor are exercisable end to end without
//! a live network dependency. It stores each blob as a file named by its
//! own SHA-256 digest under a root directory and returns a `file://`
//! locator as the "immutable URL" — a drop-in stand-in for a production
//! remote client wired at the same `RemoteStore` trait boundary.

use async_trait::async_trait;
use dust_domain::{DustError, RemoteStore};
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use tokio::fs;

const URL_PREFIX: &str = "file://";

pub struct LocalFsStore {
    root: PathBuf,
}

impl LocalFsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for_url(&self, url: &str) -> Result<PathBuf, DustError> {
        let name = url.strip_prefix(URL_PREFIX).ok_or_else(|| {
            DustError::remote_fatal(format!("url {url} is not a local-store locator"))
        })?;
        Ok(self.root.join(name))
    }
}

#[async_trait]
impl RemoteStore for LocalFsStore {
    async fn put(&self, blob: Vec<u8>, _tags: &[(String, String)]) -> Result<String, DustError> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| DustError::remote_transient(format!("create_dir_all failed: {e}")))?;

        let digest = hex::encode(Sha256::digest(&blob));
        let path = self.root.join(&digest);
        let tmp_path = self.root.join(format!("{digest}.tmp"));
        fs::write(&tmp_path, &blob)
            .await
            .map_err(|e| DustError::remote_transient(format!("write failed: {e}")))?;
        fs::rename(&tmp_path, &path)
            .await
            .map_err(|e| DustError::remote_transient(format!("rename failed: {e}")))?;

        Ok(format!("{URL_PREFIX}{digest}"))
    }

    async fn get(&self, url: &str) -> Result<Vec<u8>, DustError> {
        let path = self.path_for_url(url)?;
        fs::read(&path)
            .await
            .map_err(|e| DustError::remote_transient(format!("read failed: {e}")))
    }
}
