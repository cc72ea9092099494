// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Remote permanent-storage adapter port (C7).

use crate::error::DustError;
use async_trait::async_trait;

/// Narrow interface the core depends on. No deduplication is assumed from
/// the remote, and the adapter exposes no deletion primitive — the core
/// never attempts one (§4.7).
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Uploads an opaque blob and returns an immutable URL. May fail
    /// transiently; callers layer retry policy on top (§4.5, §4.6).
    async fn put(&self, blob: Vec<u8>, tags: &[(String, String)]) -> Result<String, DustError>;

    /// Retrieves a previously stored blob by its URL.
    async fn get(&self, url: &str) -> Result<Vec<u8>, DustError>;
}
