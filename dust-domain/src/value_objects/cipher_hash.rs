// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Ciphertext envelope fingerprint (in-flight corruption detector).

use crate::error::DustError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// SHA-256 digest of an on-wire envelope, hex-encoded. A mismatch against
/// the pool's recorded value is a non-fatal integrity warning: the AEAD
/// tag, not this digest, is the authoritative integrity check.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CipherHash(String);

impl CipherHash {
    /// SHA-256 produces 32 bytes, hex-encoded to 64 characters.
    pub const HEX_LEN: usize = 64;

    pub fn from_hex(hex: impl Into<String>) -> Result<Self, DustError> {
        let hex = hex.into();
        if hex.len() != Self::HEX_LEN || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(DustError::validation_error(format!(
                "CipherHash must be {} lowercase hex characters, got {:?}",
                Self::HEX_LEN,
                hex
            )));
        }
        Ok(Self(hex.to_ascii_lowercase()))
    }

    pub fn from_digest_bytes(bytes: &[u8]) -> Self {
        Self(hex::encode(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CipherHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
