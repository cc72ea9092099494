// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Plaintext content fingerprint (dedup key).

use crate::error::DustError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// MD5 digest of a chunk's plaintext bytes, hex-encoded. Used purely as a
/// non-cryptographic dedup fingerprint; integrity is carried by the AEAD
/// tag, not by this value. See [`CipherHash`](super::CipherHash) for the
/// ciphertext-side fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlainHash(String);

impl PlainHash {
    /// MD5 produces 16 bytes, hex-encoded to 32 characters.
    pub const HEX_LEN: usize = 32;

    pub fn from_hex(hex: impl Into<String>) -> Result<Self, DustError> {
        let hex = hex.into();
        if hex.len() != Self::HEX_LEN || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(DustError::validation_error(format!(
                "PlainHash must be {} lowercase hex characters, got {:?}",
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

impl fmt::Display for PlainHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_hex() {
        let hex = "a".repeat(32);
        assert!(PlainHash::from_hex(hex).is_ok());
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(PlainHash::from_hex("abcd").is_err());
    }

    #[test]
    fn rejects_non_hex() {
        let bad = "z".repeat(32);
        assert!(PlainHash::from_hex(bad).is_err());
    }

    #[test]
    fn from_digest_bytes_round_trips_through_hex() {
        let bytes = [0xabu8; 16];
        let ph = PlainHash::from_digest_bytes(&bytes);
        assert_eq!(ph.as_str().len(), 32);
        assert_eq!(ph, PlainHash::from_hex(ph.as_str()).unwrap());
    }
}
