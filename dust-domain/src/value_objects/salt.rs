// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! KDF salt, persisted base64 in the sidecar file. Its loss is unrecoverable.

use crate::error::DustError;
use base64::Engine;

pub const SALT_LEN: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Salt([u8; SALT_LEN]);

impl Salt {
    pub fn from_bytes(bytes: [u8; SALT_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SALT_LEN] {
        &self.0
    }

    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(self.0)
    }

    pub fn from_base64(encoded: &str) -> Result<Self, DustError> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .map_err(|e| DustError::manifest_corrupt(format!("invalid salt encoding: {e}")))?;
        let bytes: [u8; SALT_LEN] = bytes.try_into().map_err(|v: Vec<u8>| {
            DustError::manifest_corrupt(format!(
                "salt must decode to {SALT_LEN} bytes, got {}",
                v.len()
            ))
        })?;
        Ok(Self(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_base64() {
        let salt = Salt::from_bytes([7u8; SALT_LEN]);
        let encoded = salt.to_base64();
        let decoded = Salt::from_base64(&encoded).unwrap();
        assert_eq!(salt, decoded);
    }

    #[test]
    fn rejects_wrong_length() {
        let encoded = base64::engine::general_purpose::STANDARD.encode([1u8; 16]);
        assert!(Salt::from_base64(&encoded).is_err());
    }
}
