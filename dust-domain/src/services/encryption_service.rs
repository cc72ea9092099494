// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Crypto envelope port (C2).

use crate::error::DustError;
use crate::value_objects::{Envelope, Salt};
use zeroize::Zeroize;

/// Key material derived from a passphrase and salt. Wiped on drop so a
/// stray copy doesn't linger in memory after the operation completes.
#[derive(Clone)]
pub struct DerivedKey(Vec<u8>);

impl DerivedKey {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Drop for DerivedKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Passphrase-based key derivation plus AEAD encrypt/decrypt of one chunk.
/// Implementations must use scrypt (N=16384, r=8, p=1, dkLen=128,
/// truncated to the first 32 bytes) and AES-256-GCM (§4.2).
pub trait EncryptionService: Send + Sync {
    fn derive_key(&self, passphrase: &str, salt: &Salt) -> Result<DerivedKey, DustError>;

    /// Generates a fresh random salt for a new manifest.
    fn generate_salt(&self) -> Salt;

    fn encrypt_chunk(&self, key: &DerivedKey, plaintext: &[u8]) -> Result<Envelope, DustError>;

    /// Fails with `BadEnvelope` on a too-short envelope and `AuthFailure`
    /// on AEAD tag mismatch.
    fn decrypt_envelope(&self, key: &DerivedKey, envelope: &Envelope) -> Result<Vec<u8>, DustError>;
}
