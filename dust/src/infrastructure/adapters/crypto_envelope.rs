// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Crypto envelope adapter: scrypt key derivation + AES-256-GCM (C2).

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use dust_domain::value_objects::{NONCE_LEN, SALT_LEN, TAG_LEN};
use dust_domain::{DustError, Envelope, EncryptionService, Salt};
use dust_domain::services::encryption_service::DerivedKey;
use rand::RngCore;
use scrypt::Params;

/// scrypt parameters from §4.2: `N=16384, r=8, p=1, dkLen=128`.
const SCRYPT_LOG_N: u8 = 14; // 2^14 = 16384
const SCRYPT_R: u32 = 8;
const SCRYPT_P: u32 = 1;
const SCRYPT_DK_LEN: usize = 128;
const AES_KEY_LEN: usize = 32;

pub struct ScryptAesGcmEnvelope;

impl ScryptAesGcmEnvelope {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ScryptAesGcmEnvelope {
    fn default() -> Self {
        Self::new()
    }
}

impl EncryptionService for ScryptAesGcmEnvelope {
    fn derive_key(&self, passphrase: &str, salt: &Salt) -> Result<DerivedKey, DustError> {
        if passphrase.is_empty() {
            return Err(DustError::config_error("passphrase must not be empty"));
        }
        let params = Params::new(SCRYPT_LOG_N, SCRYPT_R, SCRYPT_P, SCRYPT_DK_LEN)
            .map_err(|e| DustError::internal_error(format!("invalid scrypt params: {e}")))?;
        let mut derived = vec![0u8; SCRYPT_DK_LEN];
        scrypt::scrypt(passphrase.as_bytes(), salt.as_bytes(), &params, &mut derived)
            .map_err(|e| DustError::internal_error(format!("scrypt derivation failed: {e}")))?;
        derived.truncate(AES_KEY_LEN);
        Ok(DerivedKey::new(derived))
    }

    fn generate_salt(&self) -> Salt {
        let mut bytes = [0u8; SALT_LEN];
        rand::rng().fill_bytes(&mut bytes);
        Salt::from_bytes(bytes)
    }

    fn encrypt_chunk(&self, key: &DerivedKey, plaintext: &[u8]) -> Result<Envelope, DustError> {
        let cipher_key = Key::<Aes256Gcm>::from_slice(key.as_bytes());
        let cipher = Aes256Gcm::new(cipher_key);

        let mut nonce_bytes = [0u8; NONCE_LEN];
        rand::rng().fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let combined = cipher
            .encrypt(nonce, plaintext)
            .map_err(|e| DustError::internal_error(format!("encryption failed: {e}")))?;
        let split_at = combined.len() - TAG_LEN;
        let (ciphertext, tag) = combined.split_at(split_at);

        let mut tag_arr = [0u8; TAG_LEN];
        tag_arr.copy_from_slice(tag);
        Ok(Envelope::new(nonce_bytes, tag_arr, ciphertext.to_vec()))
    }

    fn decrypt_envelope(&self, key: &DerivedKey, envelope: &Envelope) -> Result<Vec<u8>, DustError> {
        let cipher_key = Key::<Aes256Gcm>::from_slice(key.as_bytes());
        let cipher = Aes256Gcm::new(cipher_key);
        let nonce = Nonce::from_slice(envelope.nonce());

        let mut combined = Vec::with_capacity(envelope.ciphertext().len() + TAG_LEN);
        combined.extend_from_slice(envelope.ciphertext());
        combined.extend_from_slice(envelope.tag());

        cipher
            .decrypt(nonce, combined.as_ref())
            .map_err(|_| DustError::auth_failure("AEAD tag verification failed"))
    }
}
