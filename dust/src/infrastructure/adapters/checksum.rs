// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Digest adapter implementing the checksum port (C2/C3 support).
//!
//! `PH` uses MD5 as a non-cryptographic dedup fingerprint (§9 design
//! note); `CH` and the whole-file hash use SHA-256, since only the AEAD
//! tag is required to carry real integrity.

use dust_domain::{CipherHash, ChecksumService, PlainHash};
use md5::{Digest as Md5Digest, Md5};
use sha2::{Digest, Sha256};
use std::io::Read;

pub struct Sha256Md5Checksums;

impl Sha256Md5Checksums {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Sha256Md5Checksums {
    fn default() -> Self {
        Self::new()
    }
}

impl ChecksumService for Sha256Md5Checksums {
    fn plain_hash(&self, plaintext: &[u8]) -> PlainHash {
        let digest = Md5::digest(plaintext);
        PlainHash::from_digest_bytes(&digest)
    }

    fn cipher_hash(&self, envelope_bytes: &[u8]) -> CipherHash {
        let digest = Sha256::digest(envelope_bytes);
        CipherHash::from_digest_bytes(&digest)
    }

    fn file_hash(&self, reader: &mut dyn Read) -> Result<String, dust_domain::DustError> {
        let mut hasher = Sha256::new();
        let mut buf = [0u8; 64 * 1024];
        loop {
            let n = reader.read(&mut buf)?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
        }
        Ok(hex::encode(hasher.finalize()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_hash_is_32_hex_chars() {
        let svc = Sha256Md5Checksums::new();
        let ph = svc.plain_hash(b"hello world");
        assert_eq!(ph.as_str().len(), 32);
    }

    #[test]
    fn cipher_hash_is_64_hex_chars() {
        let svc = Sha256Md5Checksums::new();
        let ch = svc.cipher_hash(b"envelope bytes");
        assert_eq!(ch.as_str().len(), 64);
    }

    #[test]
    fn file_hash_matches_known_sha256() {
        let svc = Sha256Md5Checksums::new();
        let mut cursor = std::io::Cursor::new(b"hello world".to_vec());
        let hash = svc.file_hash(&mut cursor).unwrap();
        assert_eq!(
            hash,
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }
}
