// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Content-fingerprint hashing port (C2/C3 support).

use crate::error::DustError;
use crate::value_objects::{CipherHash, PlainHash};
use std::io::Read;

/// Computes the three digests the protocol relies on: the plaintext
/// dedup fingerprint (`PH`), the ciphertext corruption-detector
/// fingerprint (`CH`), and the whole-file SHA-256 used for resume
/// decisions and final round-trip verification.
pub trait ChecksumService: Send + Sync {
    /// §3: `PH = MD5(plaintext_bytes)`. MD5 is chosen only as a
    /// non-cryptographic dedup key; the AEAD tag carries integrity.
    fn plain_hash(&self, plaintext: &[u8]) -> PlainHash;

    /// Digest of an on-wire envelope, used to detect in-flight corruption
    /// independently of the AEAD tag.
    fn cipher_hash(&self, envelope_bytes: &[u8]) -> CipherHash;

    /// SHA-256 of an entire file, streamed so the whole file need not be
    /// held in memory at once.
    fn file_hash(&self, reader: &mut dyn Read) -> Result<String, DustError>;
}
