// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! On-wire encrypted chunk format: `nonce(12) || tag(16) || ciphertext(n)`.

use crate::error::DustError;

pub const NONCE_LEN: usize = 12;
pub const TAG_LEN: usize = 16;
pub const HEADER_LEN: usize = NONCE_LEN + TAG_LEN;

/// A parsed envelope: the AEAD nonce, authentication tag, and ciphertext
/// bytes of one encrypted chunk. `to_bytes`/`from_bytes` implement the
/// fixed-offset wire format; no separate framing is used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    nonce: [u8; NONCE_LEN],
    tag: [u8; TAG_LEN],
    ciphertext: Vec<u8>,
}

impl Envelope {
    pub fn new(nonce: [u8; NONCE_LEN], tag: [u8; TAG_LEN], ciphertext: Vec<u8>) -> Self {
        Self {
            nonce,
            tag,
            ciphertext,
        }
    }

    pub fn nonce(&self) -> &[u8; NONCE_LEN] {
        &self.nonce
    }

    pub fn tag(&self) -> &[u8; TAG_LEN] {
        &self.tag
    }

    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_LEN + self.ciphertext.len());
        out.extend_from_slice(&self.nonce);
        out.extend_from_slice(&self.tag);
        out.extend_from_slice(&self.ciphertext);
        out
    }

    pub fn from_bytes(blob: &[u8]) -> Result<Self, DustError> {
        if blob.len() <= HEADER_LEN {
            return Err(DustError::bad_envelope(format!(
                "envelope of {} bytes is too short to contain a {}-byte header",
                blob.len(),
                HEADER_LEN
            )));
        }
        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(&blob[..NONCE_LEN]);
        let mut tag = [0u8; TAG_LEN];
        tag.copy_from_slice(&blob[NONCE_LEN..HEADER_LEN]);
        let ciphertext = blob[HEADER_LEN..].to_vec();
        Ok(Self::new(nonce, tag, ciphertext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_bytes() {
        let env = Envelope::new([1u8; NONCE_LEN], [2u8; TAG_LEN], vec![9, 9, 9]);
        let bytes = env.to_bytes();
        assert_eq!(bytes.len(), HEADER_LEN + 3);
        let parsed = Envelope::from_bytes(&bytes).unwrap();
        assert_eq!(parsed, env);
    }

    #[test]
    fn rejects_too_short_blob() {
        let short = vec![0u8; HEADER_LEN];
        assert!(Envelope::from_bytes(&short).is_err());
    }
}
