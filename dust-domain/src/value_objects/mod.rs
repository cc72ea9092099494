// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Domain Value Objects
//!
//! Immutable objects that represent concepts without identity. Value
//! objects are defined by their attributes and enforce business rules
//! through validation at construction time.
//!
//! - [`PlainHash`]: content fingerprint of a chunk's plaintext (dedup key).
//! - [`CipherHash`]: fingerprint of an encrypted envelope (corruption detector).
//! - [`ChunkerConfig`]: validated `(min, avg, max)` bounds for content-defined chunking.
//! - [`Envelope`]: the on-wire `nonce || tag || ciphertext` form of a chunk.
//! - [`Salt`]: the 32-byte KDF salt, persisted base64 in the sidecar file.
//! - [`PoolEntry`]: an immutable pool record keyed by [`PlainHash`].
//! - [`Version`] / [`VersionStatus`]: one backup snapshot of the source file.

pub mod chunker_config;
pub mod cipher_hash;
pub mod envelope;
pub mod plain_hash;
pub mod pool_entry;
pub mod salt;
pub mod version;

pub use chunker_config::ChunkerConfig;
pub use cipher_hash::CipherHash;
pub use envelope::{Envelope, HEADER_LEN, NONCE_LEN, TAG_LEN};
pub use plain_hash::PlainHash;
pub use pool_entry::PoolEntry;
pub use salt::{Salt, SALT_LEN};
pub use version::{Version, VersionStatus};
