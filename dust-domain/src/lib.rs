// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Dust Domain
//!
//! The domain layer of the backup engine: the business rules and data
//! model of content-defined chunking, the chunk pool, and the manifest,
//! independent of any filesystem, network, or CLI concern. It implements
//! Domain-Driven Design (DDD) patterns and depends on nothing from the
//! `dust` (application/infrastructure) or `dust-bootstrap` crates.
//!
//! ## Module Structure
//!
//! - [`error`] — [`DustError`], the single error enum shared across the crate family.
//! - [`value_objects`] — immutable, self-validating types: plaintext/ciphertext
//!   fingerprints, chunker bounds, the envelope wire format, the KDF salt, pool
//!   entries, and versions.
//! - [`entities`] — [`entities::Manifest`], the persisted document with identity.
//! - [`aggregates`] — [`aggregates::ManifestAggregate`], the invariant-preserving
//!   mutation surface over a manifest.
//! - [`services`] — CPU-bound domain service ports: chunking, the crypto
//!   envelope, checksums.
//! - [`repositories`] — I/O-bound ports: manifest persistence and the remote
//!   store adapter.
//!
//! ## Business Rules and Invariants
//!
//! - A pool entry is append-only: re-inserting an identical `(PH, CH)` pair
//!   is a no-op, a differing `CH` for an existing `PH` is a `PoolConflict`.
//! - At most one version is `pending`, and if present it is the last one.
//! - A version's resolved chunk positions must form a contiguous prefix.
//! - Every `PH` referenced by a version must exist in the pool.

pub mod aggregates;
pub mod entities;
pub mod error;
pub mod repositories;
pub mod services;
pub mod value_objects;

pub use aggregates::{ManifestAggregate, ResumeDecision};
pub use entities::Manifest;
pub use error::DustError;
pub use repositories::{ManifestRepository, RemoteStore};
pub use services::{ChecksumService, ChunkerService, EncryptionService};
pub use value_objects::{
    ChunkerConfig, CipherHash, Envelope, PlainHash, PoolEntry, Salt, Version, VersionStatus,
};
