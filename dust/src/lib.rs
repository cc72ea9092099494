// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Dust
//!
//! The application and infrastructure layers of the backup engine:
//! the use cases that orchestrate the `dust-domain` ports (C5 uploader,
//! C6 reconstructor) and the concrete adapters that implement those
//! ports (C1 gear-hash chunker, C2 scrypt/AES-256-GCM envelope, C7 local
//! filesystem remote store, C4 JSON manifest persistence).
//!
//! ## Module Structure
//!
//! - [`application`] — use cases and the retry combinator they share.
//! - [`infrastructure`] — adapters, repositories, and ambient runtime
//!   configuration.
//!
//! The composition root that wires these together behind the CLI lives
//! in the `dust` binary's `main.rs`, outside this library, alongside
//! the `dust-bootstrap` crate's platform/signal/logging concerns.

pub mod application;
pub mod infrastructure;

pub use application::{with_retry, Reconstructor, RestoreMode, RestoreOutcome, RetryPolicy, UploadOutcome, Uploader};
pub use infrastructure::adapters::{GearHashChunker, LocalFsStore, ScryptAesGcmEnvelope, Sha256Md5Checksums};
pub use infrastructure::config::DustConfig;
pub use infrastructure::repositories::{JsonManifestStore, SaltSidecarStore};
