// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Domain Services
//!
//! Stateless ports expressing the CPU-bound business logic that doesn't
//! belong to a single value object: content-defined chunking, the crypto
//! envelope, and content-fingerprint hashing. Infrastructure adapters
//! implement these traits; the domain only depends on the trait.

pub mod checksum_service;
pub mod chunker_service;
pub mod encryption_service;

pub use checksum_service::ChecksumService;
pub use chunker_service::ChunkerService;
pub use encryption_service::EncryptionService;
