// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Domain Aggregates
//!
//! An aggregate wraps an entity with the mutation operations that keep
//! its invariants intact; callers reach the entity only through these
//! operations.

pub mod manifest_aggregate;

pub use manifest_aggregate::{ManifestAggregate, ResumeDecision};
