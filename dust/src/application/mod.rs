// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Application Layer
//!
//! Use cases (C5 uploader, C6 reconstructor) and the retry combinator they
//! share. This layer orchestrates domain ports; it holds no business rules
//! of its own beyond sequencing.

pub mod retry;
pub mod use_cases;

pub use retry::{with_retry, RetryPolicy};
pub use use_cases::restore::{Reconstructor, RestoreMode, RestoreOutcome};
pub use use_cases::upload::{UploadOutcome, Uploader};
