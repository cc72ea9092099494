// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Platform Abstraction Module
//!
//! OS-specific functionality the bootstrap layer needs before any
//! enterprise layer is wired up: CPU/memory introspection, temp
//! directories, and file-sync durability.
//!
//! - **Interface**: [`Platform`] defines the contract.
//! - **Implementations**: [`UnixPlatform`] (POSIX) and [`WindowsPlatform`],
//!   selected at compile time via `#[cfg]`.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[cfg(unix)]
mod unix;

#[cfg(windows)]
mod windows;

#[cfg(unix)]
pub use unix::UnixPlatform;

#[cfg(windows)]
pub use windows::WindowsPlatform;

/// Platform-specific errors.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not supported on this platform: {0}")]
    NotSupported(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Platform error: {0}")]
    Other(String),
}

/// Platform abstraction trait for OS-specific operations.
#[async_trait]
pub trait Platform: Send + Sync {
    /// System page size, for buffer-sizing decisions (e.g. the
    /// uploader's read window versus the CDC max chunk size).
    fn page_size(&self) -> usize;

    /// Number of logical CPUs available to the process.
    fn cpu_count(&self) -> usize;

    fn total_memory(&self) -> Result<u64, PlatformError>;

    fn available_memory(&self) -> Result<u64, PlatformError>;

    fn line_separator(&self) -> &'static str;

    fn path_separator(&self) -> char;

    fn platform_name(&self) -> &'static str;

    fn temp_dir(&self) -> PathBuf;

    /// True if the process runs with elevated privileges (root/Administrator).
    fn is_elevated(&self) -> bool;

    fn set_permissions(&self, path: &Path, mode: u32) -> Result<(), PlatformError>;

    fn is_executable(&self, path: &Path) -> bool;

    /// Flushes a file's buffers to physical storage. Used by the manifest
    /// store and reconstructor output to make the temp-then-rename
    /// durability guarantee (SPEC_FULL.md §4.4/§4.6) hold across a crash.
    async fn sync_file(&self, file: &tokio::fs::File) -> Result<(), PlatformError>;
}

#[cfg(unix)]
type PlatformImpl = UnixPlatform;

#[cfg(windows)]
type PlatformImpl = WindowsPlatform;

/// Returns the platform implementation for the current OS, selected at
/// compile time.
pub fn create_platform() -> Box<dyn Platform> {
    Box::new(PlatformImpl::new())
}
