// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Domain-wide error enum for the backup engine.
//!
//! Every fallible domain operation returns `Result<T, DustError>`. Variants
//! map directly onto the error kinds distinguished by the manifest/upload/
//! restore protocol: some are retried internally and never escape a use
//! case (`RemoteTransient`), some abort the current operation but leave
//! on-disk state resumable (`RemoteFatal`, `ManifestCorrupt`), and some
//! indicate tampering or a broken invariant (`IntegrityFatal`,
//! `PoolConflict`).

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DustError {
    /// Filesystem or stream I/O failure.
    #[error("IO error: {0}")]
    IoError(String),

    /// Invalid runtime configuration: empty passphrase, bad chunk-size bounds, etc.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// An envelope is too short to contain a nonce and auth tag.
    #[error("Malformed envelope: {0}")]
    BadEnvelope(String),

    /// AEAD tag verification failed during decryption.
    #[error("Authentication failure: {0}")]
    AuthFailure(String),

    /// A remote store operation failed but is expected to succeed on retry.
    #[error("Transient remote failure: {0}")]
    RemoteTransient(String),

    /// A remote store operation exhausted its retry budget.
    #[error("Remote failure: {0}")]
    RemoteFatal(String),

    /// Ciphertext digest does not match the pool's recorded value. Logged, never fatal.
    #[error("Integrity warning: {0}")]
    IntegrityWarning(String),

    /// Plaintext digest or final file hash mismatch. Aborts the current operation.
    #[error("Integrity failure: {0}")]
    IntegrityFatal(String),

    /// The manifest document failed to parse.
    #[error("Manifest corrupt: {0}")]
    ManifestCorrupt(String),

    /// Two different ciphertext digests were observed for the same plaintext digest.
    #[error("Pool conflict: {0}")]
    PoolConflict(String),

    /// Serialization/deserialization of a persisted document failed.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// A value failed its domain-level validation rules.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// An invariant was violated that indicates a programming error, not bad input.
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DustError {
    pub fn io_error<S: Into<String>>(msg: S) -> Self {
        Self::IoError(msg.into())
    }

    pub fn config_error<S: Into<String>>(msg: S) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn bad_envelope<S: Into<String>>(msg: S) -> Self {
        Self::BadEnvelope(msg.into())
    }

    pub fn auth_failure<S: Into<String>>(msg: S) -> Self {
        Self::AuthFailure(msg.into())
    }

    pub fn remote_transient<S: Into<String>>(msg: S) -> Self {
        Self::RemoteTransient(msg.into())
    }

    pub fn remote_fatal<S: Into<String>>(msg: S) -> Self {
        Self::RemoteFatal(msg.into())
    }

    pub fn integrity_warning<S: Into<String>>(msg: S) -> Self {
        Self::IntegrityWarning(msg.into())
    }

    pub fn integrity_fatal<S: Into<String>>(msg: S) -> Self {
        Self::IntegrityFatal(msg.into())
    }

    pub fn manifest_corrupt<S: Into<String>>(msg: S) -> Self {
        Self::ManifestCorrupt(msg.into())
    }

    pub fn pool_conflict<S: Into<String>>(msg: S) -> Self {
        Self::PoolConflict(msg.into())
    }

    pub fn validation_error<S: Into<String>>(msg: S) -> Self {
        Self::ValidationError(msg.into())
    }

    pub fn internal_error<S: Into<String>>(msg: S) -> Self {
        Self::InternalError(msg.into())
    }

    /// Failures where the same operation is expected to succeed if retried
    /// or re-run: transient I/O, transient remote errors, and a manifest
    /// that can be rebuilt from scratch.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::IoError(_) | Self::RemoteTransient(_) | Self::ManifestCorrupt(_)
        )
    }

    /// Coarse classification used by the bootstrap layer to pick an exit
    /// code without matching on error messages.
    pub fn category(&self) -> &'static str {
        match self {
            Self::IoError(_) => "io",
            Self::ConfigError(_) => "config",
            Self::BadEnvelope(_) => "envelope",
            Self::AuthFailure(_) => "auth",
            Self::RemoteTransient(_) => "remote_transient",
            Self::RemoteFatal(_) => "remote_fatal",
            Self::IntegrityWarning(_) => "integrity_warning",
            Self::IntegrityFatal(_) => "integrity_fatal",
            Self::ManifestCorrupt(_) => "manifest_corrupt",
            Self::PoolConflict(_) => "pool_conflict",
            Self::SerializationError(_) => "serialization",
            Self::ValidationError(_) => "validation",
            Self::InternalError(_) => "internal",
        }
    }
}

impl From<std::io::Error> for DustError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for DustError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recoverable_errors_are_flagged() {
        assert!(DustError::io_error("disk full").is_recoverable());
        assert!(DustError::remote_transient("timeout").is_recoverable());
        assert!(DustError::manifest_corrupt("bad json").is_recoverable());
    }

    #[test]
    fn fatal_errors_are_not_recoverable() {
        assert!(!DustError::auth_failure("tag mismatch").is_recoverable());
        assert!(!DustError::integrity_fatal("ph mismatch").is_recoverable());
        assert!(!DustError::pool_conflict("ch mismatch for same ph").is_recoverable());
        assert!(!DustError::remote_fatal("retries exhausted").is_recoverable());
    }

    #[test]
    fn categories_are_stable() {
        assert_eq!(DustError::bad_envelope("short").category(), "envelope");
        assert_eq!(DustError::pool_conflict("x").category(), "pool_conflict");
    }

    #[test]
    fn io_error_converts_from_std() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: DustError = io.into();
        assert!(matches!(err, DustError::IoError(_)));
    }
}
