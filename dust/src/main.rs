// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Dust CLI
//!
//! The composition root: parses the `upload`/`restore` command surface
//! (§6), wires the concrete adapters into the `Uploader`/`Reconstructor`
//! use cases, and maps the result onto a process exit code.
//!
//! This binary sits outside the domain/application/infrastructure
//! layers, mirroring the bootstrap crate's separation from the
//! enterprise layers — it is the only place that knows about every
//! crate in the workspace at once.

use bootstrap::cli::{parse_cli, parse_restore_version, Commands, SecureArgParser};
use bootstrap::exit_code::ExitCode;
use dust::{
    DustConfig, GearHashChunker, JsonManifestStore, LocalFsStore, Reconstructor, RestoreMode,
    RetryPolicy, SaltSidecarStore, ScryptAesGcmEnvelope, Sha256Md5Checksums, Uploader,
};
use dust_domain::DustError;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};

const DEFAULT_REMOTE_ROOT: &str = ".dust-remote";

#[tokio::main]
async fn main() {
    let cli = parse_cli();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(level)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("tracing subscriber already set");
    }

    let config_path = cli.config.as_ref().and_then(|p| p.to_str());
    let config = match DustConfig::load(config_path) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "failed to load configuration");
            std::process::exit(ExitCode::Config.as_i32());
        }
    };

    let remote_root = cli
        .remote_root
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_REMOTE_ROOT));

    let outcome = match cli.command {
        Commands::Upload {
            file,
            passphrase,
            chunk_kb,
        } => {
            run_upload(
                &file,
                &passphrase,
                chunk_kb.unwrap_or(config.default_chunk_kb),
                &config,
                &remote_root,
            )
            .await
        }
        Commands::Restore {
            manifest,
            version,
            passphrase,
        } => match parse_restore_version(&version) {
            Ok(version_number) => {
                run_restore(&manifest, version_number, &passphrase, &config, &remote_root).await
            }
            Err(msg) => {
                error!(%msg, "invalid version argument");
                std::process::exit(ExitCode::UsageError.as_i32());
            }
        },
    };

    match outcome {
        Ok(()) => std::process::exit(ExitCode::Success.as_i32()),
        Err(e) => {
            error!(error = %e, category = e.category(), "operation failed");
            std::process::exit(exit_code_for(&e).as_i32());
        }
    }
}

/// Maps a domain error onto the bootstrap's BSD-style exit codes, using
/// the error's own recoverability/category classification rather than
/// `ExitCode::from_error`'s message-sniffing heuristics.
fn exit_code_for(error: &DustError) -> ExitCode {
    match error {
        DustError::IoError(_) => ExitCode::IoError,
        DustError::ConfigError(_) => ExitCode::Config,
        DustError::BadEnvelope(_) | DustError::AuthFailure(_) => ExitCode::DataError,
        DustError::RemoteTransient(_) => ExitCode::TempFail,
        DustError::RemoteFatal(_) => ExitCode::Unavailable,
        DustError::IntegrityWarning(_) => ExitCode::Success,
        DustError::IntegrityFatal(_) => ExitCode::DataError,
        DustError::ManifestCorrupt(_) => ExitCode::DataError,
        DustError::PoolConflict(_) => ExitCode::Software,
        DustError::SerializationError(_) => ExitCode::DataError,
        DustError::ValidationError(_) => ExitCode::UsageError,
        DustError::InternalError(_) => ExitCode::Software,
    }
}

async fn run_upload(
    file: &Path,
    passphrase: &str,
    chunk_kb: u64,
    config: &DustConfig,
    remote_root: &Path,
) -> Result<(), DustError> {
    if passphrase.is_empty() {
        return Err(DustError::validation_error("passphrase must not be empty"));
    }
    let file = SecureArgParser::validate_path(&file.to_string_lossy())
        .map_err(|e| DustError::validation_error(e.to_string()))?;

    let manifest_path = manifest_path_for(&file);
    let uploader = build_uploader(config, remote_root);

    info!(file = %file.display(), manifest = %manifest_path.display(), "starting upload");
    let outcome = uploader
        .upload(&file, &manifest_path, passphrase, chunk_kb)
        .await?;

    if outcome.already_synced {
        info!(version = outcome.version_number, "file already fully synced at this version");
    } else {
        info!(
            version = outcome.version_number,
            new_chunks = outcome.new_pool_entries,
            "upload complete"
        );
    }
    Ok(())
}

async fn run_restore(
    manifest: &Path,
    version_number: Option<u32>,
    passphrase: &str,
    config: &DustConfig,
    remote_root: &Path,
) -> Result<(), DustError> {
    if passphrase.is_empty() {
        return Err(DustError::validation_error("passphrase must not be empty"));
    }
    let manifest = SecureArgParser::validate_path(&manifest.to_string_lossy())
        .map_err(|e| DustError::validation_error(e.to_string()))?;

    let mode = restore_mode_for(&manifest);
    let reconstructor = build_reconstructor(config, remote_root);

    info!(manifest = %manifest.display(), ?mode, "starting restore");
    let outcome = reconstructor
        .restore(&manifest, version_number, passphrase, mode)
        .await?;

    info!(
        output = %outcome.output_path.display(),
        version = outcome.version_number,
        "restore complete"
    );
    Ok(())
}

/// `<filename>.sync.dust` for versioned manifests; `<filename>.dust`
/// otherwise (§4.3).
fn manifest_path_for(file: &Path) -> PathBuf {
    let mut name = file.as_os_str().to_owned();
    name.push(".sync.dust");
    PathBuf::from(name)
}

/// Versioned manifests (`*.sync.dust`) restore in parallel-gather mode;
/// single-version manifests (`*.dust`) restore strict-streaming (§4.6).
fn restore_mode_for(manifest: &Path) -> RestoreMode {
    let name = manifest.to_string_lossy();
    if name.ends_with(".sync.dust") {
        RestoreMode::ParallelGather
    } else {
        RestoreMode::StrictStreaming
    }
}

fn build_uploader(config: &DustConfig, remote_root: &Path) -> Uploader {
    let retry_policy = RetryPolicy::new(
        config.retry_attempts,
        config.retry_base_delay_ms,
        config.retry_jitter_ms,
    );
    Uploader {
        chunker: Arc::new(GearHashChunker::new()),
        checksum: Arc::new(Sha256Md5Checksums::new()),
        encryption: Arc::new(ScryptAesGcmEnvelope::new()),
        remote: Arc::new(LocalFsStore::new(remote_root.to_path_buf())),
        manifest_repo: Arc::new(JsonManifestStore::new()),
        salt_store: Arc::new(SaltSidecarStore::new()),
        retry_policy,
        concurrency: config.upload_concurrency,
        remote_size_warning_bytes: config.remote_size_warning_kb * 1024,
    }
}

fn build_reconstructor(config: &DustConfig, remote_root: &Path) -> Reconstructor {
    let retry_policy = RetryPolicy::new(
        config.retry_attempts,
        config.retry_base_delay_ms,
        config.retry_jitter_ms,
    );
    Reconstructor {
        checksum: Arc::new(Sha256Md5Checksums::new()),
        encryption: Arc::new(ScryptAesGcmEnvelope::new()),
        remote: Arc::new(LocalFsStore::new(remote_root.to_path_buf())),
        manifest_repo: Arc::new(JsonManifestStore::new()),
        salt_store: Arc::new(SaltSidecarStore::new()),
        retry_policy,
        concurrency: config.restore_concurrency,
    }
}
