// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! The uploader use case (C5): hash, resume, chunk, dedup, encrypt, upload,
//! save. See SPEC_FULL.md §4.5 for the full protocol this implements.

use crate::application::retry::{with_retry, RetryPolicy};
use crate::infrastructure::repositories::salt_store::SaltSidecarStore;
use dust_domain::aggregates::{ManifestAggregate, ResumeDecision};
use dust_domain::entities::Manifest;
use dust_domain::repositories::{ManifestRepository, RemoteStore};
use dust_domain::services::{ChecksumService, ChunkerService, EncryptionService};
use dust_domain::value_objects::{ChunkerConfig, PlainHash, PoolEntry};
use dust_domain::DustError;
use futures::stream::{FuturesUnordered, StreamExt};
use std::path::Path;
use std::sync::Arc;
use tokio::io::AsyncReadExt;

pub struct UploadOutcome {
    pub version_number: u32,
    pub new_pool_entries: usize,
    pub already_synced: bool,
}

pub struct Uploader {
    pub chunker: Arc<dyn ChunkerService>,
    pub checksum: Arc<dyn ChecksumService>,
    pub encryption: Arc<dyn EncryptionService>,
    pub remote: Arc<dyn RemoteStore>,
    pub manifest_repo: Arc<dyn ManifestRepository>,
    pub salt_store: Arc<SaltSidecarStore>,
    pub retry_policy: RetryPolicy,
    pub concurrency: usize,
    pub remote_size_warning_bytes: u64,
}

struct PendingUpload {
    position: usize,
    plaintext: Vec<u8>,
    plain_hash: PlainHash,
}

struct UploadedChunk {
    position: usize,
    plain_hash: PlainHash,
    entry: PoolEntry,
}

impl Uploader {
    /// Runs the full upload protocol (§4.5, steps 1-6) for `file_path`
    /// against the manifest at `manifest_path`.
    pub async fn upload(
        &self,
        file_path: &Path,
        manifest_path: &Path,
        passphrase: &str,
        chunk_kb: u64,
    ) -> Result<UploadOutcome, DustError> {
        let config = ChunkerConfig::from_max_kb(chunk_kb)?;

        let file_hash = {
            let mut file = std::fs::File::open(file_path)?;
            self.checksum.file_hash(&mut file)?
        };

        let filename = file_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();

        let manifest = match self.manifest_repo.load(manifest_path).await {
            Ok(Some(manifest)) => manifest,
            Ok(None) => Manifest::new(filename),
            Err(DustError::ManifestCorrupt(msg)) => {
                tracing::warn!(
                    manifest = %manifest_path.display(),
                    error = %msg,
                    "existing manifest failed to parse, falling back to a new manifest"
                );
                Manifest::new(filename)
            }
            Err(e) => return Err(e),
        };
        let mut aggregate = ManifestAggregate::new(manifest);

        let salt = match self.salt_store.load(manifest_path).await? {
            Some(salt) => salt,
            None => {
                let salt = self.encryption.generate_salt();
                self.salt_store.save(manifest_path, &salt).await?;
                salt
            }
        };
        let key = Arc::new(self.encryption.derive_key(passphrase, &salt)?);

        let version_index = match aggregate.resume_decision(&file_hash) {
            ResumeDecision::AlreadySynced(version_number) => {
                return Ok(UploadOutcome {
                    version_number,
                    new_pool_entries: 0,
                    already_synced: true,
                })
            }
            ResumeDecision::ResumePending(version_number) => {
                aggregate
                    .manifest()
                    .versions
                    .iter()
                    .position(|v| v.version_number == version_number)
                    .expect("resume decision returned a version present in the manifest")
            }
            ResumeDecision::NewVersion => {
                let total_size = std::fs::metadata(file_path)?.len();
                aggregate.open_new_version(file_hash.clone(), total_size);
                aggregate.manifest().versions.len() - 1
            }
        };
        self.manifest_repo
            .save(manifest_path, aggregate.manifest())
            .await?;

        let mut to_upload = Vec::new();
        let mut position = 0usize;
        let mut window: Vec<u8> = Vec::new();
        let mut file = tokio::fs::File::open(file_path).await?;
        let max_size = config.max_size();
        let mut read_buf = vec![0u8; max_size];

        loop {
            while window.len() < max_size {
                let n = file.read(&mut read_buf).await?;
                if n == 0 {
                    break;
                }
                window.extend_from_slice(&read_buf[..n]);
            }
            if window.is_empty() {
                break;
            }

            let chunk_len = self.chunker.next_chunk_len(&window, &config);
            let plaintext: Vec<u8> = window.drain(..chunk_len).collect();
            let plain_hash = self.checksum.plain_hash(&plaintext);

            let already_resolved = aggregate
                .manifest()
                .versions
                .get(version_index)
                .and_then(|v| v.chunk_at(position))
                .cloned();

            match already_resolved {
                Some(ph) if aggregate.manifest().lookup_pool(&ph).is_some() => {
                    // Resume skip: already recorded and present in the pool.
                }
                _ if aggregate.manifest().lookup_pool(&plain_hash).is_some() => {
                    // Dedup skip: a prior chunk with identical plaintext exists.
                    aggregate.manifest_mut().versions[version_index]
                        .set_chunk_at(position, plain_hash);
                    self.manifest_repo
                        .save(manifest_path, aggregate.manifest())
                        .await?;
                }
                _ => {
                    to_upload.push(PendingUpload {
                        position,
                        plaintext,
                        plain_hash,
                    });
                }
            }

            position += 1;
        }

        let new_pool_entries = to_upload.len();
        let mut in_flight = FuturesUnordered::new();
        let mut pending = to_upload.into_iter();
        let mut first_error: Option<DustError> = None;

        for _ in 0..self.concurrency {
            if let Some(item) = pending.next() {
                in_flight.push(self.spawn_upload(item, key.clone()));
            }
        }

        while let Some(result) = in_flight.next().await {
            match result {
                Ok(uploaded) => {
                    aggregate
                        .manifest_mut()
                        .insert_pool_entry(uploaded.plain_hash.clone(), uploaded.entry)?;
                    aggregate.manifest_mut().versions[version_index]
                        .set_chunk_at(uploaded.position, uploaded.plain_hash);
                    self.manifest_repo
                        .save(manifest_path, aggregate.manifest())
                        .await?;
                }
                Err(e) => {
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
            if let Some(item) = pending.next() {
                in_flight.push(self.spawn_upload(item, key.clone()));
            }
        }

        if let Some(e) = first_error {
            return Err(e);
        }

        aggregate.manifest_mut().versions[version_index].mark_completed()?;
        self.manifest_repo
            .save(manifest_path, aggregate.manifest())
            .await?;

        Ok(UploadOutcome {
            version_number: aggregate.manifest().versions[version_index].version_number,
            new_pool_entries,
            already_synced: false,
        })
    }

    fn spawn_upload(
        &self,
        item: PendingUpload,
        key: Arc<dust_domain::services::encryption_service::DerivedKey>,
    ) -> impl std::future::Future<Output = Result<UploadedChunk, DustError>> {
        let encryption = self.encryption.clone();
        let checksum = self.checksum.clone();
        let remote = self.remote.clone();
        let policy = self.retry_policy;
        let warning_bytes = self.remote_size_warning_bytes;

        async move {
            let envelope = encryption.encrypt_chunk(&key, &item.plaintext)?;
            let envelope_bytes = envelope.to_bytes();
            if envelope_bytes.len() as u64 > warning_bytes {
                tracing::warn!(
                    position = item.position,
                    size = envelope_bytes.len(),
                    "encrypted chunk exceeds advisory remote size threshold"
                );
            }
            let cipher_hash = checksum.cipher_hash(&envelope_bytes);
            let plain_len = item.plaintext.len() as u64;

            let url = with_retry(policy, || remote.put(envelope_bytes.clone(), &[]))
                .await
                .map_err(|e| match e {
                    DustError::RemoteTransient(msg) => {
                        DustError::remote_fatal(format!("retry budget exhausted: {msg}"))
                    }
                    other => other,
                })?;

            Ok(UploadedChunk {
                position: item.position,
                plain_hash: item.plain_hash,
                entry: PoolEntry::new(cipher_hash, url, Some(plain_len)),
            })
        }
    }
}
