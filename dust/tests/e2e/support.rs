//! Shared scaffolding for the S1-S6 end-to-end scenarios.

use async_trait::async_trait;
use dust::{
    GearHashChunker, JsonManifestStore, Reconstructor, RestoreMode, RetryPolicy,
    SaltSidecarStore, ScryptAesGcmEnvelope, Sha256Md5Checksums, UploadOutcome, Uploader,
};
use dust_domain::{DustError, RemoteStore};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const PASSPHRASE: &str = "correct horse battery staple";

/// No-retry, no-jitter policy: scenario failures should surface
/// immediately rather than be masked by backoff.
pub fn no_retry_policy() -> RetryPolicy {
    RetryPolicy::new(1, 0, 0)
}

pub fn uploader_with(remote: Arc<dyn RemoteStore>, concurrency: usize) -> Uploader {
    Uploader {
        chunker: Arc::new(GearHashChunker::new()),
        checksum: Arc::new(Sha256Md5Checksums::new()),
        encryption: Arc::new(ScryptAesGcmEnvelope::new()),
        remote,
        manifest_repo: Arc::new(JsonManifestStore::new()),
        salt_store: Arc::new(SaltSidecarStore::new()),
        retry_policy: no_retry_policy(),
        concurrency,
        remote_size_warning_bytes: 100 * 1024,
    }
}

pub fn reconstructor_with(remote: Arc<dyn RemoteStore>, concurrency: usize) -> Reconstructor {
    Reconstructor {
        checksum: Arc::new(Sha256Md5Checksums::new()),
        encryption: Arc::new(ScryptAesGcmEnvelope::new()),
        remote,
        manifest_repo: Arc::new(JsonManifestStore::new()),
        salt_store: Arc::new(SaltSidecarStore::new()),
        retry_policy: no_retry_policy(),
        concurrency,
    }
}

pub async fn upload(
    remote: Arc<dyn RemoteStore>,
    file: &Path,
    manifest: &Path,
    chunk_kb: u64,
) -> Result<UploadOutcome, DustError> {
    uploader_with(remote, 3)
        .upload(file, manifest, PASSPHRASE, chunk_kb)
        .await
}

pub async fn restore(
    remote: Arc<dyn RemoteStore>,
    manifest: &Path,
    version: Option<u32>,
    mode: RestoreMode,
) -> Result<PathBuf, DustError> {
    reconstructor_with(remote, 5)
        .restore(manifest, version, PASSPHRASE, mode)
        .await
        .map(|outcome| outcome.output_path)
}

/// Wraps a `RemoteStore`, failing every `put` after `fail_after`
/// successes have gone through, simulating a process crash mid-upload
/// (S4). Counts total successful puts for cross-run assertions.
pub struct FlakyStore {
    inner: Arc<dyn RemoteStore>,
    fail_after: usize,
    successes: AtomicUsize,
}

impl FlakyStore {
    pub fn new(inner: Arc<dyn RemoteStore>, fail_after: usize) -> Self {
        Self {
            inner,
            fail_after,
            successes: AtomicUsize::new(0),
        }
    }

    pub fn successes(&self) -> usize {
        self.successes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteStore for FlakyStore {
    async fn put(&self, blob: Vec<u8>, tags: &[(String, String)]) -> Result<String, DustError> {
        if self.successes.load(Ordering::SeqCst) >= self.fail_after {
            return Err(DustError::remote_fatal("injected crash after fail_after puts"));
        }
        let url = self.inner.put(blob, tags).await?;
        self.successes.fetch_add(1, Ordering::SeqCst);
        Ok(url)
    }

    async fn get(&self, url: &str) -> Result<Vec<u8>, DustError> {
        self.inner.get(url).await
    }
}

/// Wraps a `RemoteStore`, flipping the last byte of whatever blob is
/// returned for one specific URL (S5: simulates a tampered ciphertext
/// for a single chunk).
pub struct TamperingStore {
    inner: Arc<dyn RemoteStore>,
    target_url: std::sync::Mutex<Option<String>>,
}

impl TamperingStore {
    pub fn new(inner: Arc<dyn RemoteStore>) -> Self {
        Self {
            inner,
            target_url: std::sync::Mutex::new(None),
        }
    }

    /// Tampers with the next URL this store is asked to `get`, or the
    /// given URL if already known.
    pub fn tamper(&self, url: impl Into<String>) {
        *self.target_url.lock().expect("lock poisoned") = Some(url.into());
    }
}

#[async_trait]
impl RemoteStore for TamperingStore {
    async fn put(&self, blob: Vec<u8>, tags: &[(String, String)]) -> Result<String, DustError> {
        self.inner.put(blob, tags).await
    }

    async fn get(&self, url: &str) -> Result<Vec<u8>, DustError> {
        let mut blob = self.inner.get(url).await?;
        let is_target = self
            .target_url
            .lock()
            .expect("lock poisoned")
            .as_deref()
            .map(|t| t == url)
            .unwrap_or(false);
        if is_target {
            if let Some(last) = blob.last_mut() {
                *last ^= 0xFF;
            }
        }
        Ok(blob)
    }
}
