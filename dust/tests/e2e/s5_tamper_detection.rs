//! S5: a single flipped byte in one chunk's ciphertext must fail AEAD
//! authentication during restore, and the restore must not produce an
//! output file.

use crate::support::{restore, upload, TamperingStore};
use dust::{JsonManifestStore, LocalFsStore, RestoreMode};
use dust_domain::repositories::ManifestRepository;
use dust_domain::{DustError, RemoteStore};
use std::sync::Arc;
use tempfile::tempdir;

#[tokio::test]
async fn tampered_chunk_aborts_restore_with_auth_failure() {
    let dir = tempdir().unwrap();
    let remote_dir = dir.path().join("remote");
    let file = dir.path().join("secret.bin");
    let manifest = dir.path().join("secret.bin.sync.dust");

    std::fs::write(&file, vec![0x7Au8; 64 * 1024]).unwrap();

    let plain_remote: Arc<dyn RemoteStore> = Arc::new(LocalFsStore::new(remote_dir.clone()));
    upload(plain_remote, &file, &manifest, 16).await.unwrap();

    let manifest_doc = JsonManifestStore::new().load(&manifest).await.unwrap().unwrap();
    let (_, entry) = manifest_doc.pool.iter().next().expect("at least one chunk");
    let target_url = entry.url.clone();

    let tampering = Arc::new(TamperingStore::new(Arc::new(LocalFsStore::new(remote_dir))));
    tampering.tamper(target_url);

    let output_path = dir.path().join("restored_secret.bin");
    let result = restore(tampering, &manifest, None, RestoreMode::ParallelGather).await;

    assert!(matches!(result, Err(DustError::AuthFailure(_))));
    assert!(
        !output_path.exists(),
        "a failed restore must not leave a final output file behind"
    );
}
