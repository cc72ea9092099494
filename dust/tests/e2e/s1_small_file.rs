//! S1: an 11-byte file round-trips through upload/restore as a single
//! chunk, single-version manifest.

use crate::support::{restore, upload};
use dust::{JsonManifestStore, LocalFsStore, RestoreMode};
use dust_domain::repositories::ManifestRepository;
use dust_domain::RemoteStore;
use std::sync::Arc;
use tempfile::tempdir;

#[tokio::test]
async fn small_file_round_trips_as_one_chunk() {
    let dir = tempdir().unwrap();
    let remote: Arc<dyn RemoteStore> = Arc::new(LocalFsStore::new(dir.path().join("remote")));

    let file = dir.path().join("greeting.txt");
    std::fs::write(&file, b"hello world").unwrap();
    let manifest = dir.path().join("greeting.txt.sync.dust");

    let outcome = upload(remote.clone(), &file, &manifest, 1).await.unwrap();
    assert_eq!(outcome.version_number, 1);
    assert!(!outcome.already_synced);

    let manifest_doc = JsonManifestStore::new()
        .load(&manifest)
        .await
        .unwrap()
        .expect("manifest must exist after upload");
    assert_eq!(manifest_doc.versions.len(), 1);
    assert_eq!(manifest_doc.versions[0].chunks.len(), 1);

    let output = restore(remote, &manifest, None, RestoreMode::ParallelGather)
        .await
        .unwrap();
    let restored = std::fs::read(&output).unwrap();
    assert_eq!(restored, b"hello world");
}
