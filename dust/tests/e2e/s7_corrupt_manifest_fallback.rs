//! §7: a manifest document that fails to parse must not abort the
//! upload. The uploader falls back to a fresh manifest, with a warning,
//! and proceeds to sync as if this were the first version.

use crate::support::upload;
use dust::{JsonManifestStore, LocalFsStore};
use dust_domain::repositories::ManifestRepository;
use dust_domain::RemoteStore;
use std::sync::Arc;
use tempfile::tempdir;

#[tokio::test]
async fn corrupt_manifest_falls_back_to_a_new_one() {
    let dir = tempdir().unwrap();
    let remote: Arc<dyn RemoteStore> = Arc::new(LocalFsStore::new(dir.path().join("remote")));

    let file = dir.path().join("notes.txt");
    let manifest = dir.path().join("notes.txt.sync.dust");
    std::fs::write(&file, b"fresh content after a corrupt manifest").unwrap();
    std::fs::write(&manifest, b"{ not valid json at all").unwrap();

    let outcome = upload(remote, &file, &manifest, 4).await.unwrap();
    assert_eq!(outcome.version_number, 1);
    assert!(!outcome.already_synced);

    let manifest_doc = JsonManifestStore::new()
        .load(&manifest)
        .await
        .unwrap()
        .expect("a fresh manifest must have been written");
    assert_eq!(manifest_doc.versions.len(), 1);
    assert!(manifest_doc.versions[0].is_completed());
}
