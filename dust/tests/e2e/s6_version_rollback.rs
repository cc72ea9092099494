//! S6: after syncing two versions, restoring version 1 explicitly must
//! reproduce the original (not the current) source bytes.

use crate::support::{restore, upload};
use dust::{LocalFsStore, RestoreMode};
use dust_domain::RemoteStore;
use std::sync::Arc;
use tempfile::tempdir;

#[tokio::test]
async fn restoring_an_old_version_ignores_later_edits() {
    let dir = tempdir().unwrap();
    let remote: Arc<dyn RemoteStore> = Arc::new(LocalFsStore::new(dir.path().join("remote")));

    let file = dir.path().join("notes.txt");
    let manifest = dir.path().join("notes.txt.sync.dust");

    std::fs::write(&file, b"version one content").unwrap();
    upload(remote.clone(), &file, &manifest, 4).await.unwrap();

    std::fs::write(&file, b"version two has completely different content").unwrap();
    upload(remote.clone(), &file, &manifest, 4).await.unwrap();

    let v1_output = restore(remote, &manifest, Some(1), RestoreMode::ParallelGather)
        .await
        .unwrap();
    let restored = std::fs::read(&v1_output).unwrap();
    assert_eq!(restored, b"version one content");
}
