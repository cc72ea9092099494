//! S2: appending a short tail to a 10 KB file adds at most one new pool
//! entry — content-defined chunking reuses every unmodified chunk.

use crate::support::upload;
use dust::{JsonManifestStore, LocalFsStore};
use dust_domain::repositories::ManifestRepository;
use dust_domain::RemoteStore;
use std::sync::Arc;
use tempfile::tempdir;

#[tokio::test]
async fn appending_a_tail_reuses_prior_chunks() {
    let dir = tempdir().unwrap();
    let remote: Arc<dyn RemoteStore> = Arc::new(LocalFsStore::new(dir.path().join("remote")));

    let file = dir.path().join("log.bin");
    let manifest = dir.path().join("log.bin.sync.dust");

    let v1_body = vec![0x41u8; 10 * 1024];
    std::fs::write(&file, &v1_body).unwrap();
    let v1 = upload(remote.clone(), &file, &manifest, 4).await.unwrap();
    assert_eq!(v1.version_number, 1);
    let v1_pool_entries = v1.new_pool_entries;

    let mut v2_body = v1_body.clone();
    v2_body.extend_from_slice(b"\n[TAIL]\n");
    std::fs::write(&file, &v2_body).unwrap();
    let v2 = upload(remote.clone(), &file, &manifest, 4).await.unwrap();
    assert_eq!(v2.version_number, 2);
    assert!(
        v2.new_pool_entries <= 1,
        "appending a tail should only ever touch the final chunk, got {} new entries",
        v2.new_pool_entries
    );

    let manifest_doc = JsonManifestStore::new().load(&manifest).await.unwrap().unwrap();
    let pool_size = manifest_doc.pool.len();
    assert_eq!(pool_size, v1_pool_entries + v2.new_pool_entries);
}
