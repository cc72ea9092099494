//! S3: prepending bytes shifts every absolute offset downstream, yet
//! content-defined chunking still reuses almost every chunk — the whole
//! point of gear-hash boundaries over fixed-size slicing.

use crate::support::upload;
use dust::LocalFsStore;
use dust_domain::RemoteStore;
use std::sync::Arc;
use tempfile::tempdir;

#[tokio::test]
async fn prepending_bytes_reuses_almost_every_chunk() {
    let dir = tempdir().unwrap();
    let remote: Arc<dyn RemoteStore> = Arc::new(LocalFsStore::new(dir.path().join("remote")));

    let file = dir.path().join("log.bin");
    let manifest = dir.path().join("log.bin.sync.dust");

    let mut v1_body = vec![0x41u8; 10 * 1024];
    v1_body.extend_from_slice(b"\n[TAIL]\n");
    std::fs::write(&file, &v1_body).unwrap();
    upload(remote.clone(), &file, &manifest, 4).await.unwrap();

    let mut v2_body = vec![0x42u8; 512];
    v2_body.extend_from_slice(&v1_body);
    std::fs::write(&file, &v2_body).unwrap();
    let v2 = upload(remote.clone(), &file, &manifest, 4).await.unwrap();

    assert_eq!(v2.version_number, 2);
    assert!(
        v2.new_pool_entries <= 2,
        "a prepend should only disturb the boundary chunk(s), got {} new entries",
        v2.new_pool_entries
    );
}
