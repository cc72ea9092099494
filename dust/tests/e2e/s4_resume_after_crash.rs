//! S4: a crash mid-upload leaves a resumable manifest. Restarting with a
//! fresh (non-failing) store completes the sync without re-uploading or
//! duplicating any chunk.

use crate::support::{upload, FlakyStore};
use dust::{JsonManifestStore, LocalFsStore};
use dust_domain::repositories::ManifestRepository;
use dust_domain::value_objects::VersionStatus;
use dust_domain::RemoteStore;
use std::sync::Arc;
use tempfile::tempdir;

fn pseudo_random_bytes(len: usize, seed: u64) -> Vec<u8> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (state >> 33) as u8
        })
        .collect()
}

#[tokio::test]
async fn crash_after_three_puts_resumes_to_completion() {
    let dir = tempdir().unwrap();
    let remote_dir = dir.path().join("remote");
    let file = dir.path().join("payload.bin");
    let manifest = dir.path().join("payload.bin.sync.dust");

    std::fs::write(&file, pseudo_random_bytes(1024 * 1024, 0xC0FFEE)).unwrap();

    let flaky = Arc::new(FlakyStore::new(
        Arc::new(LocalFsStore::new(remote_dir.clone())),
        3,
    ));
    let first_run = upload(flaky.clone(), &file, &manifest, 64).await;
    assert!(first_run.is_err(), "the injected crash must surface as an error");
    assert_eq!(
        flaky.successes(),
        3,
        "exactly the pre-crash puts must have landed"
    );

    // The crashed manifest's `chunks` only ever grows to a contiguous
    // prefix of successfully recorded positions, so its length is just
    // `flaky.successes()` again, not the file's true chunk count. The
    // true count is only known once a run completes without a crash.
    let second_remote = Arc::new(FlakyStore::new(
        Arc::new(LocalFsStore::new(remote_dir)),
        usize::MAX,
    ));
    let second_remote_dyn: Arc<dyn RemoteStore> = second_remote.clone();
    let second_run = upload(second_remote_dyn, &file, &manifest, 64).await.unwrap();
    assert_eq!(second_run.version_number, 1);

    let manifest_after_resume = JsonManifestStore::new().load(&manifest).await.unwrap().unwrap();
    let version = &manifest_after_resume.versions[0];
    assert_eq!(version.status, VersionStatus::Completed);
    let total_chunks = version.chunks.len();
    assert!(version.chunks.iter().all(|c| c.is_some()));
    assert_eq!(
        manifest_after_resume.pool.len(),
        total_chunks,
        "no chunk should be uploaded twice across the two runs"
    );
    assert!(
        flaky.successes() < total_chunks,
        "the crash must interrupt the upload before every chunk lands"
    );
    assert_eq!(
        flaky.successes() + second_remote.successes(),
        total_chunks,
        "total remote puts across both runs must equal the total chunk count"
    );
}
