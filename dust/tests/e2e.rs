//! End-to-end scenario tests covering the S1-S7 backup/restore scenarios.
//!
//! Each scenario drives the real `Uploader`/`Reconstructor` use cases
//! against the concrete adapters (gear-hash chunker, scrypt/AES-GCM
//! envelope, local-filesystem remote store, JSON manifest store) under a
//! `tempfile::TempDir`.

#[path = "e2e/support.rs"]
mod support;

#[path = "e2e/s1_small_file.rs"]
mod s1_small_file;

#[path = "e2e/s2_append_dedup.rs"]
mod s2_append_dedup;

#[path = "e2e/s3_prepend_dedup.rs"]
mod s3_prepend_dedup;

#[path = "e2e/s4_resume_after_crash.rs"]
mod s4_resume_after_crash;

#[path = "e2e/s5_tamper_detection.rs"]
mod s5_tamper_detection;

#[path = "e2e/s6_version_rollback.rs"]
mod s6_version_rollback;

#[path = "e2e/s7_corrupt_manifest_fallback.rs"]
mod s7_corrupt_manifest_fallback;
