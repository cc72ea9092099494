// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Retry combinator layered over `RemoteStore` operations (§4.5, §4.6):
//! bounded attempts with a jittered linear backoff. Only `RemoteTransient`
//! failures are retried; anything else propagates immediately.

use dust_domain::DustError;
use rand::Rng;
use std::future::Future;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub base_delay_ms: u64,
    pub jitter_ms: u64,
}

impl RetryPolicy {
    pub fn new(attempts: u32, base_delay_ms: u64, jitter_ms: u64) -> Self {
        Self {
            attempts: attempts.max(1),
            base_delay_ms,
            jitter_ms,
        }
    }

    fn delay_for(&self, attempt: u32) -> Duration {
        let jitter = if self.jitter_ms == 0 {
            0
        } else {
            rand::rng().random_range(0..=self.jitter_ms)
        };
        Duration::from_millis(self.base_delay_ms.saturating_mul(attempt as u64) + jitter)
    }
}

/// Runs `op` up to `policy.attempts` times. Retries only on
/// `DustError::RemoteTransient`; any other error, or exhausting the
/// budget, is returned as-is to the caller (the last transient error is
/// surfaced unchanged — callers that want a hard failure remap it to
/// `RemoteFatal` themselves, since only they know the operation name).
pub async fn with_retry<T, F, Fut>(policy: RetryPolicy, mut op: F) -> Result<T, DustError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DustError>>,
{
    let mut last_err = None;
    for attempt in 1..=policy.attempts {
        match op().await {
            Ok(value) => return Ok(value),
            Err(DustError::RemoteTransient(msg)) => {
                last_err = Some(DustError::RemoteTransient(msg));
                if attempt < policy.attempts {
                    tokio::time::sleep(policy.delay_for(attempt)).await;
                }
            }
            Err(other) => return Err(other),
        }
    }
    Err(last_err.unwrap_or_else(|| DustError::internal_error("retry loop exited without a result")))
}
