//! Shared limiter handle
//!
//! Wraps the functional limiter for concurrent embeddings. Two tasks that
//! interleave admissions for the same user must not both read the same
//! starting bucket level, so the whole read-compute-publish sequence runs
//! under one lock.

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, warn};
use tokio::sync::Mutex;

use crate::config::PolicyConfig;
use crate::error::LimiterError;
use crate::limiter::{BucketSnapshot, DEFAULT_REQUEST_SIZE, PolicyInfo, RateLimiter};

/// Thread-safe handle around a [`RateLimiter`].
///
/// Cloning the handle shares the underlying limiter. Each admission locks,
/// runs the pure admission, and publishes the resulting snapshot before
/// releasing the lock.
#[derive(Clone)]
pub struct SharedRateLimiter {
    inner: Arc<Mutex<RateLimiter>>,
    default_request_size: f64,
}

impl SharedRateLimiter {
    pub fn new(limiter: RateLimiter) -> Self {
        Self {
            inner: Arc::new(Mutex::new(limiter)),
            default_request_size: DEFAULT_REQUEST_SIZE,
        }
    }

    /// Build a shared limiter from a loaded policy.
    pub fn from_config(policy: &PolicyConfig) -> Result<Self, LimiterError> {
        if policy.default_request_size <= 0.0 {
            return Err(LimiterError::InvalidPolicy(format!(
                "default request size must be positive, got {}",
                policy.default_request_size
            )));
        }

        Ok(Self {
            inner: Arc::new(Mutex::new(policy.build_limiter()?)),
            default_request_size: policy.default_request_size,
        })
    }

    /// Admits or rejects a request of the configured default size.
    pub async fn admit(&self, user_id: &str, timestamp: f64) -> Result<bool, LimiterError> {
        self.admit_sized(user_id, timestamp, self.default_request_size)
            .await
    }

    /// Admits or rejects a request, serializing against concurrent callers.
    pub async fn admit_sized(
        &self,
        user_id: &str,
        timestamp: f64,
        request_size: f64,
    ) -> Result<bool, LimiterError> {
        let mut limiter = self.inner.lock().await;
        let decision = limiter.admit_sized(user_id, timestamp, request_size)?;
        *limiter = decision.limiter;

        if decision.admitted {
            debug!("Request admitted for user: {}", user_id);
        } else {
            warn!("Request rejected for user: {}", user_id);
        }

        Ok(decision.admitted)
    }

    /// Snapshot of one user's bucket, if any.
    pub async fn bucket_snapshot(&self, user_id: &str) -> Option<BucketSnapshot> {
        self.inner.lock().await.bucket_snapshot(user_id)
    }

    /// Snapshots for every known user.
    pub async fn all_snapshots(&self) -> HashMap<String, BucketSnapshot> {
        self.inner.lock().await.all_snapshots()
    }

    /// Current policy and user count.
    pub async fn policy(&self) -> PolicyInfo {
        self.inner.lock().await.policy()
    }
}
