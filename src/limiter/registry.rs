//! Limiter registry
//!
//! Owns the per-user bucket mapping and orchestrates admission: look up or
//! create the caller's bucket, drain it to the request timestamp, then
//! attempt the fill.

use std::collections::HashMap;

use log::debug;

use crate::error::LimiterError;
use crate::limiter::bucket::BucketState;
use crate::limiter::results::{AdmissionDecision, BucketSnapshot, PolicyInfo};

/// Request size assumed by [`RateLimiter::admit`].
pub const DEFAULT_REQUEST_SIZE: f64 = 1.0;

/// Per-user leaky-bucket rate limiter.
///
/// Functionally immutable: every admission produces a new limiter snapshot
/// with one bucket replaced, leaving the original untouched. Callers sharing
/// one limiter across tasks wrap it in
/// [`SharedRateLimiter`](crate::shared::SharedRateLimiter) instead of
/// threading snapshots by hand.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    capacity: f64,
    leak_rate: f64,
    buckets: HashMap<String, BucketState>,
}

impl RateLimiter {
    /// Creates a limiter with an empty bucket mapping.
    ///
    /// Fails with [`LimiterError::InvalidPolicy`] when `capacity` is not
    /// positive or `leak_rate` is negative. A zero leak rate is legal:
    /// buckets fill but never drain, so a full bucket blocks its user until
    /// the limiter is rebuilt with a different policy.
    pub fn new(capacity: f64, leak_rate: f64) -> Result<Self, LimiterError> {
        if capacity <= 0.0 {
            return Err(LimiterError::InvalidPolicy(format!(
                "capacity must be positive, got {}",
                capacity
            )));
        }
        if leak_rate < 0.0 {
            return Err(LimiterError::InvalidPolicy(format!(
                "leak rate cannot be negative, got {}",
                leak_rate
            )));
        }

        Ok(Self {
            capacity,
            leak_rate,
            buckets: HashMap::new(),
        })
    }

    /// Admits or rejects a request of the default size (1.0 units).
    pub fn admit(&self, user_id: &str, timestamp: f64) -> Result<AdmissionDecision, LimiterError> {
        self.admit_sized(user_id, timestamp, DEFAULT_REQUEST_SIZE)
    }

    /// Admits or rejects a request of `request_size` units for `user_id` at
    /// the given logical timestamp.
    ///
    /// The first request from an unseen user creates its bucket, anchored at
    /// `timestamp`. The returned limiter always carries the post-drain
    /// bucket, whether or not the request was admitted: drain effects persist
    /// even on rejection.
    pub fn admit_sized(
        &self,
        user_id: &str,
        timestamp: f64,
        request_size: f64,
    ) -> Result<AdmissionDecision, LimiterError> {
        if user_id.trim().is_empty() {
            return Err(LimiterError::InvalidArgument(
                "user ID cannot be empty".into(),
            ));
        }
        if request_size <= 0.0 {
            return Err(LimiterError::InvalidArgument(format!(
                "request size must be positive, got {}",
                request_size
            )));
        }

        let mut buckets = self.buckets.clone();
        let bucket = buckets
            .entry(user_id.to_string())
            .or_insert_with(|| BucketState::new(self.capacity, self.leak_rate, timestamp));

        bucket.drain(timestamp);
        let admitted = bucket.try_admit(request_size);

        debug!(
            "User '{}' at t={}: size {} {} (level {:.2}/{:.2})",
            user_id,
            timestamp,
            request_size,
            if admitted { "admitted" } else { "rejected" },
            bucket.current_level(),
            self.capacity
        );

        Ok(AdmissionDecision {
            admitted,
            limiter: Self {
                capacity: self.capacity,
                leak_rate: self.leak_rate,
                buckets,
            },
        })
    }

    /// Returns a read-only view of `user_id`'s bucket, or `None` when the
    /// user id is blank or no request has been seen for it yet. Absence is a
    /// normal outcome, never an error.
    pub fn bucket_snapshot(&self, user_id: &str) -> Option<BucketSnapshot> {
        if user_id.trim().is_empty() {
            return None;
        }

        self.buckets.get(user_id).map(|bucket| BucketSnapshot {
            user_id: user_id.to_string(),
            current_level: bucket.current_level(),
            capacity: bucket.capacity(),
            leak_rate: bucket.leak_rate(),
            last_update_time: bucket.last_update_time(),
        })
    }

    /// Returns snapshots for every user with a bucket.
    pub fn all_snapshots(&self) -> HashMap<String, BucketSnapshot> {
        self.buckets
            .keys()
            .filter_map(|user_id| {
                self.bucket_snapshot(user_id)
                    .map(|snapshot| (user_id.clone(), snapshot))
            })
            .collect()
    }

    /// Returns the limiter's policy and current user count.
    pub fn policy(&self) -> PolicyInfo {
        PolicyInfo {
            capacity: self.capacity,
            leak_rate: self.leak_rate,
            user_count: self.buckets.len(),
        }
    }

    // --------------------
    // Getter methods
    // --------------------

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    pub fn leak_rate(&self) -> f64 {
        self.leak_rate
    }

    /// Number of users that have sent at least one request.
    pub fn user_count(&self) -> usize {
        self.buckets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_invalid_policies() {
        assert!(matches!(
            RateLimiter::new(0.0, 1.0),
            Err(LimiterError::InvalidPolicy(_))
        ));
        assert!(matches!(
            RateLimiter::new(-1.0, 1.0),
            Err(LimiterError::InvalidPolicy(_))
        ));
        assert!(matches!(
            RateLimiter::new(5.0, -1.0),
            Err(LimiterError::InvalidPolicy(_))
        ));
    }

    #[test]
    fn test_admit_rejects_invalid_arguments() {
        let limiter = RateLimiter::new(5.0, 1.0).unwrap();
        assert!(matches!(
            limiter.admit("", 0.0),
            Err(LimiterError::InvalidArgument(_))
        ));
        assert!(matches!(
            limiter.admit("   ", 0.0),
            Err(LimiterError::InvalidArgument(_))
        ));
        assert!(matches!(
            limiter.admit_sized("user1", 0.0, 0.0),
            Err(LimiterError::InvalidArgument(_))
        ));
        assert!(matches!(
            limiter.admit_sized("user1", 0.0, -1.0),
            Err(LimiterError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_admit_never_mutates_receiver() {
        let limiter = RateLimiter::new(5.0, 1.0).unwrap();
        let decision = limiter.admit("user1", 0.0).unwrap();
        assert!(decision.admitted);

        // The original limiter still has no bucket for user1.
        assert!(limiter.bucket_snapshot("user1").is_none());
        assert_eq!(limiter.user_count(), 0);
        assert_eq!(decision.limiter.user_count(), 1);
    }

    #[test]
    fn test_first_request_creates_bucket_even_when_rejected() {
        let limiter = RateLimiter::new(5.0, 1.0).unwrap();
        let decision = limiter.admit_sized("user1", 7.0, 10.0).unwrap();
        assert!(!decision.admitted);

        let snapshot = decision.limiter.bucket_snapshot("user1").unwrap();
        assert_eq!(snapshot.current_level, 0.0);
        assert_eq!(snapshot.last_update_time, 7.0);
    }

    #[test]
    fn test_policy_reports_user_count() {
        let limiter = RateLimiter::new(10.0, 2.0).unwrap();
        let info = limiter.policy();
        assert_eq!(info.capacity, 10.0);
        assert_eq!(info.leak_rate, 2.0);
        assert_eq!(info.user_count, 0);

        let decision = limiter.admit("user1", 0.0).unwrap();
        assert_eq!(decision.limiter.policy().user_count, 1);
    }
}
