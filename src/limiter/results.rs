//! Result types for limiter operations
//!
//! Defines the value types returned by admission and snapshot operations.

use crate::limiter::registry::RateLimiter;

/// Outcome of an admission attempt.
///
/// Carries the resulting limiter alongside the decision: the limiter passed
/// to `admit` is never mutated, so callers thread this value through
/// subsequent calls.
#[derive(Debug, Clone)]
pub struct AdmissionDecision {
    pub admitted: bool,
    pub limiter: RateLimiter,
}

/// Read-only view of a single user's bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketSnapshot {
    pub user_id: String,
    pub current_level: f64,
    pub capacity: f64,
    pub leak_rate: f64,
    pub last_update_time: f64,
}

/// Policy and occupancy summary for a limiter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolicyInfo {
    pub capacity: f64,
    pub leak_rate: f64,
    pub user_count: usize,
}
