//! Leaky bucket state
//!
//! Per-user bucket arithmetic: continuous drain against logical time and
//! capacity-bounded fill attempts.

/// State of a single user's leaky bucket.
///
/// The level rises by the request size on every admitted request and drains
/// continuously at `leak_rate` units per unit of logical time. Timestamps are
/// caller-supplied logical values; the bucket never reads a clock.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketState {
    capacity: f64,
    leak_rate: f64,
    current_level: f64,
    last_update_time: f64,
}

impl BucketState {
    /// Creates an empty bucket anchored at the given logical timestamp.
    pub fn new(capacity: f64, leak_rate: f64, timestamp: f64) -> Self {
        Self {
            capacity,
            leak_rate,
            current_level: 0.0,
            last_update_time: timestamp,
        }
    }

    /// Drains the bucket up to `now`.
    ///
    /// A timestamp earlier than the last update is a no-op: out-of-order
    /// requests must never gain extra capacity, so neither the level nor the
    /// update time moves backwards.
    pub fn drain(&mut self, now: f64) {
        if now < self.last_update_time {
            return;
        }

        let elapsed = now - self.last_update_time;
        let leaked = elapsed * self.leak_rate;
        self.current_level = (self.current_level - leaked).max(0.0);
        self.last_update_time = now;
    }

    /// Attempts to add `request_size` units to the bucket.
    ///
    /// Returns `false` and leaves the level untouched when the request would
    /// overflow capacity. Filling the bucket to exactly its capacity is
    /// admitted.
    pub fn try_admit(&mut self, request_size: f64) -> bool {
        if self.current_level + request_size > self.capacity {
            return false;
        }
        self.current_level += request_size;
        true
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

    /// Returns the accumulated level as of the last drain.
    pub fn current_level(&self) -> f64 {
        self.current_level
    }

    /// Returns the logical timestamp of the last drain.
    pub fn last_update_time(&self) -> f64 {
        self.last_update_time
    }
}
