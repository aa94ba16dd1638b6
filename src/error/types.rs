//! Error types
//!
//! Defines the limiter's error kinds. Everything else the limiter reports is
//! a normal outcome: unknown users get fresh buckets, full buckets reject,
//! and snapshot misses return absence.

use std::fmt;

/// Rate limiter errors
#[derive(Debug, Clone, PartialEq)]
pub enum LimiterError {
    /// The (capacity, leak rate) policy is unusable; no limiter is built.
    InvalidPolicy(String),
    /// An admission call carried unusable arguments; no state was touched.
    InvalidArgument(String),
}

impl fmt::Display for LimiterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LimiterError::InvalidPolicy(msg) => write!(f, "Invalid policy: {}", msg),
            LimiterError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
        }
    }
}

impl std::error::Error for LimiterError {}
