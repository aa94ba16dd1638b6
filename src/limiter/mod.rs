//! Rate limiting module
//!
//! Implements per-user leaky-bucket admission control: each user's requests
//! fill an accumulator that drains continuously against caller-supplied
//! logical timestamps.

pub mod bucket;
pub mod registry;
pub mod results;

// Re-export public types and functions
pub use bucket::BucketState;
pub use registry::{DEFAULT_REQUEST_SIZE, RateLimiter};
pub use results::{AdmissionDecision, BucketSnapshot, PolicyInfo};
