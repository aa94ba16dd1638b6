pub mod config;
pub mod error;
pub mod limiter;
pub mod shared;

pub use limiter::{AdmissionDecision, BucketSnapshot, PolicyInfo, RateLimiter};
pub use shared::SharedRateLimiter;
