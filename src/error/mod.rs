//! Error handling
//!
//! Defines error types and handling for the rate limiter.

pub mod handlers;
pub mod types;

pub use types::*;
