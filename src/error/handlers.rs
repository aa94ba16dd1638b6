//! Error handlers
//!
//! Provides error logging and status-code mapping for embedding services.

use crate::error::types::LimiterError;
use log::error;

/// HTTP-style status an embedding reports upstream when a request is
/// rejected by the limiter. Rejection is a normal outcome, not a
/// [`LimiterError`], so it has no entry in [`error_to_status_code`].
pub const REJECTED_STATUS_CODE: u16 = 429;

/// Handle a limiter error
pub fn handle_error(err: &LimiterError) {
    error!("Rate limiter error: {}", err);
}

/// Convert an error to an HTTP-style status code
pub fn error_to_status_code(err: &LimiterError) -> u16 {
    match err {
        LimiterError::InvalidPolicy(_) => 500,
        LimiterError::InvalidArgument(_) => 400,
    }
}
