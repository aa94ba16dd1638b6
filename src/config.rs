//! Configuration management for the rate limiter
//!
//! Loads the admission policy from config.toml with environment overrides.
//! Validation mirrors the limiter's own policy rules so a bad file fails at
//! load time rather than at first admission.

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::LimiterError;
use crate::limiter::RateLimiter;

/// Admission policy configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PolicyConfig {
    /// Maximum accumulated level per user bucket
    pub capacity: f64,

    /// Units drained per unit of logical time
    pub leak_rate: f64,

    /// Request size assumed when the caller does not specify one
    /// Environment: RAX_LIMITER_DEFAULT_REQUEST_SIZE
    pub default_request_size: f64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            capacity: 5.0,
            leak_rate: 1.0,
            default_request_size: 1.0,
        }
    }
}

impl PolicyConfig {
    /// Load configuration from config.toml with environment overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        // Try production path first, then development path
        let config_paths = vec![
            "rax-rate-limiter/config", // container layout: /app/rax-rate-limiter/config.toml
            "config",                  // local development: ./config.toml
        ];

        let mut last_error = None;

        for config_path in &config_paths {
            match Config::builder()
                .add_source(File::with_name(config_path))
                .add_source(Environment::with_prefix("RAX_LIMITER"))
                .build()
            {
                Ok(settings) => {
                    let policy: PolicyConfig = settings.try_deserialize()?;
                    policy.validate()?;
                    return Ok(policy);
                }
                Err(e) => {
                    last_error = Some(e);
                    continue;
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            config::ConfigError::Message("no configuration source available".into())
        }))
    }

    /// Validation for all policy values
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.capacity <= 0.0 {
            return Err(config::ConfigError::Message(
                "capacity must be positive".into(),
            ));
        }

        if self.leak_rate < 0.0 {
            return Err(config::ConfigError::Message(
                "leak_rate cannot be negative".into(),
            ));
        }

        if self.default_request_size <= 0.0 {
            return Err(config::ConfigError::Message(
                "default_request_size must be positive".into(),
            ));
        }

        Ok(())
    }

    /// Build a limiter enforcing this policy
    pub fn build_limiter(&self) -> Result<RateLimiter, LimiterError> {
        RateLimiter::new(self.capacity, self.leak_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_valid() {
        let policy = PolicyConfig::default();
        assert!(policy.validate().is_ok());
        assert!(policy.build_limiter().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut policy = PolicyConfig::default();
        policy.capacity = 0.0;
        assert!(policy.validate().is_err());

        let mut policy = PolicyConfig::default();
        policy.leak_rate = -1.0;
        assert!(policy.validate().is_err());

        let mut policy = PolicyConfig::default();
        policy.default_request_size = 0.0;
        assert!(policy.validate().is_err());
    }
}
