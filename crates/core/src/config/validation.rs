//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use std::collections::HashSet;

use crate::config::{AppConfig, SHORT_LIVED_RENEWAL_INTERVAL};
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },

    #[error("missing required configuration: {field} ({hint})")]
    Missing { field: String, hint: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if no provider is configured, and
    /// `ConfigError::Invalid` if:
    /// - a provider name is empty or listed twice
    /// - `renewal_interval_secs` is less than one minute
    /// - either cache TTL is 0
    /// - `shutdown_timeout_ms` exceeds 5 minutes
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.providers.is_empty() {
            return Err(ConfigError::Missing {
                field: "providers".into(),
                hint: "Set CLOUDINFO_PROVIDERS environment variable, e.g. [amazon]".into(),
            });
        }

        let mut seen = HashSet::new();
        for provider in &self.providers {
            if provider.trim().is_empty() {
                return Err(ConfigError::Invalid { field: "providers".into(), reason: "names must not be empty".into() });
            }
            if !seen.insert(provider.as_str()) {
                return Err(ConfigError::Invalid {
                    field: "providers".into(),
                    reason: format!("duplicate provider: {provider}"),
                });
            }
        }

        if self.renewal_interval_secs < 60 {
            return Err(ConfigError::Invalid {
                field: "renewal_interval_secs".into(),
                reason: "must be at least 60 seconds".into(),
            });
        }

        if self.cache_long_ttl_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "cache_long_ttl_secs".into(),
                reason: "must be greater than 0".into(),
            });
        }
        if self.cache_short_ttl_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "cache_short_ttl_secs".into(),
                reason: "must be greater than 0".into(),
            });
        }

        if self.shutdown_timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "shutdown_timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.cache_long_ttl() < self.renewal_interval() {
            tracing::warn!(
                cache_long_ttl_secs = self.cache_long_ttl_secs,
                renewal_interval_secs = self.renewal_interval_secs,
                "Long-lived cache TTL is shorter than the renewal interval; \
                 metadata will expire between refreshes"
            );
        }
        if self.cache_short_ttl() < SHORT_LIVED_RENEWAL_INTERVAL {
            tracing::warn!(
                cache_short_ttl_secs = self.cache_short_ttl_secs,
                "Short-lived cache TTL is shorter than the price refresh interval; \
                 prices will expire between refreshes"
            );
        }

        Ok(())
    }
}
