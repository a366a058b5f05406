//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
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

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid { field: field.into(), reason: reason.into() }
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `max_bytes` is 0 or exceeds 50MB
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `user_agent` is empty
    /// - `origin` is not an http(s) URL
    /// - a precache entry, `offline_fallback` or `static_prefix` is not an absolute path
    /// - a cache prefix or version is empty
    /// - a reveal interval is 0 or exceeds one second
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_bytes == 0 {
            return Err(invalid("max_bytes", "must be greater than 0"));
        }
        if self.max_bytes > 50 * 1024 * 1024 {
            return Err(invalid("max_bytes", "must not exceed 50MB"));
        }

        if self.timeout_ms < 100 {
            return Err(invalid("timeout_ms", "must be at least 100ms"));
        }
        if self.timeout_ms > 300_000 {
            return Err(invalid("timeout_ms", "must not exceed 5 minutes (300000ms)"));
        }

        if self.user_agent.is_empty() {
            return Err(invalid("user_agent", "must not be empty"));
        }

        if !(self.origin.starts_with("http://") || self.origin.starts_with("https://")) {
            return Err(invalid("origin", "must be an http:// or https:// URL"));
        }

        if self.precache.is_empty() {
            return Err(invalid("precache", "must list at least one shell resource"));
        }
        if let Some(path) = self.precache.iter().find(|p| !p.starts_with('/')) {
            return Err(ConfigError::Invalid {
                field: "precache".into(),
                reason: format!("{path:?} must start with '/'"),
            });
        }
        if !self.offline_fallback.starts_with('/') {
            return Err(invalid("offline_fallback", "must start with '/'"));
        }
        if !self.precache.contains(&self.offline_fallback) {
            tracing::warn!(
                offline_fallback = %self.offline_fallback,
                "offline_fallback is not precached; offline navigations only fall back once it has been visited"
            );
        }
        if !self.static_prefix.starts_with('/') {
            return Err(invalid("static_prefix", "must start with '/'"));
        }

        if self.cache_prefix.is_empty() {
            return Err(invalid("cache_prefix", "must not be empty"));
        }
        for (field, version) in [
            ("static_version", &self.static_version),
            ("runtime_version", &self.runtime_version),
            ("images_version", &self.images_version),
        ] {
            if version.is_empty() {
                return Err(invalid(field, "must not be empty"));
            }
        }

        for (field, interval) in
            [("reply_interval_ms", self.reply_interval_ms), ("notice_interval_ms", self.notice_interval_ms)]
        {
            if interval == 0 {
                return Err(invalid(field, "must be greater than 0"));
            }
            if interval > 1_000 {
                return Err(invalid(field, "must not exceed 1000ms"));
            }
        }

        Ok(())
    }
}
