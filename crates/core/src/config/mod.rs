//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (FOLIO_*)
//! 2. TOML config file (if FOLIO_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::reveal::{RevealPace, Theme};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (FOLIO_*)
/// 2. TOML config file (if FOLIO_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the SQLite database holding the cache sets.
    ///
    /// Set via FOLIO_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Base URL of the site; shell resources resolve against it.
    ///
    /// Set via FOLIO_ORIGIN environment variable.
    #[serde(default = "default_origin")]
    pub origin: String,

    /// Common prefix of the cache set names.
    #[serde(default = "default_cache_prefix")]
    pub cache_prefix: String,

    /// Version suffix of the static set. Bump it to drop the previous generation.
    #[serde(default = "default_version")]
    pub static_version: String,

    /// Version suffix of the runtime set.
    #[serde(default = "default_version")]
    pub runtime_version: String,

    /// Version suffix of the images set.
    #[serde(default = "default_version")]
    pub images_version: String,

    /// Shell resources fetched at install time.
    #[serde(default = "default_precache")]
    pub precache: Vec<String>,

    /// Document served when a navigation fails with no exact cache entry.
    #[serde(default = "default_offline_fallback")]
    pub offline_fallback: String,

    /// Path prefix that marks a request as a static asset.
    #[serde(default = "default_static_prefix")]
    pub static_prefix: String,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via FOLIO_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// HTTP request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum bytes to fetch per request.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// Generative-language API key for the assistant.
    ///
    /// Set via FOLIO_ASSISTANT_API_KEY environment variable.
    /// Required only when the assistant is asked something.
    #[serde(default)]
    pub assistant_api_key: Option<String>,

    /// Model used by the assistant.
    #[serde(default = "default_assistant_model")]
    pub assistant_model: String,

    /// Reveal tick interval for assistant replies, in milliseconds.
    #[serde(default = "default_reply_interval_ms")]
    pub reply_interval_ms: u64,

    /// Reveal tick interval for notices, in milliseconds.
    #[serde(default = "default_notice_interval_ms")]
    pub notice_interval_ms: u64,

    /// Theme used to colour rendered spans.
    #[serde(default)]
    pub theme: Theme,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./folio-cache.sqlite")
}

fn default_origin() -> String {
    "http://localhost:5173".into()
}

fn default_cache_prefix() -> String {
    "folio".into()
}

fn default_version() -> String {
    "v1".into()
}

fn default_precache() -> Vec<String> {
    vec!["/".into(), "/index.html".into(), "/manifest.json".into()]
}

fn default_offline_fallback() -> String {
    "/index.html".into()
}

fn default_static_prefix() -> String {
    "/assets/".into()
}

fn default_user_agent() -> String {
    "folio/0.1".into()
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_max_bytes() -> usize {
    5_242_880 // 5MB
}

fn default_assistant_model() -> String {
    "gemini-2.5-flash-preview-09-2025".into()
}

fn default_reply_interval_ms() -> u64 {
    5
}

fn default_notice_interval_ms() -> u64 {
    10
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            origin: default_origin(),
            cache_prefix: default_cache_prefix(),
            static_version: default_version(),
            runtime_version: default_version(),
            images_version: default_version(),
            precache: default_precache(),
            offline_fallback: default_offline_fallback(),
            static_prefix: default_static_prefix(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            max_bytes: default_max_bytes(),
            assistant_api_key: None,
            assistant_model: default_assistant_model(),
            reply_interval_ms: default_reply_interval_ms(),
            notice_interval_ms: default_notice_interval_ms(),
            theme: Theme::default(),
        }
    }
}

/// The three live cache set names of one deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheNames {
    pub static_name: String,
    pub runtime_name: String,
    pub images_name: String,
}

impl CacheNames {
    /// Names outside this list are purged on activation.
    pub fn allow_list(&self) -> [&str; 3] {
        [&self.static_name, &self.runtime_name, &self.images_name]
    }

    pub fn is_allowed(&self, name: &str) -> bool {
        self.allow_list().contains(&name)
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Cache set names, e.g. `folio-static-v1`.
    pub fn cache_names(&self) -> CacheNames {
        CacheNames {
            static_name: format!("{}-static-{}", self.cache_prefix, self.static_version),
            runtime_name: format!("{}-runtime-{}", self.cache_prefix, self.runtime_version),
            images_name: format!("{}-images-{}", self.cache_prefix, self.images_version),
        }
    }

    /// Tick interval for a reveal of the given pace.
    pub fn reveal_interval(&self, pace: RevealPace) -> Duration {
        match pace {
            RevealPace::Reply => Duration::from_millis(self.reply_interval_ms),
            RevealPace::Notice => Duration::from_millis(self.notice_interval_ms),
        }
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `FOLIO_`
    /// 2. TOML file from `FOLIO_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("FOLIO_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("FOLIO_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Check if the assistant API key is available (for deferred validation).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if the key is not set.
    pub fn require_assistant_api_key(&self) -> Result<&str, ConfigError> {
        self.assistant_api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ConfigError::Missing {
                field: "assistant_api_key".into(),
                hint: "Set FOLIO_ASSISTANT_API_KEY environment variable".into(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.db_path, PathBuf::from("./folio-cache.sqlite"));
        assert_eq!(config.precache, vec!["/", "/index.html", "/manifest.json"]);
        assert_eq!(config.offline_fallback, "/index.html");
        assert_eq!(config.static_prefix, "/assets/");
        assert_eq!(config.reply_interval_ms, 5);
        assert_eq!(config.notice_interval_ms, 10);
        assert!(config.assistant_api_key.is_none());
    }

    #[test]
    fn test_cache_names() {
        let config = AppConfig { images_version: "v7".into(), ..Default::default() };
        let names = config.cache_names();
        assert_eq!(names.static_name, "folio-static-v1");
        assert_eq!(names.runtime_name, "folio-runtime-v1");
        assert_eq!(names.images_name, "folio-images-v7");
        assert!(names.is_allowed("folio-images-v7"));
        assert!(!names.is_allowed("folio-images-v1"));
    }

    #[test]
    fn test_reveal_interval() {
        let config = AppConfig::default();
        assert_eq!(config.reveal_interval(RevealPace::Reply), Duration::from_millis(5));
        assert_eq!(config.reveal_interval(RevealPace::Notice), Duration::from_millis(10));
    }

    #[test]
    fn test_require_assistant_api_key_missing() {
        let config = AppConfig::default();
        assert!(matches!(config.require_assistant_api_key(), Err(ConfigError::Missing { .. })));

        let config = AppConfig { assistant_api_key: Some(String::new()), ..Default::default() };
        assert!(matches!(config.require_assistant_api_key(), Err(ConfigError::Missing { .. })));
    }

    #[test]
    fn test_require_assistant_api_key_present() {
        let config = AppConfig { assistant_api_key: Some("test-key".into()), ..Default::default() };
        assert_eq!(config.require_assistant_api_key().unwrap(), "test-key");
    }
}
