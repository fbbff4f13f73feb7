//! Configuration for the Lens Scholar client
//!
//! Credentials and endpoints, plus the timing used when the service asks
//! the client to slow down.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_SEARCH_URL: &str = "https://api.lens.org/scholarly";
pub const DEFAULT_USAGE_URL: &str = "https://api.lens.org/subscriptions/scholarly_api/usage";

pub const ENV_API_KEY: &str = "LENS_SCHOLAR_API_KEY";
pub const ENV_SEARCH_URL: &str = "LENS_SCHOLAR_SEARCH_URL";
pub const ENV_USAGE_URL: &str = "LENS_SCHOLAR_USAGE_URL";
pub const ENV_TIMEOUT_SECS: &str = "LENS_SCHOLAR_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScholarConfig {
    /// Bearer token for the API
    pub api_key: String,
    /// Base URL; `/search` and `/{lens_id}` are appended
    pub search_url: String,
    pub usage_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Wait after an HTTP 429 before retrying
    pub rate_limit_sleep_secs: u64,
    /// Consecutive 429 responses tolerated while scrolling
    pub max_rate_limit_retries: u32,
    pub user_agent: String,
}

impl Default for ScholarConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            usage_url: DEFAULT_USAGE_URL.to_string(),
            timeout_secs: 30,
            rate_limit_sleep_secs: 5,
            max_rate_limit_retries: 10,
            user_agent: format!("scholar-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ScholarConfig {
    /// Create a configuration with defaults and the given key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Load from the process environment, reading a `.env` file first if present
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Load from a variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(ENV_API_KEY)
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingField(ENV_API_KEY.to_string()))?;

        let mut config = Self::new(api_key);
        if let Some(url) = lookup(ENV_SEARCH_URL) {
            config.search_url = url;
        }
        if let Some(url) = lookup(ENV_USAGE_URL) {
            config.usage_url = url;
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            config.timeout_secs = secs.trim().parse().map_err(|_| {
                ConfigError::OutOfRange(format!("{} must be a whole number, got '{}'", ENV_TIMEOUT_SECS, secs))
            })?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json_str)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingField("api_key".to_string()));
        }

        check_url("search_url", &self.search_url)?;
        check_url("usage_url", &self.usage_url)?;

        if self.timeout_secs == 0 {
            return Err(ConfigError::OutOfRange(
                "timeout_secs must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

fn check_url(name: &'static str, url: &str) -> Result<(), ConfigError> {
    match Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        _ => Err(ConfigError::InvalidUrl {
            name,
            url: url.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_default_config_needs_key() {
        let config = ScholarConfig::default();
        assert_eq!(
            config.validate(),
            Err(ConfigError::MissingField("api_key".to_string()))
        );
        assert!(ScholarConfig::new("secret").validate().is_ok());
    }

    #[test]
    fn test_from_vars() {
        let config = ScholarConfig::from_vars(vars(&[
            (ENV_API_KEY, "secret"),
            (ENV_TIMEOUT_SECS, "90"),
        ]))
        .unwrap();
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.timeout_secs, 90);
        assert_eq!(config.search_url, DEFAULT_SEARCH_URL);

        let err = ScholarConfig::from_vars(vars(&[])).unwrap_err();
        assert_eq!(err, ConfigError::MissingField(ENV_API_KEY.to_string()));

        let err = ScholarConfig::from_vars(vars(&[
            (ENV_API_KEY, "secret"),
            (ENV_SEARCH_URL, "ftp://example.org"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { name: "search_url", .. }));

        let err = ScholarConfig::from_vars(vars(&[
            (ENV_API_KEY, "secret"),
            (ENV_TIMEOUT_SECS, "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange(_)));
    }

    #[test]
    fn test_toml_partial() {
        let config = ScholarConfig::from_toml(
            r#"
            api_key = "secret"
            rate_limit_sleep_secs = 1
            "#,
        )
        .unwrap();
        assert_eq!(config.rate_limit_sleep_secs, 1);
        assert_eq!(config.usage_url, DEFAULT_USAGE_URL);
        assert!(ScholarConfig::from_toml("api_key = 3").is_err());
    }

    #[test]
    fn test_json_serialization() {
        let config = ScholarConfig::new("secret");
        let json = config.to_json().unwrap();
        let parsed = ScholarConfig::from_json(&json).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_zero_timeout() {
        let mut config = ScholarConfig::new("secret");
        config.timeout_secs = 0;
        assert!(matches!(config.validate(), Err(ConfigError::OutOfRange(_))));
    }
}
