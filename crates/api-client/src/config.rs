//! Configuration for the catalog client
//!
//! Supports environment-based configuration with sensible defaults.

use crate::error::{ApiError, ApiResult};
use openfood_core::config::{CatalogConfig, DEFAULT_BASE_URL};
use openfood_core::validation::Validator;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Staging catalog host (same data model, test data)
const STAGING_BASE_URL: &str = "https://world.openfoodfacts.net";

/// Page size used by the public web client
pub const DEFAULT_PAGE_SIZE: u32 = 24;

/// Environment types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Staging catalog
    Staging,
    /// Public production catalog
    #[default]
    Production,
}

impl Environment {
    /// Parse from environment variable
    pub fn from_env() -> Self {
        match env::var("OPENFOOD_ENV")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "staging" | "stage" | "test" => Self::Staging,
            _ => Self::Production,
        }
    }

    /// Catalog host for this environment
    #[must_use]
    pub fn base_url(self) -> &'static str {
        match self {
            Self::Staging => STAGING_BASE_URL,
            Self::Production => DEFAULT_BASE_URL,
        }
    }
}

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Catalog host
    pub base_url: String,
    /// Products per page for listing endpoints
    pub page_size: u32,
    /// Request timeout
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
    /// User-Agent header
    pub user_agent: String,
    /// Current environment
    pub environment: Environment,
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_schema(&CatalogConfig::default())
    }
}

impl ClientConfig {
    /// Create configuration from environment variables
    ///
    /// Reads the following environment variables:
    /// - `OPENFOOD_ENV`: Environment (staging/production)
    /// - `OPENFOOD_API_URL`: Catalog host, overrides the environment default
    /// - `OPENFOOD_TIMEOUT_SECS`: Request timeout in seconds
    /// - `OPENFOOD_PAGE_SIZE`: Products per page
    pub fn from_env() -> ApiResult<Self> {
        let environment = Environment::from_env();

        let base_url =
            env::var("OPENFOOD_API_URL").unwrap_or_else(|_| environment.base_url().to_string());

        let timeout = match env::var("OPENFOOD_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse()
                .map(Duration::from_secs)
                .map_err(|_| ApiError::config(format!("OPENFOOD_TIMEOUT_SECS is not a number: {raw}")))?,
            Err(_) => Duration::from_secs(30),
        };

        let page_size = match env::var("OPENFOOD_PAGE_SIZE") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ApiError::config(format!("OPENFOOD_PAGE_SIZE is not a number: {raw}")))?,
            Err(_) => DEFAULT_PAGE_SIZE,
        };

        Ok(Self {
            base_url,
            page_size,
            timeout,
            environment,
            ..Self::default()
        })
    }

    /// Create configuration from the `[catalog]` section of a config file
    #[must_use]
    pub fn from_schema(catalog: &CatalogConfig) -> Self {
        let environment = if catalog.base_url.trim_end_matches('/') == STAGING_BASE_URL {
            Environment::Staging
        } else {
            Environment::Production
        };

        Self {
            base_url: catalog.base_url.clone(),
            page_size: catalog.page_size,
            timeout: Duration::from_secs(catalog.timeout_secs),
            user_agent: catalog.user_agent.clone(),
            environment,
        }
    }

    /// Create staging configuration
    #[must_use]
    pub fn staging() -> Self {
        Self {
            base_url: STAGING_BASE_URL.to_string(),
            environment: Environment::Staging,
            ..Self::default()
        }
    }

    /// Builder-style method to set base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Builder-style method to set timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder-style method to set page size
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Builder-style method to set the User-Agent
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> ApiResult<()> {
        Validator::new()
            .required("base_url", &self.base_url)
            .http_url("base_url", &self.base_url)
            .range("page_size", self.page_size, 1, 100)
            .custom("timeout", || {
                self.timeout.is_zero().then(|| "timeout cannot be zero".to_string())
            })
            .validate()
            .to_result()
            .map_err(|e| ApiError::config(e.message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://world.openfoodfacts.org");
        assert_eq!(config.page_size, 24);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.environment, Environment::Production);
    }

    #[test]
    fn test_staging_config() {
        let config = ClientConfig::staging();
        assert!(config.base_url.ends_with(".net"));
        assert_eq!(config.environment, Environment::Staging);
    }

    #[test]
    fn test_from_schema() {
        let catalog = CatalogConfig {
            base_url: STAGING_BASE_URL.to_string(),
            page_size: 12,
            timeout_secs: 5,
            ..CatalogConfig::default()
        };
        let config = ClientConfig::from_schema(&catalog);
        assert_eq!(config.page_size, 12);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.environment, Environment::Staging);
    }

    #[test]
    fn test_builder_pattern() {
        let config = ClientConfig::default()
            .with_base_url("http://localhost:8080")
            .with_timeout(Duration::from_secs(60))
            .with_page_size(10);

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.page_size, 10);
    }

    #[test]
    fn test_validation() {
        assert!(ClientConfig::default().validate().is_ok());
        assert!(ClientConfig::default().with_base_url("").validate().is_err());
        assert!(ClientConfig::default().with_base_url("world.openfoodfacts.org").validate().is_err());
        assert!(ClientConfig::default().with_timeout(Duration::ZERO).validate().is_err());
        assert!(ClientConfig::default().with_page_size(0).validate().is_err());
    }
}
