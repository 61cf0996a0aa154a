//! Configuration schema definitions

use crate::error::Result;
use crate::validation::Validator;
use serde::{Deserialize, Serialize};

/// Default public catalog host
pub const DEFAULT_BASE_URL: &str = "https://world.openfoodfacts.org";

/// Sort keys accepted in `[browse].sort`
pub const SORT_KEYS: &[&str] = &["name", "nutrition-grade"];

/// Sort directions accepted in `[browse].direction`
pub const SORT_DIRECTIONS: &[&str] = &["asc", "desc"];

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    /// Remote catalog settings
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Browsing defaults
    #[serde(default)]
    pub browse: BrowseConfig,
}

impl ConfigSchema {
    /// Validate every section
    pub fn validate(&self) -> Result<()> {
        Validator::new()
            .http_url("catalog.base_url", &self.catalog.base_url)
            .range("catalog.page_size", self.catalog.page_size, 1, 100)
            .range("catalog.timeout_secs", self.catalog.timeout_secs, 1, 600)
            .range("catalog.category_limit", self.catalog.category_limit, 1, 1000)
            .required("catalog.user_agent", &self.catalog.user_agent)
            .one_of("browse.sort", &self.browse.sort, SORT_KEYS)
            .one_of("browse.direction", &self.browse.direction, SORT_DIRECTIONS)
            .validate()
            .to_result()
    }
}

/// Remote catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog host, without a trailing path
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Products requested per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Number of categories offered for filtering
    #[serde(default = "default_category_limit")]
    pub category_limit: usize,

    /// User-Agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            page_size: default_page_size(),
            timeout_secs: default_timeout_secs(),
            category_limit: default_category_limit(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_page_size() -> u32 {
    24
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_category_limit() -> usize {
    20
}

fn default_user_agent() -> String {
    concat!("openfood-explorer/", env!("CARGO_PKG_VERSION")).to_string()
}

/// Browsing defaults applied to a fresh session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowseConfig {
    /// Initial sort key (`name` or `nutrition-grade`)
    #[serde(default = "default_sort")]
    pub sort: String,

    /// Initial sort direction (`asc` or `desc`)
    #[serde(default = "default_direction")]
    pub direction: String,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            sort: default_sort(),
            direction: default_direction(),
        }
    }
}

fn default_sort() -> String {
    "name".to_string()
}

fn default_direction() -> String {
    "asc".to_string()
}
