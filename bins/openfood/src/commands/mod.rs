//! Subcommand implementations

pub mod browse;
pub mod categories;
pub mod product;
pub mod search;

use anyhow::{Context as _, Result};
use clap::ValueEnum;
use openfood_api_client::{ClientConfig, OpenFoodClient};
use openfood_core::config::Config;
use openfood_explorer::{AppState, QueryCoordinator, SortOrder, Store};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Shared state for one invocation
pub struct Context {
    pub config: Config,
    pub format: OutputFormat,
}

impl Context {
    /// Load configuration from `--config` or the standard locations
    pub fn load(path: Option<&Path>, format: OutputFormat) -> Result<Self> {
        let config = Config::load(path)?;
        debug!(path = ?config.path, "Configuration loaded");
        Ok(Self { config, format })
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Client settings: the config file when one was found, else the environment
    pub fn client_config(&self) -> Result<ClientConfig> {
        if self.config.path.is_some() {
            Ok(ClientConfig::from_schema(&self.config.schema.catalog))
        } else {
            Ok(ClientConfig::from_env()?)
        }
    }

    pub fn client(&self) -> Result<OpenFoodClient> {
        let config = self.client_config()?;
        OpenFoodClient::with_config(config).context("Failed to create catalog client")
    }

    /// Sort order from the `[browse]` section
    pub fn sort_order(&self) -> Result<SortOrder> {
        Ok(SortOrder::from_config(&self.config.schema.browse)?)
    }

    /// Fresh store and coordinator over the catalog client
    pub fn coordinator(&self, sort: SortOrder) -> Result<QueryCoordinator<OpenFoodClient>> {
        let store = Arc::new(Store::new(AppState::with_sort(sort)));
        Ok(QueryCoordinator::new(self.client()?, store))
    }

    pub fn category_limit(&self) -> usize {
        self.config.schema.catalog.category_limit
    }
}

/// Print a value as pretty JSON on stdout
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
