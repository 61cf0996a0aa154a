//! Tracing subscriber setup
//!
//! Logs go to stderr so `--format json` output on stdout stays parseable.

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter used by `--verbose`
const VERBOSE_FILTER: &str = "warn,openfood=debug,openfood_explorer=debug,openfood_api_client=debug";

/// Telemetry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub json: bool,
    pub show_target: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            json: false,
            show_target: false,
        }
    }
}

impl TelemetryConfig {
    /// Configuration for the global CLI flags
    pub fn from_flags(verbose: bool, json: bool) -> Self {
        Self {
            log_level: if verbose { VERBOSE_FILTER } else { "warn" }.to_string(),
            json,
            show_target: verbose,
        }
    }
}

/// Install the global subscriber; `RUST_LOG` overrides the configured level
pub fn init_with_config(config: TelemetryConfig) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let json_layer = config.json.then(|| {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_writer(std::io::stderr)
    });
    let compact_layer = (!config.json).then(|| {
        fmt::layer()
            .compact()
            .with_target(config.show_target)
            .with_writer(std::io::stderr)
    });

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(compact_layer);

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "Telemetry initialized");

    Ok(())
}
