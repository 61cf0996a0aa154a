//! Core utilities for the Open Food explorer
//!
//! This crate provides shared functionality used by the catalog client, the
//! state store and the terminal front-end:
//!
//! - **Error handling**: Coded errors with context and recovery suggestions
//! - **Configuration**: TOML-based configuration with validation
//! - **Validation**: Fluent checks for route parameters and config values
//!
//! # Example
//!
//! ```rust,no_run
//! use openfood_core::config::Config;
//!
//! let config = Config::load(None).expect("config");
//! println!("catalog at {}", config.schema.catalog.base_url);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod validation;

pub use error::{Error, ErrorCode, ErrorReport, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{BrowseConfig, CatalogConfig, Config, ConfigSchema};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result};
    pub use crate::validation::{ValidationResult, Validator};
}
