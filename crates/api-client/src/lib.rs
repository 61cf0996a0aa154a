//! Typed client for the Open Food Facts catalog
//!
//! This crate wraps the four read-only endpoints the explorer consumes:
//!
//! | Method | Endpoint |
//! |--------|----------|
//! | [`SearchApi::by_name`] | `GET /cgi/search.pl` |
//! | [`SearchApi::by_category`] | `GET /category/{id}.json` |
//! | [`ProductsApi::by_barcode`] | `GET /api/v0/product/{barcode}.json` |
//! | [`CategoriesApi::list`] | `GET /categories.json` |
//!
//! Every call is a single best-effort round trip: no retries, no caching.
//!
//! # Example
//!
//! ```rust,no_run
//! use openfood_api_client::{OpenFoodClient, ProductLookup};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = OpenFoodClient::new()?;
//!
//!     let page = client.search().by_name("milk", 1).await?;
//!     println!("{} products on page 1", page.products.len());
//!
//!     match client.products().by_barcode("3017620422003").await? {
//!         ProductLookup::Found(product) => println!("{}", product.display_name()),
//!         ProductLookup::NotFound => println!("not found"),
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;

pub use catalog::Catalog;
pub use client::OpenFoodClient;
pub use config::{ClientConfig, Environment};
pub use endpoints::categories::{CategoriesApi, Category};
pub use endpoints::products::{
    Nutriments, NutritionGrade, Product, ProductLookup, ProductsApi, KNOWN_NUTRIENTS,
};
pub use endpoints::search::{ProductPage, SearchApi};
pub use error::{ApiError, ApiResult};
