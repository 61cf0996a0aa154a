//! Endpoint-specific API implementations
//!
//! Each module provides a typed interface for a set of catalog endpoints.
//!
//! | Module | Endpoint | Description |
//! |--------|----------|-------------|
//! | `search` | `/cgi/search.pl`, `/category/{id}.json` | Paged product listings |
//! | `products` | `/api/v0/product/{barcode}.json` | Single product lookup |
//! | `categories` | `/categories.json` | Category taxonomy |

pub mod categories;
pub mod products;
pub mod search;

pub use categories::CategoriesApi;
pub use products::ProductsApi;
pub use search::SearchApi;

use serde::{Deserialize, Deserializer};

/// A list the catalog may send as `null`
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
