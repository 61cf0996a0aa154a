//! Category taxonomy endpoint

use crate::client::OpenFoodClient;
use crate::error::ApiResult;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Category API interface
#[derive(Clone)]
pub struct CategoriesApi {
    client: OpenFoodClient,
}

impl CategoriesApi {
    /// Create a new categories API interface
    pub(crate) fn new(client: OpenFoodClient) -> Self {
        Self { client }
    }

    /// List all categories
    ///
    /// GET /categories.json
    ///
    /// The full taxonomy is large; callers showing a picker should truncate
    /// it, see [`CategoriesApi::top`].
    pub async fn list(&self) -> ApiResult<Vec<Category>> {
        let url = self.client.endpoint_url(&["categories.json"], &[])?;
        let response: CategoriesResponse = self.client.get_json(url).await?;
        debug!(count = response.tags.len(), "Categories fetched");
        Ok(response.tags)
    }

    /// The `limit` categories with the most products
    ///
    /// Ties keep the catalog's order.
    pub async fn top(&self, limit: usize) -> ApiResult<Vec<Category>> {
        let mut tags = self.list().await?;
        tags.sort_by(|a, b| b.products.cmp(&a.products));
        tags.truncate(limit);
        Ok(tags)
    }
}

/// Categories payload
#[derive(Debug, Clone, Deserialize)]
pub struct CategoriesResponse {
    #[serde(default, deserialize_with = "super::null_as_empty")]
    pub tags: Vec<Category>,
}

/// Catalog category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Taxonomy id, e.g. `en:beverages`
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Number of products in the category
    #[serde(default)]
    pub products: u64,
    /// Catalog page for the category
    #[serde(default)]
    pub url: Option<String>,
}

impl Category {
    /// Name for display, falling back to the id
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}
