//! Catalog abstraction
//!
//! [`Catalog`] is the seam between the query coordinator and the network.
//! [`OpenFoodClient`] is the production implementation; tests substitute an
//! in-memory catalog.

use crate::client::OpenFoodClient;
use crate::endpoints::categories::Category;
use crate::endpoints::products::ProductLookup;
use crate::endpoints::search::ProductPage;
use crate::error::ApiResult;
use std::future::Future;

/// Read-only product catalog
pub trait Catalog: Send + Sync {
    /// Free-text search; an empty query lists the default page
    fn search_by_name(
        &self,
        query: &str,
        page: u32,
    ) -> impl Future<Output = ApiResult<ProductPage>> + Send;

    /// Products in a category
    fn search_by_category(
        &self,
        category_id: &str,
        page: u32,
    ) -> impl Future<Output = ApiResult<ProductPage>> + Send;

    /// Exact barcode lookup
    fn get_by_identifier(
        &self,
        identifier: &str,
    ) -> impl Future<Output = ApiResult<ProductLookup>> + Send;

    /// Full category list
    fn list_categories(&self) -> impl Future<Output = ApiResult<Vec<Category>>> + Send;
}

impl Catalog for OpenFoodClient {
    async fn search_by_name(&self, query: &str, page: u32) -> ApiResult<ProductPage> {
        self.search().by_name(query, page).await
    }

    async fn search_by_category(&self, category_id: &str, page: u32) -> ApiResult<ProductPage> {
        self.search().by_category(category_id, page).await
    }

    async fn get_by_identifier(&self, identifier: &str) -> ApiResult<ProductLookup> {
        self.products().by_barcode(identifier).await
    }

    async fn list_categories(&self) -> ApiResult<Vec<Category>> {
        self.categories().list().await
    }
}
