//! Paged product listings
//!
//! Two endpoints return the same `{ "products": [...] }` page shape:
//! - `GET /cgi/search.pl` for free-text search
//! - `GET /category/{id}.json` for a category listing
//!
//! The catalog does not bound-check `page`; past the last page it returns an
//! empty list.

use crate::client::OpenFoodClient;
use crate::endpoints::products::Product;
use crate::error::ApiResult;
use openfood_core::validation::Validator;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

/// Product search API interface
#[derive(Clone)]
pub struct SearchApi {
    client: OpenFoodClient,
}

impl SearchApi {
    /// Create a new search API interface
    pub(crate) fn new(client: OpenFoodClient) -> Self {
        Self { client }
    }

    /// Search products by name
    ///
    /// GET /cgi/search.pl?search_terms={q}&page={n}&json=true&page_size={size}
    ///
    /// An empty query returns the catalog's default listing.
    pub async fn by_name(&self, query: &str, page: u32) -> ApiResult<ProductPage> {
        let page_param = page.max(1).to_string();
        let size_param = self.client.page_size().to_string();
        let url = self.client.endpoint_url(
            &["cgi", "search.pl"],
            &[
                ("search_terms", query),
                ("page", &page_param),
                ("json", "true"),
                ("page_size", &size_param),
            ],
        )?;

        let result: ProductPage = self.client.get_json(url).await?;
        debug!(query, page, count = result.len(), "Name search completed");
        Ok(result)
    }

    /// List products in a category
    ///
    /// GET /category/{id}.json?page={n}&page_size={size}
    pub async fn by_category(&self, category_id: &str, page: u32) -> ApiResult<ProductPage> {
        Validator::new()
            .required("category", category_id)
            .validate()
            .to_result()?;

        let file = format!("{}.json", category_id.trim());
        let page_param = page.max(1).to_string();
        let size_param = self.client.page_size().to_string();
        let url = self.client.endpoint_url(
            &["category", &file],
            &[("page", &page_param), ("page_size", &size_param)],
        )?;

        let result: ProductPage = self.client.get_json(url).await?;
        debug!(category_id, page, count = result.len(), "Category listing completed");
        Ok(result)
    }
}

// ============================================================================
// Response Types
// ============================================================================

/// One page of products
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    /// Products on this page; missing or `null` in the payload means none
    #[serde(default, deserialize_with = "super::null_as_empty")]
    pub products: Vec<Product>,
    /// Total matches across all pages
    #[serde(default, deserialize_with = "lenient_u64")]
    pub count: Option<u64>,
    /// Page number echoed by the catalog
    #[serde(default, deserialize_with = "lenient_u64")]
    pub page: Option<u64>,
    /// Page size echoed by the catalog
    #[serde(default, deserialize_with = "lenient_u64")]
    pub page_size: Option<u64>,
}

impl ProductPage {
    /// Wrap a list of products as a page
    #[must_use]
    pub fn from_products(products: Vec<Product>) -> Self {
        Self {
            products,
            ..Self::default()
        }
    }

    /// Number of products on this page
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether this page is empty (past the last page)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// The catalog sends counters as numbers on some endpoints and strings on others
fn lenient_u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::Number(n)) => n.as_u64(),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn api_for(server: &MockServer) -> SearchApi {
        OpenFoodClient::with_config(ClientConfig::default().with_base_url(server.uri()))
            .unwrap()
            .search()
    }

    fn products(n: usize) -> serde_json::Value {
        (0..n)
            .map(|i| json!({"code": format!("{i:013}"), "product_name": format!("Milk {i}")}))
            .collect()
    }

    #[test]
    fn test_page_lenient_counters() {
        let page: ProductPage =
            serde_json::from_str(r#"{"count": "1204", "page": 2, "page_size": "24"}"#).unwrap();
        assert!(page.is_empty());
        assert_eq!(page.count, Some(1204));
        assert_eq!(page.page, Some(2));
        assert_eq!(page.page_size, Some(24));
    }

    #[test]
    fn test_null_products_is_empty_page() {
        let page: ProductPage = serde_json::from_str(r#"{"count": 0, "products": null}"#).unwrap();
        assert!(page.is_empty());
        assert_eq!(page.count, Some(0));
    }

    #[tokio::test]
    async fn test_by_name_sends_search_params() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cgi/search.pl"))
            .and(query_param("search_terms", "whole milk"))
            .and(query_param("page", "1"))
            .and(query_param("json", "true"))
            .and(query_param("page_size", "24"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 48,
                "products": products(24)
            })))
            .expect(1)
            .mount(&server)
            .await;

        let page = api_for(&server).by_name("whole milk", 1).await.unwrap();
        assert_eq!(page.len(), 24);
        assert_eq!(page.products[3].display_name(), "Milk 3");
    }

    #[tokio::test]
    async fn test_by_name_empty_query_is_valid() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cgi/search.pl"))
            .and(query_param("search_terms", ""))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"products": products(2)})))
            .expect(1)
            .mount(&server)
            .await;

        let page = api_for(&server).by_name("", 1).await.unwrap();
        assert_eq!(page.len(), 2);
    }

    #[tokio::test]
    async fn test_out_of_range_page_is_empty_not_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cgi/search.pl"))
            .and(query_param("page", "9999"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 3, "page": 9999})))
            .mount(&server)
            .await;

        let page = api_for(&server).by_name("milk", 9999).await.unwrap();
        assert!(page.is_empty());
    }

    #[tokio::test]
    async fn test_by_category_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/category/en:breakfast-cereals.json"))
            .and(query_param("page", "2"))
            .and(query_param("page_size", "24"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"products": products(5)})))
            .expect(1)
            .mount(&server)
            .await;

        let page = api_for(&server)
            .by_category("en:breakfast-cereals", 2)
            .await
            .unwrap();
        assert_eq!(page.len(), 5);
    }

    #[tokio::test]
    async fn test_by_category_requires_id() {
        let server = MockServer::start().await;
        let err = api_for(&server).by_category("", 1).await.unwrap_err();
        assert!(err.is_validation());
    }
}
