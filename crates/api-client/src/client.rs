//! Main API client implementation

use crate::config::ClientConfig;
use crate::endpoints::{CategoriesApi, ProductsApi, SearchApi};
use crate::error::{ApiError, ApiResult};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, instrument, warn, Span};
use uuid::Uuid;

/// Request correlation ID header
const X_REQUEST_ID: &str = "X-Request-ID";

/// Longest error body kept in [`ApiError::ApiResponse`]
const MAX_ERROR_BODY: usize = 512;

/// Open Food Facts catalog client
///
/// Cheap to clone; clones share the connection pool. Each call is a single
/// GET with a fresh request id, no retry and no caching.
#[derive(Clone)]
pub struct OpenFoodClient {
    inner: Client,
    base: Url,
    config: Arc<ClientConfig>,
}

impl OpenFoodClient {
    /// Create a new client with default configuration from environment
    pub fn new() -> ApiResult<Self> {
        let config = ClientConfig::from_env()?;
        Self::with_config(config)
    }

    /// Create a new client with specific configuration
    pub fn with_config(config: ClientConfig) -> ApiResult<Self> {
        config.validate()?;

        let base = Url::parse(&config.base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {e}", config.base_url)))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(config.base_url.clone()));
        }

        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|_| ApiError::config("user_agent contains invalid header characters"))?;
        default_headers.insert(USER_AGENT, agent);

        let inner = Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(ApiError::Request)?;

        Ok(Self {
            inner,
            base,
            config: Arc::new(config),
        })
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Products requested per page
    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.config.page_size
    }

    // -------------------------------------------------------------------------
    // Endpoint API accessors
    // -------------------------------------------------------------------------

    /// Access product search endpoints
    #[must_use]
    pub fn search(&self) -> SearchApi {
        SearchApi::new(self.clone())
    }

    /// Access single-product endpoints
    #[must_use]
    pub fn products(&self) -> ProductsApi {
        ProductsApi::new(self.clone())
    }

    /// Access category endpoints
    #[must_use]
    pub fn categories(&self) -> CategoriesApi {
        CategoriesApi::new(self.clone())
    }

    // -------------------------------------------------------------------------
    // Low-level HTTP
    // -------------------------------------------------------------------------

    /// Build an endpoint URL from path segments and query pairs
    ///
    /// Segments are percent-encoded individually, so ids containing `/` or
    /// spaces stay in one segment.
    pub fn endpoint_url(&self, segments: &[&str], query: &[(&str, &str)]) -> ApiResult<Url> {
        let mut url = self.base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| ApiError::InvalidUrl(self.config.base_url.clone()))?;
            path.pop_if_empty().extend(segments);
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// Perform a GET request and decode the JSON body
    ///
    /// Non-2xx statuses become [`ApiError::ApiResponse`]; a 2xx body that is
    /// not the expected JSON becomes [`ApiError::Json`].
    #[instrument(skip(self, url), fields(url = %url, request_id = tracing::field::Empty))]
    pub async fn get_json<T: DeserializeOwned>(&self, url: Url) -> ApiResult<T> {
        let request_id = Uuid::new_v4().to_string();
        Span::current().record("request_id", request_id.as_str());

        let start = Instant::now();
        let response = self
            .inner
            .get(url)
            .header(X_REQUEST_ID, &request_id)
            .send()
            .await
            .inspect_err(|e| warn!(error = %e, "Request failed"))?;

        let status = response.status();
        let body = response.text().await?;
        debug!(
            status = status.as_u16(),
            bytes = body.len(),
            elapsed_ms = start.elapsed().as_millis(),
            "Response received"
        );

        if !status.is_success() {
            warn!(status = status.as_u16(), "Catalog returned an error status");
            return Err(ApiError::api_response(
                status.as_u16(),
                truncate(&body, MAX_ERROR_BODY),
            ));
        }

        serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, "Response body is not valid JSON");
            ApiError::Json(e)
        })
    }
}

fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_string(),
    }
}
