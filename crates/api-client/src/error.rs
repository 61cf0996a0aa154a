//! Error types for the catalog client

use openfood_core::ErrorCode;
use thiserror::Error;

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Catalog client errors
///
/// A product that does not exist is not an error: lookups report it as
/// [`crate::ProductLookup::NotFound`].
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request failed (network, DNS, TLS, timeout)
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Response body was not the JSON we expected
    #[error("Invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// API returned a non-2xx response
    #[error("API error ({status}): {message}")]
    ApiResponse {
        /// HTTP status code
        status: u16,
        /// Response body, truncated
        message: String,
    },

    /// A required route parameter was missing or malformed
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an API response error
    pub fn api_response(status: u16, message: impl Into<String>) -> Self {
        Self::ApiResponse {
            status,
            message: message.into(),
        }
    }

    /// Check if this error came from the network round trip or the payload
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Request(_) | Self::Json(_) | Self::ApiResponse { .. }
        )
    }

    /// Check if this error was raised before any request was made
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<openfood_core::Error> for ApiError {
    fn from(err: openfood_core::Error) -> Self {
        match err.code {
            ErrorCode::ValidationError | ErrorCode::MissingParameter | ErrorCode::InvalidInput => {
                Self::Validation(err.message)
            }
            _ => Self::Config(err.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        let not_found = ApiError::api_response(404, "missing");
        assert!(not_found.is_transport());
        assert!(!not_found.is_validation());
        assert_eq!(not_found.to_string(), "API error (404): missing");

        assert!(!ApiError::config("no host").is_transport());
    }

    #[test]
    fn test_json_error_is_transport() {
        let err: ApiError = serde_json::from_str::<serde_json::Value>("<html>")
            .unwrap_err()
            .into();
        assert!(err.is_transport());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_core_validation_maps_to_validation() {
        let err: ApiError = openfood_core::Error::missing_parameter("barcode").into();
        assert!(err.is_validation());
        assert!(err.to_string().contains("barcode"));

        let err: ApiError = openfood_core::Error::config("bad base url").into();
        assert!(matches!(err, ApiError::Config(_)));
    }
}
