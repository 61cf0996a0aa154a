//! Input and configuration validation
//!
//! Provides fluent validation for:
//! - Route parameters (barcodes, category ids)
//! - Configuration values
//!
//! # Example
//!
//! ```rust
//! use openfood_core::validation::Validator;
//!
//! let result = Validator::new()
//!     .required("barcode", "3017620422003")
//!     .range("page_size", 24, 1, 100)
//!     .validate();
//!
//! assert!(result.is_valid());
//! ```

use crate::error::{Error, ErrorCode, Result};
use serde::{Deserialize, Serialize};

/// Validation error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationError {
    /// Field that failed validation
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
    /// Expected value (if applicable)
    pub expected: Option<String>,
    /// Actual value (if applicable)
    pub actual: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// Create a new empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get all errors
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Add an error
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Join all error messages into a single line
    pub fn summary(&self) -> String {
        self.errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Convert to Result type
    pub fn to_result(self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            let code = if self.errors.iter().all(|e| e.code == "REQUIRED") {
                ErrorCode::MissingParameter
            } else {
                ErrorCode::ValidationError
            };
            Err(Error::new(code, format!("Validation failed: {}", self.summary())))
        }
    }
}

/// Fluent validator builder
pub struct Validator {
    result: ValidationResult,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// Create a new validator
    pub fn new() -> Self {
        Self {
            result: ValidationResult::new(),
        }
    }

    /// Validate that a field is not empty
    pub fn required(mut self, field: &str, value: &str) -> Self {
        if value.trim().is_empty() {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message: "Field is required".to_string(),
                code: "REQUIRED".to_string(),
                expected: Some("non-empty value".to_string()),
                actual: Some("empty".to_string()),
            });
        }
        self
    }

    /// Validate that a value is in a list of allowed values
    pub fn one_of(mut self, field: &str, value: &str, allowed: &[&str]) -> Self {
        if !allowed.contains(&value) {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message: format!("Must be one of: {}", allowed.join(", ")),
                code: "ONE_OF".to_string(),
                expected: Some(allowed.join(", ")),
                actual: Some(value.to_string()),
            });
        }
        self
    }

    /// Validate a numeric range
    pub fn range<T: PartialOrd + std::fmt::Display>(
        mut self,
        field: &str,
        value: T,
        min: T,
        max: T,
    ) -> Self {
        if value < min || value > max {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message: format!("Must be between {min} and {max}"),
                code: "RANGE".to_string(),
                expected: Some(format!("{min} - {max}")),
                actual: Some(value.to_string()),
            });
        }
        self
    }

    /// Validate that a URL uses the http or https scheme
    pub fn http_url(mut self, field: &str, value: &str) -> Self {
        if !value.starts_with("http://") && !value.starts_with("https://") {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message: "Must start with http:// or https://".to_string(),
                code: "URL_SCHEME".to_string(),
                expected: Some("http(s) URL".to_string()),
                actual: Some(value.to_string()),
            });
        }
        self
    }

    /// Add a custom validation
    pub fn custom<F>(mut self, field: &str, f: F) -> Self
    where
        F: FnOnce() -> Option<String>,
    {
        if let Some(message) = f() {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message,
                code: "CUSTOM".to_string(),
                expected: None,
                actual: None,
            });
        }
        self
    }

    /// Complete validation and return result
    pub fn validate(self) -> ValidationResult {
        self.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_validation() {
        let result = Validator::new().required("barcode", "   ").validate();
        assert!(!result.is_valid());
        assert_eq!(result.errors()[0].code, "REQUIRED");
    }

    #[test]
    fn test_required_maps_to_missing_parameter() {
        let err = Validator::new()
            .required("barcode", "")
            .validate()
            .to_result()
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingParameter);
        assert!(err.message.contains("barcode"));
    }

    #[test]
    fn test_one_of_validation() {
        let result = Validator::new()
            .one_of("sort", "price", &["name", "nutrition-grade"])
            .validate();
        assert!(!result.is_valid());
        assert_eq!(result.errors()[0].code, "ONE_OF");
    }

    #[test]
    fn test_range_validation() {
        let result = Validator::new().range("page_size", 0, 1, 100).validate();
        assert!(!result.is_valid());
        assert_eq!(result.errors()[0].code, "RANGE");
    }

    #[test]
    fn test_http_url_validation() {
        let result = Validator::new()
            .http_url("base_url", "ftp://world.openfoodfacts.org")
            .validate();
        assert!(!result.is_valid());
        assert_eq!(result.to_result().unwrap_err().code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_chained_validation() {
        let result = Validator::new()
            .required("barcode", "3017620422003")
            .http_url("base_url", "https://world.openfoodfacts.org")
            .range("page_size", 24, 1, 100)
            .custom("category_limit", || None)
            .validate();
        assert!(result.is_valid());
        assert!(result.summary().is_empty());
    }
}
