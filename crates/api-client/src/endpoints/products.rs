//! Product lookup endpoint and the product record
//!
//! Maps to `GET /api/v0/product/{barcode}.json`. The catalog answers a
//! missing barcode with HTTP 200 and `{"status": 0}`, so not-found is read
//! from the payload.

use crate::client::OpenFoodClient;
use crate::error::ApiResult;
use openfood_core::validation::Validator;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Single-product API interface
#[derive(Clone)]
pub struct ProductsApi {
    client: OpenFoodClient,
}

impl ProductsApi {
    /// Create a new products API interface
    pub(crate) fn new(client: OpenFoodClient) -> Self {
        Self { client }
    }

    /// Look up a product by barcode
    ///
    /// GET /api/v0/product/{barcode}.json
    ///
    /// An empty barcode fails with a validation error before any request.
    pub async fn by_barcode(&self, barcode: &str) -> ApiResult<ProductLookup> {
        let barcode = barcode.trim();
        Validator::new()
            .required("barcode", barcode)
            .validate()
            .to_result()?;

        let file = format!("{barcode}.json");
        let url = self
            .client
            .endpoint_url(&["api", "v0", "product", &file], &[])?;
        let response: LookupResponse = self.client.get_json(url).await?;

        let lookup = response.into_lookup();
        debug!(barcode, found = lookup.is_found(), "Product lookup completed");
        Ok(lookup)
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Raw lookup payload
#[derive(Debug, Clone, Deserialize)]
pub struct LookupResponse {
    /// 1 when the product exists, 0 otherwise
    #[serde(default)]
    pub status: i64,
    /// Human-readable status ("product found", "product not found")
    #[serde(default)]
    pub status_verbose: Option<String>,
    /// The product, present only when `status` is 1
    #[serde(default)]
    pub product: Option<Product>,
}

impl LookupResponse {
    /// Collapse the payload into a tagged result
    #[must_use]
    pub fn into_lookup(self) -> ProductLookup {
        match (self.status, self.product) {
            (1, Some(product)) => ProductLookup::Found(Box::new(product)),
            _ => ProductLookup::NotFound,
        }
    }
}

/// Result of a barcode lookup
#[derive(Debug, Clone, PartialEq)]
pub enum ProductLookup {
    /// The catalog has this product
    Found(Box<Product>),
    /// The barcode is valid but unknown
    NotFound,
}

impl ProductLookup {
    /// Whether the product was found
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// The product, if found
    #[must_use]
    pub fn into_product(self) -> Option<Product> {
        match self {
            Self::Found(product) => Some(*product),
            Self::NotFound => None,
        }
    }
}

/// Product record as published by the catalog
///
/// Only `code` identifies a product; every other field may be missing or
/// empty and the accessors below treat both the same way.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Barcode
    #[serde(default, deserialize_with = "string_or_number")]
    pub code: String,
    pub product_name: Option<String>,
    pub image_url: Option<String>,
    /// Comma-joined category names
    pub categories: Option<String>,
    pub ingredients_text: Option<String>,
    pub allergens: Option<String>,
    /// Comma-joined label names
    pub labels: Option<String>,
    /// Comma-joined brand names
    pub brands: Option<String>,
    /// Net quantity as printed ("400 g")
    pub quantity: Option<String>,
    /// Nutri-Score letter, lower-case in the payload
    pub nutrition_grades: Option<String>,
    #[serde(default)]
    pub nutriments: Nutriments,
}

impl Product {
    /// Name for display, with a placeholder when absent
    #[must_use]
    pub fn display_name(&self) -> &str {
        non_empty(self.product_name.as_deref()).unwrap_or("Unknown Product")
    }

    /// Image URL, if any
    #[must_use]
    pub fn image(&self) -> Option<&str> {
        non_empty(self.image_url.as_deref())
    }

    /// Parsed nutrition grade
    #[must_use]
    pub fn nutrition_grade(&self) -> Option<NutritionGrade> {
        self.nutrition_grades.as_deref().and_then(|g| g.parse().ok())
    }

    /// Categories, split and trimmed
    #[must_use]
    pub fn category_list(&self) -> Vec<&str> {
        split_list(self.categories.as_deref())
    }

    /// First `n` categories joined for a card headline
    #[must_use]
    pub fn headline_categories(&self, n: usize) -> Option<String> {
        let list = self.category_list();
        (!list.is_empty()).then(|| list.into_iter().take(n).collect::<Vec<_>>().join(", "))
    }

    /// Labels, split and trimmed
    #[must_use]
    pub fn label_list(&self) -> Vec<&str> {
        split_list(self.labels.as_deref())
    }

    /// First listed brand
    #[must_use]
    pub fn primary_brand(&self) -> Option<&str> {
        split_list(self.brands.as_deref()).into_iter().next()
    }

    /// Ingredients text, if any
    #[must_use]
    pub fn ingredients(&self) -> Option<&str> {
        non_empty(self.ingredients_text.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn split_list(value: Option<&str>) -> Vec<&str> {
    value
        .map(|v| v.split(',').map(str::trim).filter(|s| !s.is_empty()).collect())
        .unwrap_or_default()
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(s)) => s,
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}

/// Nutri-Score letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NutritionGrade {
    A,
    B,
    C,
    D,
    E,
}

impl NutritionGrade {
    /// Upper-case letter
    #[must_use]
    pub fn letter(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
            Self::E => 'E',
        }
    }
}

impl FromStr for NutritionGrade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" => Ok(Self::A),
            "b" => Ok(Self::B),
            "c" => Ok(Self::C),
            "d" => Ok(Self::D),
            "e" => Ok(Self::E),
            other => Err(format!("not a nutrition grade: {other}")),
        }
    }
}

impl fmt::Display for NutritionGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Nutrients shown first in a detail view, with their labels
pub const KNOWN_NUTRIENTS: &[(&str, &str)] = &[
    ("energy-kj", "Energy (kJ)"),
    ("energy-kcal", "Energy (kcal)"),
    ("fat", "Fat"),
    ("saturated-fat", "Saturated fat"),
    ("carbohydrates", "Carbohydrates"),
    ("sugars", "Sugars"),
    ("proteins", "Proteins"),
    ("fiber", "Fiber"),
    ("salt", "Salt"),
    ("sodium", "Sodium"),
];

/// Suffixes of per-serving and bookkeeping variants of each nutrient
const VARIANT_SUFFIXES: &[&str] = &["_100g", "_serving", "_value", "_unit", "_prepared"];

/// Nutrient amounts per 100 g
///
/// The payload mixes numbers, numeric strings and units; only values that
/// read as numbers are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Nutriments(BTreeMap<String, f64>);

impl Nutriments {
    /// Amount for a nutrient key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<f64> {
        self.0.get(key).copied()
    }

    /// Energy in kJ, falling back to the unlabelled `energy` key
    #[must_use]
    pub fn energy_kj(&self) -> Option<f64> {
        self.get("energy-kj").or_else(|| self.get("energy"))
    }

    /// Whether no numeric amounts were published
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// All amounts, ordered by key
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Known nutrients with their labels, in display order
    pub fn known(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        KNOWN_NUTRIENTS.iter().filter_map(|(key, label)| {
            let amount = if *key == "energy-kj" {
                self.energy_kj()
            } else {
                self.get(key)
            };
            amount.map(|a| (*label, a))
        })
    }

    /// Remaining base nutrients not covered by [`KNOWN_NUTRIENTS`]
    pub fn extra(&self) -> impl Iterator<Item = (&str, f64)> {
        self.iter().filter(|(key, _)| {
            *key != "energy"
                && !KNOWN_NUTRIENTS.iter().any(|(known, _)| known == key)
                && !VARIANT_SUFFIXES.iter().any(|suffix| key.ends_with(suffix))
        })
    }
}

impl FromIterator<(String, f64)> for Nutriments {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'de> Deserialize<'de> for Nutriments {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<BTreeMap<String, serde_json::Value>>::deserialize(deserializer)?
            .unwrap_or_default();
        Ok(raw
            .into_iter()
            .filter_map(|(key, value)| {
                let amount = match value {
                    serde_json::Value::Number(n) => n.as_f64(),
                    serde_json::Value::String(s) => s.trim().parse().ok(),
                    _ => None,
                };
                amount.map(|a| (key, a))
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn api_for(server: &MockServer) -> ProductsApi {
        OpenFoodClient::with_config(ClientConfig::default().with_base_url(server.uri()))
            .unwrap()
            .products()
    }

    #[test]
    fn test_product_deserialize() {
        let json = r#"{
            "code": "3017620422003",
            "product_name": "Nutella",
            "brands": "Ferrero, Nutella",
            "categories": "Spreads, Sweet spreads, Hazelnut spreads",
            "labels": "Green Dot,  No gluten",
            "nutrition_grades": "e",
            "nutriments": {
                "energy": 2252,
                "energy-kj": 2252,
                "energy_unit": "kJ",
                "fat": 30.9,
                "fat_100g": 30.9,
                "sugars": "56.3",
                "nova-group": 4
            }
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.code, "3017620422003");
        assert_eq!(product.display_name(), "Nutella");
        assert_eq!(product.nutrition_grade(), Some(NutritionGrade::E));
        assert_eq!(product.primary_brand(), Some("Ferrero"));
        assert_eq!(product.label_list(), vec!["Green Dot", "No gluten"]);
        assert_eq!(
            product.headline_categories(2).as_deref(),
            Some("Spreads, Sweet spreads")
        );
        assert_eq!(product.nutriments.get("sugars"), Some(56.3));
        assert_eq!(product.nutriments.get("energy_unit"), None);

        let extra: Vec<_> = product.nutriments.extra().collect();
        assert_eq!(extra, vec![("nova-group", 4.0)]);
    }

    #[test]
    fn test_product_absent_fields() {
        let product: Product =
            serde_json::from_str(r#"{"code": 737628064502, "product_name": "", "nutriments": null}"#)
                .unwrap();
        assert_eq!(product.code, "737628064502");
        assert_eq!(product.display_name(), "Unknown Product");
        assert!(product.image().is_none());
        assert!(product.nutrition_grade().is_none());
        assert!(product.category_list().is_empty());
        assert!(product.headline_categories(2).is_none());
        assert!(product.nutriments.is_empty());
    }

    #[test]
    fn test_nutrition_grade_parse() {
        assert_eq!("A".parse::<NutritionGrade>(), Ok(NutritionGrade::A));
        assert_eq!(" c ".parse::<NutritionGrade>(), Ok(NutritionGrade::C));
        assert!("unknown".parse::<NutritionGrade>().is_err());
        assert!("not-applicable".parse::<NutritionGrade>().is_err());
        assert_eq!(NutritionGrade::B.to_string(), "B");
    }

    #[test]
    fn test_known_nutrients_energy_fallback() {
        let nutriments: Nutriments = [("energy".to_string(), 1000.0), ("fat".to_string(), 3.5)]
            .into_iter()
            .collect();
        let known: Vec<_> = nutriments.known().collect();
        assert_eq!(known, vec![("Energy (kJ)", 1000.0), ("Fat", 3.5)]);
    }

    #[tokio::test]
    async fn test_lookup_not_found_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v0/product/0000000000000.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": "0000000000000",
                "status": 0,
                "status_verbose": "product not found"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let lookup = api_for(&server).await.by_barcode("0000000000000").await.unwrap();
        assert_eq!(lookup, ProductLookup::NotFound);
    }

    #[tokio::test]
    async fn test_lookup_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v0/product/3017620422003.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": 1,
                "product": {"code": "3017620422003", "product_name": "Nutella"}
            })))
            .mount(&server)
            .await;

        let product = api_for(&server)
            .await
            .by_barcode(" 3017620422003 ")
            .await
            .unwrap()
            .into_product()
            .unwrap();
        assert_eq!(product.display_name(), "Nutella");
    }

    #[tokio::test]
    async fn test_lookup_empty_barcode_is_validation_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = api_for(&server).await.by_barcode("  ").await.unwrap_err();
        assert!(err.is_validation());
    }
}
