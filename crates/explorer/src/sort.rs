//! Read-time ordering of the product list
//!
//! Sorting never reaches the catalog: the fetched list keeps arrival order
//! and views are sorted on demand. Keys are compared as strings with absent
//! values treated as empty.

use openfood_api_client::Product;
use openfood_core::config::BrowseConfig;
use openfood_core::{Error, Result};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Field used to order products
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Product display name
    #[default]
    Name,
    /// Nutri-Score letter
    NutritionGrade,
}

impl SortKey {
    fn extract(self, product: &Product) -> &str {
        let value = match self {
            Self::Name => product.product_name.as_deref(),
            Self::NutritionGrade => product.nutrition_grades.as_deref(),
        };
        value.unwrap_or("")
    }
}

impl FromStr for SortKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "nutrition-grade" | "nutrition" | "grade" => Ok(Self::NutritionGrade),
            other => Err(Error::validation(format!("Unknown sort key: {other}"))
                .with_suggestion("Use `name` or `nutrition-grade`")),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Name => "name",
            Self::NutritionGrade => "nutrition-grade",
        })
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// The opposite direction
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

impl FromStr for SortDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            other => Err(Error::validation(format!("Unknown sort direction: {other}"))
                .with_suggestion("Use `asc` or `desc`")),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        })
    }
}

/// Sort key and direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct SortOrder {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortOrder {
    /// Create a sort order
    #[must_use]
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Parse the `[browse]` section of the config file
    pub fn from_config(config: &BrowseConfig) -> Result<Self> {
        Ok(Self {
            key: config.sort.parse()?,
            direction: config.direction.parse()?,
        })
    }

    /// Compare two products under this order
    #[must_use]
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        self.direction
            .apply(locale_cmp(self.key.extract(a), self.key.extract(b)))
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.key, self.direction)
    }
}

/// Sort a product slice for display, keeping arrival order among equals
#[must_use]
pub fn sorted(products: &[Product], order: SortOrder) -> Vec<&Product> {
    let mut view: Vec<&Product> = products.iter().collect();
    view.sort_by(|a, b| order.compare(a, b));
    view
}

/// Locale-style string comparison
///
/// Letters compare case-insensitively first; on a case-only difference the
/// lower-case form sorts first. The empty string sorts before everything.
/// Accents are not folded: accented letters order by code point, after the
/// ASCII alphabet.
#[must_use]
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let primary = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    primary.then_with(|| case_cmp(a, b))
}

fn case_cmp(a: &str, b: &str) -> Ordering {
    for (x, y) in a.chars().zip(b.chars()) {
        if x != y {
            return match (x.is_lowercase(), y.is_lowercase()) {
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                _ => x.cmp(&y),
            };
        }
    }
    a.len().cmp(&b.len())
}
