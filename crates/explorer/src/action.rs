//! Named state transitions

use crate::cart::CartItem;
use crate::sort::SortOrder;
use openfood_api_client::Product;

/// A discrete transition applied by [`crate::apply`]
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetLoading(bool),
    /// Stores the message and clears loading
    SetError(String),
    /// Replaces the list and clears loading and error
    SetProducts(Vec<Product>),
    /// Appends to the list and clears loading and error
    AppendProducts(Vec<Product>),
    SetQuery(String),
    SetCategory(Option<String>),
    SetSort(SortOrder),
    SetPage(u32),
    SetHasMore(bool),
    AddToCart(CartItem),
    RemoveFromCart(String),
    ClearCart,
}

impl Action {
    /// Short name for logging
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetLoading(_) => "set-loading",
            Self::SetError(_) => "set-error",
            Self::SetProducts(_) => "set-products",
            Self::AppendProducts(_) => "append-products",
            Self::SetQuery(_) => "set-query",
            Self::SetCategory(_) => "set-category",
            Self::SetSort(_) => "set-sort",
            Self::SetPage(_) => "set-page",
            Self::SetHasMore(_) => "set-has-more",
            Self::AddToCart(_) => "add-to-cart",
            Self::RemoveFromCart(_) => "remove-from-cart",
            Self::ClearCart => "clear-cart",
        }
    }

    /// Whether this action edits the query inputs (query, category or sort)
    #[must_use]
    pub fn is_query_input(&self) -> bool {
        matches!(
            self,
            Self::SetQuery(_) | Self::SetCategory(_) | Self::SetSort(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_inputs() {
        assert!(Action::SetQuery("milk".into()).is_query_input());
        assert!(Action::SetCategory(None).is_query_input());
        assert!(Action::SetSort(SortOrder::default()).is_query_input());
        assert!(!Action::SetPage(3).is_query_input());
        assert!(!Action::ClearCart.is_query_input());
    }

    #[test]
    fn test_names() {
        assert_eq!(Action::SetHasMore(true).name(), "set-has-more");
        assert_eq!(Action::RemoveFromCart("1".into()).name(), "remove-from-cart");
    }
}
