//! Application state and its reducer
//!
//! [`apply`] is the only way state changes. It is total: every action is
//! defined for every state and none can fail.

use crate::action::Action;
use crate::cart::Cart;
use crate::sort::{sorted, SortOrder};
use openfood_api_client::Product;
use serde::Serialize;

/// Session state for one explorer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppState {
    pub query: String,
    pub category: Option<String>,
    pub sort: SortOrder,
    /// 1-based number of the last page fetched
    pub page: u32,
    pub has_more: bool,
    /// Arrival order; see [`AppState::visible_products`] for display order
    pub products: Vec<Product>,
    pub loading: bool,
    pub error: Option<String>,
    pub cart: Cart,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            query: String::new(),
            category: None,
            sort: SortOrder::default(),
            page: 1,
            has_more: true,
            products: Vec::new(),
            loading: false,
            error: None,
            cart: Cart::default(),
        }
    }
}

/// The query inputs a product list was fetched for
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuerySignature {
    pub query: String,
    pub category: Option<String>,
    pub sort: SortOrder,
}

impl AppState {
    /// Create state with an initial sort order
    #[must_use]
    pub fn with_sort(sort: SortOrder) -> Self {
        Self {
            sort,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn signature(&self) -> QuerySignature {
        QuerySignature {
            query: self.query.clone(),
            category: self.category.clone(),
            sort: self.sort,
        }
    }

    /// Whether a load-more request may start now
    #[must_use]
    pub fn can_load_more(&self) -> bool {
        !self.loading && self.has_more
    }

    /// Products in display order
    #[must_use]
    pub fn visible_products(&self) -> Vec<&Product> {
        sorted(&self.products, self.sort)
    }
}

/// Apply one action, returning the next state
#[must_use]
pub fn apply(mut state: AppState, action: Action) -> AppState {
    match action {
        Action::SetLoading(loading) => state.loading = loading,
        Action::SetError(message) => {
            state.error = Some(message);
            state.loading = false;
        }
        Action::SetProducts(products) => {
            state.products = products;
            state.loading = false;
            state.error = None;
        }
        Action::AppendProducts(products) => {
            state.products.extend(products);
            state.loading = false;
            state.error = None;
        }
        Action::SetQuery(query) => {
            state.query = query;
            state.page = 1;
        }
        Action::SetCategory(category) => {
            state.category = category;
            state.page = 1;
        }
        Action::SetSort(sort) => {
            state.sort = sort;
            state.page = 1;
        }
        Action::SetPage(page) => state.page = page,
        Action::SetHasMore(has_more) => state.has_more = has_more,
        Action::AddToCart(item) => state.cart.add(item),
        Action::RemoveFromCart(id) => state.cart.remove(&id),
        Action::ClearCart => state.cart.clear(),
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartItem;
    use crate::sort::{SortDirection, SortKey};
    use proptest::prelude::*;
    use std::collections::HashMap;

    fn product(code: &str) -> Product {
        Product {
            code: code.to_string(),
            product_name: Some(format!("Product {code}")),
            ..Product::default()
        }
    }

    fn item(id: &str) -> CartItem {
        CartItem {
            id: id.to_string(),
            name: format!("Product {id}"),
            image: None,
            unit_price: 0.0,
            quantity: 1,
        }
    }

    fn run(actions: impl IntoIterator<Item = Action>) -> AppState {
        actions.into_iter().fold(AppState::default(), apply)
    }

    #[test]
    fn test_default_state() {
        let state = AppState::default();
        assert_eq!(state.page, 1);
        assert!(state.has_more);
        assert!(!state.loading);
        assert!(state.can_load_more());
        assert!(state.products.is_empty());
    }

    #[test]
    fn test_set_error_clears_loading() {
        let state = run([
            Action::SetLoading(true),
            Action::SetError("connection refused".into()),
        ]);
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("connection refused"));
    }

    #[test]
    fn test_products_replace_and_append() {
        let state = run([
            Action::SetProducts(vec![product("1"), product("2")]),
            Action::AppendProducts(vec![product("2"), product("3")]),
        ]);
        let codes: Vec<&str> = state.products.iter().map(|p| p.code.as_str()).collect();
        assert_eq!(codes, vec!["1", "2", "2", "3"]);

        let state = apply(state, Action::SetProducts(vec![product("9")]));
        assert_eq!(state.products.len(), 1);
    }

    #[test]
    fn test_products_clear_loading_and_error() {
        let state = run([
            Action::SetError("timeout".into()),
            Action::SetLoading(true),
            Action::AppendProducts(Vec::new()),
        ]);
        assert!(!state.loading);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_add_to_cart_never_duplicates() {
        let state = run([Action::AddToCart(item("a")), Action::AddToCart(item("b"))]);
        let before = state.cart.len();
        let state = apply(state, Action::AddToCart(item("a")));
        assert_eq!(state.cart.len(), before);
        assert_eq!(state.cart.get("a").map(|i| i.quantity), Some(2));
    }

    #[test]
    fn test_visible_products_follow_sort() {
        let mut banana = product("1");
        banana.product_name = Some("Banana".into());
        let mut apple = product("2");
        apple.product_name = Some("apple".into());

        let state = run([
            Action::SetProducts(vec![banana, apple]),
            Action::SetSort(SortOrder::new(SortKey::Name, SortDirection::Descending)),
        ]);
        let visible: Vec<&str> = state.visible_products().iter().map(|p| p.code.as_str()).collect();
        assert_eq!(visible, vec!["1", "2"]);
        assert_eq!(state.products[0].code, "1");
    }

    #[test]
    fn test_signature_tracks_query_inputs_only() {
        let state = run([Action::SetQuery("milk".into())]);
        let signature = state.signature();
        let state = run([
            Action::SetQuery("milk".into()),
            Action::SetPage(4),
            Action::SetLoading(true),
        ]);
        assert_eq!(state.signature(), signature);
    }

    fn cart_action() -> impl Strategy<Value = Action> {
        let id = prop::sample::select(vec!["a", "b", "c"]);
        prop_oneof![
            4 => id.clone().prop_map(|id| Action::AddToCart(item(id))),
            1 => id.prop_map(|id| Action::RemoveFromCart(id.to_string())),
            1 => Just(Action::ClearCart),
        ]
    }

    fn any_action() -> impl Strategy<Value = Action> {
        prop_oneof![
            any::<bool>().prop_map(Action::SetLoading),
            "[a-z]{0,6}".prop_map(Action::SetError),
            "[a-z]{0,6}".prop_map(Action::SetQuery),
            prop::option::of("en:[a-z]{1,6}").prop_map(Action::SetCategory),
            (1u32..50).prop_map(Action::SetPage),
            any::<bool>().prop_map(Action::SetHasMore),
            Just(Action::SetSort(SortOrder::new(
                SortKey::NutritionGrade,
                SortDirection::Descending
            ))),
            cart_action(),
        ]
    }

    proptest! {
        #[test]
        fn prop_cart_quantity_counts_adds(actions in prop::collection::vec(cart_action(), 0..60)) {
            let mut expected: HashMap<String, u32> = HashMap::new();
            let mut state = AppState::default();
            for action in actions {
                match &action {
                    Action::AddToCart(item) => *expected.entry(item.id.clone()).or_default() += 1,
                    Action::RemoveFromCart(id) => { expected.remove(id); }
                    Action::ClearCart => expected.clear(),
                    _ => {}
                }
                state = apply(state, action);
            }

            prop_assert_eq!(state.cart.len(), expected.len());
            for line in state.cart.items() {
                prop_assert!(line.quantity >= 1);
                prop_assert_eq!(Some(&line.quantity), expected.get(&line.id));
            }
        }

        #[test]
        fn prop_query_inputs_reset_page(
            prefix in prop::collection::vec(any_action(), 0..20),
            page in 2u32..100,
            input in prop_oneof![
                "[a-z]{0,6}".prop_map(Action::SetQuery),
                prop::option::of("en:[a-z]{1,6}").prop_map(Action::SetCategory),
                Just(Action::SetSort(SortOrder::default())),
            ],
        ) {
            let state = prefix.into_iter().fold(AppState::default(), apply);
            let state = apply(state, Action::SetPage(page));
            let state = apply(state, input);
            prop_assert_eq!(state.page, 1);
        }
    }
}
