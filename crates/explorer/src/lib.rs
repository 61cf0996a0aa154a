//! Client-side state for browsing the Open Food Facts catalog
//!
//! - [`state`]: the [`AppState`] aggregate and the pure [`apply`] reducer
//! - [`store`]: an injectable, observable container around the reducer
//! - [`sort`]: read-time ordering of the fetched product list
//! - [`coordinator`]: turns query changes into catalog fetches
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use openfood_api_client::OpenFoodClient;
//! use openfood_explorer::{Action, QueryCoordinator, Store};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(Store::default());
//! let coordinator = QueryCoordinator::new(OpenFoodClient::new()?, Arc::clone(&store));
//!
//! coordinator.dispatch(Action::SetQuery("milk".into())).await;
//! coordinator.load_more().await;
//!
//! for product in store.visible_products() {
//!     println!("{}", product.display_name());
//! }
//! # Ok(())
//! # }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod action;
pub mod cart;
pub mod coordinator;
pub mod sort;
pub mod state;
pub mod store;

pub use action::Action;
pub use cart::{Cart, CartItem};
pub use coordinator::{FailureKind, FetchPlan, LoadOutcome, QueryCoordinator};
pub use sort::{SortDirection, SortKey, SortOrder};
pub use state::{apply, AppState, QuerySignature};
pub use store::Store;
