//! Query coordination
//!
//! The [`QueryCoordinator`] watches the query inputs in the [`Store`] and
//! keeps the product list in step with them: a change to query, category or
//! sort replaces the list with page 1, and [`QueryCoordinator::load_more`]
//! appends the next page.
//!
//! Every fetch is stamped with a generation and the [`QuerySignature`] it was
//! started for. A completion whose generation has been superseded, or whose
//! signature no longer matches the store, is dropped without touching the
//! product list.

use crate::action::Action;
use crate::cart::CartItem;
use crate::sort::SortOrder;
use crate::state::{AppState, QuerySignature};
use crate::store::Store;
use openfood_api_client::{
    ApiError, ApiResult, Catalog, Category, Product, ProductLookup, ProductPage,
};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Which catalog lookup serves the current inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchPlan {
    /// Free-text search; wins over a selected category
    ByName(String),
    /// Category listing, used when the query is empty
    ByCategory(String),
    /// Unfiltered listing: no query and no category
    Default,
}

impl FetchPlan {
    #[must_use]
    pub fn from_state(state: &AppState) -> Self {
        let query = state.query.trim();
        if !query.is_empty() {
            return Self::ByName(query.to_string());
        }
        match state.category.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => Self::ByCategory(id.to_string()),
            _ => Self::Default,
        }
    }
}

/// Result of a refresh or load-more
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A page was stored
    Loaded { count: usize, has_more: bool },
    /// Load-more was refused: already loading or no more pages
    Skipped,
    /// The dispatched actions left the query inputs unchanged
    Unchanged,
    /// The inputs moved on while the request was in flight
    Stale,
    /// The request failed; the message is also in the state error field
    Failed { kind: FailureKind, message: String },
}

/// Coarse class of a failed fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Connection, HTTP status or payload problem
    Network,
    /// Rejected before any request was sent
    Validation,
    Other,
}

impl From<&ApiError> for FailureKind {
    fn from(err: &ApiError) -> Self {
        if err.is_transport() {
            Self::Network
        } else if err.is_validation() {
            Self::Validation
        } else {
            Self::Other
        }
    }
}

impl LoadOutcome {
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded { .. })
    }
}

#[derive(Debug, Clone)]
struct FetchTicket {
    generation: u64,
    signature: QuerySignature,
    plan: FetchPlan,
    page: u32,
}

/// Bridges the [`Store`] to a [`Catalog`]
pub struct QueryCoordinator<C: Catalog> {
    catalog: C,
    store: Arc<Store>,
    generation: AtomicU64,
    /// Set when the latest failed fetch was a next page
    failed_next_page: AtomicBool,
}

impl<C: Catalog> QueryCoordinator<C> {
    pub fn new(catalog: C, store: Arc<Store>) -> Self {
        Self {
            catalog,
            store,
            generation: AtomicU64::new(0),
            failed_next_page: AtomicBool::new(false),
        }
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Apply one action, refreshing the product list if the query inputs changed
    pub async fn dispatch(&self, action: Action) -> LoadOutcome {
        self.dispatch_all(vec![action]).await
    }

    /// Apply a batch of actions, then refresh at most once
    ///
    /// Re-submitting the current inputs after load-more also refreshes, since
    /// the page was reset to 1.
    pub async fn dispatch_all(&self, actions: Vec<Action>) -> LoadOutcome {
        let touches_inputs = actions.iter().any(Action::is_query_input);
        let before = self.store.select(|state| (state.signature(), state.page));
        self.store.dispatch_batch(actions);
        let after = self.store.select(|state| (state.signature(), state.page));

        if before.0 != after.0 || (touches_inputs && before.1 != after.1) {
            self.refresh().await
        } else {
            LoadOutcome::Unchanged
        }
    }

    /// Fetch page 1 for the current inputs and replace the product list
    ///
    /// Supersedes any request already in flight.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> LoadOutcome {
        let ticket = self.store.dispatch_with(|state| {
            let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            let ticket = FetchTicket {
                generation,
                signature: state.signature(),
                plan: FetchPlan::from_state(state),
                page: 1,
            };
            (ticket, vec![Action::SetLoading(true)])
        });

        debug!(generation = ticket.generation, plan = ?ticket.plan, "Refreshing product list");
        let result = self.fetch(&ticket).await;
        self.complete(ticket, result)
    }

    /// Manual retry after an error
    ///
    /// Repeats the fetch that failed: the next page after a failed
    /// [`load_more`](Self::load_more), page 1 otherwise.
    pub async fn retry(&self) -> LoadOutcome {
        if self.failed_next_page.load(Ordering::SeqCst) {
            self.load_more().await
        } else {
            self.refresh().await
        }
    }

    /// Fetch the next page and append it
    ///
    /// Ignored while a request is pending or once an empty page was seen.
    #[instrument(skip(self))]
    pub async fn load_more(&self) -> LoadOutcome {
        let ticket = self.store.dispatch_with(|state| {
            if !state.can_load_more() {
                return (None, Vec::new());
            }
            let ticket = FetchTicket {
                generation: self.generation.load(Ordering::SeqCst),
                signature: state.signature(),
                plan: FetchPlan::from_state(state),
                page: state.page.saturating_add(1),
            };
            (Some(ticket), vec![Action::SetLoading(true)])
        });

        let Some(ticket) = ticket else {
            debug!("Load more skipped");
            return LoadOutcome::Skipped;
        };

        debug!(generation = ticket.generation, page = ticket.page, "Loading next page");
        let result = self.fetch(&ticket).await;
        self.complete(ticket, result)
    }

    /// Search by name, clearing any selected category
    pub async fn search_name(&self, query: impl Into<String>) -> LoadOutcome {
        self.dispatch_all(vec![Action::SetQuery(query.into()), Action::SetCategory(None)])
            .await
    }

    /// Browse a category, clearing the query; `None` returns to the default listing
    pub async fn select_category(&self, category: Option<String>) -> LoadOutcome {
        self.dispatch_all(vec![Action::SetCategory(category), Action::SetQuery(String::new())])
            .await
    }

    pub async fn set_sort(&self, order: SortOrder) -> LoadOutcome {
        self.dispatch(Action::SetSort(order)).await
    }

    /// Add a product to the cart; products without a barcode are refused
    pub fn add_to_cart(&self, product: &Product) -> bool {
        match CartItem::from_product(product) {
            Some(item) => {
                self.store.dispatch(Action::AddToCart(item));
                true
            }
            None => false,
        }
    }

    /// Product detail lookup; leaves the product list alone
    pub async fn lookup(&self, barcode: &str) -> ApiResult<ProductLookup> {
        let result = self.catalog.get_by_identifier(barcode).await;
        if let Err(err) = &result {
            warn!(barcode, error = %err, "Product lookup failed");
        }
        result
    }

    /// The first `limit` categories
    pub async fn categories(&self, limit: usize) -> ApiResult<Vec<Category>> {
        let mut categories = self.catalog.list_categories().await?;
        categories.truncate(limit);
        Ok(categories)
    }

    async fn fetch(&self, ticket: &FetchTicket) -> ApiResult<ProductPage> {
        match &ticket.plan {
            FetchPlan::ByName(query) => self.catalog.search_by_name(query, ticket.page).await,
            FetchPlan::ByCategory(id) => self.catalog.search_by_category(id, ticket.page).await,
            FetchPlan::Default => self.catalog.search_by_name("", ticket.page).await,
        }
    }

    fn complete(&self, ticket: FetchTicket, result: ApiResult<ProductPage>) -> LoadOutcome {
        self.store.dispatch_with(|state| {
            if self.generation.load(Ordering::SeqCst) != ticket.generation {
                debug!(generation = ticket.generation, "Discarding superseded response");
                return (LoadOutcome::Stale, Vec::new());
            }
            if state.signature() != ticket.signature {
                // Inputs changed without a refresh; nobody else will clear loading
                debug!(generation = ticket.generation, "Discarding response for old inputs");
                return (LoadOutcome::Stale, vec![Action::SetLoading(false)]);
            }

            match result {
                Ok(page) => {
                    let count = page.len();
                    let has_more = !page.is_empty();
                    let list = if ticket.page == 1 {
                        Action::SetProducts(page.products)
                    } else {
                        Action::AppendProducts(page.products)
                    };
                    info!(page = ticket.page, count, has_more, "Products loaded");
                    self.failed_next_page.store(false, Ordering::SeqCst);
                    (
                        LoadOutcome::Loaded { count, has_more },
                        vec![list, Action::SetHasMore(has_more), Action::SetPage(ticket.page)],
                    )
                }
                Err(err) => {
                    let message = err.to_string();
                    warn!(page = ticket.page, error = %message, "Product fetch failed");
                    self.failed_next_page.store(ticket.page > 1, Ordering::SeqCst);
                    (
                        LoadOutcome::Failed {
                            kind: FailureKind::from(&err),
                            message: message.clone(),
                        },
                        vec![Action::SetError(message)],
                    )
                }
            }
        })
    }
}
