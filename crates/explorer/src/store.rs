//! Observable state container
//!
//! A [`Store`] wraps an [`AppState`] in a `tokio::sync::watch` channel. Every
//! dispatch runs the pure reducer under the channel's lock and notifies
//! subscribers. Stores are plain values; share one with `Arc<Store>`.

use crate::action::Action;
use crate::state::{apply, AppState};
use openfood_api_client::Product;
use tokio::sync::watch;
use tracing::debug;

/// Injectable holder of the session state
#[derive(Debug)]
pub struct Store {
    tx: watch::Sender<AppState>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new(AppState::default())
    }
}

impl Store {
    #[must_use]
    pub fn new(initial: AppState) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Apply one action and notify subscribers
    pub fn dispatch(&self, action: Action) {
        debug!(action = action.name(), "Dispatch");
        self.tx.send_modify(|state| reduce(state, action));
    }

    /// Apply several actions as one update
    pub fn dispatch_batch(&self, actions: impl IntoIterator<Item = Action>) {
        self.tx.send_modify(|state| {
            for action in actions {
                debug!(action = action.name(), "Dispatch");
                reduce(state, action);
            }
        });
    }

    /// Decide on actions from the current state and apply them atomically
    ///
    /// `decide` runs under the store lock, so nothing can dispatch between
    /// the read and the write. It must not call back into the store.
    /// Subscribers are notified only when at least one action was applied.
    pub fn dispatch_with<R>(&self, decide: impl FnOnce(&AppState) -> (R, Vec<Action>)) -> R {
        let mut output = None;
        self.tx.send_if_modified(|state| {
            let (result, actions) = decide(state);
            output = Some(result);
            let modified = !actions.is_empty();
            for action in actions {
                debug!(action = action.name(), "Dispatch");
                reduce(state, action);
            }
            modified
        });
        // send_if_modified always runs the closure
        match output {
            Some(result) => result,
            None => unreachable!("dispatch_with closure did not run"),
        }
    }

    /// Clone of the current state
    #[must_use]
    pub fn snapshot(&self) -> AppState {
        self.tx.borrow().clone()
    }

    /// Read a slice of the current state
    pub fn select<T>(&self, f: impl FnOnce(&AppState) -> T) -> T {
        f(&self.tx.borrow())
    }

    /// Receiver that observes every committed update
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.tx.subscribe()
    }

    /// Product list in the current sort order
    #[must_use]
    pub fn visible_products(&self) -> Vec<Product> {
        self.select(|state| state.visible_products().into_iter().cloned().collect())
    }
}

fn reduce(state: &mut AppState, action: Action) {
    *state = apply(std::mem::take(state), action);
}
