//! `search`: run a query and print the result cards

use super::{print_json, Context};
use crate::output::{format_count, print_cards, Status};
use crate::progress::while_loading;
use anyhow::{bail, Result};
use openfood_explorer::{Action, FailureKind, LoadOutcome, SortDirection, SortKey};
use serde_json::json;

pub struct SearchArgs {
    pub query: Option<String>,
    pub category: Option<String>,
    pub pages: u32,
    pub sort: Option<SortKey>,
    pub desc: bool,
}

pub async fn run(ctx: &Context, args: SearchArgs) -> Result<()> {
    let mut order = ctx.sort_order()?;
    if let Some(key) = args.sort {
        order.key = key;
    }
    if args.desc {
        order.direction = SortDirection::Descending;
    }

    let coordinator = ctx.coordinator(order)?;
    coordinator.store().dispatch_batch([
        Action::SetCategory(args.category),
        Action::SetQuery(args.query.unwrap_or_default()),
    ]);

    let outcome = while_loading("Searching...", ctx.is_json(), coordinator.refresh()).await;
    check(outcome)?;

    for _ in 1..args.pages {
        if !coordinator.store().select(|s| s.has_more) {
            break;
        }
        let outcome = while_loading("Loading more...", ctx.is_json(), coordinator.load_more()).await;
        check(outcome)?;
    }

    let state = coordinator.store().snapshot();
    if ctx.is_json() {
        return print_json(&json!({
            "query": state.query,
            "category": state.category,
            "sort": state.sort,
            "page": state.page,
            "has_more": state.has_more,
            "products": state.visible_products(),
        }));
    }

    let title = match (state.query.trim(), state.category.as_deref()) {
        ("", Some(category)) => format!("Category {category}"),
        ("", None) => "All products".to_string(),
        (query, _) => format!("Results for \"{query}\""),
    };
    Status::header(&title);

    if state.products.is_empty() {
        Status::info("No products found");
        return Ok(());
    }
    print_cards(state.visible_products());
    println!();
    Status::info(&format!(
        "Showing {} (page {}, sorted by {}){}",
        format_count(state.products.len(), "product", "products"),
        state.page,
        state.sort,
        if state.has_more { "" } else { ", no more pages" }
    ));
    Ok(())
}

/// Turn a failed fetch into an error that keeps its exit code
fn check(outcome: LoadOutcome) -> Result<()> {
    match outcome {
        LoadOutcome::Failed { kind: FailureKind::Network, message } => {
            Err(openfood_core::Error::network(message).into())
        }
        LoadOutcome::Failed { kind: FailureKind::Validation, message } => {
            Err(openfood_core::Error::validation(message).into())
        }
        LoadOutcome::Failed { message, .. } => bail!(message),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openfood_core::ErrorCode;

    fn failed(kind: FailureKind) -> anyhow::Error {
        check(LoadOutcome::Failed { kind, message: "API error (503): busy".into() }).unwrap_err()
    }

    #[test]
    fn test_failed_fetch_keeps_error_class() {
        let err = failed(FailureKind::Network);
        let core = err.downcast_ref::<openfood_core::Error>().unwrap();
        assert_eq!(core.code, ErrorCode::NetworkError);
        assert_eq!(core.message, "API error (503): busy");

        let err = failed(FailureKind::Validation);
        let core = err.downcast_ref::<openfood_core::Error>().unwrap();
        assert_eq!(core.code, ErrorCode::ValidationError);

        assert!(failed(FailureKind::Other).downcast_ref::<openfood_core::Error>().is_none());
        assert!(check(LoadOutcome::Stale).is_ok());
    }
}
