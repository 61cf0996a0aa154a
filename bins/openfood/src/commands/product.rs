//! `product`: detail view for one barcode

use super::{print_json, Context};
use crate::output::{print_product, Status};
use crate::progress::while_loading;
use anyhow::Result;
use openfood_api_client::ProductLookup;
use serde_json::json;

pub async fn run(ctx: &Context, barcode: &str) -> Result<()> {
    let client = ctx.client()?;
    let lookup = while_loading(
        "Looking up product...",
        ctx.is_json(),
        client.products().by_barcode(barcode),
    )
    .await?;

    match (lookup, ctx.is_json()) {
        (ProductLookup::Found(product), true) => print_json(&product),
        (ProductLookup::NotFound, true) => {
            print_json(&json!({ "code": barcode.trim(), "status": "not_found" }))
        }
        (ProductLookup::Found(product), false) => {
            print_product(&product);
            Ok(())
        }
        (ProductLookup::NotFound, false) => {
            Status::warning("Product not found");
            Ok(())
        }
    }
}
