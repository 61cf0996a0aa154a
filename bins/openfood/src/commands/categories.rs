//! `categories`: list catalog categories

use super::{print_json, Context};
use crate::output::{print_category, Status};
use crate::progress::while_loading;
use anyhow::Result;

pub async fn run(ctx: &Context, limit: Option<usize>) -> Result<()> {
    let limit = limit.unwrap_or_else(|| ctx.category_limit());
    let client = ctx.client()?;
    let categories =
        while_loading("Fetching categories...", ctx.is_json(), client.categories().top(limit))
            .await?;

    if ctx.is_json() {
        return print_json(&categories);
    }

    Status::header(&format!("Top {} by product count", categories.len()));
    for category in &categories {
        print_category(category);
    }
    Ok(())
}
