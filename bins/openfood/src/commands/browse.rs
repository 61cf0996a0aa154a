//! `browse`: interactive session over one store
//!
//! Reads commands line by line from stdin. List positions refer to the
//! sorted view as last printed, starting at 1.

use super::Context;
use crate::output::{print_cards, print_cart, print_product, Status};
use crate::progress::while_loading;
use anyhow::Result;
use openfood_api_client::{OpenFoodClient, ProductLookup};
use openfood_explorer::{Action, LoadOutcome, QueryCoordinator, SortDirection, SortKey, SortOrder};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
Commands:
  search <text>           search products by name
  category <id>|all       browse a category, or return to all products
  sort name|grade [asc|desc]
                          change the order; repeating a key flips it
  more                    load the next page
  retry                   repeat the fetch that failed
  show <n>|<barcode>      product details
  add <n>                 add a listed product to the cart
  remove <barcode>        remove a product from the cart
  cart                    show the cart
  clear                   empty the cart
  help                    this text
  quit                    leave";

/// A parsed input line
#[derive(Debug, Clone, PartialEq)]
pub enum BrowseCommand {
    Search(String),
    Category(Option<String>),
    Sort(SortKey, Option<SortDirection>),
    More,
    Retry,
    Show(Target),
    Add(usize),
    Remove(String),
    Cart,
    Clear,
    Help,
    Quit,
}

/// A product reference typed by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Position(usize),
    Barcode(String),
}

impl Target {
    fn parse(raw: &str) -> Self {
        match raw.parse::<usize>() {
            Ok(n) if raw.len() < 6 => Self::Position(n),
            _ => Self::Barcode(raw.to_string()),
        }
    }
}

impl BrowseCommand {
    /// Parse one line; empty lines are `None`
    pub fn parse(line: &str) -> Option<Result<Self, String>> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "search" | "s" => Ok(Self::Search(rest.to_string())),
            "category" | "c" => match rest {
                "" => Err("usage: category <id>|all".to_string()),
                "all" => Ok(Self::Category(None)),
                id => Ok(Self::Category(Some(id.to_string()))),
            },
            "sort" => parse_sort(rest),
            "more" | "m" => Ok(Self::More),
            "retry" => Ok(Self::Retry),
            "show" => match rest {
                "" => Err("usage: show <n>|<barcode>".to_string()),
                raw => Ok(Self::Show(Target::parse(raw))),
            },
            "add" => rest
                .parse::<usize>()
                .map(Self::Add)
                .map_err(|_| "usage: add <n>".to_string()),
            "remove" | "rm" => match rest {
                "" => Err("usage: remove <barcode>".to_string()),
                id => Ok(Self::Remove(id.to_string())),
            },
            "cart" => Ok(Self::Cart),
            "clear" => Ok(Self::Clear),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(format!("unknown command `{other}`, try `help`")),
        };
        Some(command)
    }
}

fn parse_sort(rest: &str) -> Result<BrowseCommand, String> {
    let mut parts = rest.split_whitespace();
    let key = parts
        .next()
        .ok_or_else(|| "usage: sort name|grade [asc|desc]".to_string())?
        .parse::<SortKey>()
        .map_err(|e| e.message)?;
    let direction = parts
        .next()
        .map(str::parse::<SortDirection>)
        .transpose()
        .map_err(|e| e.message)?;
    Ok(BrowseCommand::Sort(key, direction))
}

/// Sort order after a `sort` command
pub fn next_order(current: SortOrder, key: SortKey, direction: Option<SortDirection>) -> SortOrder {
    let direction = match direction {
        Some(direction) => direction,
        None if key == current.key => current.direction.toggled(),
        None => SortDirection::Ascending,
    };
    SortOrder::new(key, direction)
}

pub async fn run(ctx: &Context) -> Result<()> {
    let coordinator = ctx.coordinator(ctx.sort_order()?)?;

    Status::header("Open Food explorer");
    println!("{HELP}");
    report(&coordinator, while_loading("Loading...", false, coordinator.refresh()).await);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        match BrowseCommand::parse(&line) {
            None => {}
            Some(Err(message)) => Status::warning(&message),
            Some(Ok(BrowseCommand::Quit)) => break,
            Some(Ok(command)) => execute(&coordinator, command).await,
        }
    }
    Ok(())
}

async fn execute(coordinator: &QueryCoordinator<OpenFoodClient>, command: BrowseCommand) {
    match command {
        BrowseCommand::Search(query) => {
            let outcome = while_loading("Loading...", false, coordinator.search_name(query)).await;
            report(coordinator, outcome);
        }
        BrowseCommand::Category(category) => {
            let outcome = while_loading("Loading...", false, coordinator.select_category(category)).await;
            report(coordinator, outcome);
        }
        BrowseCommand::Sort(key, direction) => {
            let order = next_order(coordinator.store().select(|s| s.sort), key, direction);
            let outcome = while_loading("Loading...", false, coordinator.set_sort(order)).await;
            report(coordinator, outcome);
        }
        BrowseCommand::More => {
            let outcome = while_loading("Loading...", false, coordinator.load_more()).await;
            if outcome == LoadOutcome::Skipped {
                Status::info("No more pages");
            } else {
                report(coordinator, outcome);
            }
        }
        BrowseCommand::Retry => {
            let outcome = while_loading("Loading...", false, coordinator.retry()).await;
            report(coordinator, outcome);
        }
        BrowseCommand::Show(target) => show(coordinator, target).await,
        BrowseCommand::Add(position) => match listed(coordinator, position) {
            Some(product) if coordinator.add_to_cart(&product) => {
                Status::success(&format!("Added {} to cart", product.display_name()));
            }
            Some(_) => Status::warning("This product has no barcode and cannot be added"),
            None => Status::warning(&format!("No product at position {position}")),
        },
        BrowseCommand::Remove(id) => {
            coordinator.store().dispatch(Action::RemoveFromCart(id));
            print_cart(&coordinator.store().select(|s| s.cart.clone()));
        }
        BrowseCommand::Cart => print_cart(&coordinator.store().select(|s| s.cart.clone())),
        BrowseCommand::Clear => {
            coordinator.store().dispatch(Action::ClearCart);
            Status::success("Cart cleared");
        }
        BrowseCommand::Help => println!("{HELP}"),
        BrowseCommand::Quit => {}
    }
}

async fn show(coordinator: &QueryCoordinator<OpenFoodClient>, target: Target) {
    let barcode = match target {
        Target::Barcode(barcode) => barcode,
        Target::Position(position) => match listed(coordinator, position) {
            Some(product) => product.code,
            None => {
                Status::warning(&format!("No product at position {position}"));
                return;
            }
        },
    };

    let lookup = while_loading("Looking up product...", false, coordinator.lookup(&barcode)).await;
    match lookup {
        Ok(ProductLookup::Found(product)) => print_product(&product),
        Ok(ProductLookup::NotFound) => Status::warning("Product not found"),
        Err(err) => Status::error(&err.to_string()),
    }
}

fn listed(
    coordinator: &QueryCoordinator<OpenFoodClient>,
    position: usize,
) -> Option<openfood_api_client::Product> {
    let index = position.checked_sub(1)?;
    coordinator.store().visible_products().into_iter().nth(index)
}

fn report(coordinator: &QueryCoordinator<OpenFoodClient>, outcome: LoadOutcome) {
    match outcome {
        LoadOutcome::Failed { message, .. } => {
            Status::error(&message);
            Status::info("Type `retry` to try again");
        }
        LoadOutcome::Unchanged => Status::info("Nothing changed"),
        LoadOutcome::Skipped | LoadOutcome::Stale => {}
        LoadOutcome::Loaded { .. } => {
            let state = coordinator.store().snapshot();
            if state.products.is_empty() {
                Status::info("No products found");
                return;
            }
            print_cards(state.visible_products());
            let more = if state.has_more { ", `more` for the next page" } else { "" };
            Status::info(&format!(
                "{} products, page {}, sorted by {}{more}",
                state.products.len(),
                state.page,
                state.sort
            ));
        }
    }
}

fn prompt() -> Result<()> {
    print!("openfood> ");
    std::io::stdout().flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> BrowseCommand {
        BrowseCommand::parse(line).unwrap().unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse("search whole milk"), BrowseCommand::Search("whole milk".into()));
        assert_eq!(parse("category all"), BrowseCommand::Category(None));
        assert_eq!(
            parse("c en:cheeses"),
            BrowseCommand::Category(Some("en:cheeses".into()))
        );
        assert_eq!(parse("  MORE "), BrowseCommand::More);
        assert_eq!(parse("show 3"), BrowseCommand::Show(Target::Position(3)));
        assert_eq!(
            parse("show 3017620422003"),
            BrowseCommand::Show(Target::Barcode("3017620422003".into()))
        );
        assert_eq!(parse("add 2"), BrowseCommand::Add(2));
        assert_eq!(parse("quit"), BrowseCommand::Quit);
    }

    #[test]
    fn test_parse_sort() {
        assert_eq!(
            parse("sort grade desc"),
            BrowseCommand::Sort(SortKey::NutritionGrade, Some(SortDirection::Descending))
        );
        assert_eq!(parse("sort name"), BrowseCommand::Sort(SortKey::Name, None));
        assert!(BrowseCommand::parse("sort price").unwrap().is_err());
    }

    #[test]
    fn test_parse_errors() {
        assert!(BrowseCommand::parse("   ").is_none());
        assert!(BrowseCommand::parse("add two").unwrap().is_err());
        assert!(BrowseCommand::parse("category").unwrap().is_err());
        assert!(BrowseCommand::parse("dance").unwrap().is_err());
    }

    #[test]
    fn test_repeated_sort_key_flips_direction() {
        let current = SortOrder::default();
        let flipped = next_order(current, SortKey::Name, None);
        assert_eq!(flipped.direction, SortDirection::Descending);

        let other = next_order(flipped, SortKey::NutritionGrade, None);
        assert_eq!(other.direction, SortDirection::Ascending);

        let explicit = next_order(current, SortKey::Name, Some(SortDirection::Ascending));
        assert_eq!(explicit, current);
    }
}
