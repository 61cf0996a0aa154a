//! openfood - terminal explorer for the Open Food Facts catalog
//!
//! Search products by name or category, page through results, inspect
//! nutrition facts and keep a session cart.

use clap::{Parser, Subcommand};
use openfood_api_client::ApiError;
use openfood_core::error::{exit_codes, ErrorReport};
use openfood_core::{Error, ErrorCode};
use openfood_explorer::SortKey;
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod output;
mod progress;
mod telemetry;

use commands::{browse, categories, product, search, Context, OutputFormat};

/// Explore the Open Food Facts product catalog
#[derive(Parser)]
#[command(name = "openfood")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Configuration file (defaults to .openfood.toml or the user config dir)
    #[arg(short, long, global = true, env = "OPENFOOD_CONFIG")]
    config: Option<PathBuf>,

    /// Emit logs as JSON on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search products by name or category
    Search {
        /// Free-text query; empty lists all products
        query: Option<String>,

        /// Category id, e.g. en:breakfast-cereals (ignored when a query is given)
        #[arg(short = 'C', long)]
        category: Option<String>,

        /// Number of pages to load
        #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..=50))]
        pages: u32,

        /// Sort key: name or grade
        #[arg(short, long)]
        sort: Option<SortKey>,

        /// Sort descending
        #[arg(long)]
        desc: bool,
    },

    /// Show product details for a barcode
    Product {
        /// Product barcode
        barcode: String,
    },

    /// List product categories
    Categories {
        /// Maximum number of categories to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Interactive session with a cart
    Browse,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = telemetry::init_with_config(telemetry::TelemetryConfig::from_flags(
        cli.verbose,
        cli.log_json,
    )) {
        eprintln!("{} {}", "Warning:".yellow(), e);
    }

    let format = cli.format;
    let result = run(cli).await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if format == OutputFormat::Json {
                match serde_json::to_string_pretty(&error_report(&e)) {
                    Ok(json) => println!("{json}"),
                    Err(_) => eprintln!("{} {:#}", "Error:".red().bold(), e),
                }
            } else {
                eprintln!("{} {:#}", "Error:".red().bold(), e);
            }
            exit_code(&e)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let ctx = Context::load(cli.config.as_deref(), cli.format)?;

    match cli.command {
        Commands::Search {
            query,
            category,
            pages,
            sort,
            desc,
        } => {
            search::run(
                &ctx,
                search::SearchArgs {
                    query,
                    category,
                    pages,
                    sort,
                    desc,
                },
            )
            .await
        }
        Commands::Product { barcode } => product::run(&ctx, &barcode).await,
        Commands::Categories { limit } => categories::run(&ctx, limit).await,
        Commands::Browse => browse::run(&ctx).await,
    }
}

/// Serializable form of a command error for `--format json`
fn error_report(error: &anyhow::Error) -> ErrorReport {
    match error.downcast_ref::<Error>() {
        Some(e) => e.to_report(),
        None => Error::new(ErrorCode::Unknown, format!("{error:#}")).to_report(),
    }
}

fn exit_code(error: &anyhow::Error) -> ExitCode {
    let code = if let Some(e) = error.downcast_ref::<Error>() {
        match e.code.category() {
            "Configuration" => exit_codes::CONFIG_ERROR,
            "Validation" => exit_codes::VALIDATION_ERROR,
            "Network" => exit_codes::NETWORK_ERROR,
            _ => exit_codes::FAILURE,
        }
    } else if let Some(e) = error.downcast_ref::<ApiError>() {
        if e.is_validation() {
            exit_codes::VALIDATION_ERROR
        } else if e.is_transport() {
            exit_codes::NETWORK_ERROR
        } else {
            exit_codes::CONFIG_ERROR
        }
    } else {
        exit_codes::FAILURE
    };
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_report_for_foreign_errors() {
        let report = error_report(&anyhow::anyhow!("stdin closed"));
        assert_eq!(report.code, ErrorCode::Unknown);
        assert_eq!(report.message, "stdin closed");

        let err: anyhow::Error = Error::network("connection refused").into();
        let report = error_report(&err);
        assert_eq!(report.code_str, "E4000");
        assert!(report.suggestion.is_some());
    }
}
