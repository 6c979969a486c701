//! shop-tally - Totals variant prices of a store's products by product type
//!
//! With no arguments, prints the total price of every Clock variant.

use anyhow::Result;
use clap::Parser;
use shop_tally::commands::TotalCommand;
use shop_tally::config::Config;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "shop-tally",
    version,
    about = "Totals variant prices of a store's products by product type",
    long_about = "Fetches every page of the store's products listing, keeps the products of one \
                  type, and prints the sum of all their variant prices rounded to cents."
)]
struct Cli {
    /// Product type to total (exact match)
    #[arg(short = 't', long)]
    product_type: Option<String>,

    /// Stop after this many pages
    #[arg(long)]
    max_pages: Option<u32>,

    /// Path to a TOML config file (none is read unless given)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries only the total. RUST_LOG is not read.
    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::new(level.to_string());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut config = Config::load(cli.config.as_deref())?;

    if let Some(product_type) = cli.product_type {
        config.product_type = product_type;
    }
    if cli.max_pages.is_some() {
        config.max_pages = cli.max_pages;
    }

    let report = TotalCommand::new(config).execute().await?;
    println!("{}", report);

    Ok(())
}
