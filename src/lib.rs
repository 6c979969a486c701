//! shop-tally - Totals variant prices of a store's products by product type
//!
//! Pages through a store's public `products.json` listing, keeps the products
//! of one type, and sums the prices of all their variants.

pub mod aggregate;
pub mod commands;
pub mod config;
pub mod filters;
pub mod shopify;

pub use aggregate::{filter_by_type, format_total, sum_prices};
pub use config::Config;
pub use shopify::{Product, Variant};
