//! Store listing access: HTTP fetching, pagination, and data models.

pub mod client;
pub mod models;
pub mod paginator;

pub use client::{build_request_uri, FetchFailure, FetchOutcome, ShopClient, StoreFetch};
pub use models::{parse_price, Product, ProductsPage, Variant};
pub use paginator::{Catalog, Paginator, Termination};
