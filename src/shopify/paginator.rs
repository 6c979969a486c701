//! Walks the products listing page by page until it runs dry.

use crate::shopify::client::{FetchFailure, FetchOutcome, StoreFetch};
use crate::shopify::models::{Product, ProductsPage};
use anyhow::{Context, Result};
use tracing::{debug, warn};

/// Why pagination stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Termination {
    /// `page` returned an empty product list.
    Exhausted { page: u32 },
    /// `page` produced no data; later pages were never requested.
    FetchFailed { page: u32, reason: FetchFailure },
    /// The configured page limit was reached.
    PageLimit { max_pages: u32 },
}

/// Every product collected across the listing, in page order.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub products: Vec<Product>,
    pub pages_requested: u32,
    pub termination: Termination,
}

impl Catalog {
    /// True when the listing ended with a genuinely empty page.
    pub fn is_complete(&self) -> bool {
        matches!(self.termination, Termination::Exhausted { .. })
    }
}

/// Sequential paginator over a [`StoreFetch`].
pub struct Paginator<'a, F: StoreFetch + ?Sized> {
    fetcher: &'a F,
    max_pages: Option<u32>,
}

impl<'a, F: StoreFetch + ?Sized> Paginator<'a, F> {
    /// Creates an unbounded paginator.
    pub fn new(fetcher: &'a F) -> Self {
        Self { fetcher, max_pages: None }
    }

    /// Stops after `max_pages` requests when set.
    pub fn max_pages(mut self, max_pages: Option<u32>) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Fetches pages 1, 2, ... until one yields no products.
    ///
    /// A page that fails to fetch counts as empty. A page that fetches but is
    /// not a valid products document is an error.
    pub async fn collect(&self) -> Result<Catalog> {
        let mut products = Vec::new();
        let mut page: u32 = 1;

        loop {
            if let Some(max_pages) = self.max_pages {
                if page > max_pages {
                    debug!("Reached page limit of {}", max_pages);
                    return Ok(Catalog {
                        products,
                        pages_requested: page - 1,
                        termination: Termination::PageLimit { max_pages },
                    });
                }
            }

            debug!("Fetching page {}", page);

            let current = match self.fetcher.fetch_page(page).await {
                FetchOutcome::Body(body) => parse_page(&body, page)?,
                FetchOutcome::NoData(reason) => {
                    warn!("Page {} returned no data ({}), stopping", page, reason);
                    return Ok(Catalog {
                        products,
                        pages_requested: page,
                        termination: Termination::FetchFailed { page, reason },
                    });
                }
            };

            if current.is_empty() {
                debug!("No products on page {}, stopping", page);
                return Ok(Catalog {
                    products,
                    pages_requested: page,
                    termination: Termination::Exhausted { page },
                });
            }

            debug!("Page {} returned {} products", page, current.products.len());
            products.extend(current.products);
            page += 1;
        }
    }
}

fn parse_page(body: &str, page: u32) -> Result<ProductsPage> {
    serde_json::from_str(body).with_context(|| format!("Failed to parse products page {}", page))
}
