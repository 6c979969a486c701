//! Total command: fetch the whole listing, filter by type, sum variant prices.

use crate::aggregate::{filter_by_type, format_total, sum_prices};
use crate::config::Config;
use crate::shopify::{Paginator, ShopClient, StoreFetch, Termination};
use anyhow::{Context, Result};
use std::fmt;
use tracing::{debug, info, warn};

/// Outcome of a total run.
#[derive(Debug, Clone)]
pub struct TotalReport {
    /// Rounded sum of matching variant prices
    pub total: f64,
    /// Products of the requested type
    pub matched: usize,
    /// Products seen across all pages
    pub scanned: usize,
    /// How pagination ended
    pub termination: Termination,
}

impl fmt::Display for TotalReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_total(self.total))
    }
}

/// Computes the price total for one product type.
pub struct TotalCommand {
    config: Config,
}

impl TotalCommand {
    /// Creates a new total command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Runs against the configured store.
    pub async fn execute(&self) -> Result<TotalReport> {
        let client = ShopClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_client(&client).await
    }

    /// Runs with a provided fetcher (for testing).
    pub async fn execute_with_client(&self, client: &impl StoreFetch) -> Result<TotalReport> {
        info!("Totalling product type: {}", self.config.product_type);

        let catalog = Paginator::new(client).max_pages(self.config.max_pages).collect().await?;

        match &catalog.termination {
            Termination::Exhausted { page } => {
                debug!("Listing ended at page {}", page)
            }
            Termination::FetchFailed { page, reason } => {
                warn!("Page {} could not be fetched ({}); total may be incomplete", page, reason)
            }
            Termination::PageLimit { max_pages } => {
                warn!("Stopped at page limit {}; total may be incomplete", max_pages)
            }
        }

        let scanned = catalog.products.len();
        let matching = filter_by_type(catalog.products, &self.config.product_type);
        let total = sum_prices(&matching);

        info!(
            "{} of {} products matched across {} pages, total {}",
            matching.len(),
            scanned,
            catalog.pages_requested,
            format_total(total)
        );

        Ok(TotalReport {
            total,
            matched: matching.len(),
            scanned,
            termination: catalog.termination,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shopify::{FetchFailure, FetchOutcome};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    /// Mock store client for testing.
    struct MockStoreClient {
        pages: Vec<FetchOutcome>,
        call_count: Arc<AtomicU32>,
    }

    impl MockStoreClient {
        fn new(pages: Vec<&str>) -> Self {
            let outcomes = pages.into_iter().map(|p| FetchOutcome::Body(p.to_string())).collect();
            Self::with_outcomes(outcomes)
        }

        fn with_outcomes(pages: Vec<FetchOutcome>) -> Self {
            Self { pages, call_count: Arc::new(AtomicU32::new(0)) }
        }

        fn call_count(&self) -> u32 {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl StoreFetch for MockStoreClient {
        async fn fetch_page(&self, page: u32) -> FetchOutcome {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            self.pages
                .get((page - 1) as usize)
                .cloned()
                .unwrap_or_else(|| FetchOutcome::Body(r#"{"products": []}"#.to_string()))
        }
    }

    const MIXED_PAGE: &str = r#"{"products": [
        {"id": 1, "product_type": "Clock", "variants": [{"price": "40.44"}]},
        {"id": 20, "product_type": "Pants", "variants": [{"price": "20.01"}]},
        {"id": 2, "product_type": "Clock", "variants": [{"price": "30.33"}, {"price": "50.55"}]}
    ]}"#;

    const EMPTY_PAGE: &str = r#"{"products": []}"#;

    fn make_test_config(product_type: &str) -> Config {
        Config { product_type: product_type.to_string(), ..Config::default() }
    }

    #[tokio::test]
    async fn test_total_clocks() {
        let client = MockStoreClient::new(vec![MIXED_PAGE, EMPTY_PAGE]);
        let cmd = TotalCommand::new(make_test_config("Clock"));

        let report = cmd.execute_with_client(&client).await.unwrap();

        assert_eq!(report.total, 121.32);
        assert_eq!(report.matched, 2);
        assert_eq!(report.scanned, 3);
        assert_eq!(report.termination, Termination::Exhausted { page: 2 });
        assert_eq!(report.to_string(), "121.32");
        assert_eq!(client.call_count(), 2);
    }

    #[tokio::test]
    async fn test_total_pants() {
        let client = MockStoreClient::new(vec![MIXED_PAGE, EMPTY_PAGE]);
        let cmd = TotalCommand::new(make_test_config("Pants"));

        let report = cmd.execute_with_client(&client).await.unwrap();

        assert_eq!(report.total, 20.01);
        assert_eq!(report.matched, 1);
    }

    #[tokio::test]
    async fn test_total_across_pages() {
        let page_two = r#"{"products": [
            {"id": 3, "product_type": "Clock", "variants": [{"price": "9.99"}]}
        ]}"#;
        let client = MockStoreClient::new(vec![MIXED_PAGE, page_two, EMPTY_PAGE]);
        let cmd = TotalCommand::new(make_test_config("Clock"));

        let report = cmd.execute_with_client(&client).await.unwrap();

        assert_eq!(report.total, 131.31);
        assert_eq!(report.matched, 3);
        assert_eq!(client.call_count(), 3);
    }

    #[tokio::test]
    async fn test_total_rounds_halfway_up() {
        let page = r#"{"products": [
            {"id": 1, "product_type": "Clock", "variants": [{"price": "100.00"}]},
            {"id": 2, "product_type": "Clock", "variants": [{"price": "41.325"}]}
        ]}"#;
        let client = MockStoreClient::new(vec![page, EMPTY_PAGE]);
        let cmd = TotalCommand::new(make_test_config("Clock"));

        let report = cmd.execute_with_client(&client).await.unwrap();

        assert_eq!(report.to_string(), "141.33");
    }

    #[tokio::test]
    async fn test_total_skips_non_string_types() {
        let page = r#"{"products": [
            {"id": "a", "product_type": 5, "variants": [{"price": "99.99"}]},
            {"id": "b", "product_type": "Clock", "variants": [{"price": "40.44", "sku": 7}]}
        ]}"#;
        let client = MockStoreClient::new(vec![page, EMPTY_PAGE]);
        let cmd = TotalCommand::new(make_test_config("Clock"));

        let report = cmd.execute_with_client(&client).await.unwrap();

        assert_eq!(report.to_string(), "40.44");
        assert_eq!(report.matched, 1);
        assert_eq!(report.scanned, 2);
    }

    #[tokio::test]
    async fn test_total_no_matches() {
        let client = MockStoreClient::new(vec![MIXED_PAGE, EMPTY_PAGE]);
        let cmd = TotalCommand::new(make_test_config("Watch"));

        let report = cmd.execute_with_client(&client).await.unwrap();

        assert_eq!(report.total, 0.0);
        assert_eq!(report.matched, 0);
        assert_eq!(report.to_string(), "0.0");
    }

    #[tokio::test]
    async fn test_total_truncated_by_failed_fetch() {
        let client = MockStoreClient::with_outcomes(vec![
            FetchOutcome::Body(MIXED_PAGE.to_string()),
            FetchOutcome::NoData(FetchFailure::Status(503)),
            FetchOutcome::Body(MIXED_PAGE.to_string()),
        ]);
        let cmd = TotalCommand::new(make_test_config("Clock"));

        let report = cmd.execute_with_client(&client).await.unwrap();

        assert_eq!(report.total, 121.32);
        assert_eq!(client.call_count(), 2);
        assert_eq!(
            report.termination,
            Termination::FetchFailed { page: 2, reason: FetchFailure::Status(503) }
        );
    }

    #[tokio::test]
    async fn test_total_respects_page_limit() {
        let client = MockStoreClient::new(vec![MIXED_PAGE, MIXED_PAGE, MIXED_PAGE]);
        let mut config = make_test_config("Clock");
        config.max_pages = Some(1);
        let cmd = TotalCommand::new(config);

        let report = cmd.execute_with_client(&client).await.unwrap();

        assert_eq!(report.total, 121.32);
        assert_eq!(client.call_count(), 1);
        assert_eq!(report.termination, Termination::PageLimit { max_pages: 1 });
    }

    #[tokio::test]
    async fn test_total_malformed_page_fails() {
        let client = MockStoreClient::new(vec!["not json"]);
        let cmd = TotalCommand::new(make_test_config("Clock"));

        let result = cmd.execute_with_client(&client).await;

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Failed to parse products page 1"));
    }
}
