//! HTTP client for the store's paginated products endpoint.

use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};
use wreq::Client;

/// Why a request produced no data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchFailure {
    /// The server answered with a non-2xx status.
    #[error("server returned status {0}")]
    Status(u16),
    /// The request never completed (timeout, DNS, refused connection, broken body).
    #[error("request failed: {0}")]
    Transport(String),
}

/// Result of a single GET. Failures are values, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Body of a 2xx response
    Body(String),
    /// Nothing usable came back
    NoData(FetchFailure),
}

/// Attaches URL-encoded query parameters to `base_url`.
///
/// Keys and values are percent-encoded, so a space becomes `%20` rather than
/// the `+` of form encoding. Page numbers are unaffected.
pub fn build_request_uri(base_url: &str, query_params: &[(&str, String)]) -> String {
    if query_params.is_empty() {
        return base_url.to_string();
    }

    let query = query_params
        .iter()
        .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");

    let separator = if base_url.contains('?') { '&' } else { '?' };
    format!("{}{}{}", base_url, separator, query)
}

/// Trait for page fetching - enables mocking for tests.
#[async_trait]
pub trait StoreFetch: Send + Sync {
    /// Fetches one page of the products listing (pages start at 1).
    async fn fetch_page(&self, page: u32) -> FetchOutcome;
}

/// Store HTTP client.
pub struct ShopClient {
    client: Client,
    products_url: String,
}

impl ShopClient {
    /// Creates a client for the store configured in `config`.
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder()
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10));

        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self { client, products_url: config.products_url() })
    }

    /// Performs a GET, returning the body on 2xx and `NoData` otherwise.
    pub async fn fetch(&self, uri: &str) -> FetchOutcome {
        debug!("GET {}", uri);

        let response = match self
            .client
            .get(uri)
            .header("Accept", "application/json")
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("Request to {} failed: {}", uri, e);
                return FetchOutcome::NoData(FetchFailure::Transport(e.to_string()));
            }
        };

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            return FetchOutcome::NoData(FetchFailure::Status(status.as_u16()));
        }

        match response.text().await {
            Ok(body) => FetchOutcome::Body(body),
            Err(e) => {
                warn!("Failed to read response body from {}: {}", uri, e);
                FetchOutcome::NoData(FetchFailure::Transport(e.to_string()))
            }
        }
    }
}

#[async_trait]
impl StoreFetch for ShopClient {
    async fn fetch_page(&self, page: u32) -> FetchOutcome {
        let uri = build_request_uri(&self.products_url, &[("page", page.to_string())]);

        info!("Fetching products page {}", page);
        self.fetch(&uri).await
    }
}
