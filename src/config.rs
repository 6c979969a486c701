//! Configuration management with an optional TOML file and CLI overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Store whose listing is totalled.
pub const DEFAULT_STORE_URL: &str = "http://shopicruit.myshopify.com";

/// Product type totalled when none is given.
pub const DEFAULT_PRODUCT_TYPE: &str = "Clock";

/// Application configuration: file values, then CLI overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Store base URL. Not read from config files; set programmatically.
    #[serde(skip, default = "default_store_url")]
    pub store_url: String,

    /// Product type to total (exact, case-sensitive match)
    #[serde(default = "default_product_type")]
    pub product_type: String,

    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Stop after this many page requests. Unbounded when unset.
    #[serde(default)]
    pub max_pages: Option<u32>,
}

fn default_store_url() -> String {
    DEFAULT_STORE_URL.to_string()
}

fn default_product_type() -> String {
    DEFAULT_PRODUCT_TYPE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_url: default_store_url(),
            product_type: default_product_type(),
            proxy: None,
            max_pages: None,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the products listing endpoint for the configured store.
    pub fn products_url(&self) -> String {
        format!("{}/products.json", self.store_url.trim_end_matches('/'))
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration from `explicit_path`, or defaults when none is given.
    ///
    /// No file is read implicitly, so a bare run always uses the defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        match explicit_path {
            Some(path) => Self::from_file(path),
            None => {
                debug!("No config file given, using defaults");
                Ok(Self::default())
            }
        }
    }
}
