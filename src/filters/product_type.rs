//! Product type filter.

use super::Filter;
use crate::shopify::Product;

/// Keeps products whose `product_type` equals the given value exactly.
pub struct ProductTypeFilter {
    product_type: String,
}

impl ProductTypeFilter {
    /// Creates a filter for the given product type (case-sensitive).
    pub fn new(product_type: impl Into<String>) -> Self {
        Self { product_type: product_type.into() }
    }
}

impl Filter for ProductTypeFilter {
    fn matches(&self, product: &Product) -> bool {
        // Products without a type never match
        product.product_type.as_deref() == Some(self.product_type.as_str())
    }
}
