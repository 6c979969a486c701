//! Product filters.

pub mod product_type;

use crate::shopify::Product;

pub use product_type::ProductTypeFilter;

/// Trait for filtering products.
pub trait Filter: Send + Sync {
    /// Returns true if the product passes the filter.
    fn matches(&self, product: &Product) -> bool;
}
