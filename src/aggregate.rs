//! Filtering by type and summing variant prices.

use crate::filters::{Filter, ProductTypeFilter};
use crate::shopify::Product;

/// Returns the products whose `product_type` is exactly `product_type`, in order.
pub fn filter_by_type(products: Vec<Product>, product_type: &str) -> Vec<Product> {
    let filter = ProductTypeFilter::new(product_type);
    products.into_iter().filter(|p| filter.matches(p)).collect()
}

/// Sums the price of every variant of every product, rounded to cents.
///
/// Prices are accumulated as `f64` in listing order. Missing or non-numeric
/// prices count as zero.
pub fn sum_prices(products: &[Product]) -> f64 {
    let mut sum = 0.0;
    for product in products {
        for variant in &product.variants {
            sum += variant.amount();
        }
    }
    round_cents(sum)
}

/// Rounds to 2 decimal places, halves away from zero.
///
/// `value * 100.0` can land just below a halfway point (141.325 scales to
/// 14132.499999999998), so the scaled result is bumped one step when the next
/// halfway mark does not exceed `value`.
pub fn round_cents(value: f64) -> f64 {
    const SCALE: f64 = 100.0;

    if !value.is_finite() {
        return value;
    }

    let mut scaled = (value * SCALE).round();
    if value > 0.0 {
        if (scaled + 0.5) / SCALE <= value {
            scaled += 1.0;
        }
    } else if value < 0.0 && (scaled - 0.5) / SCALE >= value {
        scaled -= 1.0;
    }
    scaled / SCALE
}

/// Renders a total the way it is printed: shortest form, always with a fraction.
pub fn format_total(total: f64) -> String {
    format!("{:?}", total)
}
