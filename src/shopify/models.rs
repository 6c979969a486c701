//! Data models for the store's `products.json` listing.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One page of the products listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductsPage {
    /// Products on this page, in listing order
    pub products: Vec<Product>,
}

impl ProductsPage {
    /// Returns true if the page carries no products (end of listing).
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// A catalog item. Fields not modelled here are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Store product identifier, kept as sent (number or string)
    #[serde(default)]
    pub id: Value,
    /// Category label used for filtering (e.g. "Clock"). `None` unless a string.
    #[serde(default, deserialize_with = "string_or_none")]
    pub product_type: Option<String>,
    /// Purchasable variants, in listing order
    #[serde(default, deserialize_with = "null_as_empty")]
    pub variants: Vec<Variant>,
}

/// A purchasable configuration of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    /// Raw price as sent by the store, normally a decimal string
    #[serde(default)]
    pub price: Option<Value>,
}

impl Variant {
    /// Creates a variant with a string price.
    pub fn priced(price: impl Into<String>) -> Self {
        Self { price: Some(Value::String(price.into())) }
    }

    /// Returns the price as f64, treating missing or non-numeric prices as zero.
    pub fn amount(&self) -> f64 {
        match &self.price {
            Some(Value::String(s)) => parse_price(s),
            Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
            _ => 0.0,
        }
    }
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Variant>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Variant>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parses the leading decimal number of `text`, or 0.0 if there is none.
///
/// Leading whitespace is skipped and anything after the number is ignored,
/// so `"12.5 USD"` is 12.5 and `"n/a"` is 0.0.
pub fn parse_price(text: &str) -> f64 {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut has_digits = end > int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        // "5." keeps only the integer part
        if frac_end > frac_start {
            end = frac_end;
            has_digits = true;
        }
    }

    if !has_digits {
        return 0.0;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().unwrap_or(0.0)
}
