//! CLI command implementations.

pub mod total;

pub use total::{TotalCommand, TotalReport};
