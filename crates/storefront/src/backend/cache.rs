//! Cache types for catalog responses.
//!
//! Only the product listing and product details are cached. Cart and order
//! responses change with every action and always go to the backend.

use cartiq_core::{Product, ProductId};

/// Cache key for catalog responses.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Products,
    Product(ProductId),
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Products(Vec<Product>),
    Product(Box<Product>),
}
