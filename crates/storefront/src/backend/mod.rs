//! Client for the catalog/cart/order backend.
//!
//! # Architecture
//!
//! - The backend is the source of truth for prices, cart contents and orders
//! - Plain JSON over HTTP via `reqwest`; every call returns an explicit `Result`
//! - Product listing and details are cached in memory via `moka`
//!
//! # Endpoints
//!
//! ```text
//! GET  /api/products        array of Product
//! GET  /api/product/{id}    Product
//! POST /api/cart/add        {"product_id": id}
//! GET  /api/cart            array of CartItem
//! POST /api/cart/remove     {"product_id": id}
//! GET  /api/orders          array of Order
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use cartiq_storefront::backend::BackendClient;
//!
//! let client = BackendClient::new(&config.backend)?;
//!
//! let products = client.products().await?;
//! client.add_to_cart(products[0].id).await?;
//! let cart = client.cart().await?;
//! ```

mod cache;
mod client;

pub use client::BackendClient;

use thiserror::Error;

/// Maximum number of body characters kept in errors and logs.
const BODY_EXCERPT_CHARS: usize = 200;

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// HTTP request failed (connection, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status.
    #[error("Backend returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Leading part of the response body.
        body: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Endpoint URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Leading characters of a response body, for errors and logs.
fn excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_display() {
        let err = BackendError::NotFound("api/product/9".to_string());
        assert_eq!(err.to_string(), "Not found: api/product/9");
    }

    #[test]
    fn test_status_error_display() {
        let err = BackendError::Status {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "Backend returned 500: boom");
    }

    #[test]
    fn test_excerpt_truncates_by_characters() {
        let body = "é".repeat(BODY_EXCERPT_CHARS + 50);
        assert_eq!(excerpt(&body).chars().count(), BODY_EXCERPT_CHARS);
        assert_eq!(excerpt("short"), "short");
    }
}
