//! Backend client implementation.
//!
//! Uses `reqwest` for HTTP and `serde_json` for bodies. Caches the product
//! listing and product details using `moka`.

use std::sync::Arc;

use cartiq_core::{CartItem, CartLineRequest, Order, Product, ProductId};
use moka::future::Cache;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use super::cache::{CacheKey, CacheValue};
use super::{BackendError, excerpt};
use crate::config::BackendConfig;

/// Maximum number of cached catalog entries.
const CACHE_CAPACITY: u64 = 1000;

/// Client for the catalog/cart/order backend.
///
/// Cheap to clone; all clones share one connection pool and cache.
#[derive(Clone)]
pub struct BackendClient {
    inner: Arc<BackendClientInner>,
}

struct BackendClientInner {
    client: reqwest::Client,
    base_url: Url,
    /// `None` when the configured TTL is zero.
    cache: Option<Cache<CacheKey, CacheValue>>,
}

impl BackendClient {
    /// Create a new backend client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        let cache = (!config.catalog_cache_ttl.is_zero()).then(|| {
            Cache::builder()
                .max_capacity(CACHE_CAPACITY)
                .time_to_live(config.catalog_cache_ttl)
                .build()
        });

        Ok(Self {
            inner: Arc::new(BackendClientInner {
                client,
                base_url: directory_url(&config.base_url),
                cache,
            }),
        })
    }

    /// The backend base URL, always ending in `/`.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Resolve an endpoint path such as `api/products` against the base URL.
    fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        Ok(self.inner.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Execute a GET and parse the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, BackendError> {
        let url = self.endpoint(path)?;
        let response = self.inner.client.get(url).send().await?;
        let body = read_body(path, response).await?;

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                path,
                body = %excerpt(&body),
                "Failed to parse backend response"
            );
            BackendError::Parse(e)
        })
    }

    /// Execute a POST with a JSON body; the response body is ignored.
    async fn post_json<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<(), BackendError> {
        let url = self.endpoint(path)?;
        let response = self.inner.client.post(url).json(body).send().await?;
        read_body(path, response).await?;
        Ok(())
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Get every product in the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a product list.
    #[instrument(skip(self))]
    pub async fn products(&self) -> Result<Vec<Product>, BackendError> {
        if let Some(cache) = &self.inner.cache
            && let Some(CacheValue::Products(products)) = cache.get(&CacheKey::Products).await
        {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let products: Vec<Product> = self.get_json("api/products").await?;

        if let Some(cache) = &self.inner.cache {
            cache
                .insert(CacheKey::Products, CacheValue::Products(products.clone()))
                .await;
        }

        Ok(products)
    }

    /// Get a single product.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::NotFound` if the backend answers 404, or another
    /// error if the request fails or the body is not a product.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn product(&self, id: ProductId) -> Result<Product, BackendError> {
        let key = CacheKey::Product(id);

        if let Some(cache) = &self.inner.cache
            && let Some(CacheValue::Product(product)) = cache.get(&key).await
        {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let product: Product = self.get_json(&format!("api/product/{id}")).await?;

        if let Some(cache) = &self.inner.cache {
            cache
                .insert(key, CacheValue::Product(Box::new(product.clone())))
                .await;
        }

        Ok(product)
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Get the current cart lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a cart.
    #[instrument(skip(self))]
    pub async fn cart(&self) -> Result<Vec<CartItem>, BackendError> {
        self.get_json("api/cart").await
    }

    /// Add one unit of a product to the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn add_to_cart(&self, id: ProductId) -> Result<(), BackendError> {
        self.post_json("api/cart/add", &CartLineRequest::new(id))
            .await
    }

    /// Remove a product from the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn remove_from_cart(&self, id: ProductId) -> Result<(), BackendError> {
        self.post_json("api/cart/remove", &CartLineRequest::new(id))
            .await
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Get every placed order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not an order list.
    #[instrument(skip(self))]
    pub async fn orders(&self) -> Result<Vec<Order>, BackendError> {
        self.get_json("api/orders").await
    }

    // =========================================================================
    // Health
    // =========================================================================

    /// Check that the backend answers the catalog endpoint.
    ///
    /// Bypasses the cache and does not parse the body.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable or answers non-2xx.
    pub async fn ping(&self) -> Result<(), BackendError> {
        let url = self.endpoint("api/products")?;
        let response = self.inner.client.get(url).send().await?;
        read_body("api/products", response).await?;
        Ok(())
    }
}

/// Read a response body, turning non-success statuses into errors.
async fn read_body(path: &str, response: reqwest::Response) -> Result<String, BackendError> {
    let status = response.status();
    let body = response.text().await?;

    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(BackendError::NotFound(path.to_string()));
    }

    if !status.is_success() {
        tracing::error!(
            status = %status,
            path,
            body = %excerpt(&body),
            "Backend returned non-success status"
        );
        return Err(BackendError::Status {
            status: status.as_u16(),
            body: excerpt(&body),
        });
    }

    Ok(body)
}

/// Make sure the base URL path ends in `/` so relative joins keep its prefix.
fn directory_url(base: &Url) -> Url {
    let mut url = base.clone();
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client_for(base: &str) -> BackendClient {
        BackendClient::new(&BackendConfig::with_base_url(Url::parse(base).unwrap())).unwrap()
    }

    #[test]
    fn test_endpoint_on_bare_host() {
        let client = client_for("http://localhost:5000");
        assert_eq!(
            client.endpoint("api/product/42").unwrap().as_str(),
            "http://localhost:5000/api/product/42"
        );
    }

    #[test]
    fn test_endpoint_keeps_path_prefix() {
        let client = client_for("http://backend.internal/shop");
        assert_eq!(client.base_url().as_str(), "http://backend.internal/shop/");
        assert_eq!(
            client.endpoint("/api/cart").unwrap().as_str(),
            "http://backend.internal/shop/api/cart"
        );
    }

    #[test]
    fn test_cache_disabled_with_zero_ttl() {
        let mut config = BackendConfig::with_base_url(Url::parse("http://localhost").unwrap());
        config.catalog_cache_ttl = std::time::Duration::ZERO;
        let client = BackendClient::new(&config).unwrap();
        assert!(client.inner.cache.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_http_error() {
        // Port 9 (discard) on localhost is not expected to accept connections
        let client = client_for("http://127.0.0.1:9");
        let err = client.cart().await.unwrap_err();
        assert!(matches!(err, BackendError::Http(_)));
    }
}
