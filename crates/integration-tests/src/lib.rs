//! Integration tests for CartIQ.
//!
//! Every test starts two servers on ephemeral ports inside the test process:
//! a fake backend that serves canned JSON and records each request it
//! receives, and a real storefront pointed at it. Nothing external is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p cartiq-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_pages` - Page rendering, fragments, escaping, failures
//! - `storefront_cart` - Add/remove actions and their follow-ups
//! - `storefront_sessions` - Login, view tracking, recommendations

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use axum::{
    Json, Router,
    body::Bytes,
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use cartiq_storefront::config::{BackendConfig, StorefrontConfig};
use cartiq_storefront::routes;
use cartiq_storefront::state::AppState;
use serde_json::{Value, json};
use url::Url;

// =============================================================================
// Fake backend
// =============================================================================

/// One request as the fake backend saw it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    /// Parsed JSON body, for requests that had one.
    pub body: Option<Value>,
}

/// Data served by the fake backend and the requests it has received.
#[derive(Debug, Default)]
pub struct BackendData {
    pub products: Vec<Value>,
    pub cart: Vec<Value>,
    pub orders: Vec<Value>,
    /// Answer every request with a 500.
    pub failing: bool,
    pub requests: Vec<RecordedRequest>,
}

/// Handle to the shared fake backend data.
#[derive(Debug, Clone, Default)]
pub struct FakeBackend {
    data: Arc<Mutex<BackendData>>,
}

impl FakeBackend {
    /// Lock the data for reading or editing.
    pub fn data(&self) -> MutexGuard<'_, BackendData> {
        self.data.lock().unwrap()
    }

    /// Every recorded request, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.data().requests.clone()
    }

    /// Recorded requests with the given method.
    #[must_use]
    pub fn requests_with(&self, method: &Method) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == *method)
            .collect()
    }

    /// Forget recorded requests.
    pub fn clear_requests(&self) {
        self.data().requests.clear();
    }

    fn handle(&self, method: Method, uri: &Uri, body: &Bytes) -> Response {
        let path = uri.path().to_string();
        let mut data = self.data();

        data.requests.push(RecordedRequest {
            method: method.clone(),
            path: path.clone(),
            body: serde_json::from_slice(body).ok(),
        });

        if data.failing {
            return (StatusCode::INTERNAL_SERVER_ERROR, "backend down").into_response();
        }

        match (method, path.as_str()) {
            (Method::GET, "/api/products") => Json(data.products.clone()).into_response(),
            (Method::GET, "/api/cart") => Json(data.cart.clone()).into_response(),
            (Method::GET, "/api/orders") => Json(data.orders.clone()).into_response(),
            (Method::POST, "/api/cart/add" | "/api/cart/remove") => {
                Json(json!({"status": "ok"})).into_response()
            }
            (Method::GET, other) => {
                let product = other
                    .strip_prefix("/api/product/")
                    .and_then(|id| id.parse::<i64>().ok())
                    .and_then(|id| {
                        data.products
                            .iter()
                            .find(|p| p["id"].as_i64() == Some(id))
                            .cloned()
                    });
                match product {
                    Some(product) => Json(product).into_response(),
                    None => (StatusCode::NOT_FOUND, "no such product").into_response(),
                }
            }
            _ => StatusCode::NOT_FOUND.into_response(),
        }
    }
}

/// A catalog product as the backend returns it.
#[must_use]
pub fn product(id: i64, name: &str, price: i64, ram: f64, storage: f64, rating: f64) -> Value {
    json!({
        "id": id,
        "name": name,
        "price": price,
        "brand": "Acme",
        "image": format!("{id}.png"),
        "ram": ram,
        "storage": storage,
        "rating": rating,
    })
}

/// A cart line as the backend returns it.
#[must_use]
pub fn cart_line(id: i64, name: &str, qty: i64, line_total: f64) -> Value {
    json!({"id": id, "name": name, "qty": qty, "line_total": line_total})
}

/// Five phones with distinct feature profiles.
#[must_use]
pub fn sample_catalog() -> Vec<Value> {
    vec![
        product(1, "Pixel 8", 59999, 8.0, 128.0, 4.6),
        product(2, "Galaxy S24", 64999, 8.0, 256.0, 4.5),
        product(3, "Budget One", 8999, 4.0, 64.0, 3.9),
        product(4, "Pixel 8 Pro", 99999, 12.0, 256.0, 4.7),
        product(5, "Nord CE", 24999, 8.0, 128.0, 4.2),
    ]
}

// =============================================================================
// Test context
// =============================================================================

/// A running fake backend plus a storefront in front of it.
pub struct TestContext {
    pub backend: FakeBackend,
    /// Storefront base URL, e.g. `http://127.0.0.1:41234`.
    pub base_url: String,
    /// Client with a cookie store that does not follow redirects.
    pub client: reqwest::Client,
}

impl TestContext {
    /// Start both servers with the given catalog and no catalog cache, so
    /// every page load reaches the fake backend.
    pub async fn start(products: Vec<Value>) -> Self {
        Self::start_with_cache_ttl(products, Duration::ZERO).await
    }

    /// Start both servers, caching catalog responses for `ttl`.
    pub async fn start_with_cache_ttl(products: Vec<Value>, ttl: Duration) -> Self {
        let backend = FakeBackend::default();
        backend.data().products = products;

        let backend_addr = spawn_backend(backend.clone()).await;
        let base_url = spawn_storefront(backend_addr, ttl).await;

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap();

        Self {
            backend,
            base_url,
            client,
        }
    }

    /// Absolute storefront URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// GET a storefront page.
    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client.get(self.url(path)).send().await.unwrap()
    }

    /// GET a storefront page and return status and body.
    pub async fn get_text(&self, path: &str) -> (reqwest::StatusCode, String) {
        let response = self.get(path).await;
        let status = response.status();
        (status, response.text().await.unwrap())
    }

    /// POST a form as a plain browser would.
    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .unwrap()
    }

    /// POST a form as HTMX would.
    pub async fn post_htmx(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .header("HX-Request", "true")
            .form(form)
            .send()
            .await
            .unwrap()
    }

    /// Submit a form shown on `page` the way a browser would.
    ///
    /// The page is loaded first and its `Referrer-Policy` decides what
    /// `Referer` the post carries, as it does in a browser for a same-site
    /// form.
    pub async fn post_form_from(
        &self,
        page: &str,
        path: &str,
        form: &[(&str, &str)],
    ) -> reqwest::Response {
        let shown = self.get(page).await;
        let policy = shown
            .headers()
            .get("referrer-policy")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("strict-origin-when-cross-origin")
            .to_string();

        let referer = match policy.as_str() {
            "no-referrer" => None,
            "origin" | "strict-origin" => Some(format!("{}/", self.base_url)),
            _ => Some(self.url(page)),
        };

        let mut request = self.client.post(self.url(path)).form(form);
        if let Some(referer) = referer {
            request = request.header("Referer", referer);
        }
        request.send().await.unwrap()
    }

    /// Log in with `username`.
    pub async fn login(&self, username: &str) {
        let response = self.post_form("/login", &[("username", username)]).await;
        assert_eq!(response.status(), reqwest::StatusCode::SEE_OTHER);
    }
}

async fn spawn_backend(backend: FakeBackend) -> SocketAddr {
    let app = Router::new().fallback(move |method: Method, uri: Uri, body: Bytes| {
        let backend = backend.clone();
        async move { backend.handle(method, &uri, &body) }
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn spawn_storefront(backend_addr: SocketAddr, catalog_cache_ttl: Duration) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{addr}");

    let backend_url = Url::parse(&format!("http://{backend_addr}")).unwrap();
    let config = StorefrontConfig {
        host: addr.ip(),
        port: addr.port(),
        base_url: base_url.clone(),
        static_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../storefront/static"),
        backend: BackendConfig {
            timeout: Duration::from_secs(5),
            catalog_cache_ttl,
            ..BackendConfig::with_base_url(backend_url)
        },
        sentry_dsn: None,
        sentry_environment: None,
    };

    let app = routes::app(AppState::new(config).unwrap());
    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .unwrap();
    });
    base_url
}

/// Number of product cards in a page.
#[must_use]
pub fn card_count(html: &str) -> usize {
    html.matches("class=\"card\"").count()
}
