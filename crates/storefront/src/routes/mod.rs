//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Catalog page (#products)
//! GET  /health                 - Health check
//! GET  /health/ready           - Backend readiness
//!
//! # Products
//! GET  /product/{id}           - Product detail (#product)
//!
//! # Cart
//! GET  /cart                   - Cart page (#cartItems, #total)
//! POST /cart/add               - Add to cart (notice fragment or redirect)
//! POST /cart/remove            - Remove item (HX-Refresh or redirect)
//!
//! # Orders
//! GET  /orders                 - Order list (#orders)
//!
//! # Fragments
//! GET  /fragments              - Catalog containers only
//! GET  /fragments/{*path}      - Containers of the page at /{path}
//!
//! # Auth
//! GET  /login                  - Login page
//! POST /login                  - Login action
//! POST /logout                 - Logout action
//! ```

pub mod auth;
pub mod cart;
pub mod fragments;
pub mod home;
pub mod orders;
pub mod products;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, StatusCode},
    middleware as axum_middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::filters;
use crate::middleware::{
    PageChrome, cart_rate_limiter, create_session_layer, request_id_middleware,
    security_headers_middleware,
};
use crate::services::RenderedPage;
use crate::state::AppState;
use crate::views::Section;

// =============================================================================
// Shared page template
// =============================================================================

/// Layout for every container page: the containers, then optional extras
/// such as a recommendation row.
#[derive(Template, WebTemplate)]
#[template(path = "pages/page.html")]
pub struct PageTemplate {
    pub chrome: PageChrome,
    pub title: &'static str,
    pub heading: Option<&'static str>,
    pub sections: Vec<Section>,
    /// Pre-rendered, already escaped markup placed after the containers.
    pub extra: String,
}

/// Wrap a rendered page in the layout, keeping its status.
pub(crate) fn page_response(chrome: PageChrome, rendered: RenderedPage, extra: String) -> Response {
    let page = rendered.page;
    let heading = match page {
        crate::views::Page::ProductDetail(_) => None,
        _ => Some(page.title()),
    };

    (
        rendered.status,
        PageTemplate {
            chrome,
            title: page.title(),
            heading,
            sections: rendered.sections,
            extra,
        },
    )
        .into_response()
}

/// Whether the request was issued by HTMX.
pub(crate) fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get("hx-request")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == "true")
}

// =============================================================================
// Routers
// =============================================================================

/// Create the cart routes router.
///
/// Only the actions are rate limited; viewing the cart is not.
pub fn cart_routes() -> Router<AppState> {
    let actions = Router::new()
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
        .layer(cart_rate_limiter());

    Router::new().route("/", get(cart::show)).merge(actions)
}

/// Create the fragment routes router.
pub fn fragment_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(fragments::catalog))
        .route("/{*path}", get(fragments::show))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Catalog
        .route("/", get(home::catalog))
        // Product detail
        .route("/product/{id}", get(products::show))
        // Cart routes
        .nest("/cart", cart_routes())
        // Orders
        .route("/orders", get(orders::index))
        // Bare containers
        .nest("/fragments", fragment_routes())
        // Auth routes
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Build the complete application with all middleware.
///
/// Serve it with `into_make_service_with_connect_info::<SocketAddr>()` so the
/// rate limiter can fall back to the peer address.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());
    let static_dir = ServeDir::new(&state.config().static_dir);

    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes())
        .nest_service("/static", static_dir)
        .layer(session_layer)
        .layer(axum_middleware::from_fn(security_headers_middleware))
        .layer(axum_middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies the backend answers before returning OK.
/// Returns 503 Service Unavailable if the backend is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.backend().ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Backend not ready");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn test_is_htmx() {
        let mut headers = HeaderMap::new();
        assert!(!is_htmx(&headers));

        headers.insert("hx-request", HeaderValue::from_static("true"));
        assert!(is_htmx(&headers));

        headers.insert("hx-request", HeaderValue::from_static("false"));
        assert!(!is_htmx(&headers));
    }
}
