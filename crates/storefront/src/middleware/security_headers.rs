//! Security headers middleware.
//!
//! The storefront serves plain HTML forms, one stylesheet and product
//! images, all from its own origin, and ships no JavaScript. The policies
//! below allow exactly that.

use axum::{
    extract::Request,
    http::{
        HeaderName, HeaderValue,
        header::{
            CACHE_CONTROL, CONTENT_SECURITY_POLICY, CONTENT_TYPE, REFERRER_POLICY,
            X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS,
        },
    },
    middleware::Next,
    response::Response,
};

/// Content Security Policy for every response.
///
/// No scripts at all; styles and images from this origin; forms may only
/// post back here.
pub const CONTENT_SECURITY: &str = "default-src 'none'; \
     script-src 'none'; \
     style-src 'self'; \
     img-src 'self'; \
     form-action 'self'; \
     base-uri 'none'; \
     frame-ancestors 'none'";

/// Browser features the storefront never uses.
pub const PERMISSIONS: &str = "camera=(), \
     microphone=(), \
     geolocation=(), \
     payment=(), \
     usb=(), \
     browsing-topics=(), \
     interest-cohort=()";

/// Add security headers to all responses.
///
/// - `Referrer-Policy: same-origin`: a plain add-to-cart post is redirected
///   back to the page it came from, which needs the `Referer` on same-site
///   requests. Other sites get nothing.
/// - `Cache-Control: no-store` only on HTML pages. Pages show the shopper's
///   name and flash notices; static assets stay cacheable.
pub async fn security_headers_middleware(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;

    let is_html = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("text/html"));

    let headers = response.headers_mut();

    headers.insert(X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(REFERRER_POLICY, HeaderValue::from_static("same-origin"));
    headers.insert(
        CONTENT_SECURITY_POLICY,
        HeaderValue::from_static(CONTENT_SECURITY),
    );
    headers.insert(
        HeaderName::from_static("permissions-policy"),
        HeaderValue::from_static(PERMISSIONS),
    );
    headers.insert(
        HeaderName::from_static("cross-origin-opener-policy"),
        HeaderValue::from_static("same-origin"),
    );
    headers.insert(
        HeaderName::from_static("cross-origin-resource-policy"),
        HeaderValue::from_static("same-origin"),
    );

    if is_html {
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
    }

    response
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{
        Router,
        body::Body,
        http::Request,
        middleware,
        response::{Html, IntoResponse},
        routing::get,
    };
    use tower::ServiceExt;

    use super::*;

    fn app() -> Router {
        Router::new()
            .route("/", get(|| async { Html("<p>page</p>") }))
            .route(
                "/static/main.css",
                get(|| async { ([(CONTENT_TYPE, "text/css")], "body{}").into_response() }),
            )
            .layer(middleware::from_fn(security_headers_middleware))
    }

    async fn get_response(uri: &str) -> Response {
        app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_headers_are_applied() {
        let response = get_response("/").await;
        let headers = response.headers();

        assert_eq!(headers.get(X_FRAME_OPTIONS).unwrap(), "DENY");
        assert_eq!(headers.get(X_CONTENT_TYPE_OPTIONS).unwrap(), "nosniff");

        let csp = headers.get(CONTENT_SECURITY_POLICY).unwrap().to_str().unwrap();
        assert!(csp.contains("script-src 'none'"));
        assert!(csp.contains("img-src 'self'"));
        assert!(csp.contains("form-action 'self'"));
    }

    #[tokio::test]
    async fn test_same_site_referrer_is_kept() {
        let response = get_response("/").await;
        assert_eq!(response.headers().get(REFERRER_POLICY).unwrap(), "same-origin");
    }

    #[tokio::test]
    async fn test_only_pages_are_uncacheable() {
        let page = get_response("/").await;
        assert_eq!(page.headers().get(CACHE_CONTROL).unwrap(), "no-store");

        let css = get_response("/static/main.css").await;
        assert!(css.headers().get(CACHE_CONTROL).is_none());
        assert_eq!(css.headers().get(X_CONTENT_TYPE_OPTIONS).unwrap(), "nosniff");
    }
}
