//! Cart route handlers.
//!
//! Actions answer HTMX requests with a fragment or a refresh instruction,
//! and plain form posts with a redirect plus a flash notice.

use askama::Template;
use axum::{
    Form,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{AppendHeaders, Html, IntoResponse, Redirect, Response},
};
use cartiq_core::ProductId;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::backend::BackendError;
use crate::error::AppError;
use crate::middleware::{PageChrome, set_flash};
use crate::services::actions::Action;
use crate::services::{ActionDispatcher, FollowUp, ViewRenderer};
use crate::state::AppState;
use crate::views::{Notice, NoticeTemplate, Page};

/// Add/remove form data.
#[derive(Debug, Deserialize)]
pub struct CartItemForm {
    pub product_id: ProductId,
}

/// Display the cart.
#[instrument(skip(state, chrome))]
pub async fn show(State(state): State<AppState>, chrome: PageChrome) -> Result<Response, AppError> {
    let rendered = ViewRenderer::new(state.backend()).render(Page::Cart).await?;
    Ok(super::page_response(chrome, rendered, String::new()))
}

/// Add one unit of a product to the cart.
///
/// HTMX gets the confirmation notice; a plain post is sent back to the page
/// it came from with the notice as a flash.
#[instrument(skip(state, session, headers))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<CartItemForm>,
) -> Result<Response, AppError> {
    let outcome = ActionDispatcher::new(state.backend())
        .add_to_cart(form.product_id)
        .await;

    let back_to = referer_path(&headers);
    respond(&session, &headers, Action::Add, outcome, &back_to).await
}

/// Remove a product from the cart.
///
/// The cart view is re-rendered afterwards: HTMX is told to refresh, a
/// plain post is redirected to `/cart`.
#[instrument(skip(state, session, headers))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<CartItemForm>,
) -> Result<Response, AppError> {
    let outcome = ActionDispatcher::new(state.backend())
        .remove_item(form.product_id)
        .await;

    respond(&session, &headers, Action::Remove, outcome, "/cart").await
}

/// Turn an action outcome into the response for this kind of client.
async fn respond(
    session: &Session,
    headers: &HeaderMap,
    action: Action,
    outcome: Result<FollowUp, BackendError>,
    redirect_to: &str,
) -> Result<Response, AppError> {
    let follow_up = match outcome {
        Ok(follow_up) => follow_up,
        Err(e) => {
            tracing::warn!(error = %e, ?action, "Cart action failed");
            let notice = action.failure_notice();

            if super::is_htmx(headers) {
                return notice_fragment(StatusCode::BAD_GATEWAY, notice);
            }
            set_flash(session, &notice).await?;
            return Ok(Redirect::to(redirect_to).into_response());
        }
    };

    match (follow_up, super::is_htmx(headers)) {
        (FollowUp::Notify(notice), true) => notice_fragment(StatusCode::OK, notice),
        (FollowUp::Reload, true) => Ok(AppendHeaders([("HX-Refresh", "true")]).into_response()),
        (FollowUp::Notify(notice), false) => {
            set_flash(session, &notice).await?;
            Ok(Redirect::to(redirect_to).into_response())
        }
        (FollowUp::Reload, false) => Ok(Redirect::to(redirect_to).into_response()),
    }
}

/// A notice swapped into the page's notice area.
fn notice_fragment(status: StatusCode, notice: Notice) -> Result<Response, AppError> {
    let html = NoticeTemplate::from(notice).render()?;
    Ok((
        status,
        AppendHeaders([
            ("HX-Retarget", "#notice-area"),
            ("HX-Reswap", "innerHTML"),
            ("HX-Trigger", "cart-updated"),
        ]),
        Html(html),
    )
        .into_response())
}

/// Local path of the referring page, or `/`.
///
/// Only the path and query are kept, so a forged `Referer` cannot redirect
/// off-site.
fn referer_path(headers: &HeaderMap) -> String {
    headers
        .get(header::REFERER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| url::Url::parse(v).ok())
        .map(|url| {
            let path = url.path();
            if path.starts_with("//") {
                return "/".to_string();
            }
            match url.query() {
                Some(query) => format!("{path}?{query}"),
                None => path.to_string(),
            }
        })
        .unwrap_or_else(|| "/".to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;
    use axum::extract::FromRequest;
    use axum::http::{HeaderValue, Request};

    use super::*;

    fn with_referer(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::REFERER, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_referer_path() {
        assert_eq!(
            referer_path(&with_referer("http://localhost:3000/product/42")),
            "/product/42"
        );
        assert_eq!(
            referer_path(&with_referer("https://shop.example/?page=2")),
            "/?page=2"
        );
    }

    #[test]
    fn test_missing_or_bad_referer() {
        assert_eq!(referer_path(&HeaderMap::new()), "/");
        assert_eq!(referer_path(&with_referer("not a url")), "/");
        assert_eq!(referer_path(&with_referer("http://a.example//evil.example/x")), "/");
    }

    fn form_post(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/cart/add")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_form_parses_product_id() {
        let Form(form) = Form::<CartItemForm>::from_request(form_post("product_id=5"), &())
            .await
            .unwrap();
        assert_eq!(form.product_id, ProductId::new(5));
    }

    #[tokio::test]
    async fn test_form_rejects_non_numeric_product_id() {
        let result = Form::<CartItemForm>::from_request(form_post("product_id=five"), &()).await;
        assert!(result.is_err());
    }
}
