//! Product detail route handler.

use axum::{
    extract::{Path, State},
    response::Response,
};
use cartiq_core::ProductId;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, add_breadcrumb};
use crate::middleware::{OptionalUser, PageChrome, set_last_viewed};
use crate::services::ViewRenderer;
use crate::state::AppState;
use crate::views::Page;

/// Heading of the similar-products row under a product.
pub const YOU_MAY_ALSO_LIKE: &str = "You may also like";

/// Display a product.
///
/// Records the product as last viewed for logged-in users and lists similar
/// products below it.
#[instrument(skip(state, session, user, chrome))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
    session: Session,
    OptionalUser(user): OptionalUser,
    chrome: PageChrome,
) -> Result<Response, AppError> {
    let id: ProductId = id
        .parse()
        .map_err(|_| AppError::NotFound(format!("product {id}")))?;

    let renderer = ViewRenderer::new(state.backend());
    let rendered = renderer.render(Page::ProductDetail(id)).await?;

    if !rendered.is_ok() {
        return Ok(super::page_response(chrome, rendered, String::new()));
    }

    add_breadcrumb(
        "navigation",
        "Viewed product page",
        Some(&[("product_id", id.to_string().as_str())]),
    );

    if user.is_some()
        && let Err(e) = set_last_viewed(&session, id).await
    {
        tracing::warn!(error = %e, "Failed to record last viewed product");
    }

    let extra = renderer.recommendations(id, YOU_MAY_ALSO_LIKE).await?;

    Ok(super::page_response(chrome, rendered, extra))
}
