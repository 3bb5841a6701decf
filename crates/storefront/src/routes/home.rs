//! Catalog page route handler.

use axum::{extract::State, response::Response};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::AppError;
use crate::middleware::{OptionalUser, PageChrome, last_viewed};
use crate::services::{ViewRenderer, recommendations_among};
use crate::state::AppState;
use crate::views::Page;

/// Heading of the personal recommendation row.
pub const RECOMMENDED_FOR_YOU: &str = "Recommended for you";

/// Display the catalog.
///
/// Logged-in users who have viewed a product also get products similar to
/// it, picked from the same product list the grid was drawn from.
#[instrument(skip(state, session, user, chrome))]
pub async fn catalog(
    State(state): State<AppState>,
    session: Session,
    OptionalUser(user): OptionalUser,
    chrome: PageChrome,
) -> Result<Response, AppError> {
    let rendered = ViewRenderer::new(state.backend())
        .render(Page::Catalog)
        .await?;

    let mut extra = String::new();
    if rendered.is_ok()
        && user.is_some()
        && let Some(anchor) = last_viewed(&session).await
    {
        extra = recommendations_among(&rendered.catalog, anchor, RECOMMENDED_FOR_YOU)?;
    }

    Ok(super::page_response(chrome, rendered, extra))
}
