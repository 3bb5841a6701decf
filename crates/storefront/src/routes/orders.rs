//! Orders page route handler.

use axum::{extract::State, response::Response};
use tracing::instrument;

use crate::error::AppError;
use crate::middleware::PageChrome;
use crate::services::ViewRenderer;
use crate::state::AppState;
use crate::views::Page;

/// Display every placed order.
#[instrument(skip(state, chrome))]
pub async fn index(State(state): State<AppState>, chrome: PageChrome) -> Result<Response, AppError> {
    let rendered = ViewRenderer::new(state.backend())
        .render(Page::Orders)
        .await?;

    Ok(super::page_response(chrome, rendered, String::new()))
}
