//! Bare page containers.
//!
//! `/fragments/{path}` returns the containers of the page at `/{path}`
//! without the layout, so a client can refresh one page region in a single
//! request. The page is chosen with [`Page::from_path`], which takes the
//! product id from the last path segment.

use askama::Template;
use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
};
use tracing::instrument;

use crate::error::AppError;
use crate::services::ViewRenderer;
use crate::state::AppState;
use crate::views::{Page, Section};

/// Container markup with the element ids, as in the full page.
#[derive(Template)]
#[template(path = "partials/containers.html")]
pub struct ContainersTemplate {
    pub sections: Vec<Section>,
}

/// Catalog containers.
pub async fn catalog(State(state): State<AppState>) -> Result<Response, AppError> {
    render(&state, Page::Catalog).await
}

/// Containers of the page at `/{path}`.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<Response, AppError> {
    let page_path = format!("/{path}");
    let page = Page::from_path(&page_path).ok_or_else(|| AppError::NotFound(page_path))?;
    render(&state, page).await
}

async fn render(state: &AppState, page: Page) -> Result<Response, AppError> {
    let rendered = ViewRenderer::new(state.backend()).render(page).await?;
    let html = ContainersTemplate {
        sections: rendered.sections,
    }
    .render()?;

    Ok((rendered.status, Html(html)).into_response())
}
