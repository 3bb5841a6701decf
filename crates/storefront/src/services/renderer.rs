//! Fills page containers from backend data.
//!
//! One page render issues exactly one backend request. Every container of
//! the page is produced from that single response, so the cart lines and the
//! cart total can never disagree.

use askama::Template;
use axum::http::StatusCode;
use cartiq_core::{Product, ProductId};
use tracing::instrument;

use crate::backend::{BackendClient, BackendError};
use crate::services::recommendations::{RECOMMENDATION_COUNT, recommend};
use crate::views::{
    CartLinesTemplate, CartTotalTemplate, CatalogGridTemplate, Notice, NoticeTemplate,
    OrdersTemplate, Page, ProductDetailTemplate, RecommendationsTemplate, Section,
};

/// The containers of one page, ready to be placed into the layout or sent
/// as a fragment.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub page: Page,
    /// 200, or the status matching a backend failure.
    pub status: StatusCode,
    /// One entry per container, in document order.
    pub sections: Vec<Section>,
    /// Products behind the catalog grid. Empty for other pages and on
    /// failure.
    pub catalog: Vec<Product>,
}

impl RenderedPage {
    /// Whether every container holds real content.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status.is_success()
    }

    /// All container markup concatenated, as served to fragment requests.
    #[must_use]
    pub fn html(&self) -> String {
        self.sections.iter().map(|s| s.html.as_str()).collect()
    }
}

/// Renders page containers against a backend.
pub struct ViewRenderer<'a> {
    backend: &'a BackendClient,
}

impl<'a> ViewRenderer<'a> {
    #[must_use]
    pub const fn new(backend: &'a BackendClient) -> Self {
        Self { backend }
    }

    /// Fetch the data for `page` and render each of its containers.
    ///
    /// A backend failure does not fail the render: the first container
    /// carries an error notice, the rest are left empty, and the status says
    /// what went wrong (404 for a missing product, 502 otherwise).
    ///
    /// # Errors
    ///
    /// Returns an error only if a template fails to render.
    #[instrument(skip(self))]
    pub async fn render(&self, page: Page) -> Result<RenderedPage, askama::Error> {
        let mut catalog = Vec::new();
        let fragments = match page {
            Page::Catalog => match self.backend.products().await {
                Ok(products) => {
                    let grid = CatalogGridTemplate::new(&products).render()?;
                    catalog = products;
                    vec![grid]
                }
                Err(e) => return failed_page(page, &e),
            },
            Page::ProductDetail(id) => match self.backend.product(id).await {
                Ok(product) => vec![ProductDetailTemplate::new(&product).render()?],
                Err(e) => return failed_page(page, &e),
            },
            Page::Cart => match self.backend.cart().await {
                Ok(items) => vec![
                    CartLinesTemplate::new(&items).render()?,
                    CartTotalTemplate::new(&items).render()?,
                ],
                Err(e) => return failed_page(page, &e),
            },
            Page::Orders => match self.backend.orders().await {
                Ok(orders) => vec![OrdersTemplate::new(&orders).render()?],
                Err(e) => return failed_page(page, &e),
            },
        };

        let sections = page
            .containers()
            .iter()
            .zip(fragments)
            .map(|(container, html)| Section::new(*container, html))
            .collect();

        Ok(RenderedPage {
            page,
            status: StatusCode::OK,
            sections,
            catalog,
        })
    }

    /// Fetch the catalog and render a row of products similar to `anchor`.
    ///
    /// Returns an empty string when the catalog cannot be loaded or nothing
    /// is similar enough to show. Recommendations never fail a page.
    ///
    /// # Errors
    ///
    /// Returns an error only if the template fails to render.
    pub async fn recommendations(
        &self,
        anchor: ProductId,
        heading: &'static str,
    ) -> Result<String, askama::Error> {
        let products = match self.backend.products().await {
            Ok(products) => products,
            Err(e) => {
                tracing::warn!(error = %e, "Skipping recommendations");
                return Ok(String::new());
            }
        };

        recommendations_among(&products, anchor, heading)
    }
}

/// Render a row of products from `products` similar to `anchor`, or an
/// empty string when none qualify.
///
/// # Errors
///
/// Returns an error only if the template fails to render.
pub fn recommendations_among(
    products: &[Product],
    anchor: ProductId,
    heading: &'static str,
) -> Result<String, askama::Error> {
    let similar = recommend(products, anchor, RECOMMENDATION_COUNT);
    if similar.is_empty() {
        return Ok(String::new());
    }

    RecommendationsTemplate::new(heading, &similar).render()
}

/// Build the page shown when the backend request failed.
fn failed_page(page: Page, err: &BackendError) -> Result<RenderedPage, askama::Error> {
    tracing::warn!(error = %err, page = ?page, "Backend request failed");

    let (status, message) = match (page, err) {
        (Page::ProductDetail(_), BackendError::NotFound(_)) => {
            (StatusCode::NOT_FOUND, "Product not found.")
        }
        (Page::ProductDetail(_), _) => (StatusCode::BAD_GATEWAY, "Could not load this product."),
        (Page::Catalog, _) => (StatusCode::BAD_GATEWAY, "Could not load products."),
        (Page::Cart, _) => (StatusCode::BAD_GATEWAY, "Could not load your cart."),
        (Page::Orders, _) => (StatusCode::BAD_GATEWAY, "Could not load orders."),
    };

    let notice = NoticeTemplate::from(Notice::error(message)).render()?;

    let sections = page
        .containers()
        .iter()
        .enumerate()
        .map(|(i, container)| {
            let html = if i == 0 { notice.clone() } else { String::new() };
            Section::new(*container, html)
        })
        .collect();

    Ok(RenderedPage {
        page,
        status,
        sections,
        catalog: Vec::new(),
    })
}
