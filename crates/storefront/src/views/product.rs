//! Product detail block.

use askama::Template;
use cartiq_core::{Product, ProductId};

use super::format_price;

/// Product detail display data for templates.
#[derive(Debug, Clone)]
pub struct ProductDetailView {
    pub id: ProductId,
    pub name: String,
    pub brand: Option<String>,
    pub price: String,
    pub image: String,
}

impl From<&Product> for ProductDetailView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            brand: product.brand.clone().filter(|b| !b.is_empty()),
            price: format_price(&product.price),
            image: product.image.clone(),
        }
    }
}

/// Title, image, brand and price for the `product` container.
#[derive(Template)]
#[template(path = "partials/product_detail.html")]
pub struct ProductDetailTemplate {
    pub product: ProductDetailView,
}

impl ProductDetailTemplate {
    #[must_use]
    pub fn new(product: &Product) -> Self {
        Self {
            product: ProductDetailView::from(product),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn phone(brand: Option<&str>) -> Product {
        Product {
            id: ProductId::new(42),
            name: "Pixel 8".to_string(),
            price: 59999_i64.into(),
            brand: brand.map(String::from),
            image: "pixel.png".to_string(),
            ram: Some(8.0),
            storage: Some(128.0),
            rating: Some(4.6),
        }
    }

    #[test]
    fn test_detail_block() {
        let html = ProductDetailTemplate::new(&phone(Some("Google")))
            .render()
            .unwrap();

        assert!(html.contains("<h1>Pixel 8</h1>"));
        assert!(html.contains("src=\"/static/img/pixel.png\""));
        assert!(html.contains("Google"));
        assert!(html.contains("Rs 59999"));
        assert!(html.contains("name=\"product_id\" value=\"42\""));
    }

    #[test]
    fn test_missing_brand_is_omitted() {
        let html = ProductDetailTemplate::new(&phone(None)).render().unwrap();
        assert!(!html.contains("class=\"brand\""));
    }

    #[test]
    fn test_empty_brand_is_omitted() {
        let view = ProductDetailView::from(&phone(Some("")));
        assert_eq!(view.brand, None);
    }

    #[test]
    fn test_brand_is_escaped() {
        let html = ProductDetailTemplate::new(&phone(Some("A&B <b>")))
            .render()
            .unwrap();
        assert!(html.contains("A&amp;B &lt;b&gt;"));
    }
}
