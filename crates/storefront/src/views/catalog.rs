//! Catalog grid and product cards.

use askama::Template;
use cartiq_core::{Product, ProductId};

use super::format_price;

/// Product card display data for templates.
#[derive(Debug, Clone)]
pub struct ProductCardView {
    pub id: ProductId,
    pub name: String,
    pub price: String,
    /// Image filename under `/static/img/`.
    pub image: String,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: format_price(&product.price),
            image: product.image.clone(),
        }
    }
}

/// Grid of product cards for the `products` container.
#[derive(Template)]
#[template(path = "partials/catalog_grid.html")]
pub struct CatalogGridTemplate {
    pub products: Vec<ProductCardView>,
}

impl CatalogGridTemplate {
    #[must_use]
    pub fn new(products: &[Product]) -> Self {
        Self {
            products: products.iter().map(ProductCardView::from).collect(),
        }
    }
}

/// Titled row of recommended product cards.
#[derive(Template)]
#[template(path = "partials/recommendations.html")]
pub struct RecommendationsTemplate {
    pub heading: &'static str,
    pub products: Vec<ProductCardView>,
}

impl RecommendationsTemplate {
    #[must_use]
    pub fn new(heading: &'static str, products: &[&Product]) -> Self {
        Self {
            heading,
            products: products.iter().map(|p| ProductCardView::from(*p)).collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: i64, name: &str, price: i64, image: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            price: price.into(),
            brand: None,
            image: image.to_string(),
            ram: None,
            storage: None,
            rating: None,
        }
    }

    #[test]
    fn test_one_card_per_product() {
        let products = vec![
            product(1, "Pixel 8", 59999, "pixel.png"),
            product(2, "Galaxy S24", 64999, "galaxy.png"),
            product(3, "Nord CE", 24999, "nord.png"),
        ];
        let html = CatalogGridTemplate::new(&products).render().unwrap();

        assert_eq!(html.matches("class=\"card\"").count(), 3);
        for p in &products {
            assert!(html.contains(&p.name));
            assert!(html.contains(&format!("Rs {}", p.price)));
            assert!(html.contains(&format!("src=\"/static/img/{}\"", p.image)));
            assert!(html.contains(&format!("href=\"/product/{}\"", p.id)));
        }
    }

    #[test]
    fn test_card_has_add_to_cart_trigger() {
        let html = CatalogGridTemplate::new(&[product(5, "Moto G", 12999, "moto.png")])
            .render()
            .unwrap();

        assert!(html.contains("action=\"/cart/add\""));
        assert!(html.contains("name=\"product_id\" value=\"5\""));
        assert!(html.contains("Add to Cart"));
    }

    #[test]
    fn test_empty_catalog_renders_nothing() {
        let html = CatalogGridTemplate::new(&[]).render().unwrap();
        assert!(html.trim().is_empty());
    }

    #[test]
    fn test_product_name_is_escaped() {
        let html = CatalogGridTemplate::new(&[product(
            1,
            "<script>alert(1)</script>",
            1,
            "x.png",
        )])
        .render()
        .unwrap();

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_image_filename_is_escaped() {
        let html = CatalogGridTemplate::new(&[product(1, "X", 1, "x.png\" onerror=\"alert(1)")])
            .render()
            .unwrap();

        assert!(!html.contains("onerror=\"alert(1)\""));
    }

    #[test]
    fn test_recommendations_heading_and_cards() {
        let a = product(1, "A", 10, "a.png");
        let b = product(2, "B", 20, "b.png");
        let html = RecommendationsTemplate::new("You may also like", &[&a, &b])
            .render()
            .unwrap();

        assert!(html.contains("You may also like"));
        assert_eq!(html.matches("class=\"card\"").count(), 2);
    }
}
