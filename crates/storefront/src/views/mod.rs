//! HTML fragments for the storefront's page containers.
//!
//! Every page owns one or more containers, identified by a fixed element id.
//! A container is always filled in a single write from one rendered
//! fragment; nothing is streamed or patched incrementally.
//!
//! ```text
//! Page           Path              Containers          Endpoint
//! Catalog        /                 products            GET /api/products
//! ProductDetail  /product/{id}     product             GET /api/product/{id}
//! Cart           /cart             cartItems, total    GET /api/cart
//! Orders         /orders           orders              GET /api/orders
//! ```
//!
//! The types here only turn data into markup. Fetching is done by
//! [`crate::services::renderer`].

pub mod cart;
pub mod catalog;
pub mod notice;
pub mod orders;
pub mod product;

use cartiq_core::ProductId;

pub use cart::{CartLineView, CartLinesTemplate, CartTotalTemplate};
pub use catalog::{CatalogGridTemplate, ProductCardView, RecommendationsTemplate};
pub use notice::{Notice, NoticeLevel, NoticeTemplate};
pub use orders::{OrderView, OrdersTemplate};
pub use product::{ProductDetailTemplate, ProductDetailView};

/// A page element that a fragment replaces wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Container {
    Products,
    Product,
    CartItems,
    Total,
    Orders,
}

impl Container {
    /// The element id the container is rendered with.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::Product => "product",
            Self::CartItems => "cartItems",
            Self::Total => "total",
            Self::Orders => "orders",
        }
    }
}

/// A storefront page and the data key it renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Catalog,
    ProductDetail(ProductId),
    Cart,
    Orders,
}

impl Page {
    /// Detect the page for a request path.
    ///
    /// The product id is the last path segment, so `/product/42` renders
    /// product 42. A single trailing slash is ignored. Returns `None` for
    /// paths that have no containers, including product paths whose last
    /// segment is not a number.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.strip_suffix('/').unwrap_or(path);

        match path {
            "" => Some(Self::Catalog),
            "/cart" => Some(Self::Cart),
            "/orders" => Some(Self::Orders),
            _ => {
                let rest = path.strip_prefix("/product/")?;
                let id = last_segment(rest).parse::<ProductId>().ok()?;
                // Only a single id segment is a product page
                (!rest.contains('/')).then_some(Self::ProductDetail(id))
            }
        }
    }

    /// Containers present on this page, in document order.
    #[must_use]
    pub const fn containers(self) -> &'static [Container] {
        match self {
            Self::Catalog => &[Container::Products],
            Self::ProductDetail(_) => &[Container::Product],
            Self::Cart => &[Container::CartItems, Container::Total],
            Self::Orders => &[Container::Orders],
        }
    }

    /// Document title for the page.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Catalog => "Products",
            Self::ProductDetail(_) => "Product",
            Self::Cart => "Your Cart",
            Self::Orders => "Orders",
        }
    }
}

/// The last `/`-separated segment of a path.
#[must_use]
pub fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// One rendered container: its id plus the markup that replaces its contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub container: Container,
    pub html: String,
}

impl Section {
    #[must_use]
    pub const fn new(container: Container, html: String) -> Self {
        Self { container, html }
    }

    /// Element id, for templates.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        self.container.id()
    }
}

/// Format a price the way every fragment shows it.
#[must_use]
pub fn format_price(price: &cartiq_core::Price) -> String {
    format!("Rs {price}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_ids() {
        assert_eq!(Container::Products.id(), "products");
        assert_eq!(Container::Product.id(), "product");
        assert_eq!(Container::CartItems.id(), "cartItems");
        assert_eq!(Container::Total.id(), "total");
        assert_eq!(Container::Orders.id(), "orders");
    }

    #[test]
    fn test_page_from_path() {
        assert_eq!(Page::from_path("/"), Some(Page::Catalog));
        assert_eq!(Page::from_path(""), Some(Page::Catalog));
        assert_eq!(Page::from_path("/cart"), Some(Page::Cart));
        assert_eq!(Page::from_path("/cart/"), Some(Page::Cart));
        assert_eq!(Page::from_path("/orders"), Some(Page::Orders));
    }

    #[test]
    fn test_product_id_is_last_segment() {
        assert_eq!(
            Page::from_path("/product/42"),
            Some(Page::ProductDetail(ProductId::new(42)))
        );
        assert_eq!(
            Page::from_path("/product/42/"),
            Some(Page::ProductDetail(ProductId::new(42)))
        );
    }

    #[test]
    fn test_unknown_paths() {
        assert_eq!(Page::from_path("/product/abc"), None);
        assert_eq!(Page::from_path("/product/"), None);
        assert_eq!(Page::from_path("/product/1/2"), None);
        assert_eq!(Page::from_path("/login"), None);
    }

    #[test]
    fn test_cart_page_has_two_containers() {
        assert_eq!(
            Page::Cart.containers(),
            &[Container::CartItems, Container::Total]
        );
        assert_eq!(Page::Catalog.containers(), &[Container::Products]);
    }

    #[test]
    fn test_last_segment() {
        assert_eq!(last_segment("/product/42"), "42");
        assert_eq!(last_segment("42"), "42");
        assert_eq!(last_segment("/a/"), "");
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(&cartiq_core::Price::from(999_i64)), "Rs 999");
    }
}
