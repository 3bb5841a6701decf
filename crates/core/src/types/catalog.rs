//! Catalog records as the backend returns them.
//!
//! These mirror the JSON bodies of the backend's REST endpoints. Nothing is
//! validated here: quantities and prices are taken as the backend sends them.

use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{Price, ProductId};

/// A catalog product.
///
/// `brand` is only present on the detail endpoint. `ram`, `storage` and
/// `rating` are numeric features used for similarity scoring when the
/// backend provides them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    #[serde(default)]
    pub brand: Option<String>,
    /// Image filename, served from `/static/img/`.
    pub image: String,
    #[serde(default)]
    pub ram: Option<f64>,
    #[serde(default)]
    pub storage: Option<f64>,
    #[serde(default)]
    pub rating: Option<f64>,
}

impl Product {
    /// Feature vector for similarity scoring: `[price, ram, storage, rating]`.
    ///
    /// Missing features count as zero.
    #[must_use]
    pub fn features(&self) -> [f64; 4] {
        [
            self.price.to_f64(),
            self.ram.unwrap_or(0.0),
            self.storage.unwrap_or(0.0),
            self.rating.unwrap_or(0.0),
        ]
    }
}

/// One line of the cart.
///
/// `id` is the product id; `line_total` is price times quantity as computed
/// by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub name: String,
    pub qty: i64,
    pub line_total: Price,
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Who placed the order: a name or a numeric user id, kept as text.
    #[serde(deserialize_with = "user_identifier")]
    pub user: String,
    pub address: String,
}

/// Accept a user identifier sent as either a JSON string or a number.
fn user_identifier<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Identifier {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Identifier::deserialize(deserializer)? {
        Identifier::Text(text) => text,
        Identifier::Number(number) => number.to_string(),
    })
}

/// Body of the add-to-cart and remove-from-cart requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineRequest {
    pub product_id: ProductId,
}

impl CartLineRequest {
    #[must_use]
    pub const fn new(product_id: ProductId) -> Self {
        Self { product_id }
    }
}

/// Sum of every line total in the cart.
#[must_use]
pub fn cart_total(items: &[CartItem]) -> Price {
    items.iter().map(|item| item.line_total).sum()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_list_deserializes() {
        let json = r#"[
            {"id": 1, "name": "Pixel 8", "price": 59999, "image": "pixel.png"},
            {"id": 2, "name": "Galaxy", "price": 49999.5, "image": "galaxy.png", "brand": "Samsung"}
        ]"#;
        let products: Vec<Product> = serde_json::from_str(json).unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id, ProductId::new(1));
        assert_eq!(products[0].brand, None);
        assert_eq!(products[1].price.to_string(), "49999.5");
        assert_eq!(products[1].brand.as_deref(), Some("Samsung"));
    }

    #[test]
    fn test_product_ignores_unknown_fields() {
        let json = r#"{"id": 3, "name": "X", "price": 1, "image": "x.png", "stock": 4}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.name, "X");
    }

    #[test]
    fn test_product_features_default_to_zero() {
        let json = r#"{"id": 3, "name": "X", "price": 100, "image": "x.png", "rating": 4.5}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.features(), [100.0, 0.0, 0.0, 4.5]);
    }

    #[test]
    fn test_cart_line_request_body() {
        let body = serde_json::to_string(&CartLineRequest::new(ProductId::new(5))).unwrap();
        assert_eq!(body, r#"{"product_id":5}"#);
    }

    #[test]
    fn test_cart_total_sums_line_totals() {
        let json = r#"[
            {"id": 1, "name": "A", "qty": 2, "line_total": 200},
            {"id": 2, "name": "B", "qty": 1, "line_total": 49.5}
        ]"#;
        let items: Vec<CartItem> = serde_json::from_str(json).unwrap();
        assert_eq!(cart_total(&items).to_string(), "249.5");
    }

    #[test]
    fn test_cart_total_of_empty_cart() {
        assert_eq!(cart_total(&[]), Price::ZERO);
    }

    #[test]
    fn test_order_deserializes() {
        let order: Order =
            serde_json::from_str(r#"{"user": "asha", "address": "12 MG Road"}"#).unwrap();
        assert_eq!(order.user, "asha");
        assert_eq!(order.address, "12 MG Road");
    }

    #[test]
    fn test_order_accepts_numeric_user_id() {
        let orders: Vec<Order> = serde_json::from_str(
            r#"[{"user": 17, "address": "4 Park St"}, {"user": "ravi", "address": "X"}]"#,
        )
        .unwrap();
        assert_eq!(orders[0].user, "17");
        assert_eq!(orders[1].user, "ravi");
    }

    #[test]
    fn test_order_rejects_missing_user() {
        let result = serde_json::from_str::<Order>(r#"{"user": null, "address": "X"}"#);
        assert!(result.is_err());
    }
}
