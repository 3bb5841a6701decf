//! Cart lines and the running total.

use askama::Template;
use cartiq_core::{CartItem, ProductId, cart_total};

use super::format_price;

/// Cart line display data for templates.
#[derive(Debug, Clone)]
pub struct CartLineView {
    pub id: ProductId,
    pub name: String,
    pub qty: i64,
    pub line_total: String,
}

impl From<&CartItem> for CartLineView {
    fn from(item: &CartItem) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            qty: item.qty,
            line_total: format_price(&item.line_total),
        }
    }
}

/// Line list for the `cartItems` container.
#[derive(Template)]
#[template(path = "partials/cart_lines.html")]
pub struct CartLinesTemplate {
    pub lines: Vec<CartLineView>,
}

impl CartLinesTemplate {
    #[must_use]
    pub fn new(items: &[CartItem]) -> Self {
        Self {
            lines: items.iter().map(CartLineView::from).collect(),
        }
    }
}

/// `Total Rs {sum}` for the `total` container.
#[derive(Template)]
#[template(path = "partials/cart_total.html")]
pub struct CartTotalTemplate {
    pub total: String,
}

impl CartTotalTemplate {
    #[must_use]
    pub fn new(items: &[CartItem]) -> Self {
        Self {
            total: format_price(&cart_total(items)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn items() -> Vec<CartItem> {
        serde_json::from_str(
            r#"[
                {"id": 1, "name": "Pixel 8", "qty": 2, "line_total": 119998},
                {"id": 7, "name": "Case", "qty": 1, "line_total": 499.5}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_cart_lines() {
        let html = CartLinesTemplate::new(&items()).render().unwrap();

        assert!(html.contains("Pixel 8 x 2 = Rs 119998"));
        assert!(html.contains("Case x 1 = Rs 499.5"));
        assert_eq!(html.matches("action=\"/cart/remove\"").count(), 2);
        assert!(html.contains("name=\"product_id\" value=\"7\""));
    }

    #[test]
    fn test_total_is_sum_of_line_totals() {
        let html = CartTotalTemplate::new(&items()).render().unwrap();
        assert_eq!(html.trim(), "Total Rs 120497.5");
    }

    #[test]
    fn test_empty_cart() {
        assert!(CartLinesTemplate::new(&[]).render().unwrap().trim().is_empty());
        assert_eq!(
            CartTotalTemplate::new(&[]).render().unwrap().trim(),
            "Total Rs 0"
        );
    }

    #[test]
    fn test_line_name_is_escaped() {
        let items: Vec<CartItem> = serde_json::from_str(
            r#"[{"id": 1, "name": "<img src=x>", "qty": 1, "line_total": 1}]"#,
        )
        .unwrap();
        let html = CartLinesTemplate::new(&items).render().unwrap();
        assert!(html.contains("&lt;img src=x&gt;"));
    }
}
