//! Order history lines.

use askama::Template;
use cartiq_core::Order;

/// Order display data for templates.
#[derive(Debug, Clone)]
pub struct OrderView {
    pub user: String,
    pub address: String,
}

impl From<&Order> for OrderView {
    fn from(order: &Order) -> Self {
        Self {
            user: order.user.clone(),
            address: order.address.clone(),
        }
    }
}

/// One line per order for the `orders` container.
#[derive(Template)]
#[template(path = "partials/orders.html")]
pub struct OrdersTemplate {
    pub orders: Vec<OrderView>,
}

impl OrdersTemplate {
    #[must_use]
    pub fn new(orders: &[Order]) -> Self {
        Self {
            orders: orders.iter().map(OrderView::from).collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn order(user: &str, address: &str) -> Order {
        Order {
            user: user.to_string(),
            address: address.to_string(),
        }
    }

    #[test]
    fn test_one_line_per_order() {
        let html = OrdersTemplate::new(&[
            order("asha", "12 MG Road, Pune"),
            order("ravi", "4 Park Street, Kolkata"),
        ])
        .render()
        .unwrap();

        assert_eq!(html.matches("class=\"order\"").count(), 2);
        assert!(html.contains("Order by asha — 12 MG Road, Pune"));
        assert!(html.contains("Order by ravi — 4 Park Street, Kolkata"));
    }

    #[test]
    fn test_no_orders() {
        assert!(OrdersTemplate::new(&[]).render().unwrap().trim().is_empty());
    }

    #[test]
    fn test_address_is_escaped() {
        let html = OrdersTemplate::new(&[order("x", "<b>1 Road</b>")])
            .render()
            .unwrap();
        assert!(html.contains("&lt;b&gt;1 Road&lt;/b&gt;"));
    }
}
