//! Cart actions and what the user sees afterwards.
//!
//! Each action sends exactly one request to the backend. The outcome decides
//! the follow-up: a confirmation notice for add-to-cart, a reload of the
//! current page for removal, an error notice when the backend refused.

use cartiq_core::ProductId;
use tracing::instrument;

use crate::backend::{BackendClient, BackendError};
use crate::error::add_breadcrumb;
use crate::views::Notice;

/// Confirmation shown after a successful add.
pub const ADDED_TO_CART: &str = "Added to cart.";
/// Shown when the backend rejects an add.
pub const ADD_FAILED: &str = "Could not add this item to your cart.";
/// Shown when the backend rejects a removal.
pub const REMOVE_FAILED: &str = "Could not remove this item from your cart.";

/// What the page does once an action has completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FollowUp {
    /// Show a notice; the rest of the page stays as it is.
    Notify(Notice),
    /// Re-render the current page from fresh backend data.
    Reload,
}

/// Dispatches user actions to the backend.
pub struct ActionDispatcher<'a> {
    backend: &'a BackendClient,
}

impl<'a> ActionDispatcher<'a> {
    #[must_use]
    pub const fn new(backend: &'a BackendClient) -> Self {
        Self { backend }
    }

    /// Add one unit of `id` to the cart.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the add was not accepted.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn add_to_cart(&self, id: ProductId) -> Result<FollowUp, BackendError> {
        let id_str = id.to_string();
        add_breadcrumb("cart", "Add to cart", Some(&[("product_id", id_str.as_str())]));

        self.backend.add_to_cart(id).await?;
        tracing::info!("Added to cart");

        Ok(FollowUp::Notify(Notice::info(ADDED_TO_CART)))
    }

    /// Remove `id` from the cart.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the removal was not accepted.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn remove_item(&self, id: ProductId) -> Result<FollowUp, BackendError> {
        let id_str = id.to_string();
        add_breadcrumb("cart", "Remove from cart", Some(&[("product_id", id_str.as_str())]));

        self.backend.remove_from_cart(id).await?;
        tracing::info!("Removed from cart");

        Ok(FollowUp::Reload)
    }
}

/// The two cart actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Add,
    Remove,
}

impl Action {
    /// The notice shown when the backend rejected this action.
    #[must_use]
    pub fn failure_notice(self) -> Notice {
        match self {
            Self::Add => Notice::error(ADD_FAILED),
            Self::Remove => Notice::error(REMOVE_FAILED),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::NoticeLevel;

    #[test]
    fn test_failure_notices_are_errors() {
        let add = Action::Add.failure_notice();
        assert_eq!(add.level, NoticeLevel::Error);
        assert_eq!(add.message, ADD_FAILED);

        let remove = Action::Remove.failure_notice();
        assert_eq!(remove.message, REMOVE_FAILED);
    }

    #[test]
    fn test_follow_up_equality() {
        assert_eq!(
            FollowUp::Notify(Notice::info(ADDED_TO_CART)),
            FollowUp::Notify(Notice::info("Added to cart."))
        );
        assert_ne!(FollowUp::Reload, FollowUp::Notify(Notice::info("x")));
    }
}
