//! Storefront services.
//!
//! # Services
//!
//! - `renderer` - Fetches container data and renders each page's fragments
//! - `actions` - Add-to-cart and remove-from-cart, with their UI follow-ups
//! - `recommendations` - Similar-product scoring over the catalog

pub mod actions;
pub mod recommendations;
pub mod renderer;

pub use actions::{Action, ActionDispatcher, FollowUp};
pub use renderer::{RenderedPage, ViewRenderer, recommendations_among};
