//! Core types for CartIQ.
//!
//! This module provides type-safe wrappers for the catalog domain.

pub mod catalog;
pub mod id;
pub mod price;
pub mod username;

pub use catalog::{CartItem, CartLineRequest, Order, Product, cart_total};
pub use id::*;
pub use price::Price;
pub use username::{Username, UsernameError};
