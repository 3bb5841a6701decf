//! CartIQ Core - Shared types library.
//!
//! This crate provides the response-shaped types used by the storefront:
//! products, cart lines, orders, prices and ids.
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. Every
//! value here is created fresh from a backend response and dropped when
//! the request that fetched it ends.
//!
//! # Modules
//!
//! - [`types`] - Newtype ids, prices, usernames and the catalog records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
