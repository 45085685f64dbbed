//! Catalog Cart Core - Shared domain types.
//!
//! This crate provides the types shared by every Catalog Cart component:
//! - `storefront` - API client and view state (catalog, cart, forms)
//! - `cli` - Command-line front-end
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps it
//! lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product identity, price, rating and the product record itself

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
