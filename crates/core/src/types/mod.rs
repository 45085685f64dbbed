//! Core types for Catalog Cart.
//!
//! This module provides type-safe wrappers for the catalog domain.

pub mod id;
pub mod price;
pub mod product;

pub use id::ProductId;
pub use price::{Price, PriceError, Rating};
pub use product::Product;
