//! Catalog Cart storefront library.
//!
//! Everything between the remote shop API and a user surface: the HTTP
//! client, token storage, form controllers, and the catalog/cart state behind
//! the product list screen. The CLI is one consumer; tests are another.
//!
//! # Modules
//!
//! - [`api`] - `StoreApi` trait, `reqwest` client, wire types and `ApiError`
//! - [`forms`] - Register, login and add-product controllers
//! - [`catalog`] / [`cart`] / [`pagination`] - Product list state
//! - [`views`] - Screen-level state wiring the above to notifications
//! - [`storage`] - Key-value storage for the login token

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod forms;
pub mod notify;
pub mod observe;
pub mod pagination;
pub mod routes;
pub mod storage;
pub mod views;

#[cfg(test)]
mod testing;
