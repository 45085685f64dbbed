//! Integration tests for Catalog Cart.
//!
//! Every test starts a `wiremock` server standing in for the shop API and
//! drives the real `reqwest` client against it, so the wire format, error
//! classification and controller flows are exercised end to end without a
//! backend.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p catalog-cart-integration-tests
//! ```
//!
//! # Test Files
//!
//! - `api_client` - Request shapes and `ApiError` classification
//! - `auth_flow` - Register and login forms, token storage
//! - `catalog_flow` - Catalog paging, cart, add-product with refetch

#![allow(clippy::unwrap_used)]

use catalog_cart_storefront::api::ApiClient;
use catalog_cart_storefront::config::ClientConfig;
use serde_json::{Value, json};
use wiremock::MockServer;

/// A mock shop API and a client pointed at it.
pub struct TestContext {
    pub server: MockServer,
    pub client: ApiClient,
}

impl TestContext {
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let config = ClientConfig::for_base_url(&server.uri()).unwrap();
        let client = ApiClient::new(&config).unwrap();
        Self { server, client }
    }
}

/// A product as the API serializes it.
pub fn product_json(n: usize) -> Value {
    json!({
        "_id": format!("p{n}"),
        "productName": format!("Product {n}"),
        "brand": "Acme",
        "price": 10 + n,
        "rating": 4.5,
        "image": format!("uploads/p{n}.png"),
        "__v": 0
    })
}

/// `{products: [p1..=pcount]}`.
pub fn product_list_json(count: usize) -> Value {
    json!({ "products": (1..=count).map(product_json).collect::<Vec<_>>() })
}
