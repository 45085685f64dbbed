//! Fixtures for CLI tests.

#![allow(clippy::unwrap_used)]

use catalog_cart_core::{Price, Product, ProductId, Rating};
use catalog_cart_storefront::api::{
    AddProductResponse, ApiError, ApiErrorKind, ApiResult, ErrorDetail, LoginRequest,
    LoginResponse, NewProduct, RegisterRequest, RegisterResponse, StoreApi,
};
use catalog_cart_storefront::views::ProductListView;
use rust_decimal::Decimal;

pub fn product(id: &str) -> Product {
    Product {
        id: ProductId::new(id),
        product_name: format!("Product {id}"),
        brand: "Acme".to_owned(),
        price: Price::new(Decimal::new(1999, 2)),
        rating: Rating::new(Decimal::new(4, 0)),
        image: None,
    }
}

/// Serves a fixed product list; every other call fails.
pub struct FixedCatalog {
    products: Option<Vec<Product>>,
}

impl FixedCatalog {
    pub fn new(count: usize) -> Self {
        Self {
            products: Some((1..=count).map(|n| product(&format!("p{n}"))).collect()),
        }
    }

    pub const fn failing() -> Self {
        Self { products: None }
    }
}

fn unavailable() -> ApiError {
    ApiError::new(ApiErrorKind::Network, ErrorDetail::default())
}

impl StoreApi for FixedCatalog {
    async fn register(&self, _request: &RegisterRequest) -> ApiResult<RegisterResponse> {
        Err(unavailable())
    }

    async fn login(&self, _request: &LoginRequest) -> ApiResult<LoginResponse> {
        Err(unavailable())
    }

    async fn list_products(&self) -> ApiResult<Vec<Product>> {
        self.products.clone().ok_or_else(unavailable)
    }

    async fn add_product(&self, _product: NewProduct) -> ApiResult<AddProductResponse> {
        Err(unavailable())
    }
}

/// A product list view loaded with `count` products `p1..`.
pub async fn view_with(count: usize) -> ProductListView {
    let mut view = ProductListView::default();
    view.load(&FixedCatalog::new(count)).await.unwrap();
    view
}
