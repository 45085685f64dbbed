//! In-process `StoreApi` fake for unit tests.

#![allow(clippy::unwrap_used)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use catalog_cart_core::{Price, Product, ProductId, Rating};
use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::Notify;

use crate::api::{
    AddProductResponse, ApiError, ApiErrorKind, ApiResult, ErrorDetail, LoginRequest,
    LoginResponse, NewProduct, RegisterRequest, RegisterResponse, StoreApi,
};

/// `count` products with ids `p1..=pcount`.
pub fn products(count: usize) -> Vec<Product> {
    (1..=count).map(|n| product(&format!("p{n}"))).collect()
}

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

pub fn api_error(kind: ApiErrorKind, detail: ErrorDetail) -> ApiError {
    ApiError::new(kind, detail)
}

#[derive(Default)]
struct FakeState {
    products: Vec<Product>,
    products_error: Option<ApiError>,
    register: Option<ApiResult<RegisterResponse>>,
    login: Option<ApiResult<(bool, Option<String>)>>,
    add_product: Option<ApiResult<AddProductResponse>>,
    list_calls: usize,
    register_calls: usize,
    login_calls: usize,
    add_calls: usize,
    last_register: Option<(String, String, String)>,
    last_login: Option<(String, String)>,
    last_new_product: Option<NewProduct>,
}

/// Canned responses plus call counters.
#[derive(Default)]
pub struct FakeApi {
    state: Mutex<FakeState>,
    held: AtomicBool,
    gate: Notify,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        let api = Self::default();
        api.set_products(products);
        api
    }

    pub fn set_products(&self, products: Vec<Product>) {
        let mut state = self.state.lock().unwrap();
        state.products = products;
        state.products_error = None;
    }

    pub fn fail_products_with(&self, kind: ApiErrorKind) {
        self.state.lock().unwrap().products_error =
            Some(api_error(kind, ErrorDetail::default()));
    }

    pub fn respond_register(&self, result: ApiResult<RegisterResponse>) {
        self.state.lock().unwrap().register = Some(result);
    }

    pub fn respond_login(&self, result: ApiResult<(bool, Option<String>)>) {
        self.state.lock().unwrap().login = Some(result);
    }

    pub fn respond_add_product(&self, result: ApiResult<AddProductResponse>) {
        self.state.lock().unwrap().add_product = Some(result);
    }

    /// Make the next form call wait until [`release`](Self::release).
    pub fn hold_calls(&self) {
        self.held.store(true, Ordering::SeqCst);
    }

    pub fn release(&self) {
        self.held.store(false, Ordering::SeqCst);
        self.gate.notify_one();
    }

    async fn wait_if_held(&self) {
        if self.held.load(Ordering::SeqCst) {
            self.gate.notified().await;
        }
    }

    pub fn list_calls(&self) -> usize {
        self.state.lock().unwrap().list_calls
    }

    pub fn register_calls(&self) -> usize {
        self.state.lock().unwrap().register_calls
    }

    pub fn login_calls(&self) -> usize {
        self.state.lock().unwrap().login_calls
    }

    pub fn add_calls(&self) -> usize {
        self.state.lock().unwrap().add_calls
    }

    pub fn last_register(&self) -> Option<(String, String, String)> {
        self.state.lock().unwrap().last_register.clone()
    }

    pub fn last_login(&self) -> Option<(String, String)> {
        self.state.lock().unwrap().last_login.clone()
    }

    pub fn last_new_product(&self) -> Option<NewProduct> {
        self.state.lock().unwrap().last_new_product.clone()
    }
}

impl StoreApi for FakeApi {
    async fn register(&self, request: &RegisterRequest) -> ApiResult<RegisterResponse> {
        self.wait_if_held().await;
        let mut state = self.state.lock().unwrap();
        state.register_calls += 1;
        state.last_register = Some((
            request.full_name.clone(),
            request.email.clone(),
            request.password.expose_secret().to_owned(),
        ));
        state.register.clone().unwrap_or_else(|| {
            Ok(RegisterResponse {
                success: true,
                message: None,
            })
        })
    }

    async fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse> {
        self.wait_if_held().await;
        let mut state = self.state.lock().unwrap();
        state.login_calls += 1;
        state.last_login = Some((
            request.email.clone(),
            request.password.expose_secret().to_owned(),
        ));
        let (success, token) = state
            .login
            .clone()
            .unwrap_or_else(|| Ok((true, Some("token".to_owned()))))?;
        Ok(LoginResponse {
            success,
            token: token.map(SecretString::from),
        })
    }

    async fn list_products(&self) -> ApiResult<Vec<Product>> {
        let mut state = self.state.lock().unwrap();
        state.list_calls += 1;
        match &state.products_error {
            Some(err) => Err(err.clone()),
            None => Ok(state.products.clone()),
        }
    }

    async fn add_product(&self, product: NewProduct) -> ApiResult<AddProductResponse> {
        self.wait_if_held().await;
        let mut state = self.state.lock().unwrap();
        state.add_calls += 1;
        let created = Product {
            id: ProductId::new(format!("new-{}", state.add_calls)),
            product_name: product.product_name.clone(),
            brand: product.brand.clone(),
            price: product.price,
            rating: product.rating,
            image: Some(product.image.file_name.clone()),
        };
        state.last_new_product = Some(product);
        if let Some(result) = state.add_product.clone() {
            return result;
        }
        state.products.push(created.clone());
        Ok(AddProductResponse {
            product: Some(created),
            success: Some(true),
            message: None,
        })
    }
}
