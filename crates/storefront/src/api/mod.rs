//! Catalog API client.
//!
//! # Architecture
//!
//! - `reqwest` for HTTP, one client per process, created from [`ClientConfig`]
//! - JSON bodies for auth, multipart for product creation
//! - Every failure is converted to a tagged [`ApiError`]; nothing is retried
//! - Controllers depend on the [`StoreApi`] trait, not on [`ApiClient`]
//!
//! # Endpoints
//!
//! | Method | Path | Body |
//! |---|---|---|
//! | `POST` | `register/` | `{fullName, email, password}` |
//! | `POST` | `login/` | `{email, password}` |
//! | `GET` | `product/` | - |
//! | `POST` | `product/add` | multipart `productName, brand, price, rating, image` |
//!
//! # Example
//!
//! ```rust,ignore
//! use catalog_cart_storefront::api::ApiClient;
//!
//! let client = ApiClient::new(&config)?;
//! let products = client.list_products().await?;
//! ```

mod error;
pub mod types;

pub use error::{
    ApiError, ApiErrorKind, ApiResult, DUPLICATE_RECORD_CODE, ErrorDetail, MessageField,
};
pub use types::*;

use std::future::Future;

use catalog_cart_core::Product;
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use crate::config::ClientConfig;

/// The remote operations the storefront consumes.
///
/// Implemented by [`ApiClient`] over HTTP; tests drive controllers with fakes.
pub trait StoreApi {
    /// Create an account.
    fn register(
        &self,
        request: &RegisterRequest,
    ) -> impl Future<Output = ApiResult<RegisterResponse>> + Send;

    /// Exchange credentials for a session token.
    fn login(&self, request: &LoginRequest) -> impl Future<Output = ApiResult<LoginResponse>> + Send;

    /// Fetch the full product collection.
    fn list_products(&self) -> impl Future<Output = ApiResult<Vec<Product>>> + Send;

    /// Create a product.
    fn add_product(
        &self,
        product: NewProduct,
    ) -> impl Future<Output = ApiResult<AddProductResponse>> + Send;
}

/// HTTP implementation of [`StoreApi`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ApiError::transport(&e))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// The base URL every endpoint is resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::invalid_request(format!("invalid endpoint {path}: {e}")))
    }

    /// Send a request and return the status and raw body of a 2xx response.
    async fn execute(
        &self,
        request: RequestBuilder,
        messages: MessageField,
    ) -> ApiResult<(StatusCode, Vec<u8>)> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!(error = %e, "Request failed before a response arrived");
            ApiError::transport(&e)
        })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::transport(&e))?
            .to_vec();

        if !status.is_success() {
            let err = ApiError::from_response_with(status.as_u16(), &body, messages);
            tracing::warn!(status = status.as_u16(), error = %err, "API returned an error");
            return Err(err);
        }

        Ok((status, body))
    }

    async fn execute_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        messages: MessageField,
    ) -> ApiResult<T> {
        let (status, body) = self.execute(request, messages).await?;
        serde_json::from_slice(&body).map_err(|e| {
            tracing::warn!(error = %e, "Unexpected response body");
            ApiError::decode(status.as_u16(), &e)
        })
    }
}

impl StoreApi for ApiClient {
    #[instrument(skip(self, request), fields(email = %request.email))]
    async fn register(&self, request: &RegisterRequest) -> ApiResult<RegisterResponse> {
        let url = self.endpoint("register/")?;
        let response: RegisterResponse = self
            .execute_json(self.client.post(url).json(request), MessageField::Nested)
            .await?;
        tracing::debug!(success = response.success, "Registration response");
        Ok(response)
    }

    #[instrument(skip(self, request), fields(email = %request.email))]
    async fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse> {
        let url = self.endpoint("login/")?;
        let response: LoginResponse = self
            .execute_json(self.client.post(url).json(request), MessageField::Nested)
            .await?;
        tracing::debug!(success = response.success, "Login response");
        Ok(response)
    }

    #[instrument(skip(self))]
    async fn list_products(&self) -> ApiResult<Vec<Product>> {
        let url = self.endpoint("product/")?;
        let response: ProductListResponse = self
            .execute_json(self.client.get(url), MessageField::NestedOrTopLevel)
            .await?;
        tracing::debug!(count = response.products.len(), "Fetched products");
        Ok(response.products)
    }

    #[instrument(skip(self, product), fields(name = %product.product_name))]
    async fn add_product(&self, product: NewProduct) -> ApiResult<AddProductResponse> {
        let url = self.endpoint("product/add")?;

        let NewProduct {
            product_name,
            brand,
            price,
            rating,
            image,
        } = product;

        let image_part = Part::bytes(image.bytes)
            .file_name(image.file_name)
            .mime_str(&image.content_type)
            .map_err(|e| ApiError::invalid_request(format!("invalid image type: {e}")))?;

        let form = Form::new()
            .text("productName", product_name)
            .text("brand", brand)
            .text("price", price.amount().to_string())
            .text("rating", rating.value().to_string())
            .part("image", image_part);

        let (status, body) = self
            .execute(self.client.post(url).multipart(form), MessageField::NestedOrTopLevel)
            .await?;

        // A 2xx body can still report `success: false` with validation detail
        let response: AddProductResponse =
            serde_json::from_slice(&body).map_err(|e| ApiError::decode(status.as_u16(), &e))?;
        if response.success == Some(false) {
            let err = ApiError::from_response(status.as_u16(), &body);
            tracing::warn!(error = %err, "Product rejected");
            return Err(err);
        }

        tracing::info!("Product created");
        Ok(response)
    }
}
