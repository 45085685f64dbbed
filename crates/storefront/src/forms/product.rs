//! New-product form.

use catalog_cart_core::{Price, Product, Rating};
use tokio::sync::watch;
use tracing::instrument;

use super::{FormField, FormState, SubmitOutcome, failure_message};
use crate::api::{ImageAttachment, NewProduct, StoreApi};
use crate::notify::{Notification, Toaster};

pub const PRODUCT_NAME_REQUIRED: &str = "Product name is required.";
pub const BRAND_REQUIRED: &str = "Brand is required.";
pub const PRICE_REQUIRED: &str = "Price is required.";
pub const RATING_REQUIRED: &str = "Rating is required.";
pub const IMAGE_REQUIRED: &str = "Image is required.";
pub const PRICE_NOT_A_NUMBER: &str = "Price must be a number.";
pub const RATING_NOT_A_NUMBER: &str = "Rating must be a number.";
pub const PRODUCT_ADDED: &str = "Product added successfully!";
pub const ADD_PRODUCT_FAILED: &str = "Error adding product. Please try again.";

/// Product name, brand, price, rating and exactly one image.
#[derive(Debug, Default)]
pub struct AddProductForm {
    product_name: FormField,
    brand: FormField,
    price: FormField,
    rating: FormField,
    image: Option<ImageAttachment>,
    image_error: String,
    state: FormState,
}

impl AddProductForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_product_name(&mut self, value: impl Into<String>) {
        self.product_name.set(value);
        self.state.changed();
    }

    pub fn set_brand(&mut self, value: impl Into<String>) {
        self.brand.set(value);
        self.state.changed();
    }

    pub fn set_price(&mut self, value: impl Into<String>) {
        self.price.set(value);
        self.state.changed();
    }

    pub fn set_rating(&mut self, value: impl Into<String>) {
        self.rating.set(value);
        self.state.changed();
    }

    /// Select the image to upload, replacing and returning any earlier one.
    pub fn attach_image(&mut self, image: ImageAttachment) -> Option<ImageAttachment> {
        self.image_error.clear();
        let previous = self.image.replace(image);
        self.state.changed();
        previous
    }

    #[must_use]
    pub const fn product_name(&self) -> &FormField {
        &self.product_name
    }

    #[must_use]
    pub const fn brand(&self) -> &FormField {
        &self.brand
    }

    #[must_use]
    pub const fn price(&self) -> &FormField {
        &self.price
    }

    #[must_use]
    pub const fn rating(&self) -> &FormField {
        &self.rating
    }

    #[must_use]
    pub const fn image(&self) -> Option<&ImageAttachment> {
        self.image.as_ref()
    }

    /// Error for the image selector; empty when valid.
    #[must_use]
    pub fn image_error(&self) -> &str {
        &self.image_error
    }

    /// Whether a request is in flight.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.state.is_submitting()
    }

    /// Watch the submitting flag.
    #[must_use]
    pub fn watch_submitting(&self) -> watch::Receiver<bool> {
        self.state.watch_submitting()
    }

    /// Subscribe to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.state.subscribe()
    }

    /// Label for the submit button.
    #[must_use]
    pub fn submit_label(&self) -> &'static str {
        if self.is_submitting() {
            "Adding..."
        } else {
            "Add Product"
        }
    }

    /// The submit button is disabled while a request is in flight.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.is_submitting()
    }

    /// Check every field and build the payload if all pass.
    pub fn validate(&mut self) -> Option<NewProduct> {
        let name_ok = self.product_name.require(PRODUCT_NAME_REQUIRED);
        let brand_ok = self.brand.require(BRAND_REQUIRED);

        let price = if self.price.require(PRICE_REQUIRED) {
            Price::parse(self.price.value())
                .inspect_err(|_| self.price.fail(PRICE_NOT_A_NUMBER))
                .ok()
        } else {
            None
        };

        let rating = if self.rating.require(RATING_REQUIRED) {
            Rating::parse(self.rating.value())
                .inspect_err(|_| self.rating.fail(RATING_NOT_A_NUMBER))
                .ok()
        } else {
            None
        };

        if self.image.is_none() {
            IMAGE_REQUIRED.clone_into(&mut self.image_error);
        }
        self.state.changed();

        match (name_ok, brand_ok, price, rating, &self.image) {
            (true, true, Some(price), Some(rating), Some(image)) => Some(NewProduct {
                product_name: self.product_name.value().to_owned(),
                brand: self.brand.value().to_owned(),
                price,
                rating,
                image: image.clone(),
            }),
            _ => None,
        }
    }

    /// Validate and, if complete, create the product.
    ///
    /// Returns the created product when the API echoes it back.
    #[instrument(skip_all, fields(name = %self.product_name.value()))]
    pub async fn submit<A, T>(&mut self, api: &A, toaster: &mut T) -> SubmitOutcome<Option<Product>>
    where
        A: StoreApi,
        T: Toaster,
    {
        let Some(new_product) = self.validate() else {
            tracing::debug!("Product submission blocked by invalid fields");
            return SubmitOutcome::Invalid;
        };

        let _submitting = self.state.begin_submit();
        match api.add_product(new_product).await {
            Ok(response) => {
                toaster.push(Notification::success(PRODUCT_ADDED));
                SubmitOutcome::Succeeded(response.product)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Adding product failed");
                toaster.push(Notification::error(failure_message(
                    &err,
                    None,
                    ADD_PRODUCT_FAILED,
                )));
                for (field, messages) in &err.detail().field_errors {
                    for message in messages {
                        toaster.push(Notification::error(format!("{field}: {message}")));
                    }
                }
                SubmitOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use rust_decimal::Decimal;

    use super::*;
    use crate::api::{ApiErrorKind, ErrorDetail};
    use crate::testing::{FakeApi, api_error};

    fn png(name: &str) -> ImageAttachment {
        ImageAttachment::new(name, "image/png", vec![1, 2, 3])
    }

    fn filled() -> AddProductForm {
        let mut form = AddProductForm::new();
        form.set_product_name("Trail Runner");
        form.set_brand("Acme");
        form.set_price("89.50");
        form.set_rating("4.5");
        form.attach_image(png("shoe.png"));
        form
    }

    #[tokio::test]
    async fn test_empty_form_blocks_submit() {
        let api = FakeApi::new();
        let mut form = AddProductForm::new();

        let outcome = form.submit(&api, &mut Vec::new()).await;
        assert_eq!(outcome, SubmitOutcome::Invalid);
        assert_eq!(api.add_calls(), 0);
        assert_eq!(form.product_name().error(), PRODUCT_NAME_REQUIRED);
        assert_eq!(form.brand().error(), BRAND_REQUIRED);
        assert_eq!(form.price().error(), PRICE_REQUIRED);
        assert_eq!(form.rating().error(), RATING_REQUIRED);
        assert_eq!(form.image_error(), IMAGE_REQUIRED);
    }

    #[tokio::test]
    async fn test_non_numeric_price_blocks_submit() {
        let api = FakeApi::new();
        let mut form = filled();
        form.set_price("cheap");
        form.set_rating("five");

        assert_eq!(form.submit(&api, &mut Vec::new()).await, SubmitOutcome::Invalid);
        assert_eq!(api.add_calls(), 0);
        assert_eq!(form.price().error(), PRICE_NOT_A_NUMBER);
        assert_eq!(form.rating().error(), RATING_NOT_A_NUMBER);
    }

    #[test]
    fn test_attach_replaces_previous_image() {
        let mut form = AddProductForm::new();
        assert!(form.attach_image(png("a.png")).is_none());
        let previous = form.attach_image(png("b.png")).unwrap();
        assert_eq!(previous.file_name, "a.png");
        assert_eq!(form.image().unwrap().file_name, "b.png");
    }

    #[tokio::test]
    async fn test_success_sends_payload() {
        let api = FakeApi::new();
        let mut toasts = Vec::new();
        let mut form = filled();
        form.attach_image(png("final.png"));

        let outcome = form.submit(&api, &mut toasts).await;
        let SubmitOutcome::Succeeded(Some(created)) = outcome else {
            panic!("expected success, got {outcome:?}");
        };
        assert_eq!(created.product_name, "Trail Runner");
        assert_eq!(toasts, [Notification::success(PRODUCT_ADDED)]);

        let sent = api.last_new_product().unwrap();
        assert_eq!(sent.brand, "Acme");
        assert_eq!(sent.price.amount(), Decimal::new(8950, 2));
        assert_eq!(sent.rating.value(), Decimal::new(45, 1));
        assert_eq!(sent.image.file_name, "final.png");
    }

    #[tokio::test]
    async fn test_field_errors_become_separate_notifications() {
        let api = FakeApi::new();
        let mut field_errors = BTreeMap::new();
        field_errors.insert("brand".to_owned(), vec!["too short".to_owned()]);
        field_errors.insert(
            "price".to_owned(),
            vec!["must be positive".to_owned(), "too large".to_owned()],
        );
        api.respond_add_product(Err(api_error(
            ApiErrorKind::ValidationFailed,
            ErrorDetail {
                message: Some("Validation failed".to_owned()),
                field_errors,
                ..ErrorDetail::default()
            },
        )));
        let mut toasts = Vec::new();

        let outcome = filled().submit(&api, &mut toasts).await;
        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(
            toasts,
            [
                Notification::error("Validation failed"),
                Notification::error("brand: too short"),
                Notification::error("price: must be positive"),
                Notification::error("price: too large"),
            ]
        );
    }

    #[tokio::test]
    async fn test_button_disabled_while_adding() {
        let api = FakeApi::new();
        api.hold_calls();
        api.respond_add_product(Err(api_error(ApiErrorKind::Network, ErrorDetail::default())));
        let mut form = filled();
        let mut submitting = form.watch_submitting();
        assert!(form.can_submit());
        assert_eq!(form.submit_label(), "Add Product");

        let mut toasts = Vec::new();
        let observe = async {
            submitting.wait_for(|pending| *pending).await.unwrap();
            api.release();
            submitting.wait_for(|pending| !*pending).await.unwrap();
        };
        let (outcome, ()) = tokio::join!(form.submit(&api, &mut toasts), observe);

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(api.add_calls(), 1);
        assert!(form.can_submit());
        assert_eq!(form.submit_label(), "Add Product");
    }

    #[test]
    fn test_labels_follow_submitting_flag() {
        let form = AddProductForm::new();
        let guard = form.state.begin_submit();
        assert!(!form.can_submit());
        assert_eq!(form.submit_label(), "Adding...");
        drop(guard);
        assert_eq!(form.submit_label(), "Add Product");
    }

    #[tokio::test]
    async fn test_unstructured_failure_uses_fallback() {
        let api = FakeApi::new();
        api.respond_add_product(Err(api_error(ApiErrorKind::Network, ErrorDetail::default())));
        let mut toasts = Vec::new();

        filled().submit(&api, &mut toasts).await;
        assert_eq!(toasts, [Notification::error(ADD_PRODUCT_FAILED)]);
    }
}
