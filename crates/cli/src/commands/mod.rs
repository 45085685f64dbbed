//! Command implementations.

pub mod auth;
pub mod products;
pub mod shop;

use catalog_cart_storefront::forms::FormField;
use catalog_cart_storefront::notify::{Notification, Toaster};

/// Push every recorded field error as an error notification.
fn report_field_errors<T: Toaster>(toaster: &mut T, fields: &[&FormField]) {
    for field in fields.iter().filter(|field| !field.error().is_empty()) {
        toaster.push(Notification::error(field.error()));
    }
}
