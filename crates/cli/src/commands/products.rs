//! Catalog commands: list one page, add a product.

use std::io::Write;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use catalog_cart_storefront::api::{ImageAttachment, StoreApi};
use catalog_cart_storefront::forms::{AddProductForm, SubmitOutcome};
use catalog_cart_storefront::notify::{Notification, Toaster};
use catalog_cart_storefront::pagination::PageChange;
use catalog_cart_storefront::views::ProductListView;

use super::report_field_errors;
use crate::console;
use crate::error::CliError;

/// Fields for a new product, as typed on the command line.
pub struct ProductInput {
    pub name: String,
    pub brand: String,
    pub price: String,
    pub rating: String,
    pub image: PathBuf,
}

/// Fetch the catalog and print page `page`.
///
/// # Errors
///
/// Returns an error if the catalog cannot be fetched or output fails.
pub async fn list<A, W>(
    api: &A,
    page_size: NonZeroUsize,
    page: usize,
    out: &mut W,
) -> Result<(), CliError>
where
    A: StoreApi,
    W: Write,
{
    let mut view = ProductListView::new(page_size);
    let count = view.load(api).await?;
    tracing::info!(count, "Fetched catalog");

    if page != 1 && !view.change_page(PageChange(page)) {
        writeln!(
            out,
            "Page {page} does not exist; showing page {}.",
            view.catalog().current_page()
        )?;
    }
    console::write_catalog(out, &view)?;
    Ok(())
}

/// Create a product, then fetch the catalog again and print its first page.
///
/// The typed fields are checked even when the image cannot be read, so every
/// problem is reported in one run.
///
/// # Errors
///
/// Returns an error if the image cannot be read or output fails. API
/// rejections are shown as notifications.
pub async fn add<A, T, W>(
    api: &A,
    page_size: NonZeroUsize,
    input: ProductInput,
    toaster: &mut T,
    out: &mut W,
) -> Result<(), CliError>
where
    A: StoreApi,
    T: Toaster,
    W: Write,
{
    let image = ImageAttachment::from_path(&input.image).await;

    let mut view = ProductListView::new(page_size);
    let form = view.open_product_form();
    form.set_product_name(input.name);
    form.set_brand(input.brand);
    form.set_price(input.price);
    form.set_rating(input.rating);

    match image {
        Ok(image) => {
            form.attach_image(image);
        }
        Err(e) => {
            form.validate();
            report_text_field_errors(toaster, form);
            return Err(e.into());
        }
    }

    match view.submit_product_form(api, toaster).await {
        Some(SubmitOutcome::Succeeded(_)) => console::write_catalog(out, &view)?,
        Some(SubmitOutcome::Invalid) => {
            if let Some(form) = view.product_form() {
                report_text_field_errors(toaster, form);
                if !form.image_error().is_empty() {
                    toaster.push(Notification::error(form.image_error()));
                }
            }
        }
        Some(SubmitOutcome::Failed) | None => {}
    }
    Ok(())
}

fn report_text_field_errors<T: Toaster>(toaster: &mut T, form: &AddProductForm) {
    report_field_errors(
        toaster,
        &[form.product_name(), form.brand(), form.price(), form.rating()],
    );
}
