//! Product list screen: catalog grid, page bar, cart dialog and the
//! add-product form.

use std::num::NonZeroUsize;

use catalog_cart_core::{Product, ProductId};
use tracing::instrument;

use crate::api::{ApiError, StoreApi};
use crate::cart::{Cart, CartAdd};
use crate::catalog::{Catalog, DEFAULT_PAGE_SIZE};
use crate::forms::{AddProductForm, SubmitOutcome};
use crate::notify::{Notification, Toaster};
use crate::pagination::{PageChange, Pagination};

pub const ADDED_TO_CART: &str = "Product added to cart.";
pub const ALREADY_IN_CART: &str = "Product is already in the cart.";
pub const REMOVED_FROM_CART: &str = "Product removed from cart.";
pub const EMPTY_CART: &str = "No items in the cart.";

/// State behind the product list screen.
///
/// Owns exactly one catalog and one cart. The cart is dropped with the view.
#[derive(Debug)]
pub struct ProductListView {
    catalog: Catalog,
    cart: Cart,
    cart_open: bool,
    product_form: Option<AddProductForm>,
}

impl ProductListView {
    #[must_use]
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            catalog: Catalog::new(page_size),
            cart: Cart::new(),
            cart_open: false,
            product_form: None,
        }
    }

    /// Initial fetch when the screen is shown.
    ///
    /// # Errors
    ///
    /// Returns the `ApiError` of the failed fetch; it is also kept for
    /// [`Self::error_banner`].
    pub async fn load<A: StoreApi>(&mut self, api: &A) -> Result<usize, ApiError> {
        self.catalog.load(api).await
    }

    /// Fetch the list again.
    ///
    /// # Errors
    ///
    /// Returns the `ApiError` of the failed fetch.
    pub async fn refetch<A: StoreApi>(&mut self, api: &A) -> Result<usize, ApiError> {
        self.catalog.refetch(api).await
    }

    /// Text shown in place of the grid when the last fetch failed.
    #[must_use]
    pub fn error_banner(&self) -> Option<String> {
        self.catalog
            .error()
            .map(|err| format!("Error fetching products: {err}"))
    }

    /// Whether the spinner is shown. True exactly while a fetch is in flight.
    #[must_use]
    pub const fn loading_indicator_visible(&self) -> bool {
        self.catalog.is_fetching()
    }

    /// Products on the current page.
    #[must_use]
    pub fn visible_products(&self) -> &[Product] {
        self.catalog.visible_slice()
    }

    #[must_use]
    pub fn pagination(&self) -> Pagination {
        self.catalog.pagination()
    }

    /// Apply a click from the page bar.
    pub fn change_page(&mut self, change: PageChange) -> bool {
        let PageChange(page) = change;
        self.catalog.set_page(page)
    }

    /// Put a loaded product into the cart.
    ///
    /// Returns `None` if no loaded product has that identity.
    pub fn add_to_cart<T: Toaster>(&mut self, id: &ProductId, toaster: &mut T) -> Option<CartAdd> {
        let Some(product) = self.catalog.find(id).cloned() else {
            tracing::debug!(%id, "Not a loaded product");
            return None;
        };

        let outcome = self.cart.add(product);
        toaster.push(match outcome {
            CartAdd::Added => Notification::success(ADDED_TO_CART),
            CartAdd::Duplicate => Notification::error(ALREADY_IN_CART),
        });
        Some(outcome)
    }

    /// Take a product out of the cart. Absent products are ignored silently.
    pub fn remove_from_cart<T: Toaster>(&mut self, id: &ProductId, toaster: &mut T) -> bool {
        let removed = self.cart.remove(id).is_some();
        if removed {
            toaster.push(Notification::info(REMOVED_FROM_CART));
        }
        removed
    }

    pub fn open_cart(&mut self) {
        self.cart_open = true;
    }

    pub fn close_cart(&mut self) {
        self.cart_open = false;
    }

    #[must_use]
    pub const fn is_cart_open(&self) -> bool {
        self.cart_open
    }

    /// Open the add-product form, keeping any values already entered.
    pub fn open_product_form(&mut self) -> &mut AddProductForm {
        self.product_form.get_or_insert_with(AddProductForm::new)
    }

    /// Discard the add-product form.
    pub fn close_product_form(&mut self) -> Option<AddProductForm> {
        self.product_form.take()
    }

    #[must_use]
    pub const fn product_form(&self) -> Option<&AddProductForm> {
        self.product_form.as_ref()
    }

    /// Submit the open add-product form.
    ///
    /// On success the form closes and the catalog is fetched again so the
    /// new product appears. Returns `None` when no form is open.
    #[instrument(skip_all)]
    pub async fn submit_product_form<A, T>(
        &mut self,
        api: &A,
        toaster: &mut T,
    ) -> Option<SubmitOutcome<Option<Product>>>
    where
        A: StoreApi,
        T: Toaster,
    {
        let form = self.product_form.as_mut()?;
        let outcome = form.submit(api, toaster).await;

        if outcome.is_success() {
            self.product_form = None;
            if self.catalog.refetch(api).await.is_err() {
                tracing::debug!("Product added but the list could not be refreshed");
            }
        }
        Some(outcome)
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }
}

impl Default for ProductListView {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}
