//! Catalog state: the fetched product list and the current page.
//!
//! The full collection is fetched in one request and paged locally, so page
//! changes never touch the network. `refetch` replaces the list wholesale.

use std::num::NonZeroUsize;

use catalog_cart_core::{Product, ProductId};
use tokio::sync::watch;

use crate::api::{ApiError, StoreApi};
use crate::observe::ChangeNotifier;
use crate::pagination::Pagination;

/// Products shown per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(6) {
    Some(size) => size,
    None => panic!("page size must be non-zero"),
};

/// Where the last fetch stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A fetch is in flight. Previously loaded products stay visible.
    Loading,
    /// The list reflects the last successful fetch.
    Loaded,
    /// The last fetch failed; no products are shown.
    Failed(ApiError),
}

/// Fetched products plus pagination state.
#[derive(Debug)]
pub struct Catalog {
    products: Vec<Product>,
    current_page: usize,
    page_size: NonZeroUsize,
    status: LoadStatus,
    changes: ChangeNotifier,
}

impl Catalog {
    #[must_use]
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            products: Vec::new(),
            current_page: 1,
            page_size,
            status: LoadStatus::Idle,
            changes: ChangeNotifier::new(),
        }
    }

    /// Fetch the full product collection.
    ///
    /// One attempt; a failure clears the list and is kept in [`Self::status`].
    ///
    /// # Errors
    ///
    /// Returns the `ApiError` of the failed fetch.
    pub async fn load<A: StoreApi>(&mut self, api: &A) -> Result<usize, ApiError> {
        self.status = LoadStatus::Loading;
        self.changes.notify();

        let result = api.list_products().await;
        let outcome = match result {
            Ok(products) => {
                let count = products.len();
                self.products = products;
                self.clamp_page();
                self.status = LoadStatus::Loaded;
                tracing::debug!(count, pages = self.total_pages(), "Catalog loaded");
                Ok(count)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Catalog fetch failed");
                self.products.clear();
                self.current_page = 1;
                self.status = LoadStatus::Failed(err.clone());
                Err(err)
            }
        };

        self.changes.notify();
        outcome
    }

    /// Fetch again after a mutation so the list mirrors the server.
    ///
    /// # Errors
    ///
    /// Returns the `ApiError` of the failed fetch.
    pub async fn refetch<A: StoreApi>(&mut self, api: &A) -> Result<usize, ApiError> {
        self.load(api).await
    }

    /// Move to page `page` (1-based). Out-of-range pages are ignored.
    pub fn set_page(&mut self, page: usize) -> bool {
        if page == 0 || page > self.total_pages() {
            return false;
        }
        if page != self.current_page {
            self.current_page = page;
            self.changes.notify();
        }
        true
    }

    /// Products on the current page.
    #[must_use]
    pub fn visible_slice(&self) -> &[Product] {
        let size = self.page_size.get();
        let start = (self.current_page - 1).saturating_mul(size);
        let end = start.saturating_add(size).min(self.products.len());
        self.products.get(start..end).unwrap_or(&[])
    }

    /// `ceil(len / page_size)`; zero for an empty catalog.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.products.len().div_ceil(self.page_size.get())
    }

    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.current_page
    }

    #[must_use]
    pub const fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    /// Every loaded product.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a loaded product by identity.
    #[must_use]
    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    #[must_use]
    pub const fn status(&self) -> &LoadStatus {
        &self.status
    }

    /// Whether a fetch is in flight.
    #[must_use]
    pub const fn is_fetching(&self) -> bool {
        matches!(self.status, LoadStatus::Loading)
    }

    /// The error of the last fetch, if it failed.
    #[must_use]
    pub const fn error(&self) -> Option<&ApiError> {
        match &self.status {
            LoadStatus::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Page bar for the current state.
    #[must_use]
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.current_page, self.total_pages())
    }

    /// Subscribe to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }

    /// Keep the current page within `1..=total_pages` after the list changed.
    fn clamp_page(&mut self) {
        self.current_page = self.current_page.clamp(1, self.total_pages().max(1));
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}
