//! Terminal output: notifications and catalog/cart listings.

use std::io::{self, Write};

use catalog_cart_core::Product;
use catalog_cart_storefront::notify::{Notification, Toaster};
use catalog_cart_storefront::views::{EMPTY_CART, ProductListView};

/// Prints each notification on its own line as it is pushed.
pub struct ConsoleToaster<W: Write> {
    out: W,
}

impl ConsoleToaster<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleToaster<W> {
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Toaster for ConsoleToaster<W> {
    fn push(&mut self, notification: Notification) {
        if let Err(e) = writeln!(self.out, "{notification}") {
            tracing::warn!(error = %e, "Failed to print notification");
        }
    }
}

/// One product per line: id, name, brand, price, rating.
pub fn product_line(product: &Product, in_cart: bool) -> String {
    let marker = if in_cart { "  (in cart)" } else { "" };
    format!(
        "{}  {} ({})  {}  rating {}{marker}",
        product.id, product.product_name, product.brand, product.price, product.rating
    )
}

/// The current page of the catalog and the page bar.
pub fn write_catalog<W: Write>(out: &mut W, view: &ProductListView) -> io::Result<()> {
    if view.loading_indicator_visible() {
        writeln!(out, "Loading...")?;
    }
    if let Some(banner) = view.error_banner() {
        return writeln!(out, "{banner}");
    }

    let products = view.visible_products();
    if products.is_empty() {
        return writeln!(out, "No products.");
    }
    for product in products {
        writeln!(out, "{}", product_line(product, view.cart().contains(&product.id)))?;
    }

    let catalog = view.catalog();
    writeln!(
        out,
        "Page {} of {}: {}",
        catalog.current_page(),
        catalog.total_pages(),
        view.pagination()
    )
}

/// Cart contents, in the order items were added.
pub fn write_cart<W: Write>(out: &mut W, view: &ProductListView) -> io::Result<()> {
    let cart = view.cart();
    if cart.is_empty() {
        return writeln!(out, "{EMPTY_CART}");
    }
    for product in cart.items() {
        writeln!(out, "{}", product_line(product, false))?;
    }
    writeln!(out, "{} item(s) in cart", cart.count())
}
