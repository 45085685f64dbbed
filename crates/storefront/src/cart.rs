//! Client-side shopping cart.
//!
//! The cart lives only as long as the view that owns it. Membership is by
//! product identity: a second add of the same id is rejected, a remove of an
//! absent id does nothing.

use catalog_cart_core::{Product, ProductId};
use tokio::sync::watch;

use crate::observe::ChangeNotifier;

/// Result of [`Cart::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartAdd {
    /// The product was not in the cart and now is.
    Added,
    /// A product with the same identity is already in the cart.
    Duplicate,
}

/// Selected products, in the order they were added.
#[derive(Debug, Default)]
pub struct Cart {
    items: Vec<Product>,
    changes: ChangeNotifier,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a product unless its identity is already present.
    pub fn add(&mut self, product: Product) -> CartAdd {
        if self.contains(&product.id) {
            tracing::debug!(id = %product.id, "Product already in cart");
            return CartAdd::Duplicate;
        }

        tracing::debug!(id = %product.id, "Product added to cart");
        self.items.push(product);
        self.changes.notify();
        CartAdd::Added
    }

    /// Remove the product with identity `id`, returning it if it was present.
    pub fn remove(&mut self, id: &ProductId) -> Option<Product> {
        let index = self.items.iter().position(|p| &p.id == id)?;
        let removed = self.items.remove(index);
        tracing::debug!(%id, "Product removed from cart");
        self.changes.notify();
        Some(removed)
    }

    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.items.iter().any(|p| &p.id == id)
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    /// Subscribe to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::testing::product;

    #[test]
    fn test_add_then_duplicate() {
        let mut cart = Cart::new();
        assert_eq!(cart.add(product("p1")), CartAdd::Added);
        assert_eq!(cart.add(product("p1")), CartAdd::Duplicate);
        assert_eq!(cart.count(), 1);
    }

    #[test]
    fn test_identity_not_value_equality() {
        let mut cart = Cart::new();
        let a = product("p1");
        let mut b = a.clone();
        b.id = ProductId::new("p2");

        assert_eq!(cart.add(a), CartAdd::Added);
        assert_eq!(cart.add(b), CartAdd::Added);
        assert_eq!(cart.count(), 2);
    }

    #[test]
    fn test_duplicate_by_id_even_if_fields_differ() {
        let mut cart = Cart::new();
        let a = product("p1");
        let mut b = a.clone();
        b.product_name = "Different".to_owned();

        cart.add(a);
        assert_eq!(cart.add(b), CartAdd::Duplicate);
        assert_eq!(cart.items()[0].product_name, "Product p1");
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = Cart::new();
        cart.add(product("p1"));
        let rx = cart.subscribe();

        assert!(cart.remove(&ProductId::new("p9")).is_none());
        assert_eq!(cart.count(), 1);
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut cart = Cart::new();
        for id in ["p1", "p2", "p3"] {
            cart.add(product(id));
        }

        let removed = cart.remove(&ProductId::new("p2")).unwrap();
        assert_eq!(removed.id.as_str(), "p2");
        let ids: Vec<_> = cart.items().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["p1", "p3"]);

        // Removal is idempotent
        assert!(cart.remove(&ProductId::new("p2")).is_none());
        assert_eq!(cart.count(), 2);
    }

    #[test]
    fn test_mutations_notify() {
        let mut cart = Cart::new();
        let rx = cart.subscribe();
        cart.add(product("p1"));
        cart.add(product("p1"));
        cart.remove(&ProductId::new("p1"));
        assert_eq!(*rx.borrow(), 2);
    }
}
