//! Product identity.
//!
//! Identities are assigned by the remote API and are opaque to the client:
//! they are compared for equality and echoed back, never parsed.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned key distinguishing one product record from another.
///
/// Two products with identical fields but different identities are distinct.
///
/// ```rust
/// # use catalog_cart_core::ProductId;
/// let a = ProductId::new("665f1c2e9b1d");
/// let b: ProductId = "665f1c2e9b1d".into();
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a new ID from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the underlying key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
