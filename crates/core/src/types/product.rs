//! Product records as served by the catalog API.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId, Rating};

/// A catalog product.
///
/// Products are created by the remote API and never mutated locally; a new
/// product only shows up after the catalog is fetched again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Server-assigned identity.
    #[serde(rename = "_id")]
    pub id: ProductId,
    /// Display name.
    pub product_name: String,
    /// Brand name.
    pub brand: String,
    /// Unit price.
    pub price: Price,
    /// Customer rating.
    pub rating: Rating,
    /// Image reference (URL or path served by the API).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Product {
    /// Whether `other` refers to the same server record.
    ///
    /// Field values are not compared.
    #[must_use]
    pub fn same_identity(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
