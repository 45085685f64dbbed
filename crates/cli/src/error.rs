//! CLI error type.

use catalog_cart_storefront::api::{ApiError, ImageError};
use catalog_cart_storefront::config::ConfigError;
use catalog_cart_storefront::storage::StorageError;
use thiserror::Error;

/// Errors that end a command with a non-zero exit code.
///
/// API failures during form submission are shown as notifications instead
/// and do not surface here.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid environment configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Building the client or fetching the catalog failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Token storage could not be read or written.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The image file could not be used.
    #[error("Image error: {0}")]
    Image(#[from] ImageError),

    /// Reading stdin or writing stdout failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
