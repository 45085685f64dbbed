//! Request and response payloads for the catalog API.

use std::path::Path;

use catalog_cart_core::{Price, Product, Rating};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

// =============================================================================
// Auth
// =============================================================================

/// Body of `POST register/`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    #[serde(serialize_with = "serialize_secret")]
    pub password: SecretString,
}

/// Response of `POST register/`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `POST login/`.
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    #[serde(serialize_with = "serialize_secret")]
    pub password: SecretString,
}

/// Response of `POST login/`.
#[derive(Debug, Default, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, deserialize_with = "deserialize_optional_secret")]
    pub token: Option<SecretString>,
}

fn serialize_secret<S: Serializer>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

fn deserialize_optional_secret<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<SecretString>, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.map(SecretString::from))
}

// =============================================================================
// Products
// =============================================================================

/// Response of `GET product/`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductListResponse {
    #[serde(default)]
    pub products: Vec<Product>,
}

/// Response of `POST product/add`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddProductResponse {
    #[serde(default)]
    pub product: Option<Product>,
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}

/// A validated product ready for the multipart `POST product/add`.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub product_name: String,
    pub brand: String,
    pub price: Price,
    pub rating: Rating,
    pub image: ImageAttachment,
}

/// Errors that can occur when reading an image attachment.
#[derive(Debug, Error)]
pub enum ImageError {
    /// The file could not be read.
    #[error("Could not read image {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// The file extension is not a supported image type.
    #[error("Unsupported image type: {0}")]
    UnsupportedType(String),
    /// The file is empty.
    #[error("Image file is empty: {0}")]
    Empty(String),
}

/// A single image selected for upload.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for ImageAttachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageAttachment")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl ImageAttachment {
    /// Create an attachment from in-memory bytes.
    #[must_use]
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Read an image from disk, inferring its content type from the extension.
    ///
    /// # Errors
    ///
    /// Returns `ImageError` if the extension is not a known image type, the
    /// file cannot be read, or it is empty.
    pub async fn from_path(path: &Path) -> Result<Self, ImageError> {
        let display = path.display().to_string();
        let content_type = content_type_for(path)
            .ok_or_else(|| ImageError::UnsupportedType(display.clone()))?;

        let bytes = tokio::fs::read(path).await.map_err(|source| ImageError::Io {
            path: display.clone(),
            source,
        })?;
        if bytes.is_empty() {
            return Err(ImageError::Empty(display));
        }

        let file_name = path
            .file_name()
            .map_or_else(|| "image".to_string(), |n| n.to_string_lossy().into_owned());

        Ok(Self::new(file_name, content_type, bytes))
    }
}

fn content_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}
