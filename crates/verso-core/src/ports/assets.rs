//! Binary asset store port.
//!
//! The store accepts uploaded image bytes and returns an opaque
//! reference; the core persists and echoes that reference without ever
//! interpreting it.

use async_trait::async_trait;

/// Asset store trait for image uploads.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Store the uploaded bytes, returning the opaque reference to keep
    /// on the post. `original_name` is advisory (extension hints).
    async fn store(&self, original_name: &str, bytes: Vec<u8>) -> Result<String, AssetError>;
}

/// Asset store errors.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset write failed: {0}")]
    Write(String),
}
