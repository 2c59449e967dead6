//! Filesystem asset store - writes uploads under a configured root and
//! hands back the generated filename as the opaque reference.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use uuid::Uuid;

use verso_core::ports::{AssetError, AssetStore};

/// Asset store backed by a local directory.
pub struct FsAssetStore {
    root: PathBuf,
}

impl FsAssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl AssetStore for FsAssetStore {
    async fn store(&self, original_name: &str, bytes: Vec<u8>) -> Result<String, AssetError> {
        let extension = Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("bin");
        let reference = format!("{}.{}", Uuid::new_v4(), extension);

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| AssetError::Write(e.to_string()))?;
        tokio::fs::write(self.root.join(&reference), bytes)
            .await
            .map_err(|e| AssetError::Write(e.to_string()))?;

        tracing::debug!(reference = %reference, "Asset stored");
        Ok(reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stores_bytes_and_returns_reference_with_extension() {
        let root = std::env::temp_dir().join(format!("verso-assets-{}", Uuid::new_v4()));
        let store = FsAssetStore::new(&root);

        let reference = store.store("photo.png", vec![1, 2, 3]).await.unwrap();
        assert!(reference.ends_with(".png"));

        let written = tokio::fs::read(root.join(&reference)).await.unwrap();
        assert_eq!(written, vec![1, 2, 3]);

        tokio::fs::remove_dir_all(&root).await.unwrap();
    }

    #[tokio::test]
    async fn unknown_extension_falls_back_to_bin() {
        let root = std::env::temp_dir().join(format!("verso-assets-{}", Uuid::new_v4()));
        let store = FsAssetStore::new(&root);

        let reference = store.store("noext", vec![0]).await.unwrap();
        assert!(reference.ends_with(".bin"));

        tokio::fs::remove_dir_all(&root).await.unwrap();
    }
}
