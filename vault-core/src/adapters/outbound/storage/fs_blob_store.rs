use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::domain::{ports::outbound::BlobStore, SeedError};

/// Stores blobs as plain files below `root`, like a public storage disk.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn put(&self, relative_path: &str, bytes: &[u8]) -> Result<(), SeedError> {
        let blob_error = |source: std::io::Error| SeedError::Blob {
            path: relative_path.to_string(),
            source,
        };

        let path = self.root.join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(blob_error)?;
        }
        fs::write(&path, bytes).await.map_err(blob_error)?;

        Ok(())
    }
}
