use async_trait::async_trait;

use crate::domain::SeedError;

#[async_trait]
pub trait BlobStore: Send + Sync + 'static {
    /// Stores `bytes` under `relative_path`, replacing anything already there.
    async fn put(&self, relative_path: &str, bytes: &[u8]) -> Result<(), SeedError>;
}
