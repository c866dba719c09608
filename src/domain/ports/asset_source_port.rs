//! Asset source port definition.

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::errors::RecodeError;

/// Provides raw bytes for a media URL already available to the client.
#[async_trait]
pub trait AssetSourcePort: Send + Sync {
    /// Returns the bytes behind `url`.
    async fn fetch(&self, url: &str) -> Result<Bytes, RecodeError>;
}
