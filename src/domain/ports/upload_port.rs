//! Upload port definition.

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::entities::ChannelId;
use crate::domain::errors::UploadError;

/// File handed to the client's upload prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    /// File contents.
    pub data: Bytes,
    /// File name shown to the user.
    pub file_name: String,
    /// MIME type.
    pub mime_type: String,
    /// Target channel.
    pub channel_id: ChannelId,
}

/// Port for submitting files to a channel.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UploadPort: Send + Sync {
    /// Submits a file for upload.
    async fn submit(&self, request: UploadRequest) -> Result<(), UploadError>;
}
