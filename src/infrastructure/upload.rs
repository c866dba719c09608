//! Upload port that stages files in a local directory.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::info;

use crate::domain::errors::UploadError;
use crate::domain::ports::{UploadPort, UploadRequest};

/// Writes each submitted file into an output directory, creating it on
/// first use.
#[derive(Debug, Clone)]
pub struct DirectoryUploader {
    dir: PathBuf,
}

impl DirectoryUploader {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl UploadPort for DirectoryUploader {
    async fn submit(&self, request: UploadRequest) -> Result<(), UploadError> {
        let name = Path::new(&request.file_name);
        if request.file_name.is_empty() || name.file_name() != Some(name.as_os_str()) {
            return Err(UploadError::Rejected(format!(
                "invalid file name {:?}",
                request.file_name
            )));
        }

        fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(name);
        fs::write(&path, &request.data).await?;

        info!(
            path = %path.display(),
            channel_id = %request.channel_id,
            mime_type = %request.mime_type,
            bytes = request.data.len(),
            "Staged upload"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ChannelId;
    use bytes::Bytes;

    fn request(file_name: &str) -> UploadRequest {
        UploadRequest {
            data: Bytes::from_static(b"GIF89a"),
            file_name: file_name.to_string(),
            mime_type: "image/gif".to_string(),
            channel_id: ChannelId(4),
        }
    }

    #[tokio::test]
    async fn test_writes_file_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("uploads");
        let uploader = DirectoryUploader::new(&out);

        uploader.submit(request("55.gif")).await.unwrap();

        assert_eq!(std::fs::read(out.join("55.gif")).unwrap(), b"GIF89a");
    }

    #[tokio::test]
    async fn test_rejects_paths_in_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let uploader = DirectoryUploader::new(dir.path());

        let result = uploader.submit(request("../55.gif")).await;
        assert!(matches!(result, Err(UploadError::Rejected(_))));

        let result = uploader.submit(request("")).await;
        assert!(matches!(result, Err(UploadError::Rejected(_))));
    }
}
