//! Filesystem-backed asset source.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tracing::trace;
use url::Url;

use crate::domain::errors::RecodeError;
use crate::domain::ports::AssetSourcePort;

/// Serves media from local files.
///
/// `file://` URLs and bare paths are read directly. `http(s)` URLs are
/// mapped onto a mirror directory by their path, so
/// `https://media.discordapp.net/stickers/1.png?size=160` reads
/// `<root>/stickers/1.png`.
#[derive(Debug, Clone)]
pub struct FileAssetSource {
    root: PathBuf,
}

impl FileAssetSource {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, location: &str) -> Result<PathBuf, RecodeError> {
        let Ok(url) = Url::parse(location) else {
            return Ok(self.root.join(location));
        };

        match url.scheme() {
            "file" => url
                .to_file_path()
                .map_err(|()| RecodeError::fetch(location, "not a local file URL")),
            "http" | "https" => {
                let segments = url
                    .path_segments()
                    .ok_or_else(|| RecodeError::fetch(location, "URL has no path"))?;

                let mut path = self.root.clone();
                for segment in segments.filter(|s| !s.is_empty()) {
                    if segment == ".." {
                        return Err(RecodeError::fetch(location, "path escapes the mirror"));
                    }
                    path.push(segment);
                }
                Ok(path)
            }
            // Windows drive letters parse as a one-letter scheme.
            scheme if scheme.len() == 1 => Ok(PathBuf::from(location)),
            scheme => Err(RecodeError::fetch(
                location,
                format!("unsupported scheme {scheme}"),
            )),
        }
    }
}

#[async_trait]
impl AssetSourcePort for FileAssetSource {
    async fn fetch(&self, url: &str) -> Result<Bytes, RecodeError> {
        let path = self.resolve(url)?;
        trace!(url = %url, path = %path.display(), "Reading asset");

        let data = fs::read(&path)
            .await
            .map_err(|e| RecodeError::fetch(url, e.to_string()))?;
        Ok(Bytes::from(data))
    }
}
