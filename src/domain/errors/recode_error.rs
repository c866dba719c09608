//! Animation recoding error types.

use thiserror::Error;

use super::UploadError;

/// Recoding error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum RecodeError {
    #[error("failed to fetch source image {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("failed to decode source image: {message}")]
    Decode { message: String },

    #[error("unsupported source format: {message}")]
    UnsupportedFormat { message: String },

    #[error("failed to encode GIF: {message}")]
    Encode { message: String },

    #[error("invalid target resolution {0}")]
    InvalidResolution(u32),

    #[error("recoded sticker could not be uploaded: {0}")]
    Upload(#[from] UploadError),

    #[error("recode task failed: {message}")]
    Task { message: String },
}

impl RecodeError {
    /// Creates fetch error.
    #[must_use]
    pub fn fetch(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fetch {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates decode error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates unsupported format error.
    #[must_use]
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            message: message.into(),
        }
    }

    /// Creates encode error.
    #[must_use]
    pub fn encode(message: impl Into<String>) -> Self {
        Self::Encode {
            message: message.into(),
        }
    }

    /// Creates task error.
    #[must_use]
    pub fn task(message: impl Into<String>) -> Self {
        Self::Task {
            message: message.into(),
        }
    }
}

impl From<png::DecodingError> for RecodeError {
    fn from(err: png::DecodingError) -> Self {
        Self::decode(err.to_string())
    }
}

impl From<gif::EncodingError> for RecodeError {
    fn from(err: gif::EncodingError) -> Self {
        Self::encode(err.to_string())
    }
}
