use thiserror::Error;

/// Upload submission error variants.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The target channel no longer exists or is not writable.
    #[error("channel {0} is not available for uploads")]
    ChannelUnavailable(u64),

    /// The collaborator refused the file.
    #[error("upload rejected: {0}")]
    Rejected(String),

    /// Local I/O failure while staging the file.
    #[error("upload io error: {0}")]
    Io(#[from] std::io::Error),
}
