//! Animation recoder port definition.

use async_trait::async_trait;

use crate::domain::entities::EncodedAnimation;
use crate::domain::errors::RecodeError;

/// Port for turning an animated sticker into an uploadable GIF.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnimationRecoderPort: Send + Sync {
    /// Decodes `source_url` and re-encodes it as a looping GIF on a
    /// `target_resolution` square canvas.
    async fn recode(
        &self,
        source_url: &str,
        target_resolution: u32,
    ) -> Result<EncodedAnimation, RecodeError>;
}
