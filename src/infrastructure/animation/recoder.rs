//! `AnimationRecoderPort` implementation.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use super::compositor::FrameCompositor;
use super::decoder::decode_animation;
use super::gif_encoder::GifAnimationEncoder;
use crate::domain::entities::EncodedAnimation;
use crate::domain::errors::RecodeError;
use crate::domain::ports::{AnimationRecoderPort, AssetSourcePort};

/// Largest accepted output side, in pixels.
pub const MAX_RESOLUTION: u32 = 4096;

/// Re-encodes animated stickers as GIFs on a square canvas.
pub struct AnimatedImageRecoder {
    assets: Arc<dyn AssetSourcePort>,
}

impl std::fmt::Debug for AnimatedImageRecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimatedImageRecoder").finish_non_exhaustive()
    }
}

impl AnimatedImageRecoder {
    #[must_use]
    pub fn new(assets: Arc<dyn AssetSourcePort>) -> Self {
        Self { assets }
    }
}

#[async_trait]
impl AnimationRecoderPort for AnimatedImageRecoder {
    async fn recode(
        &self,
        source_url: &str,
        target_resolution: u32,
    ) -> Result<EncodedAnimation, RecodeError> {
        check_resolution(target_resolution)?;

        let data = self.assets.fetch(source_url).await?;
        debug!(url = %source_url, bytes = data.len(), "Fetched sticker source");

        let encoded = tokio::task::spawn_blocking(move || recode_bytes(&data, target_resolution))
            .await
            .map_err(|e| RecodeError::task(format!("Recode task panicked: {e}")))??;

        info!(
            url = %source_url,
            resolution = target_resolution,
            bytes = encoded.data.len(),
            "Recoded sticker to GIF"
        );
        Ok(encoded)
    }
}

/// Decodes `data` and re-encodes it as a `resolution`-square looping GIF.
///
/// # Errors
/// Returns error if the resolution is out of range or decoding or encoding
/// fails.
pub fn recode_bytes(data: &[u8], resolution: u32) -> Result<EncodedAnimation, RecodeError> {
    check_resolution(resolution)?;
    let animation = decode_animation(data)?;

    let mut compositor = FrameCompositor::new(resolution, animation.width, animation.height);
    let mut encoder = GifAnimationEncoder::new(resolution, resolution)?;

    for frame in &animation.frames {
        let canvas = compositor.render(frame);
        encoder.write_frame(&canvas, frame.delay_ms)?;
    }

    Ok(EncodedAnimation {
        data: encoder.finish()?,
        width: resolution,
        height: resolution,
    })
}

fn check_resolution(resolution: u32) -> Result<(), RecodeError> {
    if resolution == 0 || resolution > MAX_RESOLUTION {
        return Err(RecodeError::InvalidResolution(resolution));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::MockAssetSource;
    use crate::infrastructure::animation::decoder::tests::{apng_bytes, png_bytes};
    use image::{Rgba, RgbaImage};

    const STICKER_URL: &str = "https://media.discordapp.net/stickers/55.png?size=160";

    fn gif_frame_count(data: &[u8]) -> usize {
        let mut decoder = gif::DecodeOptions::new().read_info(data).unwrap();
        let mut count = 0;
        while decoder.read_next_frame().unwrap().is_some() {
            count += 1;
        }
        count
    }

    #[tokio::test]
    async fn test_recodes_apng_to_gif() {
        let recoder =
            AnimatedImageRecoder::new(Arc::new(MockAssetSource::new().with(STICKER_URL, apng_bytes())));

        let encoded = recoder.recode(STICKER_URL, 16).await.unwrap();

        assert_eq!((encoded.width, encoded.height), (16, 16));
        assert!(encoded.data.starts_with(b"GIF89a"));
        assert_eq!(gif_frame_count(&encoded.data), 2);
    }

    #[tokio::test]
    async fn test_static_png_becomes_single_frame() {
        let png = png_bytes(&RgbaImage::from_pixel(10, 5, Rgba([0, 128, 0, 255])));
        let recoder = AnimatedImageRecoder::new(Arc::new(MockAssetSource::new().with(STICKER_URL, png)));

        let encoded = recoder.recode(STICKER_URL, 20).await.unwrap();

        assert_eq!(gif_frame_count(&encoded.data), 1);
    }

    #[tokio::test]
    async fn test_zero_resolution_is_rejected() {
        let recoder = AnimatedImageRecoder::new(Arc::new(MockAssetSource::new()));
        let result = recoder.recode(STICKER_URL, 0).await;
        assert!(matches!(result, Err(RecodeError::InvalidResolution(0))));
    }

    #[tokio::test]
    async fn test_oversized_resolution_is_rejected() {
        let recoder =
            AnimatedImageRecoder::new(Arc::new(MockAssetSource::new().with(STICKER_URL, apng_bytes())));

        let result = recoder.recode(STICKER_URL, MAX_RESOLUTION + 1).await;
        assert!(matches!(result, Err(RecodeError::InvalidResolution(4097))));

        let result = recoder.recode(STICKER_URL, u32::from(u16::MAX)).await;
        assert!(matches!(result, Err(RecodeError::InvalidResolution(65_535))));
    }

    #[test]
    fn test_recode_bytes_checks_resolution() {
        let result = recode_bytes(&apng_bytes(), 10_000);
        assert!(matches!(result, Err(RecodeError::InvalidResolution(10_000))));
    }

    #[tokio::test]
    async fn test_fetch_failure_propagates() {
        let recoder = AnimatedImageRecoder::new(Arc::new(MockAssetSource::new()));
        let result = recoder.recode(STICKER_URL, 16).await;
        assert!(matches!(result, Err(RecodeError::Fetch { .. })));
    }

    #[tokio::test]
    async fn test_garbage_is_unsupported() {
        let recoder = AnimatedImageRecoder::new(Arc::new(
            MockAssetSource::new().with(STICKER_URL, &b"<html>not found</html>"[..]),
        ));
        let result = recoder.recode(STICKER_URL, 16).await;
        assert!(matches!(result, Err(RecodeError::UnsupportedFormat { .. })));
    }
}
