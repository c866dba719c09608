//! Looping GIF output.

use std::borrow::Cow;

use bytes::Bytes;
use gif::{DisposalMethod, Encoder, Frame, Repeat};
use image::RgbaImage;

use super::quantizer::quantize;
use crate::domain::errors::RecodeError;

/// Writes full-canvas RGBA frames into an infinitely looping GIF.
pub struct GifAnimationEncoder {
    encoder: Encoder<Vec<u8>>,
    width: u16,
    height: u16,
}

impl GifAnimationEncoder {
    /// Starts a GIF with the given canvas size.
    ///
    /// # Errors
    /// Returns `RecodeError::InvalidResolution` if a side does not fit a GIF
    /// header, or `RecodeError::Encode` if the header cannot be written.
    pub fn new(width: u32, height: u32) -> Result<Self, RecodeError> {
        let w = u16::try_from(width).map_err(|_| RecodeError::InvalidResolution(width))?;
        let h = u16::try_from(height).map_err(|_| RecodeError::InvalidResolution(height))?;

        let mut encoder = Encoder::new(Vec::new(), w, h, &[])?;
        encoder.set_repeat(Repeat::Infinite)?;

        Ok(Self {
            encoder,
            width: w,
            height: h,
        })
    }

    /// Quantizes and appends one frame shown for `delay_ms`.
    ///
    /// # Errors
    /// Returns error if the canvas size differs from the GIF or writing fails.
    pub fn write_frame(&mut self, canvas: &RgbaImage, delay_ms: u32) -> Result<(), RecodeError> {
        if canvas.dimensions() != (u32::from(self.width), u32::from(self.height)) {
            return Err(RecodeError::encode(format!(
                "frame is {}x{}, expected {}x{}",
                canvas.width(),
                canvas.height(),
                self.width,
                self.height
            )));
        }

        let quantized = quantize(canvas);
        let frame = Frame {
            width: self.width,
            height: self.height,
            buffer: Cow::Owned(quantized.indices),
            palette: Some(quantized.palette),
            transparent: quantized.transparent,
            delay: centiseconds(delay_ms),
            dispose: DisposalMethod::Background,
            ..Frame::default()
        };

        self.encoder.write_frame(&frame)?;
        Ok(())
    }

    /// Writes the trailer and returns the file bytes.
    ///
    /// # Errors
    /// Returns error if the trailer cannot be written.
    pub fn finish(self) -> Result<Bytes, RecodeError> {
        let data = self
            .encoder
            .into_inner()
            .map_err(|e| RecodeError::encode(e.to_string()))?;
        Ok(Bytes::from(data))
    }
}

fn centiseconds(delay_ms: u32) -> u16 {
    u16::try_from(delay_ms.saturating_add(5) / 10).unwrap_or(u16::MAX)
}
