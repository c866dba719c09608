//! Decoded and encoded animation types.

use bytes::Bytes;
use image::RgbaImage;

/// How a frame combines with the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Replace the frame region.
    Source,
    /// Alpha-composite over existing content.
    #[default]
    Over,
}

/// What happens to a frame region before the next frame is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisposeMode {
    /// Leave the canvas as drawn.
    #[default]
    None,
    /// Clear the region to transparent.
    Background,
    /// Restore the region to its content before the frame was drawn.
    Previous,
}

/// One decoded animation frame, positioned on the logical canvas.
#[derive(Debug, Clone)]
pub struct AnimationFrame {
    /// Left edge on the logical canvas.
    pub x_offset: u32,
    /// Top edge on the logical canvas.
    pub y_offset: u32,
    /// Frame width in logical pixels.
    pub width: u32,
    /// Frame height in logical pixels.
    pub height: u32,
    /// Frame pixels, `width × height`.
    pub image: RgbaImage,
    /// Display duration.
    pub delay_ms: u32,
    /// Blend operation.
    pub blend: BlendMode,
    /// Dispose operation.
    pub dispose: DisposeMode,
}

impl AnimationFrame {
    /// Creates a frame covering the full canvas.
    #[must_use]
    pub fn full(image: RgbaImage, delay_ms: u32) -> Self {
        Self {
            x_offset: 0,
            y_offset: 0,
            width: image.width(),
            height: image.height(),
            image,
            delay_ms,
            blend: BlendMode::Source,
            dispose: DisposeMode::None,
        }
    }

    /// Moves the frame on the canvas.
    #[must_use]
    pub const fn at(mut self, x_offset: u32, y_offset: u32) -> Self {
        self.x_offset = x_offset;
        self.y_offset = y_offset;
        self
    }

    /// Sets blend and dispose operations.
    #[must_use]
    pub const fn with_ops(mut self, blend: BlendMode, dispose: DisposeMode) -> Self {
        self.blend = blend;
        self.dispose = dispose;
        self
    }
}

/// Frames plus logical canvas size, as produced by a decoder.
#[derive(Debug, Clone)]
pub struct DecodedAnimation {
    /// Logical canvas width.
    pub width: u32,
    /// Logical canvas height.
    pub height: u32,
    /// Frames in display order.
    pub frames: Vec<AnimationFrame>,
}

/// Encoded GIF ready for upload.
#[derive(Debug, Clone)]
pub struct EncodedAnimation {
    /// GIF file bytes.
    pub data: Bytes,
    /// Canvas width.
    pub width: u32,
    /// Canvas height.
    pub height: u32,
}

impl EncodedAnimation {
    /// Upload file name for a recoded sticker.
    #[must_use]
    pub fn file_name(sticker_id: &str) -> String {
        format!("{sticker_id}.gif")
    }
}
