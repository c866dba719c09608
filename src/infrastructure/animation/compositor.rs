//! Frame compositing onto a square output canvas.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::domain::entities::{AnimationFrame, BlendMode, DisposeMode};

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Region {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
}

/// Draws decoded frames onto a `resolution × resolution` canvas, scaling the
/// logical canvas so its longer side fills the output.
pub struct FrameCompositor {
    canvas: RgbaImage,
    scale: f64,
}

impl FrameCompositor {
    #[must_use]
    pub fn new(resolution: u32, source_width: u32, source_height: u32) -> Self {
        let longest = source_width.max(source_height).max(1);
        Self {
            canvas: RgbaImage::from_pixel(resolution, resolution, TRANSPARENT),
            scale: f64::from(resolution) / f64::from(longest),
        }
    }

    /// Draws `frame`, returns the full canvas as it should be shown, then
    /// applies the frame's dispose operation for the next frame.
    pub fn render(&mut self, frame: &AnimationFrame) -> RgbaImage {
        let region = self.region(frame);

        let previous = (frame.dispose == DisposeMode::Previous).then(|| {
            imageops::crop_imm(&self.canvas, region.x, region.y, region.width, region.height)
                .to_image()
        });

        if frame.blend == BlendMode::Source {
            self.clear(region);
        }

        if region.width > 0 && region.height > 0 {
            let scaled = imageops::resize(
                &frame.image,
                region.width,
                region.height,
                FilterType::Triangle,
            );
            imageops::overlay(
                &mut self.canvas,
                &scaled,
                i64::from(region.x),
                i64::from(region.y),
            );
        }

        let shown = self.canvas.clone();

        match frame.dispose {
            DisposeMode::None => {}
            DisposeMode::Background => self.clear(region),
            DisposeMode::Previous => {
                if let Some(previous) = previous {
                    imageops::replace(
                        &mut self.canvas,
                        &previous,
                        i64::from(region.x),
                        i64::from(region.y),
                    );
                }
            }
        }

        shown
    }

    fn region(&self, frame: &AnimationFrame) -> Region {
        let size = self.canvas.width();
        let scale = |v: u32| -> u32 {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let scaled = (f64::from(v) * self.scale).round() as u32;
            scaled.min(size)
        };

        let x0 = scale(frame.x_offset);
        let y0 = scale(frame.y_offset);
        let x1 = scale(frame.x_offset.saturating_add(frame.width));
        let y1 = scale(frame.y_offset.saturating_add(frame.height));

        Region {
            x: x0,
            y: y0,
            width: x1.saturating_sub(x0),
            height: y1.saturating_sub(y0),
        }
    }

    fn clear(&mut self, region: Region) {
        for y in region.y..region.y + region.height {
            for x in region.x..region.x + region.width {
                self.canvas.put_pixel(x, y, TRANSPARENT);
            }
        }
    }
}
