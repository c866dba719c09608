//! Palette reduction for GIF frames.

use color_quant::NeuQuant;
use image::RgbaImage;

/// Pixels with alpha below this become fully transparent, the rest opaque.
pub const ALPHA_CUTOFF: u8 = 128;

/// NeuQuant sampling factor; 1 is slowest and best, 30 fastest.
const SAMPLE_FACTOR: i32 = 10;

const MAX_COLORS: usize = 256;

/// Indexed frame ready for a GIF encoder.
#[derive(Debug, Clone)]
pub struct QuantizedFrame {
    /// One palette index per pixel, row-major.
    pub indices: Vec<u8>,
    /// RGB triples, at most 256 entries.
    pub palette: Vec<u8>,
    /// Palette index rendered transparent, if any pixel is.
    pub transparent: Option<u8>,
}

/// Reduces `image` to at most 256 colours.
#[must_use]
pub fn quantize(image: &RgbaImage) -> QuantizedFrame {
    let mut pixels = image.as_raw().clone();
    let mut has_transparency = false;

    for pixel in pixels.chunks_exact_mut(4) {
        if pixel[3] < ALPHA_CUTOFF {
            pixel.copy_from_slice(&[0, 0, 0, 0]);
            has_transparency = true;
        } else {
            pixel[3] = u8::MAX;
        }
    }

    let quantizer = NeuQuant::new(SAMPLE_FACTOR, MAX_COLORS, &pixels);
    let indices = pixels
        .chunks_exact(4)
        .map(|pixel| palette_index(quantizer.index_of(pixel)))
        .collect();
    let transparent =
        has_transparency.then(|| palette_index(quantizer.index_of(&[0, 0, 0, 0])));

    QuantizedFrame {
        indices,
        palette: quantizer.color_map_rgb(),
        transparent,
    }
}

#[allow(clippy::cast_possible_truncation)]
const fn palette_index(index: usize) -> u8 {
    // NeuQuant never returns an index past its network size.
    index as u8
}
