//! Source image decoding.
//!
//! PNG input goes through the `png` crate so APNG frame control (offsets,
//! delays, blend and dispose operations) survives. GIF input is decoded
//! into already composited full-canvas frames. Any other format the `image`
//! crate understands becomes a single frame.

use std::io::Cursor;

use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, RgbaImage};
use png::{BlendOp, ColorType, DisposeOp, Transformations};
use tracing::trace;

use crate::domain::entities::{AnimationFrame, BlendMode, DecodedAnimation, DisposeMode};
use crate::domain::errors::RecodeError;

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";
const GIF_SIGNATURE: &[u8] = b"GIF8";

/// Decodes `data` into frames on its logical canvas.
///
/// # Errors
/// Returns `RecodeError::Decode` for corrupt input and
/// `RecodeError::UnsupportedFormat` for bytes no decoder recognizes.
pub fn decode_animation(data: &[u8]) -> Result<DecodedAnimation, RecodeError> {
    let animation = if data.starts_with(PNG_SIGNATURE) {
        decode_png(data)?
    } else if data.starts_with(GIF_SIGNATURE) {
        decode_gif(data)?
    } else {
        decode_still(data)?
    };

    if animation.frames.is_empty() || animation.width == 0 || animation.height == 0 {
        return Err(RecodeError::decode("image has no visible frames"));
    }

    trace!(
        width = animation.width,
        height = animation.height,
        frames = animation.frames.len(),
        "Decoded source image"
    );
    Ok(animation)
}

fn decode_png(data: &[u8]) -> Result<DecodedAnimation, RecodeError> {
    let mut decoder = png::Decoder::new(Cursor::new(data));
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
    let mut reader = decoder.read_info()?;

    let (width, height) = {
        let info = reader.info();
        (info.width, info.height)
    };
    let mut buf = vec![0; reader.output_buffer_size()];

    let Some(actl) = reader.info().animation_control else {
        let output = reader.next_frame(&mut buf)?;
        let image = to_rgba(
            &buf[..output.buffer_size()],
            output.width,
            output.height,
            output.color_type,
        )?;
        return Ok(DecodedAnimation {
            width,
            height,
            frames: vec![AnimationFrame::full(image, 0)],
        });
    };

    // Without an fcTL ahead of IDAT the default image is not part of the
    // animation.
    if reader.info().frame_control.is_none() {
        reader.next_frame(&mut buf)?;
    }

    let mut frames = Vec::with_capacity(actl.num_frames as usize);
    for _ in 0..actl.num_frames {
        let output = reader.next_frame(&mut buf)?;
        let fctl = reader
            .info()
            .frame_control
            .ok_or_else(|| RecodeError::decode("animation frame without frame control"))?;

        let image = to_rgba(
            &buf[..output.buffer_size()],
            output.width,
            output.height,
            output.color_type,
        )?;

        frames.push(
            AnimationFrame {
                x_offset: fctl.x_offset,
                y_offset: fctl.y_offset,
                width: fctl.width,
                height: fctl.height,
                image,
                delay_ms: delay_ms(fctl.delay_num, fctl.delay_den),
                blend: BlendMode::Over,
                dispose: DisposeMode::None,
            }
            .with_ops(blend_mode(fctl.blend_op), dispose_mode(fctl.dispose_op)),
        );
    }

    Ok(DecodedAnimation {
        width,
        height,
        frames,
    })
}

fn decode_gif(data: &[u8]) -> Result<DecodedAnimation, RecodeError> {
    let decoder =
        GifDecoder::new(Cursor::new(data)).map_err(|e| RecodeError::decode(e.to_string()))?;
    let frames = decoder
        .into_frames()
        .collect_frames()
        .map_err(|e| RecodeError::decode(e.to_string()))?;

    let (width, height) = frames
        .first()
        .map_or((0, 0), |frame| frame.buffer().dimensions());

    let frames = frames
        .into_iter()
        .map(|frame| {
            let (numer, denom) = frame.delay().numer_denom_ms();
            let delay = if denom == 0 { 0 } else { numer / denom };
            AnimationFrame::full(frame.into_buffer(), delay)
        })
        .collect();

    Ok(DecodedAnimation {
        width,
        height,
        frames,
    })
}

fn decode_still(data: &[u8]) -> Result<DecodedAnimation, RecodeError> {
    let image = image::load_from_memory(data)
        .map_err(|e| RecodeError::unsupported(e.to_string()))?
        .into_rgba8();

    Ok(DecodedAnimation {
        width: image.width(),
        height: image.height(),
        frames: vec![AnimationFrame::full(image, 0)],
    })
}

fn to_rgba(
    buf: &[u8],
    width: u32,
    height: u32,
    color_type: ColorType,
) -> Result<RgbaImage, RecodeError> {
    let pixels: Vec<u8> = match color_type {
        ColorType::Rgba => buf.to_vec(),
        ColorType::Rgb => buf
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], u8::MAX])
            .collect(),
        ColorType::GrayscaleAlpha => buf
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0], p[1]])
            .collect(),
        ColorType::Grayscale => buf.iter().flat_map(|&g| [g, g, g, u8::MAX]).collect(),
        ColorType::Indexed => {
            return Err(RecodeError::unsupported("indexed PNG was not expanded"));
        }
    };

    RgbaImage::from_raw(width, height, pixels)
        .ok_or_else(|| RecodeError::decode("frame buffer does not match its dimensions"))
}

/// A zero denominator means hundredths of a second.
fn delay_ms(num: u16, den: u16) -> u32 {
    let den = if den == 0 { 100 } else { u32::from(den) };
    u32::from(num) * 1000 / den
}

const fn blend_mode(op: BlendOp) -> BlendMode {
    match op {
        BlendOp::Source => BlendMode::Source,
        BlendOp::Over => BlendMode::Over,
    }
}

const fn dispose_mode(op: DisposeOp) -> DisposeMode {
    match op {
        DisposeOp::None => DisposeMode::None,
        DisposeOp::Background => DisposeMode::Background,
        DisposeOp::Previous => DisposeMode::Previous,
    }
}
