//! Animated sticker recoding: decode, composite, quantize, encode.

mod compositor;
mod decoder;
mod gif_encoder;
mod quantizer;
mod recoder;

pub use compositor::FrameCompositor;
pub use decoder::decode_animation;
pub use gif_encoder::GifAnimationEncoder;
pub use quantizer::{QuantizedFrame, quantize};
pub use recoder::{AnimatedImageRecoder, MAX_RESOLUTION, recode_bytes};
