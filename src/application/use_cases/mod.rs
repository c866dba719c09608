//! Use case implementations.

mod send_animated_sticker_use_case;

pub use send_animated_sticker_use_case::{
    AnimatedStickerRequest, GIF_MIME_TYPE, RecodeTask, SendAnimatedStickerUseCase,
};
