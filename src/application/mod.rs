//! Application layer with services and use cases.

/// Render and send path services.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use services::{
    EmbedFilter, FakeNoticeKind, FakeNoticeService, OutboundRewriter, RenderTransformer,
    SendOutcome, StickerSynthesizer, parse_content,
};
pub use use_cases::{AnimatedStickerRequest, RecodeTask, SendAnimatedStickerUseCase};
