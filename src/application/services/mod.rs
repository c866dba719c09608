//! Application services for the render and send paths.

pub mod content_parser;
pub mod embed_filter;
pub mod fake_notice;
pub mod outbound_rewriter;
pub mod render_transformer;
pub mod sticker_synthesizer;

pub use content_parser::parse_content;
pub use embed_filter::EmbedFilter;
pub use fake_notice::{FakeNoticeKind, FakeNoticeService};
pub use outbound_rewriter::{OutboundRewriter, SendOutcome};
pub use render_transformer::RenderTransformer;
pub use sticker_synthesizer::StickerSynthesizer;
