//! Domain entity definitions.

mod animation;
mod channel;
mod content_node;
mod emoji;
mod link_match;
mod message;
mod permissions;
mod sticker;

pub use animation::{AnimationFrame, BlendMode, DecodedAnimation, DisposeMode, EncodedAnimation};
pub use channel::{Channel, ChannelId, ChannelKind, GuildId};
pub use content_node::{ContentNode, EmojiWidget, LINK_TAG, LIST_TAGS};
pub use emoji::CustomEmoji;
pub use link_match::LinkMatch;
pub use message::{
    Attachment, Embed, EmbedImage, EmbedKind, GIF_CONTENT_TYPE, Message, OutgoingMessage,
};
pub use permissions::{Permissions, PremiumType};
pub use sticker::{Sticker, StickerFormat, StickerOwner, SyntheticSticker};
