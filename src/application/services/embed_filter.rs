//! Hides embeds and attachments that duplicate a fake emoji or sticker.

use std::sync::Arc;

use crate::domain::entities::{Attachment, Embed, EmbedKind, LinkMatch, Message};
use crate::domain::ports::StickerRegistryPort;
use crate::domain::services::LinkClassifier;
use crate::infrastructure::config::FakeNitroSettings;

pub struct EmbedFilter {
    settings: FakeNitroSettings,
    stickers: Arc<dyn StickerRegistryPort>,
}

impl EmbedFilter {
    #[must_use]
    pub fn new(settings: FakeNitroSettings, stickers: Arc<dyn StickerRegistryPort>) -> Self {
        Self { settings, stickers }
    }

    /// Returns true if `embed` previews a fake emoji or sticker link from
    /// `message` and should not be shown.
    ///
    /// The proxy URL only counts when matching the message content; the
    /// embed's own URL decides whether the link is fake.
    #[must_use]
    pub fn should_ignore_embed(&self, embed: &Embed, message: &Message) -> bool {
        let compound = self.settings.transform_compound_sentence;
        let tokens = message.content_tokens();

        if tokens.len() > 1 && !compound {
            return false;
        }
        if embed.kind() != EmbedKind::Image {
            return false;
        }

        let url = embed.url();
        let proxy_url = embed.image_proxy_url();
        if !compound {
            let referenced = tokens
                .iter()
                .any(|token| Some(*token) == url || Some(*token) == proxy_url);
            if !referenced {
                return false;
            }
        }

        url.is_some_and(|url| self.is_fake_link(url))
    }

    /// Returns the embeds of `message` that should still be shown.
    #[must_use]
    pub fn filter_embeds(&self, message: &Message) -> Vec<Embed> {
        message
            .embeds()
            .iter()
            .filter(|embed| !self.should_ignore_embed(embed, message))
            .cloned()
            .collect()
    }

    /// Drops GIF attachments that are recoded animated stickers.
    #[must_use]
    pub fn filter_attachments(&self, attachments: &[Attachment]) -> Vec<Attachment> {
        attachments
            .iter()
            .filter(|attachment| !(attachment.is_gif() && self.is_gif_sticker(attachment.url())))
            .cloned()
            .collect()
    }

    fn is_fake_link(&self, url: &str) -> bool {
        match LinkClassifier::classify(url) {
            LinkMatch::Emoji { .. } => self.settings.transform_emojis,
            LinkMatch::Sticker { .. } => self.settings.transform_stickers,
            LinkMatch::AnimatedGifSticker { id } => {
                self.settings.transform_stickers && self.stickers.contains(&id)
            }
            LinkMatch::None => false,
        }
    }

    fn is_gif_sticker(&self, url: &str) -> bool {
        matches!(
            LinkClassifier::classify(url),
            LinkMatch::AnimatedGifSticker { id } if self.stickers.contains(&id)
        )
    }
}
