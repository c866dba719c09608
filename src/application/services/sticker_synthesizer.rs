//! Rebuilds sticker records from fake sticker links and GIF attachments.

use std::sync::Arc;

use tracing::trace;

use crate::domain::entities::{LinkMatch, Message, SyntheticSticker};
use crate::domain::ports::StickerRegistryPort;
use crate::domain::services::LinkClassifier;
use crate::infrastructure::config::FakeNitroSettings;

/// Name used when neither the registry nor the link know the sticker.
pub const FALLBACK_STICKER_NAME: &str = "FakeNitroSticker";

pub struct StickerSynthesizer {
    settings: FakeNitroSettings,
    stickers: Arc<dyn StickerRegistryPort>,
}

impl StickerSynthesizer {
    #[must_use]
    pub fn new(settings: FakeNitroSettings, stickers: Arc<dyn StickerRegistryPort>) -> Self {
        Self { settings, stickers }
    }

    /// Returns the stickers a message should display, in scan order.
    ///
    /// Outside compound sentence mode only a message consisting of a single
    /// token is scanned, plus its GIF attachments. The same id may appear
    /// more than once.
    #[must_use]
    pub fn synthesize(&self, message: &Message) -> Vec<SyntheticSticker> {
        if !self.settings.transform_stickers {
            return Vec::new();
        }

        let compound = self.settings.transform_compound_sentence;
        let tokens = message.content_tokens();

        let mut candidates: Vec<&str> = if compound {
            tokens
        } else if tokens.len() == 1 {
            vec![message.content()]
        } else {
            Vec::new()
        };
        candidates.extend(
            message
                .attachments()
                .iter()
                .filter(|attachment| attachment.is_gif())
                .map(|attachment| attachment.url()),
        );

        candidates
            .into_iter()
            .filter(|candidate| compound || candidate.starts_with("http"))
            .filter_map(|candidate| self.sticker_for(candidate))
            .collect()
    }

    fn sticker_for(&self, candidate: &str) -> Option<SyntheticSticker> {
        match LinkClassifier::classify(candidate) {
            LinkMatch::Sticker { id } => {
                let name = self
                    .stickers
                    .sticker_by_id(&id)
                    .map(|sticker| sticker.name().to_string())
                    .or_else(|| LinkClassifier::name_param(candidate))
                    .unwrap_or_else(|| FALLBACK_STICKER_NAME.to_string());
                trace!(sticker_id = %id, name = %name, "Synthesized static sticker");
                Some(SyntheticSticker::fake_static(id, name))
            }
            LinkMatch::AnimatedGifSticker { id } => {
                let sticker = self.stickers.sticker_by_id(&id)?;
                trace!(sticker_id = %id, "Synthesized animated sticker");
                Some(SyntheticSticker::fake_gif(id, sticker.name()))
            }
            LinkMatch::Emoji { .. } | LinkMatch::None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Attachment, GuildId, Sticker, StickerFormat, StickerOwner};
    use crate::domain::ports::mocks::MockStickerRegistry;

    fn synthesizer(compound: bool) -> StickerSynthesizer {
        let registry = MockStickerRegistry::new()
            .with(Sticker::new(
                "55",
                "dance",
                StickerFormat::Apng,
                StickerOwner::Guild {
                    guild_id: GuildId(1),
                },
            ))
            .with(Sticker::new(
                "77",
                "registry wave",
                StickerFormat::Png,
                StickerOwner::Guild {
                    guild_id: GuildId(1),
                },
            ));
        let settings = FakeNitroSettings {
            transform_compound_sentence: compound,
            ..FakeNitroSettings::default()
        };
        StickerSynthesizer::new(settings, Arc::new(registry))
    }

    fn gif_attachment(url: &str) -> Attachment {
        Attachment::new("1", "sticker.gif", 100, url).with_content_type("image/gif")
    }

    #[test]
    fn test_single_link_uses_name_param() {
        let message = Message::new("https://media.discordapp.net/stickers/123.png?size=160&name=Wave%20Hi");
        let stickers = synthesizer(false).synthesize(&message);

        assert_eq!(stickers, vec![SyntheticSticker::fake_static("123", "Wave Hi")]);
        assert!(stickers[0].fake);
    }

    #[test]
    fn test_registry_name_wins() {
        let message = Message::new("https://media.discordapp.net/stickers/77.png?name=other");
        let stickers = synthesizer(false).synthesize(&message);
        assert_eq!(stickers[0].name, "registry wave");
    }

    #[test]
    fn test_fallback_name() {
        let message = Message::new("https://media.discordapp.net/stickers/123.webp");
        let stickers = synthesizer(false).synthesize(&message);
        assert_eq!(stickers[0].name, FALLBACK_STICKER_NAME);
    }

    #[test]
    fn test_compound_sentence_ignored_by_default() {
        let message = Message::new("hello https://media.discordapp.net/stickers/123.png");
        assert!(synthesizer(false).synthesize(&message).is_empty());
    }

    #[test]
    fn test_compound_sentence_scans_tokens() {
        let message = Message::new("hello https://media.discordapp.net/stickers/123.png");
        let stickers = synthesizer(true).synthesize(&message);

        assert_eq!(stickers.len(), 1);
        assert_eq!(stickers[0].id, "123");
        assert_eq!(stickers[0].format, StickerFormat::Png);
    }

    #[test]
    fn test_non_http_token_needs_compound_mode() {
        let message = Message::new("cdn/stickers/123.png");
        assert!(synthesizer(false).synthesize(&message).is_empty());
        assert_eq!(synthesizer(true).synthesize(&message).len(), 1);
    }

    #[test]
    fn test_gif_attachment_confirmed_by_registry() {
        let message = Message::new("").with_attachments(vec![
            gif_attachment("https://cdn.discordapp.com/attachments/1/2/55.gif"),
            gif_attachment("https://cdn.discordapp.com/attachments/1/2/99.gif"),
        ]);
        let stickers = synthesizer(false).synthesize(&message);

        assert_eq!(stickers, vec![SyntheticSticker::fake_gif("55", "dance")]);
        assert_eq!(stickers[0].format, StickerFormat::Gif);
    }

    #[test]
    fn test_repeated_links_are_not_deduplicated() {
        let link = "https://media.discordapp.net/stickers/123.png";
        let message = Message::new(format!("{link} {link}"));
        assert_eq!(synthesizer(true).synthesize(&message).len(), 2);
    }

    #[test]
    fn test_disabled_when_sticker_transform_off() {
        let settings = FakeNitroSettings {
            transform_stickers: false,
            ..FakeNitroSettings::default()
        };
        let synthesizer = StickerSynthesizer::new(settings, Arc::new(MockStickerRegistry::new()));
        let message = Message::new("https://media.discordapp.net/stickers/123.png");
        assert!(synthesizer.synthesize(&message).is_empty());
    }
}
