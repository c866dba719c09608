//! Degrades premium emojis and stickers in outgoing messages to links.

use std::ops::Range;
use std::sync::{Arc, LazyLock};

use regex::{NoExpand, Regex};
use tracing::{debug, info, warn};
use url::form_urlencoded;

use crate::application::use_cases::{
    AnimatedStickerRequest, RecodeTask, SendAnimatedStickerUseCase,
};
use crate::domain::entities::{ChannelId, CustomEmoji, OutgoingMessage, StickerFormat};
use crate::domain::ports::{EmojiRegistryPort, EntitlementPort, StickerRegistryPort};
use crate::domain::services::EntitlementChecker;
use crate::infrastructure::config::FakeNitroSettings;

static EMOJI_MARKUP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<a?:\w+:(\d+)>").unwrap());

static SIZE_PARAM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\?size=\d+").unwrap());

/// Result of rewriting a message before it is sent.
#[derive(Debug, Default)]
pub struct SendOutcome {
    /// The host must not send the message.
    pub cancel: bool,
    /// Background recode started in place of the message.
    pub recode_task: Option<RecodeTask>,
}

pub struct OutboundRewriter {
    settings: FakeNitroSettings,
    stickers: Arc<dyn StickerRegistryPort>,
    emojis: Arc<dyn EmojiRegistryPort>,
    entitlements: Arc<dyn EntitlementPort>,
    animated_stickers: Arc<SendAnimatedStickerUseCase>,
}

impl OutboundRewriter {
    #[must_use]
    pub fn new(
        settings: FakeNitroSettings,
        stickers: Arc<dyn StickerRegistryPort>,
        emojis: Arc<dyn EmojiRegistryPort>,
        entitlements: Arc<dyn EntitlementPort>,
        animated_stickers: Arc<SendAnimatedStickerUseCase>,
    ) -> Self {
        Self {
            settings,
            stickers,
            emojis,
            entitlements,
            animated_stickers,
        }
    }

    /// Rewrites `message` in place before it is sent to `channel_id`.
    ///
    /// An animated sticker the user cannot send cancels the message and
    /// starts a background recode that uploads a GIF instead.
    pub fn on_send(&self, channel_id: ChannelId, message: &mut OutgoingMessage) -> SendOutcome {
        if self.settings.enable_sticker_bypass
            && let Some(outcome) = self.bypass_sticker(channel_id, message)
        {
            return outcome;
        }

        if self.settings.enable_emoji_bypass {
            self.bypass_emojis(channel_id, message);
        }

        SendOutcome::default()
    }

    /// Rewrites an edited message's content in place.
    ///
    /// Emoji markup escaped with a backslash is left alone, as is markup for
    /// emojis the registry does not know.
    pub fn on_edit(&self, channel_id: ChannelId, content: &mut String) {
        if !self.settings.enable_emoji_bypass {
            return;
        }

        let checker = EntitlementChecker::new(self.entitlements.as_ref());
        let can_use_emotes = checker.can_use_emotes(channel_id);

        let original = content.as_str();
        let mut rewritten = String::with_capacity(original.len());
        let mut copied_to = 0;

        for caps in EMOJI_MARKUP_RE.captures_iter(original) {
            let Some(markup) = caps.get(0) else {
                continue;
            };
            if original[..markup.start()].ends_with('\\') {
                continue;
            }
            let Some(emoji) = self.emojis.custom_emoji_by_id(&caps[1]) else {
                continue;
            };
            if checker.emoji_is_usable(&emoji, can_use_emotes) {
                continue;
            }

            rewritten.push_str(&original[copied_to..markup.start()]);
            rewritten.push_str(&padded(original, markup.range(), &self.emoji_link(&emoji)));
            copied_to = markup.end();
            debug!(emoji_id = %emoji.id(), "Replaced emoji in edited message");
        }

        if copied_to > 0 {
            rewritten.push_str(&original[copied_to..]);
            *content = rewritten;
        }
    }

    /// Resolves the custom emojis whose markup appears in `content`, in
    /// order of first appearance.
    #[must_use]
    pub fn referenced_emojis(&self, content: &str) -> Vec<CustomEmoji> {
        let mut emojis: Vec<CustomEmoji> = Vec::new();
        for caps in EMOJI_MARKUP_RE.captures_iter(content) {
            if emojis.iter().any(|e| e.id() == &caps[1]) {
                continue;
            }
            if let Some(emoji) = self.emojis.custom_emoji_by_id(&caps[1]) {
                emojis.push(emoji);
            }
        }
        emojis
    }

    /// Returns `Some` when the send has been fully handled.
    fn bypass_sticker(
        &self,
        channel_id: ChannelId,
        message: &mut OutgoingMessage,
    ) -> Option<SendOutcome> {
        let [sticker_id] = message.sticker_ids.as_slice() else {
            return None;
        };
        let sticker = self.stickers.sticker_by_id(sticker_id)?;

        let checker = EntitlementChecker::new(self.entitlements.as_ref());
        if checker.sticker_is_usable(&sticker, channel_id) {
            return None;
        }

        let link = self.sticker_link(sticker.id());

        if sticker.format() == StickerFormat::Apng {
            let request = AnimatedStickerRequest {
                sticker_id: sticker.id().to_string(),
                source_url: link.clone(),
                channel_id,
                resolution: self.settings.sticker_size,
            };
            if let Some(task) = self.animated_stickers.spawn(request) {
                info!(
                    sticker_id = %sticker.id(),
                    task_id = %task.id(),
                    "Cancelled send, recoding animated sticker"
                );
                return Some(SendOutcome {
                    cancel: true,
                    recode_task: Some(task),
                });
            }
            warn!(sticker_id = %sticker.id(), "No async runtime, sending animated sticker as a link");
        }

        message.sticker_ids.clear();
        message.content.push(' ');
        message.content.push_str(&link);
        message.content.push_str("&name=");
        message.content.push_str(&encode(sticker.name()));
        debug!(sticker_id = %sticker.id(), "Replaced sticker with link");

        None
    }

    fn bypass_emojis(&self, channel_id: ChannelId, message: &mut OutgoingMessage) {
        let checker = EntitlementChecker::new(self.entitlements.as_ref());
        let can_use_emotes = checker.can_use_emotes(channel_id);

        for emoji in &message.emojis {
            if checker.emoji_is_usable(emoji, can_use_emotes) {
                continue;
            }

            let markup = emoji.markup();
            let Some(start) = message.content.find(&markup) else {
                continue;
            };

            let replacement = padded(
                &message.content,
                start..start + markup.len(),
                &self.emoji_link(emoji),
            );
            message
                .content
                .replace_range(start..start + markup.len(), &replacement);
            debug!(emoji_id = %emoji.id(), "Replaced emoji with link");
        }
    }

    fn sticker_link(&self, sticker_id: &str) -> String {
        format!(
            "{}/stickers/{sticker_id}.png?size={}",
            self.settings.media_host.trim_end_matches('/'),
            self.settings.sticker_size
        )
    }

    fn emoji_link(&self, emoji: &CustomEmoji) -> String {
        let params = format!(
            "?size={}&name={}",
            self.settings.emoji_size,
            encode(emoji.name())
        );
        let url = emoji.url();

        if SIZE_PARAM_RE.is_match(url) {
            SIZE_PARAM_RE.replace(url, NoExpand(params.as_str())).into_owned()
        } else if url.contains('?') {
            format!("{url}&{}", &params[1..])
        } else {
            format!("{url}{params}")
        }
    }
}

fn encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Wraps `replacement` in single spaces where the text around `range` in
/// `text` is not already whitespace or the string edge.
fn padded(text: &str, range: Range<usize>, replacement: &str) -> String {
    let before = text[..range.start].chars().next_back();
    let after = text[range.end..].chars().next();
    format!("{}{replacement}{}", boundary(before), boundary(after))
}

fn boundary(neighbour: Option<char>) -> &'static str {
    match neighbour {
        Some(c) if !c.is_whitespace() => " ",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{
        Channel, ChannelKind, EncodedAnimation, GuildId, PremiumType, Sticker, StickerOwner,
    };
    use crate::domain::ports::mocks::{
        MockAnimationRecoderPort, MockEmojiRegistry, MockEntitlementPort, MockStickerRegistry,
        MockUploadPort,
    };
    use bytes::Bytes;

    const PARTY_LINK: &str = "https://cdn.discordapp.com/emojis/42.gif?size=48&name=party";

    fn party() -> CustomEmoji {
        CustomEmoji::new("42", "party", true, "https://cdn.discordapp.com/emojis/42.gif?size=96")
            .with_guild(GuildId(2))
    }

    fn wave() -> CustomEmoji {
        CustomEmoji::new("7", "wave", false, "https://cdn.discordapp.com/emojis/7.png")
            .with_guild(GuildId(1))
    }

    fn guild_sticker(id: &str, format: StickerFormat) -> Sticker {
        Sticker::new(
            id,
            "wave hi",
            format,
            StickerOwner::Guild {
                guild_id: GuildId(2),
            },
        )
    }

    fn use_case(
        recoder: MockAnimationRecoderPort,
        uploader: MockUploadPort,
    ) -> Arc<SendAnimatedStickerUseCase> {
        Arc::new(SendAnimatedStickerUseCase::new(
            Arc::new(recoder),
            Arc::new(uploader),
        ))
    }

    fn rewriter_with(
        entitlements: MockEntitlementPort,
        animated: Arc<SendAnimatedStickerUseCase>,
    ) -> OutboundRewriter {
        let stickers = MockStickerRegistry::new()
            .with(guild_sticker("5", StickerFormat::Png))
            .with(guild_sticker("6", StickerFormat::Apng))
            .with(Sticker::new(
                "9",
                "pack",
                StickerFormat::Png,
                StickerOwner::Pack {
                    pack_id: "1".to_string(),
                },
            ));
        let emojis = MockEmojiRegistry::new().with(party()).with(wave());
        OutboundRewriter::new(
            FakeNitroSettings::default(),
            Arc::new(stickers),
            Arc::new(emojis),
            Arc::new(entitlements),
            animated,
        )
    }

    fn rewriter() -> OutboundRewriter {
        rewriter_with(
            MockEntitlementPort::new().in_guild(GuildId(1)),
            use_case(MockAnimationRecoderPort::new(), MockUploadPort::new()),
        )
    }

    #[test]
    fn test_static_sticker_becomes_link() {
        let mut message = OutgoingMessage::new("hi").with_sticker("5");

        let outcome = rewriter().on_send(ChannelId(10), &mut message);

        assert!(!outcome.cancel);
        assert!(message.sticker_ids.is_empty());
        assert_eq!(
            message.content,
            "hi https://media.discordapp.net/stickers/5.png?size=160&name=wave+hi"
        );
    }

    #[test]
    fn test_pack_and_unknown_stickers_are_untouched() {
        for id in ["9", "404"] {
            let mut message = OutgoingMessage::new("hi").with_sticker(id);
            let outcome = rewriter().on_send(ChannelId(10), &mut message);

            assert!(!outcome.cancel);
            assert_eq!(message.sticker_ids, vec![id.to_string()]);
            assert_eq!(message.content, "hi");
        }
    }

    #[test]
    fn test_entitled_user_keeps_sticker() {
        let rewriter = rewriter_with(
            MockEntitlementPort::new().with_premium(PremiumType::Nitro),
            use_case(MockAnimationRecoderPort::new(), MockUploadPort::new()),
        );
        let mut message = OutgoingMessage::new("").with_sticker("5");

        rewriter.on_send(ChannelId(10), &mut message);

        assert_eq!(message.sticker_ids, vec!["5".to_string()]);
    }

    #[tokio::test]
    async fn test_animated_sticker_cancels_and_recodes() {
        let mut recoder = MockAnimationRecoderPort::new();
        recoder
            .expect_recode()
            .withf(|url, resolution| {
                url == "https://media.discordapp.net/stickers/6.png?size=160" && *resolution == 160
            })
            .times(1)
            .returning(|_, _| {
                Ok(EncodedAnimation {
                    data: Bytes::from_static(b"GIF89a"),
                    width: 160,
                    height: 160,
                })
            });
        let mut uploader = MockUploadPort::new();
        uploader
            .expect_submit()
            .withf(|request| request.file_name == "6.gif" && request.channel_id == ChannelId(10))
            .times(1)
            .returning(|_| Ok(()));

        let rewriter = rewriter_with(MockEntitlementPort::new(), use_case(recoder, uploader));
        let mut message = OutgoingMessage::new("hi").with_sticker("6");

        let outcome = rewriter.on_send(ChannelId(10), &mut message);

        assert!(outcome.cancel);
        assert_eq!(message.content, "hi");
        let task = outcome.recode_task.expect("recode task");
        assert_eq!(task.sticker_id(), "6");
        assert!(task.wait().await.is_ok());
    }

    #[test]
    fn test_animated_sticker_without_runtime_falls_back_to_link() {
        let mut message = OutgoingMessage::new("").with_sticker("6");

        let outcome = rewriter().on_send(ChannelId(10), &mut message);

        assert!(!outcome.cancel);
        assert!(message.sticker_ids.is_empty());
        assert!(message.content.contains("/stickers/6.png?size=160&name=wave+hi"));
    }

    #[test]
    fn test_emoji_mid_sentence_gets_single_spaces() {
        let mut message = OutgoingMessage::new("hey<a:party:42>there").with_emoji(party());

        rewriter().on_send(ChannelId(10), &mut message);

        assert_eq!(message.content, format!("hey {PARTY_LINK} there"));
    }

    #[test]
    fn test_existing_whitespace_is_not_doubled() {
        let mut message = OutgoingMessage::new("hey <a:party:42>\nthere").with_emoji(party());
        rewriter().on_send(ChannelId(10), &mut message);
        assert_eq!(message.content, format!("hey {PARTY_LINK}\nthere"));

        let mut alone = OutgoingMessage::new("<a:party:42>").with_emoji(party());
        rewriter().on_send(ChannelId(10), &mut alone);
        assert_eq!(alone.content, PARTY_LINK);
    }

    #[test]
    fn test_only_first_occurrence_replaced_per_emoji() {
        let mut message = OutgoingMessage::new("<a:party:42> <a:party:42>").with_emoji(party());
        rewriter().on_send(ChannelId(10), &mut message);
        assert_eq!(message.content, format!("{PARTY_LINK} <a:party:42>"));
    }

    #[test]
    fn test_usable_emojis_are_kept() {
        let shortcut = CustomEmoji::new("3", "smile", false, "https://cdn.discordapp.com/emojis/3.png")
            .with_require_colons(false);
        let mut message = OutgoingMessage::new("<:wave:7> <:smile:3>")
            .with_emoji(wave())
            .with_emoji(shortcut);

        rewriter().on_send(ChannelId(10), &mut message);

        assert_eq!(message.content, "<:wave:7> <:smile:3>");
    }

    #[test]
    fn test_premium_without_permission_gets_link() {
        let entitlements = MockEntitlementPort::new()
            .with_premium(PremiumType::Nitro)
            .with_channel(Channel::new(ChannelId(10), ChannelKind::Text, Some(GuildId(1))));
        let rewriter = rewriter_with(
            entitlements,
            use_case(MockAnimationRecoderPort::new(), MockUploadPort::new()),
        );
        let mut message = OutgoingMessage::new("<a:party:42>").with_emoji(party());

        rewriter.on_send(ChannelId(10), &mut message);

        assert_eq!(message.content, PARTY_LINK);
    }

    #[test]
    fn test_emoji_link_without_size_param() {
        let foreign = wave().with_guild(GuildId(3));
        let mut message = OutgoingMessage::new("<:wave:7>").with_emoji(foreign);

        rewriter().on_send(ChannelId(10), &mut message);

        assert_eq!(
            message.content,
            "https://cdn.discordapp.com/emojis/7.png?size=48&name=wave"
        );
    }

    #[test]
    fn test_on_edit_replaces_unescaped_markup() {
        let mut content = r"a<a:party:42>b \<a:party:42> <:unknown:1>".to_string();

        rewriter().on_edit(ChannelId(10), &mut content);

        assert_eq!(content, format!(r"a {PARTY_LINK} b \<a:party:42> <:unknown:1>"));
    }

    #[test]
    fn test_on_edit_replaces_every_occurrence() {
        let mut content = "<a:party:42> <A:party:42>".to_string();
        rewriter().on_edit(ChannelId(10), &mut content);
        assert_eq!(content, format!("{PARTY_LINK} {PARTY_LINK}"));
    }

    #[test]
    fn test_referenced_emojis_resolve_known_markup_once() {
        let emojis = rewriter().referenced_emojis("<:wave:7> <a:party:42> <:wave:7> <:x:99>");
        let ids: Vec<&str> = emojis.iter().map(CustomEmoji::id).collect();
        assert_eq!(ids, vec!["7", "42"]);
    }

    #[test]
    fn test_emoji_bypass_disabled() {
        let settings = FakeNitroSettings {
            enable_emoji_bypass: false,
            ..FakeNitroSettings::default()
        };
        let rewriter = OutboundRewriter::new(
            settings,
            Arc::new(MockStickerRegistry::new()),
            Arc::new(MockEmojiRegistry::new().with(party())),
            Arc::new(MockEntitlementPort::new()),
            use_case(MockAnimationRecoderPort::new(), MockUploadPort::new()),
        );

        let mut message = OutgoingMessage::new("x<a:party:42>").with_emoji(party());
        rewriter.on_send(ChannelId(10), &mut message);
        assert_eq!(message.content, "x<a:party:42>");

        let mut content = "x<a:party:42>".to_string();
        rewriter.on_edit(ChannelId(10), &mut content);
        assert_eq!(content, "x<a:party:42>");
    }
}
