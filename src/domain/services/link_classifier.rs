use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::domain::entities::LinkMatch;

static EMOJI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/emojis/(\d+)\.(png|webp|gif)").unwrap());

static STICKER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/stickers/(\d+)\.").unwrap());

static GIF_STICKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/attachments/\d+/\d+/(\d+)\.gif").unwrap());

/// Recognizes the URL shapes fake emojis and stickers are sent as.
pub struct LinkClassifier;

impl LinkClassifier {
    /// Classifies a URL. Exactly one variant is returned; unmatched input
    /// yields `LinkMatch::None`.
    ///
    /// `AnimatedGifSticker` is only a candidate: a plain GIF attachment
    /// named after a number has the same shape, so callers confirm the id
    /// against the sticker registry.
    #[must_use]
    pub fn classify(url: &str) -> LinkMatch {
        if let Some(caps) = EMOJI_RE.captures(url) {
            return LinkMatch::Emoji {
                id: caps[1].to_string(),
                animated: &caps[2] == "gif",
            };
        }

        if let Some(caps) = STICKER_RE.captures(url) {
            return LinkMatch::Sticker {
                id: caps[1].to_string(),
            };
        }

        if let Some(caps) = GIF_STICKER_RE.captures(url) {
            return LinkMatch::AnimatedGifSticker {
                id: caps[1].to_string(),
            };
        }

        LinkMatch::None
    }

    /// Returns true if `url` has the custom emoji shape.
    #[must_use]
    pub fn is_emoji_link(url: &str) -> bool {
        EMOJI_RE.is_match(url)
    }

    /// Extracts the decoded `name` query parameter.
    #[must_use]
    pub fn name_param(url: &str) -> Option<String> {
        let parsed = Url::parse(url).ok()?;
        parsed
            .query_pairs()
            .find(|(key, _)| key == "name")
            .map(|(_, value)| value.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("https://cdn.discordapp.com/emojis/1026533070955872337.png?size=48", "1026533070955872337", false ; "png")]
    #[test_case("https://cdn.discordapp.com/emojis/42.webp?size=48&quality=lossless", "42", false ; "webp")]
    #[test_case("https://cdn.discordapp.com/emojis/42.gif?size=48&name=party", "42", true ; "gif")]
    fn test_emoji_shape(url: &str, id: &str, animated: bool) {
        assert_eq!(
            LinkClassifier::classify(url),
            LinkMatch::Emoji {
                id: id.to_string(),
                animated
            }
        );
    }

    #[test_case("https://media.discordapp.net/stickers/749054660769218631.png?size=160" ; "png")]
    #[test_case("https://media.discordapp.net/stickers/749054660769218631.webp" ; "webp")]
    #[test_case("https://media.discordapp.net/stickers/749054660769218631.json" ; "lottie")]
    fn test_sticker_shape(url: &str) {
        assert_eq!(
            LinkClassifier::classify(url),
            LinkMatch::Sticker {
                id: "749054660769218631".to_string()
            }
        );
    }

    #[test]
    fn test_attachment_gif_shape() {
        let url = "https://cdn.discordapp.com/attachments/111/222/55.gif";
        assert_eq!(
            LinkClassifier::classify(url),
            LinkMatch::AnimatedGifSticker {
                id: "55".to_string()
            }
        );
    }

    #[test_case("https://example.com/image.png" ; "plain image")]
    #[test_case("https://cdn.discordapp.com/emojis/abc.png" ; "non numeric emoji")]
    #[test_case("https://cdn.discordapp.com/emojis/42.jpg" ; "unsupported emoji ext")]
    #[test_case("https://cdn.discordapp.com/stickers/42" ; "sticker without extension")]
    #[test_case("https://cdn.discordapp.com/attachments/1/2/cat.gif" ; "named gif")]
    #[test_case("https://cdn.discordapp.com/attachments/1/2/55.png" ; "numeric png attachment")]
    #[test_case("not a url" ; "garbage")]
    #[test_case("" ; "empty")]
    fn test_unmatched(url: &str) {
        assert!(LinkClassifier::classify(url).is_none());
    }

    #[test]
    fn test_name_param_decodes() {
        let url = "https://media.discordapp.net/stickers/1.png?size=160&name=Wave%20Hello";
        assert_eq!(LinkClassifier::name_param(url), Some("Wave Hello".to_string()));
        assert_eq!(LinkClassifier::name_param("https://x/stickers/1.png"), None);
        assert_eq!(LinkClassifier::name_param("garbage"), None);
    }
}
