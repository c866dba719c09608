//! Classification result for message links.

use serde::Serialize;

/// Kind of fake premium content a URL points at.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LinkMatch {
    /// Custom emoji CDN link.
    Emoji {
        /// Emoji snowflake.
        id: String,
        /// True for `.gif` emojis.
        animated: bool,
    },
    /// Sticker CDN link.
    Sticker {
        /// Sticker snowflake.
        id: String,
    },
    /// GIF attachment that may be an animated sticker uploaded by the recoder.
    /// Only a sticker registry lookup can tell it apart from a regular GIF.
    AnimatedGifSticker {
        /// Sticker snowflake taken from the file name.
        id: String,
    },
    /// Not a recognized shape.
    #[default]
    None,
}

impl LinkMatch {
    /// Returns the matched id, if any.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Emoji { id, .. } | Self::Sticker { id } | Self::AnimatedGifSticker { id } => {
                Some(id)
            }
            Self::None => None,
        }
    }

    /// Returns true if nothing matched.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}
