//! Sticker entities.

use serde::{Deserialize, Serialize};

use super::GuildId;

/// Sticker image format as stored by Discord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
#[repr(u8)]
pub enum StickerFormat {
    /// Static PNG.
    #[default]
    Png = 1,
    /// Animated PNG.
    Apng = 2,
    /// Lottie JSON animation.
    Lottie = 3,
    /// Animated GIF.
    Gif = 4,
}

impl From<u8> for StickerFormat {
    fn from(value: u8) -> Self {
        match value {
            2 => Self::Apng,
            3 => Self::Lottie,
            4 => Self::Gif,
            _ => Self::Png,
        }
    }
}

impl From<StickerFormat> for u8 {
    fn from(value: StickerFormat) -> Self {
        value as Self
    }
}

/// Where a sticker comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StickerOwner {
    /// Official sticker pack, usable by everyone.
    Pack {
        /// Pack snowflake.
        pack_id: String,
    },
    /// Sticker uploaded to a guild.
    Guild {
        /// Owning guild.
        guild_id: GuildId,
    },
}

/// Sticker as known to the local sticker registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sticker {
    id: String,
    name: String,
    #[serde(default)]
    format: StickerFormat,
    owner: StickerOwner,
    #[serde(default = "default_available")]
    available: bool,
}

const fn default_available() -> bool {
    true
}

#[allow(missing_docs)]
impl Sticker {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        format: StickerFormat,
        owner: StickerOwner,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            format,
            owner,
            available: true,
        }
    }

    #[must_use]
    pub const fn with_available(mut self, available: bool) -> Self {
        self.available = available;
        self
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn format(&self) -> StickerFormat {
        self.format
    }

    #[must_use]
    pub const fn owner(&self) -> &StickerOwner {
        &self.owner
    }

    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.available
    }

    /// Pack stickers are free for everyone.
    #[must_use]
    pub const fn is_globally_free(&self) -> bool {
        matches!(self.owner, StickerOwner::Pack { .. })
    }

    #[must_use]
    pub const fn guild_id(&self) -> Option<GuildId> {
        match self.owner {
            StickerOwner::Guild { guild_id } => Some(guild_id),
            StickerOwner::Pack { .. } => None,
        }
    }
}

/// Sticker record re-inflated from a link during rendering.
///
/// Never persisted. `fake` is always set so the sticker popout can show
/// the fake notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyntheticSticker {
    /// Sticker snowflake.
    pub id: String,
    /// Display name.
    pub name: String,
    /// `Png` for static links, `Gif` for recoded animated stickers.
    pub format: StickerFormat,
    /// Always true.
    pub fake: bool,
}

impl SyntheticSticker {
    /// Static sticker rebuilt from a sticker CDN link.
    #[must_use]
    pub fn fake_static(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            format: StickerFormat::Png,
            fake: true,
        }
    }

    /// Animated sticker rebuilt from a GIF attachment.
    #[must_use]
    pub fn fake_gif(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            format: StickerFormat::Gif,
            fake: true,
        }
    }
}
