use crate::domain::entities::{ChannelId, CustomEmoji, Permissions, Sticker};
use crate::domain::ports::EntitlementPort;

/// Decides whether the current user may use premium content for real.
pub struct EntitlementChecker<'a> {
    port: &'a dyn EntitlementPort,
}

impl<'a> EntitlementChecker<'a> {
    #[must_use]
    pub const fn new(port: &'a dyn EntitlementPort) -> Self {
        Self { port }
    }

    /// Private channels and unknown channels carry no permission overwrites.
    fn has_channel_permission(&self, channel_id: ChannelId, permissions: Permissions) -> bool {
        match self.port.channel(channel_id) {
            None => true,
            Some(channel) if channel.is_private() => true,
            Some(channel) => self.port.can(permissions, &channel),
        }
    }

    #[must_use]
    pub fn can_use_emotes(&self, channel_id: ChannelId) -> bool {
        self.port.premium_type().can_use_emotes()
            && self.has_channel_permission(channel_id, Permissions::USE_EXTERNAL_EMOJIS)
    }

    #[must_use]
    pub fn can_use_stickers(&self, channel_id: ChannelId) -> bool {
        self.port.premium_type().can_use_stickers()
            && self.has_channel_permission(channel_id, Permissions::USE_EXTERNAL_STICKERS)
    }

    /// Returns true if `emoji` can be sent as-is. `can_use_emotes` is the
    /// result of [`Self::can_use_emotes`] for the target channel.
    #[must_use]
    pub fn emoji_is_usable(&self, emoji: &CustomEmoji, can_use_emotes: bool) -> bool {
        if !emoji.requires_colons() {
            return true;
        }
        if emoji.is_available() && can_use_emotes {
            return true;
        }
        emoji.guild_id().is_some()
            && emoji.guild_id() == self.port.current_guild_id()
            && !emoji.is_animated()
    }

    /// Returns true if `sticker` can be sent as-is to `channel_id`.
    #[must_use]
    pub fn sticker_is_usable(&self, sticker: &Sticker, channel_id: ChannelId) -> bool {
        if sticker.is_globally_free() {
            return true;
        }
        if !sticker.is_available() {
            return false;
        }
        self.can_use_stickers(channel_id)
            || (sticker.guild_id().is_some() && sticker.guild_id() == self.port.current_guild_id())
    }
}
