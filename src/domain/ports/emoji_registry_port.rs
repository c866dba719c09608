//! Emoji registry port definition.

use crate::domain::entities::CustomEmoji;

/// Read-only lookup of custom emojis known to the client.
pub trait EmojiRegistryPort: Send + Sync {
    /// Returns the custom emoji with the given id.
    fn custom_emoji_by_id(&self, id: &str) -> Option<CustomEmoji>;
}
