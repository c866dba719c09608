//! Entitlement port definition.

use crate::domain::entities::{Channel, ChannelId, GuildId, Permissions, PremiumType};

/// Access to the current user's premium status and channel permissions.
pub trait EntitlementPort: Send + Sync {
    /// Premium subscription of the current user.
    fn premium_type(&self) -> PremiumType;

    /// Guild currently open in the client.
    fn current_guild_id(&self) -> Option<GuildId>;

    /// Looks up a channel.
    fn channel(&self, id: ChannelId) -> Option<Channel>;

    /// Returns true if the current user holds all `permissions` in `channel`.
    fn can(&self, permissions: Permissions, channel: &Channel) -> bool;
}
