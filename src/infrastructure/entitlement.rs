//! Fixed entitlements for offline use.

use serde::Deserialize;

use crate::domain::entities::{Channel, ChannelId, GuildId, Permissions, PremiumType};
use crate::domain::ports::EntitlementPort;

/// A channel together with the permissions the user holds in it.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ChannelGrant {
    channel: Channel,
    #[serde(default)]
    permissions: Permissions,
}

impl ChannelGrant {
    #[must_use]
    pub const fn new(channel: Channel, permissions: Permissions) -> Self {
        Self {
            channel,
            permissions,
        }
    }
}

/// Serialized entitlement state.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntitlementSnapshot {
    #[serde(default)]
    pub premium_type: PremiumType,
    #[serde(default)]
    pub current_guild_id: Option<GuildId>,
    #[serde(default)]
    pub channels: Vec<ChannelGrant>,
}

/// `EntitlementPort` answering from a snapshot instead of a live client.
///
/// Unknown channels resolve to `None`, which entitlement checks treat like a
/// direct message.
#[derive(Debug, Clone, Default)]
pub struct StaticEntitlements {
    snapshot: EntitlementSnapshot,
}

impl StaticEntitlements {
    #[must_use]
    pub const fn new(snapshot: EntitlementSnapshot) -> Self {
        Self { snapshot }
    }

    fn grant(&self, id: ChannelId) -> Option<&ChannelGrant> {
        self.snapshot
            .channels
            .iter()
            .find(|grant| grant.channel.id() == id)
    }
}

impl EntitlementPort for StaticEntitlements {
    fn premium_type(&self) -> PremiumType {
        self.snapshot.premium_type
    }

    fn current_guild_id(&self) -> Option<GuildId> {
        self.snapshot.current_guild_id
    }

    fn channel(&self, id: ChannelId) -> Option<Channel> {
        self.grant(id).map(|grant| grant.channel)
    }

    fn can(&self, permissions: Permissions, channel: &Channel) -> bool {
        self.grant(channel.id())
            .is_some_and(|grant| grant.permissions.contains(permissions))
    }
}
