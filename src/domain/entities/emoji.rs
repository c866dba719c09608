//! Custom emoji entity.

use serde::{Deserialize, Serialize};

use super::GuildId;

/// Custom guild emoji as known to the local emoji registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomEmoji {
    id: String,
    name: String,
    #[serde(default)]
    original_name: Option<String>,
    #[serde(default)]
    animated: bool,
    #[serde(default = "default_true")]
    require_colons: bool,
    #[serde(default = "default_true")]
    available: bool,
    #[serde(default)]
    guild_id: Option<GuildId>,
    url: String,
}

const fn default_true() -> bool {
    true
}

#[allow(missing_docs)]
impl CustomEmoji {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        animated: bool,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            original_name: None,
            animated,
            require_colons: true,
            available: true,
            guild_id: None,
            url: url.into(),
        }
    }

    #[must_use]
    pub const fn with_guild(mut self, guild_id: GuildId) -> Self {
        self.guild_id = Some(guild_id);
        self
    }

    #[must_use]
    pub fn with_original_name(mut self, original_name: impl Into<String>) -> Self {
        self.original_name = Some(original_name.into());
        self
    }

    #[must_use]
    pub const fn with_available(mut self, available: bool) -> Self {
        self.available = available;
        self
    }

    #[must_use]
    pub const fn with_require_colons(mut self, require_colons: bool) -> Self {
        self.require_colons = require_colons;
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
    pub const fn is_animated(&self) -> bool {
        self.animated
    }

    #[must_use]
    pub const fn requires_colons(&self) -> bool {
        self.require_colons
    }

    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.available
    }

    #[must_use]
    pub const fn guild_id(&self) -> Option<GuildId> {
        self.guild_id
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Markup the client writes for this emoji, e.g. `<a:party:42>`.
    #[must_use]
    pub fn markup(&self) -> String {
        let prefix = if self.animated { "a" } else { "" };
        let name = self.original_name.as_deref().unwrap_or(&self.name);
        format!("<{prefix}:{name}:{}>", self.id)
    }
}
