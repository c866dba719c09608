//! Sticker and emoji registries backed by a JSON snapshot.

use std::collections::HashMap;
use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use serde::Deserialize;
use tokio::fs;
use tracing::debug;

use super::entitlement::{EntitlementSnapshot, StaticEntitlements};
use crate::domain::entities::{CustomEmoji, Sticker};
use crate::domain::ports::{EmojiRegistryPort, StickerRegistryPort};

/// On-disk layout of a registry snapshot.
#[derive(Debug, Default, Deserialize)]
struct RegistryFile {
    #[serde(default)]
    stickers: Vec<Sticker>,
    #[serde(default)]
    emojis: Vec<CustomEmoji>,
    #[serde(default)]
    entitlements: EntitlementSnapshot,
}

/// Known stickers and custom emojis, keyed by snowflake.
#[derive(Debug, Clone, Default)]
pub struct JsonRegistry {
    stickers: HashMap<String, Sticker>,
    emojis: HashMap<String, CustomEmoji>,
    entitlements: EntitlementSnapshot,
}

impl JsonRegistry {
    /// Parses a snapshot such as
    /// `{"stickers": [...], "emojis": [...], "entitlements": {...}}`.
    /// Every section is optional.
    ///
    /// # Errors
    /// Returns error if the JSON does not match the snapshot layout.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let file: RegistryFile = serde_json::from_str(json)?;

        Ok(Self {
            stickers: file
                .stickers
                .into_iter()
                .map(|s| (s.id().to_string(), s))
                .collect(),
            emojis: file
                .emojis
                .into_iter()
                .map(|e| (e.id().to_string(), e))
                .collect(),
            entitlements: file.entitlements,
        })
    }

    /// Reads a snapshot file.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .wrap_err_with(|| format!("Failed to read registry {}", path.display()))?;

        let registry = Self::from_json(&content)
            .wrap_err_with(|| format!("Invalid registry {}", path.display()))?;

        debug!(
            path = %path.display(),
            stickers = registry.stickers.len(),
            emojis = registry.emojis.len(),
            "Loaded registry snapshot"
        );
        Ok(registry)
    }

    /// Entitlements recorded alongside the registry.
    #[must_use]
    pub fn entitlements(&self) -> StaticEntitlements {
        StaticEntitlements::new(self.entitlements.clone())
    }
}

impl StickerRegistryPort for JsonRegistry {
    fn sticker_by_id(&self, id: &str) -> Option<Sticker> {
        self.stickers.get(id).cloned()
    }
}

impl EmojiRegistryPort for JsonRegistry {
    fn custom_emoji_by_id(&self, id: &str) -> Option<CustomEmoji> {
        self.emojis.get(id).cloned()
    }
}
