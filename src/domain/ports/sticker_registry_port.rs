//! Sticker registry port definition.

use crate::domain::entities::Sticker;

/// Read-only lookup of stickers known to the client.
///
/// Called on the render path, so implementations must answer from memory.
pub trait StickerRegistryPort: Send + Sync {
    /// Returns the sticker with the given id.
    fn sticker_by_id(&self, id: &str) -> Option<Sticker>;

    /// Returns true if the registry knows the id.
    fn contains(&self, id: &str) -> bool {
        self.sticker_by_id(id).is_some()
    }
}
