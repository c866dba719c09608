mod animation_recoder_port;
mod asset_source_port;
mod emoji_registry_port;
mod entitlement_port;
mod sticker_registry_port;
mod upload_port;

pub use animation_recoder_port::AnimationRecoderPort;
pub use asset_source_port::AssetSourcePort;
pub use emoji_registry_port::EmojiRegistryPort;
pub use entitlement_port::EntitlementPort;
pub use sticker_registry_port::StickerRegistryPort;
pub use upload_port::{UploadPort, UploadRequest};
