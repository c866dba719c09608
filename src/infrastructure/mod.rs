//! Infrastructure layer with adapters for local files and image codecs.

/// Animated sticker recoding.
pub mod animation;
/// Filesystem asset source.
pub mod assets;
/// Application configuration.
pub mod config;
/// Offline entitlement state.
pub mod entitlement;
/// JSON sticker and emoji registries.
pub mod registry;
/// Directory-backed upload staging.
pub mod upload;

pub use animation::{AnimatedImageRecoder, recode_bytes};
pub use assets::FileAssetSource;
pub use config::{AppConfig, CliArgs, Command, FakeNitroSettings, LogLevel, StorageManager};
pub use entitlement::{ChannelGrant, EntitlementSnapshot, StaticEntitlements};
pub use registry::JsonRegistry;
pub use upload::DirectoryUploader;
