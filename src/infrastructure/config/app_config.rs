//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub(crate) const APP_NAME: &str = "fakenitro";
pub(crate) const APP_QUALIFIER: &str = "com";
pub(crate) const APP_ORGANIZATION: &str = "linuxmobile";

/// Host used for reconstructed sticker links.
pub const DEFAULT_MEDIA_HOST: &str = "https://media.discordapp.net";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl LogLevel {
    /// Converts to tracing level.
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Fake emoji and sticker behaviour.
    #[serde(default)]
    pub fake_nitro: FakeNitroSettings,
}

/// Fake emoji and sticker settings.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FakeNitroSettings {
    /// Allow sending fake emojis.
    #[serde(default = "default_true")]
    pub enable_emoji_bypass: bool,

    /// Size of the emojis when sending.
    #[serde(default = "default_emoji_size")]
    pub emoji_size: u32,

    /// Whether to transform fake emojis into real ones.
    #[serde(default = "default_true")]
    pub transform_emojis: bool,

    /// Allow sending fake stickers.
    #[serde(default = "default_true")]
    pub enable_sticker_bypass: bool,

    /// Size of the stickers when sending.
    #[serde(default = "default_sticker_size")]
    pub sticker_size: u32,

    /// Whether to transform fake stickers into real ones.
    #[serde(default = "default_true")]
    pub transform_stickers: bool,

    /// Whether to transform fake stickers and emojis in compound sentences
    /// (sentences with more content than just the fake emoji or sticker link).
    #[serde(default)]
    pub transform_compound_sentence: bool,

    /// Media host for reconstructed sticker links.
    #[serde(default = "default_media_host")]
    pub media_host: String,
}

impl FakeNitroSettings {
    /// Returns true if any render-side transformation is enabled.
    #[must_use]
    pub const fn transforms_anything(&self) -> bool {
        self.transform_emojis || self.transform_stickers
    }
}

impl Default for FakeNitroSettings {
    fn default() -> Self {
        Self {
            enable_emoji_bypass: true,
            emoji_size: default_emoji_size(),
            transform_emojis: true,
            enable_sticker_bypass: true,
            sticker_size: default_sticker_size(),
            transform_stickers: true,
            transform_compound_sentence: false,
            media_host: default_media_host(),
        }
    }
}

fn default_true() -> bool {
    true
}

const fn default_emoji_size() -> u32 {
    48
}

const fn default_sticker_size() -> u32 {
    160
}

fn default_media_host() -> String {
    DEFAULT_MEDIA_HOST.to_string()
}

use super::args::CliArgs;

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(config_path) = &args.config {
            self.config = Some(config_path.clone());
        }
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(emoji_size) = args.emoji_size {
            self.fake_nitro.emoji_size = emoji_size;
        }
        if let Some(sticker_size) = args.sticker_size {
            self.fake_nitro.sticker_size = sticker_size;
        }
        if let Some(compound) = args.transform_compound_sentence {
            self.fake_nitro.transform_compound_sentence = compound;
        }
        if let Some(media_host) = &args.media_host {
            self.fake_nitro.media_host.clone_from(media_host);
        }
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default config file path.
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        Self::default_config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("fakenitro.log"))
    }

    /// Returns effective config path.
    #[must_use]
    pub fn effective_config_path(&self) -> Option<PathBuf> {
        self.config.clone().or_else(Self::default_config_path)
    }

    /// Returns effective log path. Logging to a file is opt-in.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            log_level: LogLevel::Info,
            fake_nitro: FakeNitroSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_fake_nitro_table() {
        let toml_content = r#"
            log_level = "debug"

            [fake_nitro]
            sticker_size = 320
            transform_compound_sentence = true
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.fake_nitro.sticker_size, 320);
        assert!(config.fake_nitro.transform_compound_sentence);
        assert_eq!(config.fake_nitro.emoji_size, 48);
        assert!(config.fake_nitro.enable_emoji_bypass);
        assert_eq!(config.fake_nitro.media_host, DEFAULT_MEDIA_HOST);
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.log_level, LogLevel::Info);
        assert!(config.fake_nitro.transforms_anything());
        assert!(!config.fake_nitro.transform_compound_sentence);
        assert_eq!(config.fake_nitro.sticker_size, 160);
    }

    #[test]
    fn test_merge_with_args_overrides() {
        let mut config = AppConfig::default();
        let args = CliArgs {
            config: None,
            log_path: None,
            log_level: Some(LogLevel::Trace),
            emoji_size: Some(64),
            sticker_size: None,
            transform_compound_sentence: Some(true),
            media_host: None,
            command: None,
        };

        config.merge_with_args(&args);

        assert_eq!(config.log_level, LogLevel::Trace);
        assert_eq!(config.fake_nitro.emoji_size, 64);
        assert_eq!(config.fake_nitro.sticker_size, 160);
        assert!(config.fake_nitro.transform_compound_sentence);
    }
}
