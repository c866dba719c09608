use super::app_config::LogLevel;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "fakenitro",
    version,
    about = "Fake premium emoji and sticker tooling for Discord clients",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH", global = true)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Size of the emojis when sending.
    #[arg(long, global = true)]
    pub emoji_size: Option<u32>,

    /// Size of the stickers when sending.
    #[arg(long, global = true)]
    pub sticker_size: Option<u32>,

    /// Transform fake links inside compound sentences.
    #[arg(long, global = true)]
    pub transform_compound_sentence: Option<bool>,

    /// Media host for reconstructed sticker links.
    #[arg(long, global = true)]
    pub media_host: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print how a URL is classified.
    Classify {
        /// URL to classify.
        url: String,
    },
    /// Render a message JSON file the way a patched client would.
    Render {
        /// Message JSON (`content`, `attachments`, `embeds`).
        message: PathBuf,

        /// Registry JSON with known `stickers` and `emojis`.
        #[arg(long, value_name = "PATH")]
        registry: Option<PathBuf>,

        /// Render as inline content (no jumbo emojis).
        #[arg(long)]
        inline: bool,
    },
    /// Rewrite an outgoing message the way a patched client would send it.
    Send {
        /// Message text.
        content: String,

        /// Sticker attached to the message.
        #[arg(long)]
        sticker: Option<String>,

        /// Target channel id.
        #[arg(long, default_value_t = 0)]
        channel_id: u64,

        /// Registry JSON with known `stickers`, `emojis` and `entitlements`.
        #[arg(long, value_name = "PATH")]
        registry: Option<PathBuf>,

        /// Directory mirroring media URLs for animated sticker sources.
        #[arg(long, value_name = "DIR", default_value = ".")]
        media_dir: PathBuf,

        /// Directory receiving recoded uploads.
        #[arg(long, value_name = "DIR", default_value = ".")]
        output_dir: PathBuf,

        /// Treat the content as an edit instead of a new message.
        #[arg(long)]
        edit: bool,
    },
    /// Recode an animated PNG sticker into a looping GIF.
    Recode {
        /// Source image path.
        input: PathBuf,

        /// Sticker id, used for the output file name.
        #[arg(long)]
        sticker_id: String,

        /// Output side length in pixels; defaults to the sticker size.
        #[arg(long, value_name = "PX")]
        size: Option<u32>,

        /// Output directory.
        #[arg(long, value_name = "DIR", default_value = ".")]
        output_dir: PathBuf,
    },
}
