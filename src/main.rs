use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{CommandFactory, Parser};
use color_eyre::eyre::{Result, WrapErr};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use fakenitro::application::{
    AnimatedStickerRequest, EmbedFilter, FakeNoticeKind, FakeNoticeService, OutboundRewriter,
    RenderTransformer, SendAnimatedStickerUseCase, StickerSynthesizer, parse_content,
};
use fakenitro::domain::LinkClassifier;
use fakenitro::domain::entities::{
    Attachment, ChannelId, ContentNode, Embed, Message, OutgoingMessage, SyntheticSticker,
};
use fakenitro::infrastructure::{
    AnimatedImageRecoder, AppConfig, CliArgs, Command, DirectoryUploader, FakeNitroSettings,
    FileAssetSource, JsonRegistry, StorageManager,
};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        // stdout carries command output
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<AppConfig> {
    let storage = StorageManager::new()?;
    let mut config = storage.load_config(args.config.as_deref())?;
    config.merge_with_args(args);
    Ok(config)
}

async fn load_registry(path: Option<&Path>) -> Result<Arc<JsonRegistry>> {
    let registry = match path {
        Some(path) => JsonRegistry::load(path).await?,
        None => JsonRegistry::default(),
    };
    Ok(Arc::new(registry))
}

#[derive(Serialize)]
struct RenderedSticker {
    #[serde(flatten)]
    sticker: SyntheticSticker,
    popout: String,
}

#[derive(Serialize)]
struct RenderOutput {
    content: Vec<ContentNode>,
    stickers: Vec<RenderedSticker>,
    embeds: Vec<Embed>,
    attachments: Vec<Attachment>,
}

async fn render(
    settings: FakeNitroSettings,
    message_path: &Path,
    registry_path: Option<&Path>,
    inline: bool,
) -> Result<()> {
    let registry = load_registry(registry_path).await?;

    let raw = tokio::fs::read_to_string(message_path)
        .await
        .wrap_err_with(|| format!("Failed to read message {}", message_path.display()))?;
    let message: Message = serde_json::from_str(&raw).wrap_err("Invalid message JSON")?;

    let transformer = RenderTransformer::new(settings.clone(), registry.clone(), registry.clone());
    let synthesizer = StickerSynthesizer::new(settings.clone(), registry.clone());
    let filter = EmbedFilter::new(settings, registry);

    let stickers = synthesizer
        .synthesize(&message)
        .into_iter()
        .map(|sticker| RenderedSticker {
            popout: FakeNoticeService::decorate(FakeNoticeKind::Sticker, &sticker.name, sticker.fake),
            sticker,
        })
        .collect();

    let output = RenderOutput {
        content: transformer.transform(&parse_content(message.content()), inline),
        stickers,
        embeds: filter.filter_embeds(&message),
        attachments: filter.filter_attachments(message.attachments()),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn animated_sticker_use_case(
    media_dir: PathBuf,
    output_dir: PathBuf,
) -> Arc<SendAnimatedStickerUseCase> {
    let assets = Arc::new(FileAssetSource::new(media_dir));
    Arc::new(SendAnimatedStickerUseCase::new(
        Arc::new(AnimatedImageRecoder::new(assets)),
        Arc::new(DirectoryUploader::new(output_dir)),
    ))
}

#[allow(clippy::too_many_arguments)]
async fn send(
    settings: FakeNitroSettings,
    content: String,
    sticker: Option<String>,
    channel_id: ChannelId,
    registry_path: Option<&Path>,
    media_dir: PathBuf,
    output_dir: PathBuf,
    edit: bool,
) -> Result<()> {
    let registry = load_registry(registry_path).await?;
    let rewriter = OutboundRewriter::new(
        settings,
        registry.clone(),
        registry.clone(),
        Arc::new(registry.entitlements()),
        animated_sticker_use_case(media_dir, output_dir),
    );

    if edit {
        let mut content = content;
        rewriter.on_edit(channel_id, &mut content);
        println!("{content}");
        return Ok(());
    }

    let mut message = OutgoingMessage::new(content);
    message.emojis = rewriter.referenced_emojis(&message.content);
    if let Some(sticker) = sticker {
        message = message.with_sticker(sticker);
    }

    let outcome = rewriter.on_send(channel_id, &mut message);
    if let Some(task) = outcome.recode_task {
        task.wait().await?;
    }

    if outcome.cancel {
        info!("Message replaced by a recoded sticker upload");
    } else {
        println!("{}", message.content);
    }
    Ok(())
}

async fn recode(
    settings: &FakeNitroSettings,
    input: &Path,
    sticker_id: String,
    size: Option<u32>,
    output_dir: PathBuf,
) -> Result<()> {
    let use_case = animated_sticker_use_case(PathBuf::from("."), output_dir.clone());

    use_case
        .execute(AnimatedStickerRequest {
            source_url: input.display().to_string(),
            sticker_id: sticker_id.clone(),
            channel_id: ChannelId(0),
            resolution: size.unwrap_or(settings.sticker_size),
        })
        .await?;

    println!("{}", output_dir.join(format!("{sticker_id}.gif")).display());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = CliArgs::parse();
    let config = load_config(&args)?;
    init_logging(&config)?;

    info!(version = fakenitro::VERSION, "Starting FakeNitro");

    let settings = config.fake_nitro.clone();

    match args.command {
        Some(Command::Classify { url }) => {
            let link = LinkClassifier::classify(&url);
            println!("{}", serde_json::to_string_pretty(&link)?);
        }
        Some(Command::Render {
            message,
            registry,
            inline,
        }) => render(settings, &message, registry.as_deref(), inline).await?,
        Some(Command::Send {
            content,
            sticker,
            channel_id,
            registry,
            media_dir,
            output_dir,
            edit,
        }) => {
            send(
                settings,
                content,
                sticker,
                ChannelId(channel_id),
                registry.as_deref(),
                media_dir,
                output_dir,
                edit,
            )
            .await?;
        }
        Some(Command::Recode {
            input,
            sticker_id,
            size,
            output_dir,
        }) => recode(&settings, &input, sticker_id, size, output_dir).await?,
        None => CliArgs::command().print_help()?,
    }

    Ok(())
}
