use serde::{Deserialize, Serialize};

use super::CustomEmoji;

/// MIME type of GIF attachments.
pub const GIF_CONTENT_TYPE: &str = "image/gif";

/// Discord message attachment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct Attachment {
    #[serde(default)]
    id: String,
    #[serde(default)]
    filename: String,
    #[serde(default)]
    size: u64,
    url: String,
    #[serde(default)]
    content_type: Option<String>,
}

#[allow(missing_docs)]
impl Attachment {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        filename: impl Into<String>,
        size: u64,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            filename: filename.into(),
            size,
            url: url.into(),
            content_type: None,
        }
    }

    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    #[must_use]
    pub fn is_gif(&self) -> bool {
        self.content_type() == Some(GIF_CONTENT_TYPE)
    }
}

/// Embed type reported by Discord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum EmbedKind {
    #[default]
    Rich,
    Image,
    Video,
    Gifv,
    Article,
    Link,
    #[serde(other)]
    Unknown,
}

/// Image section of an embed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct EmbedImage {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub proxy_url: Option<String>,
}

/// Message embed, reduced to what link filtering needs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct Embed {
    #[serde(rename = "type", default)]
    kind: EmbedKind,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    image: Option<EmbedImage>,
}

#[allow(missing_docs)]
impl Embed {
    #[must_use]
    pub fn image(url: impl Into<String>, proxy_url: Option<String>) -> Self {
        let url = url.into();
        Self {
            kind: EmbedKind::Image,
            image: Some(EmbedImage {
                url: Some(url.clone()),
                proxy_url,
            }),
            url: Some(url),
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: EmbedKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub const fn kind(&self) -> EmbedKind {
        self.kind
    }

    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    #[must_use]
    pub fn image_proxy_url(&self) -> Option<&str> {
        self.image.as_ref().and_then(|image| image.proxy_url.as_deref())
    }
}

/// Received message as seen by the render path.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct Message {
    #[serde(default)]
    content: String,
    #[serde(default)]
    attachments: Vec<Attachment>,
    #[serde(default)]
    embeds: Vec<Embed>,
}

#[allow(missing_docs)]
impl Message {
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            attachments: Vec::new(),
            embeds: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = attachments;
        self
    }

    #[must_use]
    pub fn with_embeds(mut self, embeds: Vec<Embed>) -> Self {
        self.embeds = embeds;
        self
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    #[must_use]
    pub fn embeds(&self) -> &[Embed] {
        &self.embeds
    }

    /// Splits the content on every single whitespace character, keeping
    /// empty pieces between consecutive separators.
    #[must_use]
    pub fn content_tokens(&self) -> Vec<&str> {
        self.content.split(char::is_whitespace).collect()
    }
}

/// Message about to be sent or edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutgoingMessage {
    /// Text content, rewritten in place.
    pub content: String,
    /// Attached sticker ids.
    pub sticker_ids: Vec<String>,
    /// Custom emojis referenced by the content, as resolved by the client.
    pub emojis: Vec<CustomEmoji>,
}

impl OutgoingMessage {
    /// Creates a plain text message.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    /// Attaches a sticker.
    #[must_use]
    pub fn with_sticker(mut self, sticker_id: impl Into<String>) -> Self {
        self.sticker_ids.push(sticker_id.into());
        self
    }

    /// Adds a referenced emoji.
    #[must_use]
    pub fn with_emoji(mut self, emoji: CustomEmoji) -> Self {
        self.emojis.push(emoji);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_tokens_keep_empty_pieces() {
        let message = Message::new("a  b");
        assert_eq!(message.content_tokens(), vec!["a", "", "b"]);
    }

    #[test]
    fn test_attachment_is_gif() {
        let gif = Attachment::new("1", "a.gif", 10, "https://x/a.gif").with_content_type("image/gif");
        let png = Attachment::new("2", "a.png", 10, "https://x/a.png").with_content_type("image/png");
        assert!(gif.is_gif());
        assert!(!png.is_gif());
    }

    #[test]
    fn test_embed_deserialize() {
        let json = r#"{"type":"image","url":"https://x/y.png","image":{"proxy_url":"https://p/y.png"}}"#;
        let embed: Embed = serde_json::from_str(json).unwrap();
        assert_eq!(embed.kind(), EmbedKind::Image);
        assert_eq!(embed.image_proxy_url(), Some("https://p/y.png"));
    }
}
