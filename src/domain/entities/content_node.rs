//! Rendered message content tree.

use serde::{Deserialize, Serialize};

/// Tag used for link components produced by the content parser.
pub const LINK_TAG: &str = "link";

/// Tags treated as list containers.
pub const LIST_TAGS: [&str; 2] = ["ul", "ol"];

/// Inline custom emoji widget synthesized from a fake emoji link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiWidget {
    /// Emoji snowflake.
    pub emoji_id: String,
    /// Display name.
    pub name: String,
    /// Whether the emoji is a GIF.
    pub animated: bool,
    /// Enlarged rendering for a standalone emoji.
    pub jumbo: bool,
    /// Always true for widgets built from links.
    pub fake: bool,
}

impl EmojiWidget {
    /// Creates a fake emoji widget.
    #[must_use]
    pub fn fake(
        emoji_id: impl Into<String>,
        name: impl Into<String>,
        animated: bool,
        jumbo: bool,
    ) -> Self {
        Self {
            emoji_id: emoji_id.into(),
            name: name.into(),
            animated,
            jumbo,
            fake: true,
        }
    }
}

/// One node of a rendered message body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentNode {
    /// Plain text run.
    Text {
        /// Text content.
        text: String,
    },
    /// Markup element or link component.
    Element {
        /// Element tag (`strong`, `ul`, `li`, `h1`, `link`, ...).
        tag: String,
        /// Set for links the host considers trusted.
        #[serde(default)]
        is_trusted_link: bool,
        /// Link destination, present on links.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        link_target: Option<String>,
        /// Child nodes in reading order.
        #[serde(default)]
        children: Vec<ContentNode>,
    },
    /// Custom emoji widget.
    Emoji(EmojiWidget),
}

impl ContentNode {
    /// Creates a text node.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Creates a markup element.
    #[must_use]
    pub fn element(tag: impl Into<String>, children: Vec<Self>) -> Self {
        Self::Element {
            tag: tag.into(),
            is_trusted_link: false,
            link_target: None,
            children,
        }
    }

    /// Creates a trusted link whose visible text is the target itself.
    #[must_use]
    pub fn trusted_link(target: impl Into<String>) -> Self {
        let target = target.into();
        Self::Element {
            tag: LINK_TAG.to_string(),
            is_trusted_link: true,
            children: vec![Self::text(target.clone())],
            link_target: Some(target),
        }
    }

    /// Returns the element tag, if any.
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    /// Returns the link destination, if any.
    #[must_use]
    pub fn link_target(&self) -> Option<&str> {
        match self {
            Self::Element { link_target, .. } => link_target.as_deref(),
            _ => None,
        }
    }

    /// Returns true for a trusted link component.
    #[must_use]
    pub const fn is_trusted_link(&self) -> bool {
        matches!(
            self,
            Self::Element {
                is_trusted_link: true,
                ..
            }
        )
    }

    /// Returns true for markup elements such as headings, lists or
    /// formatting, as opposed to link components and widgets.
    #[must_use]
    pub fn is_markup_element(&self) -> bool {
        match self {
            Self::Element {
                tag,
                is_trusted_link,
                ..
            } => !is_trusted_link && tag != LINK_TAG,
            _ => false,
        }
    }

    /// Returns true for `ul`/`ol` containers.
    #[must_use]
    pub fn is_list(&self) -> bool {
        self.tag().is_some_and(|tag| LIST_TAGS.contains(&tag))
    }

    /// Returns the children of an element.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match self {
            Self::Element { children, .. } => children,
            _ => &[],
        }
    }

    /// Returns true if the node renders nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text { text } => text.is_empty(),
            Self::Element { children, .. } => children.is_empty(),
            Self::Emoji(_) => false,
        }
    }

    /// Returns true for a text node without any characters.
    #[must_use]
    pub fn is_empty_text(&self) -> bool {
        matches!(self, Self::Text { text } if text.is_empty())
    }

    /// Concatenated text content, with emoji widgets as `:name:`.
    #[must_use]
    pub fn plain_text(&self) -> String {
        match self {
            Self::Text { text } => text.clone(),
            Self::Element { children, .. } => children.iter().map(Self::plain_text).collect(),
            Self::Emoji(emoji) => format!(":{}:", emoji.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trusted_link_is_not_markup() {
        let link = ContentNode::trusted_link("https://example.com");
        assert!(link.is_trusted_link());
        assert!(!link.is_markup_element());
        assert_eq!(link.plain_text(), "https://example.com");
    }

    #[test]
    fn test_list_detection() {
        let list = ContentNode::element("ul", vec![ContentNode::element("li", vec![])]);
        assert!(list.is_list());
        assert!(list.is_markup_element());
        assert!(!ContentNode::element("li", vec![]).is_list());
    }

    #[test]
    fn test_serde_shape() {
        let node = ContentNode::element("strong", vec![ContentNode::text("hi")]);
        let json = serde_json::to_string(&node).unwrap();
        assert!(json.contains(r#""type":"element""#));
        let back: ContentNode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, node);
    }
}
