//! Rewrites rendered message content, turning fake emoji links into emoji
//! widgets and dropping fake sticker links (the sticker itself is rendered
//! from a [`SyntheticSticker`](crate::domain::entities::SyntheticSticker)).

use std::sync::Arc;

use tracing::{debug, error};

use crate::domain::entities::{ContentNode, EmojiWidget, LinkMatch};
use crate::domain::errors::TransformError;
use crate::domain::ports::{EmojiRegistryPort, StickerRegistryPort};
use crate::domain::services::LinkClassifier;
use crate::infrastructure::config::FakeNitroSettings;

/// Name used when neither the registry nor the link know the emoji.
pub const FALLBACK_EMOJI_NAME: &str = "FakeNitroEmoji";

/// Deepest nesting the transformer recurses into.
pub const MAX_TREE_DEPTH: usize = 64;

pub struct RenderTransformer {
    settings: FakeNitroSettings,
    stickers: Arc<dyn StickerRegistryPort>,
    emojis: Arc<dyn EmojiRegistryPort>,
}

impl RenderTransformer {
    #[must_use]
    pub fn new(
        settings: FakeNitroSettings,
        stickers: Arc<dyn StickerRegistryPort>,
        emojis: Arc<dyn EmojiRegistryPort>,
    ) -> Self {
        Self {
            settings,
            stickers,
            emojis,
        }
    }

    /// Transforms a rendered content sequence.
    ///
    /// Content with more than one top-level node, or a single markup
    /// element such as a heading or list, is only touched in compound
    /// sentence mode. The input is never modified; if the tree turns out to
    /// be malformed the fault is logged and the input is returned as-is.
    #[must_use]
    pub fn transform(&self, content: &[ContentNode], inline: bool) -> Vec<ContentNode> {
        if !self.settings.transforms_anything() {
            return content.to_vec();
        }

        let first_is_markup = content.first().is_some_and(ContentNode::is_markup_element);
        if (content.len() > 1 || first_is_markup) && !self.settings.transform_compound_sentence {
            return content.to_vec();
        }

        let pass = TreePass {
            transformer: self,
            jumbo: !inline && content.len() == 1 && !first_is_markup,
        };

        match pass.transform_children(content.to_vec(), 0) {
            Ok(transformed) => transformed,
            Err(e) => {
                error!(error = %e, "Failed to transform message content");
                content.to_vec()
            }
        }
    }

    /// Returns true for a link whose target is a fake emoji, which keeps a
    /// lone emoji link eligible for jumbo rendering.
    #[must_use]
    pub fn should_keep_emoji_link(node: &ContentNode) -> bool {
        node.link_target().is_some_and(LinkClassifier::is_emoji_link)
    }

    fn emoji_name(&self, id: &str, target: &str) -> String {
        self.emojis
            .custom_emoji_by_id(id)
            .map(|emoji| emoji.name().to_string())
            .or_else(|| LinkClassifier::name_param(target))
            .unwrap_or_else(|| FALLBACK_EMOJI_NAME.to_string())
    }
}

struct TreePass<'a> {
    transformer: &'a RenderTransformer,
    jumbo: bool,
}

impl TreePass<'_> {
    fn transform_children(
        &self,
        children: Vec<ContentNode>,
        depth: usize,
    ) -> Result<Vec<ContentNode>, TransformError> {
        let mut transformed = Vec::with_capacity(children.len());
        for child in children {
            if let Some(node) = self.transform_node(child, depth)? {
                transformed.push(node);
            }
        }
        trim_edges(&mut transformed);
        Ok(transformed)
    }

    fn transform_node(
        &self,
        node: ContentNode,
        depth: usize,
    ) -> Result<Option<ContentNode>, TransformError> {
        if depth >= MAX_TREE_DEPTH {
            return Err(TransformError::TooDeep {
                max: MAX_TREE_DEPTH,
            });
        }

        if node.is_trusted_link() {
            return self.transform_link(node, depth);
        }

        match node {
            ContentNode::Element {
                tag,
                is_trusted_link,
                link_target,
                children,
            } => {
                let had_children = !children.is_empty();
                let children = self.transform_children(children, depth + 1)?;
                if had_children && children.is_empty() {
                    return Ok(None);
                }

                let element = ContentNode::Element {
                    tag,
                    is_trusted_link,
                    link_target,
                    children,
                };
                if element.is_list() {
                    return Ok(prune_list(element));
                }
                Ok(Some(element))
            }
            other => Ok(Some(other)),
        }
    }

    fn transform_link(
        &self,
        node: ContentNode,
        depth: usize,
    ) -> Result<Option<ContentNode>, TransformError> {
        let settings = &self.transformer.settings;
        let target = node
            .link_target()
            .ok_or(TransformError::MissingLinkTarget { depth })?
            .to_string();

        match LinkClassifier::classify(&target) {
            LinkMatch::Emoji { id, animated } if settings.transform_emojis => {
                let name = self.transformer.emoji_name(&id, &target);
                debug!(emoji_id = %id, name = %name, "Rendering fake emoji link as emoji");
                Ok(Some(ContentNode::Emoji(EmojiWidget::fake(
                    id, name, animated, self.jumbo,
                ))))
            }
            LinkMatch::Sticker { id } if settings.transform_stickers => {
                debug!(sticker_id = %id, "Removing fake sticker link");
                Ok(None)
            }
            LinkMatch::AnimatedGifSticker { id }
                if settings.transform_stickers && self.transformer.stickers.contains(&id) =>
            {
                debug!(sticker_id = %id, "Removing fake animated sticker link");
                Ok(None)
            }
            _ => Ok(Some(node)),
        }
    }
}

/// Drops list items left without content, and the list itself when no item
/// remains.
fn prune_list(list: ContentNode) -> Option<ContentNode> {
    let ContentNode::Element {
        tag,
        is_trusted_link,
        link_target,
        children,
    } = list
    else {
        return Some(list);
    };

    let items: Vec<ContentNode> = children.into_iter().filter(|item| !item.is_empty()).collect();
    if items.is_empty() {
        return None;
    }

    Some(ContentNode::Element {
        tag,
        is_trusted_link,
        link_target,
        children: items,
    })
}

/// Trims leading whitespace off the first text run and trailing whitespace
/// off the last one, dropping either if nothing is left.
fn trim_edges(nodes: &mut Vec<ContentNode>) {
    if let Some(ContentNode::Text { text }) = nodes.first_mut() {
        let trimmed = text.trim_start();
        if trimmed.len() != text.len() {
            *text = trimmed.to_string();
        }
    }
    if nodes.first().is_some_and(ContentNode::is_empty_text) {
        nodes.remove(0);
    }

    if let Some(ContentNode::Text { text }) = nodes.last_mut() {
        let trimmed_len = text.trim_end().len();
        text.truncate(trimmed_len);
    }
    if nodes.last().is_some_and(ContentNode::is_empty_text) {
        nodes.pop();
    }
}
