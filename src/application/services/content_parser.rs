//! Parses Discord message markdown into a [`ContentNode`] sequence.
//!
//! Only the subset that matters for fake emoji and sticker rendering is
//! understood: headings, bullet and numbered lists, quotes, code, inline
//! formatting and bare links. Anything else stays plain text.

use std::iter::Peekable;
use std::str::CharIndices;

use crate::domain::entities::ContentNode;

/// Parses `input` into top-level content nodes.
///
/// A single line of text yields its inline nodes directly, so a message
/// made of one link parses to exactly one link node.
#[must_use]
pub fn parse_content(input: &str) -> Vec<ContentNode> {
    BlockParser::parse(input)
}

struct BlockParser;

impl BlockParser {
    fn parse(input: &str) -> Vec<ContentNode> {
        let mut nodes = Vec::new();
        let mut lines = input.lines().peekable();
        let mut after_inline = false;

        while let Some(line) = lines.next() {
            let line_trim_end = line.trim_end();

            if line_trim_end.starts_with("```") {
                let mut code = String::new();
                for code_line in lines.by_ref() {
                    if code_line.trim().starts_with("```") {
                        break;
                    }
                    code.push_str(code_line);
                    code.push('\n');
                }
                if code.ends_with('\n') {
                    code.pop();
                }
                nodes.push(ContentNode::element("pre", vec![ContentNode::text(code)]));
                after_inline = false;
                continue;
            }

            if let Some((level, content)) = heading(line) {
                nodes.push(ContentNode::element(
                    format!("h{level}"),
                    InlineParser::parse(content),
                ));
                after_inline = false;
                continue;
            }

            if let Some(content) = line.strip_prefix("> ") {
                let mut quoted = InlineParser::parse(content);
                while let Some(next) = lines.peek().and_then(|l| l.strip_prefix("> ")) {
                    push_text(&mut quoted, "\n");
                    extend_inline(&mut quoted, InlineParser::parse(next));
                    lines.next();
                }
                nodes.push(ContentNode::element("blockquote", quoted));
                after_inline = false;
                continue;
            }

            if let Some((tag, content)) = list_item(line) {
                let mut items = vec![ContentNode::element("li", InlineParser::parse(content))];
                while let Some((next_tag, next)) = lines.peek().copied().and_then(list_item) {
                    if next_tag != tag {
                        break;
                    }
                    items.push(ContentNode::element("li", InlineParser::parse(next)));
                    lines.next();
                }
                nodes.push(ContentNode::element(tag, items));
                after_inline = false;
                continue;
            }

            if after_inline {
                push_text(&mut nodes, "\n");
            }
            extend_inline(&mut nodes, InlineParser::parse(line));
            after_inline = true;
        }

        nodes
    }
}

fn heading(line: &str) -> Option<(u8, &str)> {
    if let Some(content) = line.strip_prefix("### ") {
        return Some((3, content));
    }
    if let Some(content) = line.strip_prefix("## ") {
        return Some((2, content));
    }
    line.strip_prefix("# ").map(|content| (1, content))
}

fn list_item(line: &str) -> Option<(&'static str, &str)> {
    let trimmed = line.trim_start();
    if let Some(content) = trimmed
        .strip_prefix("- ")
        .or_else(|| trimmed.strip_prefix("* "))
    {
        return Some(("ul", content));
    }

    let digits = trimmed.len() - trimmed.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    trimmed[digits..].strip_prefix(". ").map(|content| ("ol", content))
}

/// Appends text, merging with a trailing text node.
fn push_text(nodes: &mut Vec<ContentNode>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(ContentNode::Text { text: last }) = nodes.last_mut() {
        last.push_str(text);
    } else {
        nodes.push(ContentNode::text(text));
    }
}

fn extend_inline(nodes: &mut Vec<ContentNode>, inline: Vec<ContentNode>) {
    for node in inline {
        match node {
            ContentNode::Text { text } => push_text(nodes, &text),
            other => nodes.push(other),
        }
    }
}

struct InlineParser<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
    start: usize,
    nodes: Vec<ContentNode>,
}

impl<'a> InlineParser<'a> {
    fn parse(input: &'a str) -> Vec<ContentNode> {
        let mut parser = Self {
            input,
            chars: input.char_indices().peekable(),
            start: 0,
            nodes: Vec::new(),
        };

        while let Some((idx, ch)) = parser.chars.next() {
            parser.handle(idx, ch);
        }
        parser.flush(input.len());

        parser.nodes
    }

    fn handle(&mut self, idx: usize, ch: char) {
        let input = self.input;
        let remaining = &input[idx..];
        match ch {
            '*' if remaining.starts_with("***") => self.container(idx, "***", |children| {
                ContentNode::element("em", vec![ContentNode::element("strong", children)])
            }),
            '*' if remaining.starts_with("**") => {
                self.container(idx, "**", |children| ContentNode::element("strong", children));
            }
            '*' => self.container(idx, "*", |children| ContentNode::element("em", children)),
            '_' if remaining.starts_with("__") => {
                self.container(idx, "__", |children| ContentNode::element("u", children));
            }
            '_' => self.container(idx, "_", |children| ContentNode::element("em", children)),
            '~' if remaining.starts_with("~~") => {
                self.container(idx, "~~", |children| ContentNode::element("s", children));
            }
            '|' if remaining.starts_with("||") => {
                self.container(idx, "||", |children| ContentNode::element("spoiler", children));
            }
            '`' => self.inline_code(idx),
            'h' if remaining.starts_with("https://") || remaining.starts_with("http://") => {
                self.link(idx, remaining);
            }
            '\\' => self.escape(idx),
            _ => {}
        }
    }

    fn flush(&mut self, until: usize) {
        if until > self.start {
            push_text(&mut self.nodes, &self.input[self.start..until]);
        }
    }

    fn advance_to(&mut self, end: usize) {
        while let Some(&(curr, _)) = self.chars.peek() {
            if curr < end {
                self.chars.next();
            } else {
                break;
            }
        }
        self.start = end;
    }

    fn container<F>(&mut self, idx: usize, delimiter: &str, wrap: F)
    where
        F: FnOnce(Vec<ContentNode>) -> ContentNode,
    {
        let inner_start = idx + delimiter.len();
        let Some(offset) = self.input[inner_start..].find(delimiter) else {
            return;
        };
        if offset == 0 {
            return;
        }

        self.flush(idx);
        let inner_end = inner_start + offset;
        let children = InlineParser::parse(&self.input[inner_start..inner_end]);
        self.nodes.push(wrap(children));
        self.advance_to(inner_end + delimiter.len());
    }

    fn inline_code(&mut self, idx: usize) {
        let Some(offset) = self.input[idx + 1..].find('`') else {
            return;
        };

        self.flush(idx);
        let end = idx + 1 + offset;
        let code = &self.input[idx + 1..end];
        self.nodes
            .push(ContentNode::element("code", vec![ContentNode::text(code)]));
        self.advance_to(end + 1);
    }

    fn link(&mut self, idx: usize, remaining: &str) {
        let len = remaining
            .find(char::is_whitespace)
            .unwrap_or(remaining.len());

        self.flush(idx);
        self.nodes
            .push(ContentNode::trusted_link(&remaining[..len]));
        self.advance_to(idx + len);
    }

    fn escape(&mut self, idx: usize) {
        let Some(&(next_idx, next)) = self.chars.peek() else {
            return;
        };
        if !next.is_ascii_punctuation() {
            return;
        }

        self.flush(idx);
        self.chars.next();
        push_text(&mut self.nodes, &self.input[next_idx..next_idx + next.len_utf8()]);
        self.start = next_idx + next.len_utf8();
    }
}
