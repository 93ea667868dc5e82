//! Expanded-content model for branch items.
//!
//! Callers describe what an expanded item shows as a small tree of
//! [`ContentNode`]s. The tree is classified into an inline shape (one flowed
//! paragraph) or a block shape (a vertical stack of independently wrapped
//! children) before rendering.

use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

use super::theme::ThemeTokens;

/// Inline emphasis wrappers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    Bold,
    Italic,
    Dim,
    Code,
}

impl Emphasis {
    fn apply(self, style: Style, theme: &ThemeTokens) -> Style {
        match self {
            Emphasis::Bold => style.add_modifier(Modifier::BOLD),
            Emphasis::Italic => style.add_modifier(Modifier::ITALIC),
            Emphasis::Dim => style.add_modifier(Modifier::DIM),
            Emphasis::Code => style.fg(theme.accent_warning),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ContentNode {
    /// Renders as nothing
    #[default]
    Empty,
    Text(String),
    /// Emphasis applied to a run of children
    Emphasis(Emphasis, Vec<ContentNode>),
    /// Children flowed together on the same line(s)
    Inline(Vec<ContentNode>),
    /// Children stacked vertically, each wrapped on its own
    Block(Vec<ContentNode>),
}

/// How a node will be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentShape {
    Empty,
    InlineText,
    Block,
}

impl From<&str> for ContentNode {
    fn from(text: &str) -> Self {
        ContentNode::Text(text.to_string())
    }
}

impl From<String> for ContentNode {
    fn from(text: String) -> Self {
        ContentNode::Text(text)
    }
}

impl ContentNode {
    pub fn text(text: impl Into<String>) -> Self {
        ContentNode::Text(text.into())
    }

    pub fn bold(text: impl Into<String>) -> Self {
        ContentNode::Emphasis(Emphasis::Bold, vec![Self::text(text)])
    }

    pub fn italic(text: impl Into<String>) -> Self {
        ContentNode::Emphasis(Emphasis::Italic, vec![Self::text(text)])
    }

    pub fn code(text: impl Into<String>) -> Self {
        ContentNode::Emphasis(Emphasis::Code, vec![Self::text(text)])
    }

    pub fn inline(children: impl IntoIterator<Item = ContentNode>) -> Self {
        ContentNode::Inline(children.into_iter().collect())
    }

    pub fn block(children: impl IntoIterator<Item = ContentNode>) -> Self {
        ContentNode::Block(children.into_iter().collect())
    }

    /// True when the node would draw nothing at all.
    pub fn is_empty(&self) -> bool {
        match self {
            ContentNode::Empty => true,
            ContentNode::Text(text) => text.is_empty(),
            ContentNode::Emphasis(_, children)
            | ContentNode::Inline(children)
            | ContentNode::Block(children) => children.iter().all(ContentNode::is_empty),
        }
    }

    /// Text and inline wrappers whose children are themselves inline.
    fn is_inline(&self) -> bool {
        match self {
            ContentNode::Empty | ContentNode::Text(_) => true,
            ContentNode::Emphasis(_, children) | ContentNode::Inline(children) => {
                children.iter().all(ContentNode::is_inline)
            }
            ContentNode::Block(_) => false,
        }
    }

    /// Classify the node. Anything that is not purely inline renders as a
    /// block, including inline wrappers that smuggle in block children.
    pub fn shape(&self) -> ContentShape {
        if self.is_empty() {
            ContentShape::Empty
        } else if self.is_inline() {
            ContentShape::InlineText
        } else {
            ContentShape::Block
        }
    }

    /// Children to stack when rendering along the block path. Empty children
    /// are skipped; a non-container node is its own single child.
    pub fn block_children(&self) -> Vec<&ContentNode> {
        match self {
            ContentNode::Emphasis(_, children)
            | ContentNode::Inline(children)
            | ContentNode::Block(children) => children.iter().filter(|c| !c.is_empty()).collect(),
            ContentNode::Text(_) => vec![self],
            ContentNode::Empty => Vec::new(),
        }
    }

    /// Flatten to styled spans. Block children are flattened in order; callers
    /// only use this for inline-shaped nodes.
    pub fn inline_spans(&self, base: Style, theme: &ThemeTokens) -> Vec<Span<'static>> {
        let mut spans = Vec::new();
        self.collect_spans(base, theme, &mut spans);
        spans
    }

    fn collect_spans(&self, style: Style, theme: &ThemeTokens, out: &mut Vec<Span<'static>>) {
        match self {
            ContentNode::Empty => {}
            ContentNode::Text(text) => {
                if !text.is_empty() {
                    out.push(Span::styled(text.clone(), style));
                }
            }
            ContentNode::Emphasis(emphasis, children) => {
                let style = emphasis.apply(style, theme);
                for child in children {
                    child.collect_spans(style, theme, out);
                }
            }
            ContentNode::Inline(children) | ContentNode::Block(children) => {
                for child in children {
                    child.collect_spans(style, theme, out);
                }
            }
        }
    }

    /// Plain text with styling dropped.
    pub fn plain_text(&self) -> String {
        self.inline_spans(Style::default(), &ThemeTokens::default())
            .iter()
            .map(|span| span.content.as_ref())
            .collect()
    }
}
