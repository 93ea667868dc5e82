//! Collapsible branch item - one spawned agent's output in the grid.
//!
//! The item never owns its collapse state. `is_collapsed` comes in as a prop
//! from whoever owns the list (see [`crate::ui::CollapseStore`]); clicks are
//! reported through [`BranchItem::hit_test`] and applied by the owner. The
//! only state the widget carries between frames is the hover flag in
//! [`BranchItemUiState`], which the owner drops with the item.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Paragraph, StatefulWidget, Widget},
};
use unicode_width::UnicodeWidthStr;

use super::content::{ContentNode, ContentShape};
use super::text_wrap::{truncate_to_width, wrap_multiline, wrap_text};
use super::theme::ThemeTokens;

/// Lines of preview shown while collapsed.
pub const MAX_COLLAPSED_LINES: usize = 3;

const PREVIEW_ELLIPSIS: &str = "...";
const STATUS_INDICATOR: &str = " ●";
const GUTTER: &str = "│ ";
const COLLAPSE_CONTROL: &str = "└ ▴ collapse";
const CLOSE_GLYPH: &str = "✕";
/// Header cells reserved for the close control: a blank, then the glyph.
const CLOSE_WIDTH: usize = 2;
/// Name cells kept before the status label or indicator is dropped.
const MIN_NAME_WIDTH: usize = 8;

/// Cut `text` to at most `max_lines` lines.
///
/// Text that already fits is returned unchanged. Otherwise the kept lines have
/// trailing whitespace trimmed and `...` appended to the last one.
/// Trailing blank lines hide nothing and are not counted.
pub fn truncate_preview(text: &str, max_lines: usize) -> String {
    let mut lines: Vec<&str> = text.lines().collect();
    while lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }
    if lines.len() <= max_lines {
        return text.to_string();
    }

    let mut truncated = lines[..max_lines].join("\n").trim_end().to_string();
    truncated.push_str(PREVIEW_ELLIPSIS);
    truncated
}

/// The two views of a branch item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchView {
    Collapsed,
    Expanded,
}

/// Part of an item under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchItemHit {
    /// Header row of a toggleable item; activating it toggles the item
    Header,
    /// Close control at the right edge of the header
    Close,
    /// Collapse control at the bottom of an expanded item
    CollapseControl,
}

impl BranchItemHit {
    /// Whether activating this part should flip the collapse state.
    pub fn toggles(self) -> bool {
        matches!(self, BranchItemHit::Header | BranchItemHit::CollapseControl)
    }
}

/// Ephemeral per-item UI state, owned by the caller alongside the item list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BranchItemUiState {
    close_hovered: bool,
}

impl BranchItemUiState {
    pub fn close_hovered(&self) -> bool {
        self.close_hovered
    }

    pub fn set_close_hovered(&mut self, hovered: bool) {
        self.close_hovered = hovered;
    }
}

/// What the header row shows at a given width.
struct HeaderLayout {
    chevron: &'static str,
    name: String,
    indicator: bool,
    label: Option<String>,
    close: bool,
}

/// One agent branch, rendered collapsed or expanded.
#[derive(Debug, Clone)]
pub struct BranchItem<'a> {
    id: String,
    name: String,
    expanded_content: ContentNode,
    prompt: Option<String>,
    is_collapsed: bool,
    is_streaming: bool,
    preview: Option<String>,
    status_label: Option<String>,
    status_color: Option<Color>,
    toggleable: bool,
    closable: bool,
    compact: bool,
    max_collapsed_lines: usize,
    theme: &'a ThemeTokens,
}

impl<'a> BranchItem<'a> {
    pub fn new(id: impl Into<String>, name: impl Into<String>, theme: &'a ThemeTokens) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            expanded_content: ContentNode::Empty,
            prompt: None,
            is_collapsed: true,
            is_streaming: false,
            preview: None,
            status_label: None,
            status_color: None,
            toggleable: false,
            closable: false,
            compact: false,
            max_collapsed_lines: MAX_COLLAPSED_LINES,
            theme,
        }
    }

    pub fn expanded_content(mut self, content: impl Into<ContentNode>) -> Self {
        self.expanded_content = content.into();
        self
    }

    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn collapsed(mut self, is_collapsed: bool) -> Self {
        self.is_collapsed = is_collapsed;
        self
    }

    pub fn streaming(mut self, is_streaming: bool) -> Self {
        self.is_streaming = is_streaming;
        self
    }

    pub fn preview(mut self, preview: impl Into<String>) -> Self {
        self.preview = Some(preview.into());
        self
    }

    /// Status label and indicator color shown in the header
    pub fn status(mut self, label: impl Into<String>, color: Color) -> Self {
        self.status_label = Some(label.into());
        self.status_color = Some(color);
        self
    }

    /// Show the collapse control and report header clicks as toggles
    pub fn toggleable(mut self, toggleable: bool) -> Self {
        self.toggleable = toggleable;
        self
    }

    pub fn closable(mut self, closable: bool) -> Self {
        self.closable = closable;
        self
    }

    /// Drop the status label text (the indicator stays) for narrow columns
    pub fn compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    pub fn max_collapsed_lines(mut self, max_lines: usize) -> Self {
        self.max_collapsed_lines = max_lines;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn view(&self) -> BranchView {
        if self.is_collapsed {
            BranchView::Collapsed
        } else {
            BranchView::Expanded
        }
    }

    pub fn content_shape(&self) -> ContentShape {
        self.expanded_content.shape()
    }

    /// Preview text as it will be shown, or `None` when the row is suppressed.
    pub fn visible_preview(&self) -> Option<String> {
        let preview = self.preview.as_deref()?;
        if preview.trim().is_empty() {
            return None;
        }
        Some(truncate_preview(preview, self.max_collapsed_lines))
    }

    /// Rows the item occupies at `width`.
    pub fn height(&self, width: u16) -> u16 {
        u16::try_from(self.lines(width).len()).unwrap_or(u16::MAX)
    }

    /// The exact lines [`render`](Widget::render) draws at `width`.
    pub fn lines(&self, width: u16) -> Vec<Line<'static>> {
        self.build_lines(width, false)
    }

    /// Which part of the item, rendered into `area`, is at `(column, row)`.
    ///
    /// The header of an item that is not toggleable reports nothing, and
    /// `Close` is only reported on the cell holding the close glyph.
    pub fn hit_test(&self, area: Rect, column: u16, row: u16) -> Option<BranchItemHit> {
        let full_height = self.height(area.width);
        let inside = column >= area.x
            && column < area.right()
            && row >= area.y
            && row < area.y.saturating_add(full_height.min(area.height));
        if !inside {
            return None;
        }

        if row == area.y {
            let header = self.header_layout(usize::from(area.width));
            if header.close && column == area.right() - 1 {
                return Some(BranchItemHit::Close);
            }
            return self.toggleable.then_some(BranchItemHit::Header);
        }

        // Clipped items never expose their collapse control
        let last_row = area.y.saturating_add(full_height - 1);
        if self.view() == BranchView::Expanded && self.toggleable && row == last_row {
            return Some(BranchItemHit::CollapseControl);
        }

        None
    }

    fn build_lines(&self, width: u16, close_hovered: bool) -> Vec<Line<'static>> {
        let width = usize::from(width);
        let body_width = width.saturating_sub(GUTTER.width());
        let mut lines = vec![self.header_line(width, close_hovered)];

        let body: Vec<Vec<Span<'static>>> = match self.view() {
            BranchView::Collapsed => self.preview_rows(body_width),
            BranchView::Expanded => {
                let mut rows = self.prompt_rows(body_width);
                rows.extend(content_rows(
                    &self.expanded_content,
                    body_width,
                    Style::default().fg(self.theme.text_primary),
                    self.theme,
                ));
                rows
            }
        };

        let gutter_style = Style::default().fg(self.theme.border_default);
        for row in body {
            let mut spans = vec![Span::styled(GUTTER, gutter_style)];
            spans.extend(row);
            lines.push(Line::from(spans));
        }

        if self.view() == BranchView::Expanded && self.toggleable {
            lines.push(Line::from(Span::styled(
                truncate_to_width(COLLAPSE_CONTROL, width),
                Style::default().fg(self.theme.text_muted),
            )));
        }

        lines
    }

    /// Decide what fits in the header at `width`. The close glyph always
    /// lands in the last cell; the status label goes first, then the
    /// indicator, before the name shrinks below `MIN_NAME_WIDTH`.
    fn header_layout(&self, width: usize) -> HeaderLayout {
        let chevron = match self.view() {
            BranchView::Collapsed => "▸ ",
            BranchView::Expanded => "▾ ",
        };
        let close = self.closable && width >= chevron.width() + CLOSE_WIDTH;
        let fixed = chevron.width() + if close { CLOSE_WIDTH } else { 0 };
        let name_floor = self.name.width().min(MIN_NAME_WIDTH);

        let has_status = self.status_label.is_some() || self.status_color.is_some();
        let indicator = has_status && fixed + name_floor + STATUS_INDICATOR.width() <= width;
        let label = match (&self.status_label, indicator && !self.compact) {
            (Some(label), true) => {
                let label = format!(" {}", label);
                let needed = fixed + name_floor + STATUS_INDICATOR.width() + label.width();
                (needed <= width).then_some(label)
            }
            _ => None,
        };

        let status_width = if indicator {
            STATUS_INDICATOR.width() + label.as_deref().map_or(0, UnicodeWidthStr::width)
        } else {
            0
        };
        let name_budget = width.saturating_sub(fixed + status_width);

        HeaderLayout {
            chevron,
            name: truncate_to_width(&self.name, name_budget),
            indicator,
            label,
            close,
        }
    }

    fn header_line(&self, width: usize, close_hovered: bool) -> Line<'static> {
        let header = self.header_layout(width);
        let mut used = header.chevron.width() + header.name.width();

        let mut spans = vec![
            Span::styled(header.chevron, Style::default().fg(self.theme.text_muted)),
            Span::styled(
                header.name,
                Style::default()
                    .fg(self.theme.text_bright)
                    .add_modifier(Modifier::BOLD),
            ),
        ];

        if header.indicator {
            let indicator_color = self.status_color.unwrap_or(self.theme.text_muted);
            spans.push(Span::styled(STATUS_INDICATOR, Style::default().fg(indicator_color)));
            used += STATUS_INDICATOR.width();
        }
        if let Some(label) = header.label {
            used += label.width();
            spans.push(Span::styled(label, Style::default().fg(self.theme.text_secondary)));
        }

        if header.close {
            spans.push(Span::raw(" ".repeat(width.saturating_sub(used + 1))));
            let close_style = if close_hovered {
                Style::default()
                    .fg(self.theme.accent_error)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.text_muted)
            };
            spans.push(Span::styled(CLOSE_GLYPH, close_style));
        }

        Line::from(spans)
    }

    fn preview_rows(&self, width: usize) -> Vec<Vec<Span<'static>>> {
        let Some(preview) = self.visible_preview() else {
            return Vec::new();
        };

        let style = if self.is_streaming {
            Style::default().fg(self.theme.accent_primary)
        } else {
            Style::default().fg(self.theme.text_muted)
        };

        preview
            .trim_end()
            .lines()
            .map(|line| vec![Span::styled(truncate_to_width(line, width), style)])
            .collect()
    }

    fn prompt_rows(&self, width: usize) -> Vec<Vec<Span<'static>>> {
        match self.prompt.as_deref() {
            Some(prompt) if !prompt.trim().is_empty() => wrap_text(
                &format!("> {}", prompt.trim()),
                Style::default()
                    .fg(self.theme.text_secondary)
                    .add_modifier(Modifier::ITALIC),
                width,
            ),
            _ => Vec::new(),
        }
    }
}

/// Render a content node into wrapped rows.
///
/// Inline content flows as one paragraph. Block content renders each child on
/// its own, so a child's internal layout is never merged with its siblings.
fn content_rows(
    node: &ContentNode,
    width: usize,
    base: Style,
    theme: &ThemeTokens,
) -> Vec<Vec<Span<'static>>> {
    match node.shape() {
        ContentShape::Empty => Vec::new(),
        ContentShape::InlineText => wrap_multiline(node.inline_spans(base, theme), width),
        ContentShape::Block => node
            .block_children()
            .into_iter()
            .flat_map(|child| content_rows(child, width, base, theme))
            .collect(),
    }
}

impl StatefulWidget for BranchItem<'_> {
    type State = BranchItemUiState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let lines = self.build_lines(area.width, state.close_hovered);
        Paragraph::new(Text::from(lines)).render(area, buf);
    }
}

impl Widget for BranchItem<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut state = BranchItemUiState::default();
        StatefulWidget::render(self, area, buf, &mut state);
    }
}
