//! Width-aware wrapping and truncation shared by grid widgets.

use ratatui::{style::Style, text::Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: &str = "...";

/// Fit `s` into `max_width` display columns, marking a cut with "...".
///
/// When even the ellipsis does not fit, the bare prefix is returned.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    match max_width.checked_sub(ELLIPSIS.width()) {
        Some(budget) if budget > 0 => format!("{}{}", prefix_within(s, budget), ELLIPSIS),
        _ => prefix_within(s, max_width).to_string(),
    }
}

/// Longest prefix of `s` no wider than `max_width`.
fn prefix_within(s: &str, max_width: usize) -> &str {
    let mut used = 0;
    let cut = s.char_indices().find_map(|(at, ch)| {
        used += ch.width().unwrap_or(0);
        (used > max_width).then_some(at)
    });
    &s[..cut.unwrap_or(s.len())]
}

type Cell = (char, Style);

fn cells_width(cells: &[Cell]) -> usize {
    cells.iter().map(|(ch, _)| ch.width().unwrap_or(0)).sum()
}

/// Word-wrap styled spans to `max_width` display columns.
///
/// Words move whole to the next line; a word wider than a line is split.
/// Whitespace at either edge of a wrapped line is dropped, as are control
/// characters. Always returns at least one (possibly empty) line.
pub fn wrap_spans(spans: Vec<Span<'static>>, max_width: usize) -> Vec<Vec<Span<'static>>> {
    let cells: Vec<Cell> = spans
        .iter()
        .flat_map(|span| span.content.chars().map(move |ch| (ch, span.style)))
        .filter(|(ch, _)| !ch.is_control())
        .collect();
    if cells.is_empty() || max_width == 0 {
        return vec![Vec::new()];
    }

    let mut lines: Vec<Vec<Cell>> = Vec::new();
    let mut line: Vec<Cell> = Vec::new();
    let mut used = 0;

    for token in cells.chunk_by(|a, b| a.0.is_whitespace() == b.0.is_whitespace()) {
        let blank = token[0].0.is_whitespace();
        let width = cells_width(token);

        if blank {
            if line.is_empty() && !lines.is_empty() {
                continue;
            }
            if used + width > max_width {
                if !line.is_empty() {
                    lines.push(std::mem::take(&mut line));
                    used = 0;
                }
                continue;
            }
            line.extend_from_slice(token);
            used += width;
            continue;
        }

        if used + width > max_width && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
            used = 0;
        }
        for &cell in token {
            let cell_width = cell.0.width().unwrap_or(0);
            if used + cell_width > max_width && !line.is_empty() {
                lines.push(std::mem::take(&mut line));
                used = 0;
            }
            line.push(cell);
            used += cell_width;
        }
    }
    lines.push(line);

    lines
        .into_iter()
        .map(|mut line| {
            while line.last().is_some_and(|(ch, _)| ch.is_whitespace()) {
                line.pop();
            }
            style_runs(&line)
        })
        .collect()
}

/// Wrap plain text with a single style, honoring embedded newlines.
pub fn wrap_text(text: &str, style: Style, max_width: usize) -> Vec<Vec<Span<'static>>> {
    wrap_multiline(vec![Span::styled(text.to_string(), style)], max_width)
}

/// Like [`wrap_spans`], but a `'\n'` inside any span starts a new line.
pub fn wrap_multiline(spans: Vec<Span<'static>>, max_width: usize) -> Vec<Vec<Span<'static>>> {
    let mut paragraphs: Vec<Vec<Span<'static>>> = vec![Vec::new()];
    for span in spans {
        let style = span.style;
        for (i, piece) in span.content.split('\n').enumerate() {
            if i > 0 {
                paragraphs.push(Vec::new());
            }
            if !piece.is_empty() {
                if let Some(current) = paragraphs.last_mut() {
                    current.push(Span::styled(piece.to_string(), style));
                }
            }
        }
    }

    paragraphs
        .into_iter()
        .flat_map(|paragraph| wrap_spans(paragraph, max_width))
        .collect()
}

/// Merge neighbouring cells that share a style into one span each.
fn style_runs(cells: &[Cell]) -> Vec<Span<'static>> {
    cells
        .chunk_by(|a, b| a.1 == b.1)
        .map(|run| Span::styled(run.iter().map(|(ch, _)| *ch).collect::<String>(), run[0].1))
        .collect()
}
