//! TUI testing utilities using Ratatui's TestBackend
//!
//! Renders widgets into a test buffer and reads rows back as strings.

use ratatui::{backend::TestBackend, buffer::Buffer, layout::Rect, Terminal};

/// Create a test terminal with custom dimensions
pub fn create_test_terminal_sized(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).expect("Failed to create test terminal")
}

/// One buffer row as a string, trailing whitespace trimmed
pub fn row_text(buffer: &Buffer, y: u16) -> String {
    buffer_region_to_string(buffer, Rect::new(buffer.area.x, y, buffer.area.width, 1))
        .trim_end()
        .to_string()
}

/// Every row of the buffer, trailing whitespace trimmed
pub fn buffer_rows(buffer: &Buffer) -> Vec<String> {
    let area = buffer.area;
    (area.y..area.bottom()).map(|y| row_text(buffer, y)).collect()
}

/// Extract a specific region of the buffer as a string
pub fn buffer_region_to_string(buffer: &Buffer, area: Rect) -> String {
    let mut lines = Vec::new();
    for y in area.y..area.bottom() {
        let mut line = String::new();
        for x in area.x..area.right() {
            if let Some(cell) = buffer.cell((x, y)) {
                line.push_str(cell.symbol());
            }
        }
        lines.push(line);
    }
    lines.join("\n")
}

/// Check if the buffer contains a string anywhere
pub fn buffer_contains(buffer: &Buffer, text: &str) -> bool {
    buffer_rows(buffer).iter().any(|row| row.contains(text))
}

/// Get the character at a specific position
pub fn char_at(buffer: &Buffer, x: u16, y: u16) -> Option<&str> {
    buffer.cell((x, y)).map(|cell| cell.symbol())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::Paragraph;

    #[test]
    fn test_row_helpers() {
        let mut terminal = create_test_terminal_sized(12, 3);
        terminal
            .draw(|f| f.render_widget(Paragraph::new("ABC\nsecond"), f.area()))
            .unwrap();

        let buffer = terminal.backend().buffer();
        assert_eq!(row_text(buffer, 0), "ABC");
        assert_eq!(buffer_rows(buffer), vec!["ABC", "second", ""]);
        assert!(buffer_contains(buffer, "cond"));
        assert_eq!(char_at(buffer, 1, 0), Some("B"));
        assert_eq!(
            buffer_region_to_string(buffer, Rect::new(0, 0, 3, 2)),
            "ABC\nsec"
        );
    }
}
