//! Color parsing for theme overrides.

use ratatui::style::Color;

/// Parse a hex color string to a Color.
///
/// Supports formats: "#RGB", "#RRGGBB", "#RRGGBBAA" (alpha is ignored).
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.trim().trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }

    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();

    match hex.len() {
        3 => Some(Color::Rgb(
            channel(0..1)? * 17,
            channel(1..2)? * 17,
            channel(2..3)? * 17,
        )),
        6 | 8 => Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
        _ => None,
    }
}
