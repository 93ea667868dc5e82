//! Theme tokens for the agent grid.
//!
//! Widgets take a `&ThemeTokens` instead of reading a process-wide theme, so
//! two grids can render with different palettes and tests never share state.

mod colors;

use ratatui::style::Color;

pub use colors::parse_hex_color;

/// Semantic colors used by the grid and its branch items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeTokens {
    /// Theme display name
    pub name: String,
    /// Whether this is a light theme
    pub is_light: bool,

    /// Brightest text - item names
    pub text_bright: Color,
    /// Main content text
    pub text_primary: Color,
    /// Prompts, finished previews
    pub text_secondary: Color,
    /// Hints, idle controls
    pub text_muted: Color,
    /// Gutters and separators
    pub text_faint: Color,

    /// Focus, live previews, collapse control
    pub accent_primary: Color,
    pub accent_success: Color,
    pub accent_warning: Color,
    pub accent_error: Color,

    /// Item gutter
    pub border_default: Color,
}

impl Default for ThemeTokens {
    fn default() -> Self {
        Self::default_dark()
    }
}

impl ThemeTokens {
    pub fn default_dark() -> Self {
        Self {
            name: "default-dark".to_string(),
            is_light: false,
            text_bright: Color::Rgb(250, 250, 255),
            text_primary: Color::Rgb(220, 220, 230),
            text_secondary: Color::Rgb(160, 160, 180),
            text_muted: Color::Rgb(100, 100, 120),
            text_faint: Color::Rgb(70, 70, 85),
            accent_primary: Color::Rgb(130, 170, 255),
            accent_success: Color::Rgb(130, 200, 140),
            accent_warning: Color::Rgb(230, 180, 100),
            accent_error: Color::Rgb(230, 120, 120),
            border_default: Color::Rgb(50, 50, 65),
        }
    }

    pub fn default_light() -> Self {
        Self {
            name: "default-light".to_string(),
            is_light: true,
            text_bright: Color::Rgb(15, 15, 20),
            text_primary: Color::Rgb(35, 35, 45),
            text_secondary: Color::Rgb(90, 90, 105),
            text_muted: Color::Rgb(140, 140, 155),
            text_faint: Color::Rgb(180, 180, 190),
            accent_primary: Color::Rgb(60, 120, 220),
            accent_success: Color::Rgb(40, 160, 60),
            accent_warning: Color::Rgb(200, 140, 30),
            accent_error: Color::Rgb(200, 60, 60),
            border_default: Color::Rgb(210, 215, 225),
        }
    }

    /// Look up a built-in theme by name.
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "default" | "default-dark" | "dark" => Some(Self::default_dark()),
            "default-light" | "light" => Some(Self::default_light()),
            _ => None,
        }
    }

    /// Names accepted by [`ThemeTokens::by_name`] (canonical forms only).
    pub fn builtin_names() -> &'static [&'static str] {
        &["default-dark", "default-light"]
    }

    /// Set a single token by its config key. Returns `false` for unknown keys.
    pub fn set_token(&mut self, key: &str, color: Color) -> bool {
        let slot = match key {
            "text_bright" => &mut self.text_bright,
            "text_primary" => &mut self.text_primary,
            "text_secondary" => &mut self.text_secondary,
            "text_muted" => &mut self.text_muted,
            "text_faint" => &mut self.text_faint,
            "accent_primary" => &mut self.accent_primary,
            "accent_success" => &mut self.accent_success,
            "accent_warning" => &mut self.accent_warning,
            "accent_error" => &mut self.accent_error,
            "border_default" => &mut self.border_default,
            _ => return false,
        };
        *slot = color;
        true
    }
}
