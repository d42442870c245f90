// Semantic colors for the TUI widgets

use ratatui::style::Color;
use ratatui::widgets::BorderType;

/// Semantic color assignments for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,
    pub border: Color,
    pub border_type: BorderType,
    pub highlight: Color,
    pub title: Color,

    // Outcome colors
    pub success: Color,
    pub error: Color,

    // Data series colors
    pub consumed: Color,
    pub burned: Color,
    pub proteins: Color,
    pub carbs: Color,
    pub fats: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::Reset,
            foreground: Color::White,
            muted: Color::DarkGray,
            border: Color::DarkGray,
            border_type: BorderType::Rounded,
            highlight: Color::Cyan,
            title: Color::Cyan,
            success: Color::Green,
            error: Color::Red,
            consumed: Color::LightRed,
            burned: Color::Cyan,
            proteins: Color::Cyan,
            carbs: Color::LightBlue,
            fats: Color::LightGreen,
        }
    }
}
