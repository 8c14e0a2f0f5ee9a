//! Theme system

use ratatui::prelude::*;

/// Application theme
#[derive(Debug, Clone)]
pub struct Theme {
    /// Border color for the focused input slot
    pub focus_border: Color,
    /// Border color for unfocused elements
    pub unfocus_border: Color,
    /// Error banner color
    pub error: Color,
    /// Success/status color
    pub success: Color,
    /// Stats highlight color
    pub accent: Color,
    /// Placeholder text color
    pub placeholder: Color,
    /// Disabled action hint color
    pub disabled: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            focus_border: Color::Cyan,
            unfocus_border: Color::DarkGray,
            error: Color::Red,
            success: Color::Green,
            accent: Color::Blue,
            placeholder: Color::DarkGray,
            disabled: Color::DarkGray,
        }
    }
}
