use crate::storage::Theme;
use ratatui::style::Color;

/// Colours for one theme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub accent: Color,
    pub dimmed: Color,
    pub error: Color,
}

impl Palette {
    /// Light theme: dark ink on paper.
    pub fn light() -> Self {
        Self {
            background: Color::Rgb(250, 248, 242), // #FAF8F2 Paper
            surface: Color::Rgb(234, 231, 222),    // #EAE7DE Linen
            text: Color::Rgb(40, 42, 54),          // #282A36 Ink
            accent: Color::Rgb(0, 102, 204),       // #0066CC Blue
            dimmed: Color::Rgb(140, 140, 150),     // #8C8C96 Grey
            error: Color::Rgb(190, 40, 40),        // #BE2828 Red
        }
    }

    /// Dark theme: light text on a stormy background.
    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(26, 27, 38), // #1A1B26 Stormy Dark
            surface: Color::Rgb(36, 40, 59),    // #24283B Night
            text: Color::Rgb(169, 177, 214),    // #A9B1D6 Light Blue
            accent: Color::Rgb(247, 118, 142),  // #F7768E Coral Red
            dimmed: Color::Rgb(100, 110, 150),  // #646E96 Dimmed Blue
            error: Color::Rgb(255, 158, 100),   // #FF9E64 Orange
        }
    }

    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self::light(),
            Theme::Dark => Self::dark(),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette::for_theme(Theme::default())
    }
}
