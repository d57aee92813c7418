use ratatui::style::Color;

/// Midnight theme colors
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub accent: Color,
    pub dimmed: Color,
    pub correct: Color,
    pub incorrect: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::midnight()
    }
}

impl Theme {
    pub fn midnight() -> Self {
        Self {
            background: Color::Rgb(26, 27, 38),   // #1A1B26 Stormy Dark
            surface: Color::Rgb(36, 40, 59),      // #24283B Storm Surface
            text: Color::Rgb(169, 177, 214),      // #A9B1D6 Light Blue
            accent: Color::Rgb(224, 175, 104),    // #E0AF68 Amber
            dimmed: Color::Rgb(100, 110, 150),    // #646E96 Dimmed Blue
            correct: Color::Rgb(158, 206, 106),   // #9ECE6A Green
            incorrect: Color::Rgb(247, 118, 142), // #F7768E Coral Red
        }
    }

    /// Default theme is midnight
    pub fn current() -> Self {
        Self::midnight()
    }
}

/// Convenience access to current theme colors
pub mod colors {
    use super::Theme;
    use ratatui::style::Color;

    pub fn background() -> Color {
        Theme::current().background
    }
    pub fn surface() -> Color {
        Theme::current().surface
    }
    pub fn text() -> Color {
        Theme::current().text
    }
    pub fn accent() -> Color {
        Theme::current().accent
    }
    pub fn dimmed() -> Color {
        Theme::current().dimmed
    }
    pub fn correct() -> Color {
        Theme::current().correct
    }
    pub fn incorrect() -> Color {
        Theme::current().incorrect
    }
}
