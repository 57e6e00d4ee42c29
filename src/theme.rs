use anstyle::{AnsiColor, Color, Effects, RgbColor, Style};

pub const ACCENT_RGB: (u8, u8, u8) = (207, 106, 76);

pub const ACCENT: Style = Style::new().fg_color(Some(Color::Rgb(RgbColor(
    ACCENT_RGB.0,
    ACCENT_RGB.1,
    ACCENT_RGB.2,
))));
pub const HEADING: Style = Style::new().effects(Effects::BOLD);
pub const DIM: Style = Style::new().effects(Effects::DIMMED);
pub const WARNING: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow)));
pub const FAILURE: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red)));

/// Applies styles only when the output is a terminal
#[derive(Debug, Clone, Copy, Default)]
pub struct Palette {
    color: bool,
}

impl Palette {
    #[must_use]
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    #[must_use]
    pub fn plain() -> Self {
        Self { color: false }
    }

    #[must_use]
    pub fn paint(&self, style: Style, s: &str) -> String {
        if self.color {
            format!("{style}{s}{style:#}")
        } else {
            s.to_string()
        }
    }
}
