use ratatui::style::{Color, Style};

/// Fixed colour set for the UI.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    pub border: Color,
    pub accent: Color,
    pub success: Color,
    pub warning: Color,
    pub danger: Color,
}

pub const PALETTE: Palette = Palette {
    bg: Color::Reset,
    fg: Color::Rgb(0xDD, 0xDD, 0xDD),
    muted: Color::Rgb(0x8A, 0x8A, 0x8A),
    border: Color::Rgb(0x38, 0x38, 0x38),
    accent: Color::Rgb(0x7D, 0x56, 0xF4),
    success: Color::Rgb(0x73, 0xF5, 0x9F),
    warning: Color::Rgb(0xF5, 0xC2, 0x53),
    danger: Color::Rgb(0xF5, 0x53, 0x85),
};

impl Palette {
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }
}
