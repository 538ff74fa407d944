use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph},
    Frame,
};

use crate::input::keys;

use super::palette::Palette;
use super::utils::centered_rect;

const KEY_BINDINGS: &[(&str, &str)] = &[
    (keys::REFRESH, "Refresh now"),
    (keys::HELP, "Toggle this help"),
    (keys::QUIT, "Quit"),
    (keys::ESC, "Close help / quit"),
];

pub fn render_help(frame: &mut Frame, palette: &Palette) {
    let area = centered_rect(frame.area(), 44, KEY_BINDINGS.len() as u16 + 6);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent))
        .padding(Padding::uniform(1));

    let mut lines = vec![
        Line::from(Span::styled(
            "battmon - Battery Monitor",
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
    ];
    lines.extend(KEY_BINDINGS.iter().map(|(key, desc)| {
        Line::from(vec![
            Span::styled(format!("{:<6}", key), Style::default().fg(palette.accent)),
            Span::styled(*desc, Style::default().fg(palette.fg)),
        ])
    }));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
