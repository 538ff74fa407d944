mod battery;
mod details;
mod help;
mod palette;
mod status_bar;
mod utils;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, AppView};

pub use palette::{Palette, PALETTE};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn render(frame: &mut Frame, app: &App) {
    let palette = &PALETTE;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    status_bar::render_title_bar(frame, chunks[0], app, palette);
    render_body(frame, chunks[1], app, palette);
    status_bar::render_status_bar(frame, chunks[2], app, palette);

    if app.view == AppView::Help {
        help::render_help(frame, palette);
    }
}

fn render_body(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let Some(snapshot) = app.snapshot.as_deref() else {
        let message = if app.last_error.is_some() {
            "No battery reading yet"
        } else {
            "Reading battery…"
        };
        let waiting = Paragraph::new(message)
            .style(Style::default().fg(palette.muted))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(palette.border_style()),
            );
        frame.render_widget(waiting, area);
        return;
    };

    let direction = if area.width >= 80 {
        Direction::Horizontal
    } else {
        Direction::Vertical
    };
    let panels = Layout::default()
        .direction(direction)
        .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(area);

    battery::render(frame, panels[0], app, snapshot, palette);
    details::render(frame, panels[1], snapshot, palette);
}
