use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::input::keys;

use super::palette::Palette;
use super::utils::format_duration;

pub fn render_title_bar(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let left_spans = vec![
        Span::styled("battmon ", Style::default().fg(palette.accent)),
        Span::styled(format!("v{}", super::VERSION), Style::default().fg(palette.muted)),
    ];

    let right_text = format!(
        "every {} · health every {} ",
        format_duration(app.fast_interval),
        format_duration(app.slow_interval)
    );

    let left_width: usize = left_spans.iter().map(|s| s.width()).sum();
    let right_width = right_text.chars().count();
    let padding = (area.width as usize).saturating_sub(left_width + right_width);

    let mut spans = left_spans;
    spans.push(Span::raw(" ".repeat(padding)));
    spans.push(Span::styled(right_text, Style::default().fg(palette.muted)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

pub fn render_status_bar(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let hints = [
        (keys::HELP, "help"),
        (keys::REFRESH, "refresh"),
        (keys::QUIT, "quit"),
    ];

    let mut spans: Vec<Span> = vec![Span::raw(" ")];
    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", Style::default().fg(palette.border)));
        }
        spans.push(Span::styled(*key, Style::default().fg(palette.accent)));
        spans.push(Span::styled(format!(" {}", desc), Style::default().fg(palette.muted)));
    }

    let right = match (&app.last_error, &app.snapshot) {
        (Some(error), _) => Span::styled(format!("{error} "), Style::default().fg(palette.danger)),
        (None, Some(snapshot)) => Span::styled(
            format!(
                "updated {} ",
                snapshot.timestamp.with_timezone(&chrono::Local).format("%H:%M:%S")
            ),
            Style::default().fg(palette.muted),
        ),
        (None, None) => Span::raw(""),
    };

    let left_width: usize = spans.iter().map(|s| s.width()).sum();
    let padding = (area.width as usize).saturating_sub(left_width + right.width());
    spans.push(Span::raw(" ".repeat(padding)));
    spans.push(right);

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
