use battmon_platform::{ChargeState, PowerSnapshot};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Padding, Paragraph},
    Frame,
};

use crate::app::App;

use super::palette::Palette;
use super::utils::color_for_percent;

fn state_icon(state: ChargeState) -> &'static str {
    match state {
        ChargeState::Charging => "⚡",
        ChargeState::Discharging => "↓",
        ChargeState::Charged => "✓",
        ChargeState::Unknown => "?",
    }
}

pub fn render(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    snapshot: &PowerSnapshot,
    palette: &Palette,
) {
    let block = Block::default()
        .title(" Battery ")
        .borders(Borders::ALL)
        .border_style(palette.border_style())
        .padding(Padding::horizontal(1))
        .style(Style::default().bg(palette.bg));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 {
        return;
    }

    let info_height = 3.min(inner.height);
    let gauge_height = inner.height.saturating_sub(info_height + 1).clamp(1, 3);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(gauge_height),
            Constraint::Length(1),
            Constraint::Length(info_height),
            Constraint::Min(0),
        ])
        .split(inner);

    let percent = snapshot.charge_percent;
    let gauge = Gauge::default()
        .gauge_style(
            Style::default()
                .fg(color_for_percent(percent, 50, app.low_battery_percent, palette))
                .bg(palette.border),
        )
        .ratio((f64::from(percent) / 100.0).clamp(0.0, 1.0))
        .label(format!("{}%", percent))
        .use_unicode(true);
    frame.render_widget(gauge, chunks[0]);

    let label = Style::default().fg(palette.muted);
    let state_color = if snapshot.state.is_charging() {
        palette.success
    } else {
        palette.fg
    };
    let mut lines = vec![
        Line::from(Span::styled(
            format!("{} {}", state_icon(snapshot.state), snapshot.state),
            Style::default().fg(state_color).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("Time  ", label),
            Span::styled(snapshot.time_remaining.to_string(), Style::default().fg(palette.fg)),
        ]),
    ];

    if app.is_low() {
        lines.push(Line::from(Span::styled(
            "Low battery",
            Style::default().fg(palette.danger).add_modifier(Modifier::BOLD),
        )));
    }

    frame.render_widget(Paragraph::new(lines), chunks[2]);
}
