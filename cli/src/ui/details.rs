use battmon_platform::{PowerSnapshot, NOT_AVAILABLE};
use chrono::Utc;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

use super::palette::Palette;
use super::utils::format_age;

const LABEL_WIDTH: usize = 16;

fn row<'a>(label: &'a str, value: String, palette: &Palette) -> Line<'a> {
    let value_style = if value == NOT_AVAILABLE {
        Style::default().fg(palette.muted)
    } else {
        Style::default().fg(palette.fg)
    };
    Line::from(vec![
        Span::styled(format!("{:<LABEL_WIDTH$}", label), Style::default().fg(palette.muted)),
        Span::styled(value, value_style),
    ])
}

fn with_unit<T: std::fmt::Display>(value: Option<T>, unit: &str) -> String {
    value
        .map(|v| format!("{v} {unit}"))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

pub fn render(frame: &mut Frame, area: Rect, snapshot: &PowerSnapshot, palette: &Palette) {
    let block = Block::default()
        .title(" Health ")
        .borders(Borders::ALL)
        .border_style(palette.border_style())
        .padding(Padding::horizontal(1))
        .style(Style::default().bg(palette.bg));

    let temperature = snapshot
        .temperature_c
        .map(|t| format!("{t:.1} °C"))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    let lines = vec![
        row("Condition", snapshot.condition_label().to_string(), palette),
        row("Max capacity", snapshot.max_capacity_label().to_string(), palette),
        row("Cycle count", snapshot.cycles().to_string(), palette),
        row("Charger", snapshot.charger_name_label().to_string(), palette),
        row(
            "Charger rating",
            with_unit(snapshot.charger_wattage.as_deref(), "W"),
            palette,
        ),
        row("Adapter draw", with_unit(snapshot.wattage, "W"), palette),
        row("Temperature", temperature, palette),
        row("Serial", snapshot.serial_label().to_string(), palette),
        row(
            "Health updated",
            format_age(snapshot.health_updated_at, Utc::now()),
            palette,
        ),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
