use std::time::Duration;

use chrono::{DateTime, Utc};
use ratatui::{layout::Rect, style::Color};

use super::palette::Palette;

/// Center a fixed-size rectangle within an area (clamped to fit).
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Success above `high`, danger at or below `low`, warning in between.
pub fn color_for_percent(percent: u32, high: u32, low: u32, palette: &Palette) -> Color {
    if percent <= low {
        palette.danger
    } else if percent > high {
        palette.success
    } else {
        palette.warning
    }
}

/// Format a duration to whole seconds (e.g. "2m 5s", "1h").
pub fn format_duration(duration: Duration) -> String {
    humantime::format_duration(Duration::from_secs(duration.as_secs())).to_string()
}

/// "3m 20s ago", or "never" when there is no timestamp.
pub fn format_age(at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    match at {
        None => "never".to_string(),
        Some(at) => {
            let age = (now - at).to_std().unwrap_or_default();
            if age.as_secs() == 0 {
                "just now".to_string()
            } else {
                format!("{} ago", format_duration(age))
            }
        }
    }
}
