use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use battmon_platform::SystemCommand;
use color_eyre::eyre::Result;
use tokio::sync::mpsc;
use tracing::warn;

use crate::config::{UserConfig, MIN_FAST_INTERVAL_MS};
use crate::data::{Cadence, MonitorEvent, Scheduler};

pub async fn run(
    config: &UserConfig,
    samples: u32,
    interval: Option<u64>,
    compact: bool,
) -> Result<()> {
    let mut cadence = Cadence::from(config);
    if let Some(ms) = interval {
        cadence.fast = Duration::from_millis(ms.max(MIN_FAST_INTERVAL_MS));
    }

    let runner = Arc::new(SystemCommand::new(config.command_timeout()));
    let scheduler = Scheduler::new(runner, cadence);
    // Held so the scheduler keeps running.
    let (_request_tx, request_rx) = mpsc::channel(1);
    let (event_tx, mut event_rx) = mpsc::channel(8);
    let task = tokio::spawn(scheduler.run(request_rx, event_tx));

    let mut stdout = io::stdout();
    let mut written = 0u32;
    while let Some(event) = event_rx.recv().await {
        if write_event(&mut stdout, &event, compact)? {
            written += 1;
            if samples > 0 && written >= samples {
                break;
            }
        }
    }

    task.abort();
    Ok(())
}

/// Print a snapshot as JSON. Errors go to the log and stderr and return
/// `false`, so they don't count towards `--samples`.
fn write_event<W: Write>(out: &mut W, event: &MonitorEvent, compact: bool) -> Result<bool> {
    match event {
        MonitorEvent::Snapshot(snapshot) => {
            let json = if compact {
                serde_json::to_string(&**snapshot)?
            } else {
                serde_json::to_string_pretty(&**snapshot)?
            };
            writeln!(out, "{json}")?;
            out.flush()?;
            Ok(true)
        }
        MonitorEvent::Error(message) => {
            warn!(error = %message, "Sample failed");
            eprintln!("error: {message}");
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battmon_platform::{BatteryReading, ChargeState, HealthReading, PowerSnapshot};

    fn snapshot_event() -> MonitorEvent {
        let battery = BatteryReading {
            charge_percent: 61,
            state: ChargeState::Discharging,
            ..Default::default()
        };
        MonitorEvent::Snapshot(Arc::new(PowerSnapshot::merge(
            &battery,
            &HealthReading::default(),
            None,
        )))
    }

    #[test]
    fn test_snapshot_is_written_and_counted() {
        let mut out = Vec::new();
        assert!(write_event(&mut out, &snapshot_event(), true).unwrap());

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1);
        let value: serde_json::Value = serde_json::from_str(text.trim()).unwrap();
        assert_eq!(value["charge_percent"], 61);
        assert_eq!(value["state"], "discharging");
    }

    #[test]
    fn test_pretty_output_spans_lines() {
        let mut out = Vec::new();
        assert!(write_event(&mut out, &snapshot_event(), false).unwrap());
        assert!(String::from_utf8(out).unwrap().lines().count() > 1);
    }

    #[test]
    fn test_error_is_not_counted() {
        let mut out = Vec::new();
        let event = MonitorEvent::Error("`ioreg` timed out".into());
        assert!(!write_event(&mut out, &event, true).unwrap());
        assert!(out.is_empty());
    }
}
