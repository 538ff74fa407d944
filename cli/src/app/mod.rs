//! Application state for the TUI.
//!
//! The [`App`] holds the last snapshot the scheduler delivered and turns key
//! actions into scheduler requests. It never probes anything itself.

mod tui;
pub mod types;

pub use tui::run_tui;
pub use types::{Action, AppView};

use std::sync::Arc;
use std::time::Duration;

use battmon_platform::{ChargeState, PowerSnapshot};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::config::UserConfig;
use crate::data::{MonitorEvent, MonitorRequest};

pub struct App {
    pub view: AppView,
    /// Last good snapshot. Kept when an error arrives.
    pub snapshot: Option<Arc<PowerSnapshot>>,
    pub last_error: Option<String>,
    pub low_battery_percent: u32,
    pub fast_interval: Duration,
    pub slow_interval: Duration,
    requests: mpsc::Sender<MonitorRequest>,
}

impl App {
    pub fn new(config: &UserConfig, requests: mpsc::Sender<MonitorRequest>) -> Self {
        Self {
            view: AppView::Main,
            snapshot: None,
            last_error: None,
            low_battery_percent: config.low_battery_percent,
            fast_interval: config.fast_interval(),
            slow_interval: config.slow_interval(),
            requests,
        }
    }

    pub fn apply(&mut self, event: MonitorEvent) {
        match event {
            MonitorEvent::Snapshot(snapshot) => {
                self.snapshot = Some(snapshot);
                self.last_error = None;
            }
            MonitorEvent::Error(message) => {
                self.last_error = Some(message);
            }
        }
    }

    pub fn is_low(&self) -> bool {
        self.snapshot.as_ref().is_some_and(|s| {
            s.state == ChargeState::Discharging && s.charge_percent <= self.low_battery_percent
        })
    }

    /// Handle an action; returns `false` when the app should exit.
    pub fn handle_action(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return false,
            Action::Refresh => self.request_refresh(),
            Action::ToggleHelp => {
                self.view = match self.view {
                    AppView::Main => AppView::Help,
                    AppView::Help => AppView::Main,
                };
            }
            Action::None => {}
        }
        true
    }

    fn request_refresh(&self) {
        // A full queue already has a refresh pending.
        match self.requests.try_send(MonitorRequest::Refresh) {
            Ok(()) => debug!("Refresh requested"),
            Err(mpsc::error::TrySendError::Full(_)) => {}
            Err(mpsc::error::TrySendError::Closed(_)) => warn!("Scheduler is gone"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battmon_platform::{BatteryReading, HealthReading};

    fn snapshot(percent: u32, state: ChargeState) -> Arc<PowerSnapshot> {
        let battery = BatteryReading {
            charge_percent: percent,
            state,
            ..Default::default()
        };
        Arc::new(PowerSnapshot::merge(&battery, &HealthReading::default(), None))
    }

    fn app() -> (App, mpsc::Receiver<MonitorRequest>) {
        let (tx, rx) = mpsc::channel(1);
        (App::new(&UserConfig::default(), tx), rx)
    }

    #[test]
    fn test_error_keeps_last_snapshot() {
        let (mut app, _rx) = app();
        app.apply(MonitorEvent::Snapshot(snapshot(80, ChargeState::Discharging)));
        app.apply(MonitorEvent::Error("`ioreg` timed out".into()));

        assert_eq!(app.snapshot.as_ref().map(|s| s.charge_percent), Some(80));
        assert_eq!(app.last_error.as_deref(), Some("`ioreg` timed out"));

        app.apply(MonitorEvent::Snapshot(snapshot(79, ChargeState::Discharging)));
        assert!(app.last_error.is_none());
        assert_eq!(app.snapshot.as_ref().map(|s| s.charge_percent), Some(79));
    }

    #[test]
    fn test_refresh_sends_request() {
        let (mut app, mut rx) = app();
        assert!(app.handle_action(Action::Refresh));
        assert_eq!(rx.try_recv().ok(), Some(MonitorRequest::Refresh));

        // Second refresh while one is queued is dropped.
        assert!(app.handle_action(Action::Refresh));
        assert!(app.handle_action(Action::Refresh));
        assert_eq!(rx.try_recv().ok(), Some(MonitorRequest::Refresh));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_quit_and_help() {
        let (mut app, _rx) = app();
        assert!(app.handle_action(Action::ToggleHelp));
        assert_eq!(app.view, AppView::Help);
        assert!(app.handle_action(Action::ToggleHelp));
        assert_eq!(app.view, AppView::Main);
        assert!(!app.handle_action(Action::Quit));
    }

    #[test]
    fn test_low_battery_only_when_discharging() {
        let (mut app, _rx) = app();
        assert!(!app.is_low());

        app.apply(MonitorEvent::Snapshot(snapshot(15, ChargeState::Discharging)));
        assert!(app.is_low());

        app.apply(MonitorEvent::Snapshot(snapshot(15, ChargeState::Charging)));
        assert!(!app.is_low());

        app.apply(MonitorEvent::Snapshot(snapshot(21, ChargeState::Discharging)));
        assert!(!app.is_low());
    }
}
