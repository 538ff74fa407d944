use std::sync::Arc;
use std::time::{Duration, Instant};

use battmon_platform::{BatteryProbe, CommandRunner, HealthProbe, PowerSnapshot};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use super::health_cache::{CachedHealth, HealthCache};
use crate::config::UserConfig;

/// Output of the scheduler, one per fast tick or manual refresh.
#[derive(Debug, Clone)]
pub enum MonitorEvent {
    Snapshot(Arc<PowerSnapshot>),
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorRequest {
    Refresh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    pub fast: Duration,
    pub slow: Duration,
}

impl From<&UserConfig> for Cadence {
    fn from(config: &UserConfig) -> Self {
        Self {
            fast: config.fast_interval(),
            slow: config.slow_interval(),
        }
    }
}

/// Drives the fast probe and the health cache on their own cadences.
pub struct Scheduler<R> {
    battery: BatteryProbe<R>,
    health: HealthCache<R>,
    cadence: Cadence,
}

impl<R: CommandRunner> Scheduler<R> {
    pub fn new(runner: Arc<R>, cadence: Cadence) -> Self {
        Self {
            battery: BatteryProbe::new(runner.clone()),
            health: HealthCache::new(HealthProbe::new(runner)),
            cadence,
        }
    }

    #[cfg(test)]
    pub fn health(&self) -> &HealthCache<R> {
        &self.health
    }

    /// Sample the battery and merge it with the cached health reading.
    ///
    /// A failed sample becomes an error event and leaves the cache alone.
    pub async fn fast_tick(&self) -> MonitorEvent {
        let started = Instant::now();

        let battery = match self.battery.sample().await {
            Ok(battery) => battery,
            Err(e) => {
                warn!(error = %e, "Battery sample failed");
                return MonitorEvent::Error(e.to_string());
            }
        };

        let health = match self.health.read().await {
            Ok(health) => health,
            Err(e) => {
                warn!(error = %e, "Initial health fetch failed");
                CachedHealth::empty()
            }
        };

        let snapshot = PowerSnapshot::merge(&battery, &health.reading, health.fetched_at);
        debug!(
            percent = snapshot.charge_percent,
            state = %snapshot.state,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Fast tick"
        );

        MonitorEvent::Snapshot(Arc::new(snapshot))
    }

    /// Refresh the health cache. Failures are logged and the stale reading
    /// stays in place.
    pub async fn slow_tick(&self) {
        let started = Instant::now();
        match self.health.refresh().await {
            Ok(()) => debug!(
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Health cache refreshed"
            ),
            Err(e) => {
                let cached_at = self.health.peek().await.and_then(|c| c.fetched_at);
                warn!(error = %e, ?cached_at, "Health refresh failed, keeping cached reading");
            }
        }
    }

    /// Run until the request channel closes or the event receiver is dropped.
    ///
    /// The fast tick fires immediately; the first slow tick comes one slow
    /// period later since the first fast tick already fills the cache.
    pub async fn run(
        self,
        mut requests: mpsc::Receiver<MonitorRequest>,
        events: mpsc::Sender<MonitorEvent>,
    ) {
        info!(
            fast_ms = self.cadence.fast.as_millis() as u64,
            slow_secs = self.cadence.slow.as_secs(),
            "Scheduler starting"
        );

        let mut fast_tick = tokio::time::interval(self.cadence.fast);
        let mut slow_tick = tokio::time::interval_at(
            tokio::time::Instant::now() + self.cadence.slow,
            self.cadence.slow,
        );
        fast_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        slow_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            let event = tokio::select! {
                _ = fast_tick.tick() => Some(self.fast_tick().await),
                _ = slow_tick.tick() => {
                    self.slow_tick().await;
                    None
                }
                request = requests.recv() => match request {
                    Some(MonitorRequest::Refresh) => {
                        debug!("Manual refresh requested");
                        Some(self.fast_tick().await)
                    }
                    None => break,
                },
            };

            if let Some(event) = event {
                if events.send(event).await.is_err() {
                    debug!("Event receiver dropped");
                    break;
                }
            }
        }

        info!("Scheduler stopped");
    }
}
