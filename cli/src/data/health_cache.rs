use std::sync::Arc;

use battmon_platform::{CommandRunner, HealthProbe, HealthReading, ProbeError};
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, trace};

/// A health reading plus when it was fetched.
#[derive(Debug, Clone)]
pub struct CachedHealth {
    pub reading: Arc<HealthReading>,
    /// `None` until a fetch has succeeded.
    pub fetched_at: Option<DateTime<Utc>>,
}

impl CachedHealth {
    pub fn empty() -> Self {
        Self {
            reading: Arc::new(HealthReading::default()),
            fetched_at: None,
        }
    }
}

#[derive(Debug, Default)]
enum Slot {
    #[default]
    Cold,
    /// Nothing cached and the first fetch failed; the next `refresh` retries.
    ColdFailed,
    Warm(CachedHealth),
}

/// Holds the most recent slow-probe result.
///
/// Entries never expire. A failed refresh keeps serving the previous reading.
pub struct HealthCache<R> {
    probe: HealthProbe<R>,
    slot: Mutex<Slot>,
}

impl<R: CommandRunner> HealthCache<R> {
    pub fn new(probe: HealthProbe<R>) -> Self {
        Self {
            probe,
            slot: Mutex::new(Slot::Cold),
        }
    }

    /// Return the cached reading, fetching one first on a cold start.
    ///
    /// Only the cold-start fetch can fail. After a failed cold start this
    /// returns an empty reading until a `refresh` succeeds.
    pub async fn read(&self) -> Result<CachedHealth, ProbeError> {
        let mut slot = self.slot.lock().await;

        match &*slot {
            Slot::Warm(cached) => {
                trace!("Health cache hit");
                return Ok(cached.clone());
            }
            Slot::ColdFailed => return Ok(CachedHealth::empty()),
            Slot::Cold => {}
        }

        debug!("Health cache cold, fetching");
        match self.probe.sample().await {
            Ok(reading) => {
                let cached = warm(reading);
                *slot = Slot::Warm(cached.clone());
                Ok(cached)
            }
            Err(e) => {
                *slot = Slot::ColdFailed;
                Err(e)
            }
        }
    }

    /// Fetch a new reading and replace the cached one.
    ///
    /// On failure the cached reading is left untouched and the error is
    /// returned for logging.
    pub async fn refresh(&self) -> Result<(), ProbeError> {
        let mut slot = self.slot.lock().await;

        match self.probe.sample().await {
            Ok(reading) => {
                *slot = Slot::Warm(warm(reading));
                Ok(())
            }
            Err(e) => {
                if matches!(*slot, Slot::Cold) {
                    *slot = Slot::ColdFailed;
                }
                Err(e)
            }
        }
    }

    /// The cached entry, without fetching.
    pub async fn peek(&self) -> Option<CachedHealth> {
        match &*self.slot.lock().await {
            Slot::Warm(cached) => Some(cached.clone()),
            _ => None,
        }
    }
}

fn warm(reading: HealthReading) -> CachedHealth {
    CachedHealth {
        reading: Arc::new(reading),
        fetched_at: Some(Utc::now()),
    }
}
