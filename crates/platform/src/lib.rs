//! Battery probes and snapshot merging for battmon.
//!
//! Two sources feed a [`PowerSnapshot`]:
//!
//! - [`BatteryProbe`] runs `ioreg -rn AppleSmartBattery` for volatile
//!   readings (charge, state, time remaining, temperature, wattage).
//! - [`HealthProbe`] runs `system_profiler SPPowerDataType -json` for slow
//!   ones (condition, rated capacity, cycles, charger).
//!
//! Both go through a [`CommandRunner`], so parsing can be exercised against
//! canned output.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use battmon_platform::{BatteryProbe, HealthProbe, PowerSnapshot, SystemCommand};
//!
//! let runner = Arc::new(SystemCommand::default());
//! let battery = BatteryProbe::new(runner.clone()).sample().await?;
//! let health = HealthProbe::new(runner).sample().await?;
//! let snapshot = PowerSnapshot::merge(&battery, &health, None);
//! println!("{}% {}", snapshot.charge_percent, snapshot.time_remaining);
//! ```

mod battery;
mod command;
mod error;
pub mod fields;
mod health;
mod snapshot;
mod types;

pub use battery::{
    charge_percent, charge_state, time_remaining, BatteryProbe, BatteryReading, IOREG, IOREG_ARGS,
    TIME_REMAINING_UNKNOWN,
};
pub use command::{CommandRunner, SystemCommand};
pub use error::{ExecutionError, ProbeError};
pub use health::{HealthProbe, HealthReading, SYSTEM_PROFILER, SYSTEM_PROFILER_ARGS};
pub use snapshot::{PowerSnapshot, NOT_AVAILABLE};
pub use types::{ChargeState, TimeRemaining};
