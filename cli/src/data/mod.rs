pub mod health_cache;
pub mod scheduler;

#[cfg(test)]
pub(crate) mod testing;

pub use scheduler::{Cadence, MonitorEvent, MonitorRequest, Scheduler};
