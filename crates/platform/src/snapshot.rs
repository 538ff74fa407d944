//! The merged view handed to the display layer.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::battery::BatteryReading;
use crate::health::HealthReading;
use crate::types::{ChargeState, TimeRemaining};

/// Display placeholder for an unknown text field.
pub const NOT_AVAILABLE: &str = "N/A";

/// One point-in-time view of the power subsystem.
///
/// Fast-source and slow-source fields are disjoint; absent values stay `None`
/// and the `*_label` accessors supply display defaults.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PowerSnapshot {
    pub timestamp: DateTime<Utc>,

    pub charge_percent: u32,
    pub state: ChargeState,
    pub time_remaining: TimeRemaining,
    pub temperature_c: Option<f32>,
    pub wattage: Option<i64>,
    pub serial: Option<String>,

    pub condition: Option<String>,
    pub max_capacity_rating: Option<String>,
    pub cycle_count: Option<u32>,
    pub charger_name: Option<String>,
    pub charger_wattage: Option<String>,
    /// When the health fields were fetched, if ever.
    pub health_updated_at: Option<DateTime<Utc>>,
}

impl PowerSnapshot {
    /// Merge a fresh fast reading with the cached health reading.
    pub fn merge(
        battery: &BatteryReading,
        health: &HealthReading,
        health_updated_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self::merge_at(Utc::now(), battery, health, health_updated_at)
    }

    pub fn merge_at(
        timestamp: DateTime<Utc>,
        battery: &BatteryReading,
        health: &HealthReading,
        health_updated_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            timestamp,
            charge_percent: battery.charge_percent,
            state: battery.state,
            time_remaining: battery.time_remaining,
            temperature_c: battery.temperature_c,
            wattage: battery.wattage,
            serial: battery.serial.clone().or_else(|| health.serial.clone()),
            condition: health.condition.clone(),
            max_capacity_rating: health.max_capacity_rating.clone(),
            cycle_count: health.cycle_count,
            charger_name: health.charger_name.clone(),
            charger_wattage: health.charger_wattage.clone(),
            health_updated_at,
        }
    }

    pub fn condition_label(&self) -> &str {
        self.condition.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn max_capacity_label(&self) -> &str {
        self.max_capacity_rating.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn charger_name_label(&self) -> &str {
        self.charger_name.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn charger_wattage_label(&self) -> &str {
        self.charger_wattage.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn serial_label(&self) -> &str {
        self.serial.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    /// Cycle count, zero when unknown.
    pub fn cycles(&self) -> u32 {
        self.cycle_count.unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn battery() -> BatteryReading {
        BatteryReading {
            charge_percent: 80,
            state: ChargeState::Discharging,
            time_remaining: TimeRemaining::Estimate { minutes: 200 },
            temperature_c: Some(31.0),
            wattage: None,
            serial: None,
        }
    }

    #[test]
    fn test_merge_copies_both_sides() {
        let health = HealthReading {
            condition: Some("Good".to_string()),
            max_capacity_rating: Some("91%".to_string()),
            cycle_count: Some(310),
            charger_name: None,
            charger_wattage: None,
            serial: Some("SLOW-SERIAL".to_string()),
        };
        let fetched = Utc::now();

        let snapshot = PowerSnapshot::merge(&battery(), &health, Some(fetched));
        assert_eq!(snapshot.charge_percent, 80);
        assert_eq!(snapshot.time_remaining.to_string(), "3:20 remaining");
        assert_eq!(snapshot.condition_label(), "Good");
        assert_eq!(snapshot.max_capacity_label(), "91%");
        assert_eq!(snapshot.cycles(), 310);
        assert_eq!(snapshot.serial_label(), "SLOW-SERIAL");
        assert_eq!(snapshot.health_updated_at, Some(fetched));
    }

    #[test]
    fn test_fast_serial_wins() {
        let mut battery = battery();
        battery.serial = Some("FAST".to_string());
        let health = HealthReading {
            serial: Some("SLOW".to_string()),
            ..Default::default()
        };
        let snapshot = PowerSnapshot::merge(&battery, &health, None);
        assert_eq!(snapshot.serial.as_deref(), Some("FAST"));
    }

    #[test]
    fn test_empty_health_uses_display_defaults() {
        let snapshot = PowerSnapshot::merge(&battery(), &HealthReading::default(), None);
        assert_eq!(snapshot.condition_label(), "N/A");
        assert_eq!(snapshot.max_capacity_label(), "N/A");
        assert_eq!(snapshot.charger_name_label(), "N/A");
        assert_eq!(snapshot.charger_wattage_label(), "N/A");
        assert_eq!(snapshot.serial_label(), "N/A");
        assert_eq!(snapshot.cycles(), 0);
        assert_eq!(snapshot.cycle_count, None);
    }
}
