//! Slow probe: battery health and charger identity from `system_profiler`.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::command::CommandRunner;
use crate::error::ProbeError;
use crate::fields::{json_integer, json_text};

pub const SYSTEM_PROFILER: &str = "system_profiler";
pub const SYSTEM_PROFILER_ARGS: &[&str] = &["SPPowerDataType", "-json"];

const HEALTH_KEY: &str = "sppower_battery_health";
const MAX_CAPACITY_KEY: &str = "sppower_battery_health_maximum_capacity";
const CYCLE_COUNT_KEY: &str = "sppower_battery_cycle_count";
const CHARGER_NAME_KEY: &str = "sppower_ac_charger_name";
const CHARGER_WATTS_KEY: &str = "sppower_ac_charger_watts";
const SERIAL_KEY: &str = "sppower_battery_serial_number";

/// Slowly-changing readings from one slow-source sample.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HealthReading {
    /// Condition grade, e.g. "Good" or "Service Recommended".
    pub condition: Option<String>,
    /// Rated maximum capacity as the source prints it, e.g. "95%".
    pub max_capacity_rating: Option<String>,
    pub cycle_count: Option<u32>,
    pub charger_name: Option<String>,
    pub charger_wattage: Option<String>,
    pub serial: Option<String>,
}

impl HealthReading {
    /// Parse `system_profiler SPPowerDataType -json` output.
    ///
    /// Only malformed JSON is an error; any missing key reads as `None`.
    pub fn parse(output: &str) -> Result<Self, serde_json::Error> {
        let document: Value = serde_json::from_str(output)?;
        Ok(Self::from_document(&document))
    }

    pub fn from_document(document: &Value) -> Self {
        Self {
            condition: json_text(document, HEALTH_KEY),
            max_capacity_rating: json_text(document, MAX_CAPACITY_KEY),
            cycle_count: json_integer(document, CYCLE_COUNT_KEY)
                .and_then(|count| u32::try_from(count).ok()),
            charger_name: json_text(document, CHARGER_NAME_KEY),
            charger_wattage: json_text(document, CHARGER_WATTS_KEY),
            serial: json_text(document, SERIAL_KEY),
        }
    }

    /// True when no field resolved.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Samples the slow source with a single `system_profiler` call.
pub struct HealthProbe<R> {
    runner: Arc<R>,
}

impl<R: CommandRunner> HealthProbe<R> {
    pub fn new(runner: Arc<R>) -> Self {
        Self { runner }
    }

    pub async fn sample(&self) -> Result<HealthReading, ProbeError> {
        let output = self
            .runner
            .run(SYSTEM_PROFILER, SYSTEM_PROFILER_ARGS)
            .await?;
        HealthReading::parse(&output).map_err(|source| ProbeError::Parse {
            program: SYSTEM_PROFILER,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_document() {
        let reading = HealthReading::parse(
            r#"{"SPPowerDataType":[
                {"_name":"spbattery_information",
                 "sppower_battery_health_info":{
                    "sppower_battery_cycle_count":87,
                    "sppower_battery_health":"Good",
                    "sppower_battery_health_maximum_capacity":"98%"},
                 "sppower_battery_model_info":{"sppower_battery_serial_number":"ABC123"}},
                {"_name":"sppower_ac_charger_information",
                 "sppower_ac_charger_name":"67W USB-C Power Adapter",
                 "sppower_ac_charger_watts":"67"}]}"#,
        )
        .unwrap();

        assert_eq!(reading.condition.as_deref(), Some("Good"));
        assert_eq!(reading.max_capacity_rating.as_deref(), Some("98%"));
        assert_eq!(reading.cycle_count, Some(87));
        assert_eq!(reading.charger_name.as_deref(), Some("67W USB-C Power Adapter"));
        assert_eq!(reading.charger_wattage.as_deref(), Some("67"));
        assert_eq!(reading.serial.as_deref(), Some("ABC123"));
    }

    #[test]
    fn test_missing_cycle_count_is_not_an_error() {
        let reading = HealthReading::parse(
            r#"{"SPPowerDataType":[{"sppower_battery_health_info":{"sppower_battery_health":"Good"}}]}"#,
        )
        .unwrap();
        assert_eq!(reading.cycle_count, None);
        assert_eq!(reading.condition.as_deref(), Some("Good"));
    }

    #[test]
    fn test_negative_cycle_count_reads_as_absent() {
        let reading = HealthReading::parse(r#"{"sppower_battery_cycle_count":-3}"#).unwrap();
        assert_eq!(reading.cycle_count, None);
    }

    #[test]
    fn test_empty_document() {
        let reading = HealthReading::parse("{}").unwrap();
        assert!(reading.is_empty());
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(HealthReading::parse("SPPowerDataType: not json").is_err());
        assert!(HealthReading::parse("").is_err());
    }
}
