//! Fast probe: volatile battery readings from the IORegistry.

use std::sync::Arc;

use serde::Serialize;

use crate::command::CommandRunner;
use crate::error::ProbeError;
use crate::fields::{self, FieldKind, FieldSpec};
use crate::types::{ChargeState, TimeRemaining};

pub const IOREG: &str = "ioreg";
pub const IOREG_ARGS: &[&str] = &["-rn", "AppleSmartBattery"];

/// `TimeRemaining` value meaning the system cannot estimate yet.
pub const TIME_REMAINING_UNKNOWN: i64 = 65535;

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("CurrentCapacity", FieldKind::Integer),
    FieldSpec::required("MaxCapacity", FieldKind::Integer),
    FieldSpec::required("IsCharging", FieldKind::Flag),
    FieldSpec::optional("FullyCharged", FieldKind::Flag),
    FieldSpec::optional("TimeRemaining", FieldKind::Integer),
    FieldSpec::optional("Temperature", FieldKind::Integer),
    FieldSpec::optional("Watts", FieldKind::Integer),
    FieldSpec::optional("Serial", FieldKind::Text),
];

/// Volatile readings from one fast-source sample.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatteryReading {
    /// `CurrentCapacity * 100 / MaxCapacity`, floored and never clamped.
    pub charge_percent: u32,
    pub state: ChargeState,
    pub time_remaining: TimeRemaining,
    pub temperature_c: Option<f32>,
    /// Adapter wattage.
    pub wattage: Option<i64>,
    pub serial: Option<String>,
}

impl BatteryReading {
    /// Parse `ioreg -rn AppleSmartBattery` output. Never fails.
    pub fn parse(output: &str) -> Self {
        let fields = fields::scan(output, FIELDS);
        let state = charge_state(fields.flag("IsCharging"), fields.flag("FullyCharged"));

        Self {
            charge_percent: charge_percent(
                fields.integer("CurrentCapacity").unwrap_or(0),
                fields.integer("MaxCapacity").unwrap_or(0),
            ),
            state,
            time_remaining: time_remaining(fields.integer("TimeRemaining"), state),
            temperature_c: fields.integer("Temperature").map(|t| t as f32 / 100.0),
            wattage: fields.integer("Watts"),
            serial: fields.text("Serial").map(str::to_string),
        }
    }
}

/// Charge as a whole percentage of `reference`; zero when `reference` is not positive.
pub fn charge_percent(current: i64, reference: i64) -> u32 {
    if reference <= 0 {
        return 0;
    }
    let percent = current.max(0).saturating_mul(100) / reference;
    u32::try_from(percent).unwrap_or(u32::MAX)
}

pub fn charge_state(is_charging: Option<bool>, fully_charged: Option<bool>) -> ChargeState {
    match (is_charging, fully_charged) {
        (None, None) => ChargeState::Unknown,
        (Some(true), _) => ChargeState::Charging,
        (_, Some(true)) => ChargeState::Charged,
        _ => ChargeState::Discharging,
    }
}

pub fn time_remaining(raw_minutes: Option<i64>, state: ChargeState) -> TimeRemaining {
    if state == ChargeState::Charged {
        return TimeRemaining::NotApplicable;
    }

    match raw_minutes {
        Some(minutes) if minutes != TIME_REMAINING_UNKNOWN => u32::try_from(minutes)
            .map(|minutes| TimeRemaining::Estimate { minutes })
            .unwrap_or(TimeRemaining::Calculating),
        _ => TimeRemaining::Calculating,
    }
}

/// Samples the fast source with a single `ioreg` call.
pub struct BatteryProbe<R> {
    runner: Arc<R>,
}

impl<R: CommandRunner> BatteryProbe<R> {
    pub fn new(runner: Arc<R>) -> Self {
        Self { runner }
    }

    pub async fn sample(&self) -> Result<BatteryReading, ProbeError> {
        let output = self.runner.run(IOREG, IOREG_ARGS).await?;
        Ok(BatteryReading::parse(&output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DISCHARGING: &str = r#"
      "CurrentCapacity" = 42
      "MaxCapacity" = 100
      "IsCharging" = No
      "FullyCharged" = No
      "ExternalConnected" = No
      "TimeRemaining" = 65535
      "Temperature" = 2987
    "#;

    #[test]
    fn test_charge_percent_floors() {
        assert_eq!(charge_percent(57, 60), 95);
        assert_eq!(charge_percent(100, 100), 100);
        assert_eq!(charge_percent(1, 3), 33);
        assert_eq!(charge_percent(0, 60), 0);
    }

    #[test]
    fn test_charge_percent_zero_reference() {
        assert_eq!(charge_percent(57, 0), 0);
        assert_eq!(charge_percent(57, -4), 0);
    }

    #[test]
    fn test_charge_percent_is_not_clamped() {
        assert_eq!(charge_percent(4700, 4540), 103);
    }

    #[test]
    fn test_charge_state_derivation() {
        assert_eq!(charge_state(Some(true), None), ChargeState::Charging);
        assert_eq!(charge_state(Some(true), Some(true)), ChargeState::Charging);
        assert_eq!(charge_state(Some(false), Some(true)), ChargeState::Charged);
        assert_eq!(charge_state(Some(false), Some(false)), ChargeState::Discharging);
        assert_eq!(charge_state(Some(false), None), ChargeState::Discharging);
        assert_eq!(charge_state(None, Some(false)), ChargeState::Discharging);
        assert_eq!(charge_state(None, None), ChargeState::Unknown);
    }

    #[test]
    fn test_time_remaining_rules() {
        assert_eq!(
            time_remaining(Some(125), ChargeState::Discharging).to_string(),
            "2:05 remaining"
        );
        assert_eq!(
            time_remaining(Some(TIME_REMAINING_UNKNOWN), ChargeState::Charging),
            TimeRemaining::Calculating
        );
        assert_eq!(
            time_remaining(None, ChargeState::Discharging),
            TimeRemaining::Calculating
        );
        assert_eq!(
            time_remaining(Some(-1), ChargeState::Discharging),
            TimeRemaining::Calculating
        );
    }

    #[test]
    fn test_time_remaining_empty_when_charged() {
        assert_eq!(
            time_remaining(Some(TIME_REMAINING_UNKNOWN), ChargeState::Charged).to_string(),
            ""
        );
        assert_eq!(
            time_remaining(Some(125), ChargeState::Charged),
            TimeRemaining::NotApplicable
        );
    }

    #[test]
    fn test_parse_discharging_output() {
        let reading = BatteryReading::parse(DISCHARGING);
        assert_eq!(reading.charge_percent, 42);
        assert_eq!(reading.state, ChargeState::Discharging);
        assert_eq!(reading.time_remaining.to_string(), "Calculating…");
        assert_eq!(reading.temperature_c, Some(29.87));
        assert_eq!(reading.wattage, None);
        assert_eq!(reading.serial, None);
    }

    #[test]
    fn test_parse_fully_charged_output() {
        let reading = BatteryReading::parse(
            r#""CurrentCapacity" = 100
"MaxCapacity" = 100
"IsCharging" = No
"FullyCharged" = Yes
"TimeRemaining" = 0
"AdapterDetails" = {"Watts"=67}"#,
        );
        assert_eq!(reading.state, ChargeState::Charged);
        assert_eq!(reading.time_remaining, TimeRemaining::NotApplicable);
        assert_eq!(reading.wattage, Some(67));
    }

    #[test]
    fn test_parse_empty_output_degrades() {
        let reading = BatteryReading::parse("");
        assert_eq!(reading.charge_percent, 0);
        assert_eq!(reading.state, ChargeState::Unknown);
        assert_eq!(reading.time_remaining, TimeRemaining::Calculating);
        assert_eq!(reading.temperature_c, None);
    }
}
