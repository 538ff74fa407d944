//! Shared types for battery readings.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Battery charging state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeState {
    /// Battery is actively charging
    Charging,
    /// Battery is discharging, or on external power without charging
    Discharging,
    /// Battery reports itself fully charged
    Charged,
    /// The source carried no charging flags at all
    #[default]
    Unknown,
}

impl ChargeState {
    /// Returns a human-readable label for the charge state.
    pub fn label(&self) -> &'static str {
        match self {
            ChargeState::Charging => "Charging",
            ChargeState::Discharging => "Discharging",
            ChargeState::Charged => "Charged",
            ChargeState::Unknown => "Unknown",
        }
    }

    pub fn is_charging(&self) -> bool {
        matches!(self, ChargeState::Charging)
    }
}

impl fmt::Display for ChargeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Remaining time as reported by the fast source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimeRemaining {
    /// An estimate in whole minutes.
    Estimate { minutes: u32 },
    /// The source cannot estimate yet.
    #[default]
    Calculating,
    /// Nothing to estimate: the battery is fully charged.
    NotApplicable,
}

impl TimeRemaining {
    pub const CALCULATING_LABEL: &'static str = "Calculating…";
}

impl fmt::Display for TimeRemaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeRemaining::Estimate { minutes } => {
                write!(f, "{}:{:02} remaining", minutes / 60, minutes % 60)
            }
            TimeRemaining::Calculating => f.write_str(Self::CALCULATING_LABEL),
            TimeRemaining::NotApplicable => Ok(()),
        }
    }
}
