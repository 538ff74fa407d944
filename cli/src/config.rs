use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

pub const MIN_FAST_INTERVAL_MS: u64 = 250;
pub const MIN_SLOW_INTERVAL_SECS: u64 = 5;
pub const MIN_COMMAND_TIMEOUT_MS: u64 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "off" | "none" => LogLevel::Off,
            "error" => LogLevel::Error,
            "info" => LogLevel::Info,
            "debug" => LogLevel::Debug,
            "trace" => LogLevel::Trace,
            _ => LogLevel::Warn,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    pub fn as_tracing_level(&self) -> Option<tracing::Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(tracing::Level::ERROR),
            LogLevel::Warn => Some(tracing::Level::WARN),
            LogLevel::Info => Some(tracing::Level::INFO),
            LogLevel::Debug => Some(tracing::Level::DEBUG),
            LogLevel::Trace => Some(tracing::Level::TRACE),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UserConfig {
    /// Fast cadence: charge, state, time remaining.
    pub fast_interval_ms: u64,
    /// Slow cadence: health, cycles, charger.
    pub slow_interval_secs: u64,
    pub command_timeout_ms: u64,
    pub low_battery_percent: u32,
    pub log_level: LogLevel,
    /// Level for the probe crate alone; follows `log_level` when unset.
    pub probe_log_level: Option<LogLevel>,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            fast_interval_ms: 2000,
            slow_interval_secs: 60,
            command_timeout_ms: 10_000,
            low_battery_percent: 20,
            log_level: LogLevel::Warn,
            probe_log_level: None,
        }
    }
}

pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("~/.config"))
        .join("battmon")
}

pub fn runtime_dir() -> PathBuf {
    dirs::runtime_dir()
        .or_else(dirs::cache_dir)
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("battmon")
}

pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

pub fn ensure_dirs() -> std::io::Result<()> {
    fs::create_dir_all(config_dir())
}

impl UserConfig {
    pub fn load() -> Self {
        let path = config_path();
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => Self::from_toml(&content),
            Err(_) => Self::default(),
        }
    }

    /// Parse a config file, falling back to defaults when it is invalid.
    pub fn from_toml(content: &str) -> Self {
        toml::from_str::<Self>(content)
            .unwrap_or_default()
            .clamped()
    }

    pub fn save(&self) -> std::io::Result<()> {
        let _ = ensure_dirs();
        let path = config_path();
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        fs::write(path, content)
    }

    pub fn merge_with_args(
        &mut self,
        fast_interval_ms: Option<u64>,
        slow_interval_secs: Option<u64>,
        command_timeout_ms: Option<u64>,
    ) {
        if let Some(ms) = fast_interval_ms {
            self.fast_interval_ms = ms;
        }
        if let Some(secs) = slow_interval_secs {
            self.slow_interval_secs = secs;
        }
        if let Some(ms) = command_timeout_ms {
            self.command_timeout_ms = ms;
        }
        *self = self.clone().clamped();
    }

    fn clamped(mut self) -> Self {
        self.fast_interval_ms = self.fast_interval_ms.max(MIN_FAST_INTERVAL_MS);
        self.slow_interval_secs = self.slow_interval_secs.max(MIN_SLOW_INTERVAL_SECS);
        self.command_timeout_ms = self.command_timeout_ms.max(MIN_COMMAND_TIMEOUT_MS);
        self.low_battery_percent = self.low_battery_percent.min(100);
        self
    }

    pub fn fast_interval(&self) -> Duration {
        Duration::from_millis(self.fast_interval_ms)
    }

    pub fn slow_interval(&self) -> Duration {
        Duration::from_secs(self.slow_interval_secs)
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_millis(self.command_timeout_ms)
    }
}
