use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use battmon_platform::{CommandRunner, ExecutionError, IOREG, SYSTEM_PROFILER};

pub const IOREG_CHARGING: &str = r#"
      "CurrentCapacity" = 57
      "MaxCapacity" = 60
      "IsCharging" = Yes
      "FullyCharged" = No
      "TimeRemaining" = 125
      "Temperature" = 3055
      "Serial" = "F8Y2131014ZQ0KLAH"
      "AdapterDetails" = {"Watts"=96}
"#;

pub const HEALTH_GOOD: &str = r#"{"SPPowerDataType":[
    {"sppower_battery_health_info":{
        "sppower_battery_health":"Good",
        "sppower_battery_health_maximum_capacity":"95%",
        "sppower_battery_cycle_count":142}},
    {"sppower_ac_charger_name":"96W USB-C Power Adapter","sppower_ac_charger_watts":"96"}]}"#;

pub const HEALTH_FAIR: &str = r#"{"SPPowerDataType":[
    {"sppower_battery_health_info":{
        "sppower_battery_health":"Fair",
        "sppower_battery_health_maximum_capacity":"81%",
        "sppower_battery_cycle_count":143}}]}"#;

/// Canned command output with per-program call counters.
/// `None` output makes the command fail to launch.
pub struct FakeRunner {
    ioreg: Mutex<Option<String>>,
    system_profiler: Mutex<Option<String>>,
    ioreg_calls: AtomicUsize,
    profiler_calls: AtomicUsize,
}

impl FakeRunner {
    pub fn new(ioreg: Option<&str>, system_profiler: Option<&str>) -> Self {
        Self {
            ioreg: Mutex::new(ioreg.map(str::to_string)),
            system_profiler: Mutex::new(system_profiler.map(str::to_string)),
            ioreg_calls: AtomicUsize::new(0),
            profiler_calls: AtomicUsize::new(0),
        }
    }

    pub fn healthy() -> Self {
        Self::new(Some(IOREG_CHARGING), Some(HEALTH_GOOD))
    }

    pub fn set_ioreg(&self, output: Option<&str>) {
        *self.ioreg.lock().unwrap() = output.map(str::to_string);
    }

    pub fn set_system_profiler(&self, output: Option<&str>) {
        *self.system_profiler.lock().unwrap() = output.map(str::to_string);
    }

    pub fn ioreg_calls(&self) -> usize {
        self.ioreg_calls.load(Ordering::SeqCst)
    }

    pub fn profiler_calls(&self) -> usize {
        self.profiler_calls.load(Ordering::SeqCst)
    }
}

impl CommandRunner for FakeRunner {
    async fn run(&self, program: &str, _args: &[&str]) -> Result<String, ExecutionError> {
        // Yield so concurrent callers interleave.
        tokio::task::yield_now().await;

        let output = match program {
            IOREG => {
                self.ioreg_calls.fetch_add(1, Ordering::SeqCst);
                self.ioreg.lock().unwrap().clone()
            }
            SYSTEM_PROFILER => {
                self.profiler_calls.fetch_add(1, Ordering::SeqCst);
                self.system_profiler.lock().unwrap().clone()
            }
            _ => None,
        };

        output.ok_or_else(|| ExecutionError::Launch {
            program: program.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no canned output"),
        })
    }
}
