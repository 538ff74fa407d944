use std::sync::Arc;
use std::time::Instant;

use battmon_platform::{
    BatteryProbe, CommandRunner, HealthProbe, HealthReading, PowerSnapshot, SystemCommand, IOREG,
    IOREG_ARGS, SYSTEM_PROFILER, SYSTEM_PROFILER_ARGS,
};
use color_eyre::eyre::Result;

use crate::config::{config_path, UserConfig};
use crate::logging;

pub async fn run(config: &UserConfig) -> Result<()> {
    println!("battmon debug information");
    println!("{}", "=".repeat(60));

    println!("\n--- Config ---");
    println!("Config file: {}", config_path().display());
    println!("Log dir: {}", logging::log_dir().display());
    println!("{}", toml::to_string_pretty(config)?);

    let runner = Arc::new(SystemCommand::new(config.command_timeout()));

    println!("\n--- Commands ---");
    println!("Timeout: {}", humantime::format_duration(runner.timeout()));
    for (program, args) in [(IOREG, IOREG_ARGS), (SYSTEM_PROFILER, SYSTEM_PROFILER_ARGS)] {
        let started = Instant::now();
        match runner.run(program, args).await {
            Ok(output) => println!(
                "{} {}: ok, {} bytes in {}ms",
                program,
                args.join(" "),
                output.len(),
                started.elapsed().as_millis()
            ),
            Err(e) => println!("{} {}: {}", program, args.join(" "), e),
        }
    }

    println!("\n--- Fast probe ---");
    let battery = match BatteryProbe::new(runner.clone()).sample().await {
        Ok(battery) => {
            println!("{:#?}", battery);
            Some(battery)
        }
        Err(e) => {
            println!("Error: {}", e);
            None
        }
    };

    println!("\n--- Slow probe ---");
    let health = match HealthProbe::new(runner).sample().await {
        Ok(health) => {
            println!("{:#?}", health);
            health
        }
        Err(e) => {
            println!("Error: {}", e);
            HealthReading::default()
        }
    };

    if let Some(battery) = battery {
        println!("\n--- Merged snapshot ---");
        let snapshot = PowerSnapshot::merge(&battery, &health, None);
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    }

    Ok(())
}
