mod app;
mod cli;
mod commands;
mod config;
mod data;
mod input;
mod logging;
mod ui;

use std::future::Future;

use clap::Parser;
use color_eyre::eyre::Result;

use cli::{Cli, Commands};
use config::{ensure_dirs, LogLevel, UserConfig};
use logging::LogMode;

/// Probes, the scheduler and the UI all share one thread.
fn block_on<F: Future<Output = Result<()>>>(future: F) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(future)
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let _ = ensure_dirs();

    let cli = Cli::parse();
    let mut config = UserConfig::load();
    config.merge_with_args(cli.fast_ms, cli.slow_secs, cli.timeout_ms);
    let log_level_override = cli.log_level.as_deref().map(LogLevel::from_str);

    match cli.command {
        Some(Commands::Pipe {
            samples,
            interval,
            compact,
        }) => {
            let _guard = logging::init(&config, LogMode::Stderr, log_level_override);
            block_on(commands::pipe::run(&config, samples, interval, compact))
        }
        Some(Commands::Debug) => {
            let _guard = logging::init(&config, LogMode::Stderr, log_level_override);
            block_on(commands::debug::run(&config))
        }
        Some(Commands::Config { path, reset }) => {
            let _guard = logging::init(&config, LogMode::Stderr, log_level_override);
            commands::config::run(path, reset)
        }
        Some(Commands::Ui) | None => {
            let _guard = logging::init(&config, LogMode::File, log_level_override);
            block_on(app::run_tui(config))
        }
    }
}
