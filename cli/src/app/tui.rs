//! Terminal setup, event loop and teardown.

use std::io;
use std::sync::Arc;

use battmon_platform::SystemCommand;
use color_eyre::eyre::Result;
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::UserConfig;
use crate::data::{Cadence, Scheduler};
use crate::input;
use crate::ui;

use super::App;

/// Enables raw mode and switches to the alternate screen buffer.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run the TUI until the user quits. The terminal is restored even when the
/// loop fails.
pub async fn run_tui(user_config: UserConfig) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_tui_loop(&mut terminal, &user_config).await;
    restore_terminal(&mut terminal)?;
    result
}

async fn run_tui_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    user_config: &UserConfig,
) -> Result<()> {
    let runner = Arc::new(SystemCommand::new(user_config.command_timeout()));
    let scheduler = Scheduler::new(runner, Cadence::from(user_config));
    let (request_tx, request_rx) = mpsc::channel(1);
    let (event_tx, mut event_rx) = mpsc::channel(8);
    let scheduler_task = tokio::spawn(scheduler.run(request_rx, event_tx));

    let mut app = App::new(user_config, request_tx);
    let mut input_events = EventStream::new();
    info!("TUI started");

    let result = loop {
        if let Err(e) = terminal.draw(|frame| ui::render(frame, &app)) {
            break Err(e.into());
        }

        tokio::select! {
            event = event_rx.recv() => match event {
                Some(event) => app.apply(event),
                None => {
                    warn!("Scheduler exited");
                    break Ok(());
                }
            },
            input_event = input_events.next() => match input_event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    let action = input::handle_key(&app, key);
                    debug!(?action, "Key action");
                    if !app.handle_action(action) {
                        break Ok(());
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => break Err(e.into()),
                None => break Ok(()),
            },
        }
    };

    // Dropping the task kills any probe still running.
    scheduler_task.abort();
    info!("TUI stopped");
    result
}
