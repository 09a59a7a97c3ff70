//! cartlist TUI
//!
//! Single-screen terminal interface for the shopping lists.
//!
//! ## Layout
//!
//! - Title line (with a marker when saves are failing)
//! - List bar: every list, the active one highlighted
//! - Input line: new item text, or the list name while renaming
//! - Items of the active list, bought ones crossed out
//! - Ad banner (until removed for the session)
//! - Status line
//!
//! ## Keys
//!
//! - a/i: Type an item, Enter to add, Esc to stop
//! - e: Edit the selected item in place
//! - Space/Enter: Toggle bought
//! - d: Delete item
//! - Tab/h/l: Switch lists
//! - n: New list, r: Rename list, D: Delete list
//! - s: Share list
//! - q: Quit

mod app;
mod ui;

use std::time::Duration;

use anyhow::Result;
use cartlist_core::{Config, ListStore, SaveHandle};
use crossterm::{
    event::{self, Event, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use std::io::stdout;
use tracing::{info, warn};

use app::App;

use crate::logging;

/// Run the TUI application
pub async fn run(config: &Config) -> Result<()> {
    // Initialize TUI logging (file-based, only if CARTLIST_LOG is set)
    logging::init_file(config);

    let (mut store, saves) = ListStore::open(config).await;
    info!(lists = store.lists().len(), "Lists loaded");

    let mut app = App::new(config.share_label.clone());
    let result = run_terminal(&mut app, &mut store, &saves).await;

    finish_session(&saves, result).await
}

/// Own the terminal for the lifetime of the UI
///
/// Once raw mode is on, the terminal is restored whatever happens after.
async fn run_terminal(app: &mut App, store: &mut ListStore, saves: &SaveHandle) -> Result<()> {
    enable_raw_mode()?;

    let result: Result<()> = async {
        stdout().execute(EnterAlternateScreen)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
        run_app(&mut terminal, app, store, saves).await
    }
    .await;

    restore_terminal();
    result
}

/// Leave raw mode and the alternate screen, logging failures
fn restore_terminal() {
    if let Err(e) = disable_raw_mode() {
        warn!(error = %e, "Failed to disable raw mode");
    }
    if let Err(e) = stdout().execute(LeaveAlternateScreen) {
        warn!(error = %e, "Failed to leave alternate screen");
    }
}

/// Make the last change durable, then report how the session ended
async fn finish_session(saves: &SaveHandle, result: Result<()>) -> Result<()> {
    if !saves.shutdown().await {
        warn!("Save queue was already stopped");
    }
    result
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    store: &mut ListStore,
    saves: &SaveHandle,
) -> Result<()> {
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        // Check for status message timeout
        app.check_status_timeout();
        app.save_failures = saves.failed();

        // Draw UI
        terminal.draw(|frame| ui::draw(frame, app, store))?;

        tokio::select! {
            biased;

            _ = &mut ctrl_c => {
                app.should_quit = true;
            }

            // Poll for terminal events
            _ = tokio::time::sleep(Duration::from_millis(50)) => {
                // Check for terminal events (non-blocking)
                if event::poll(Duration::from_millis(0))? {
                    if let Event::Key(key) = event::read()? {
                        // Only handle key press events (not release)
                        if key.kind != KeyEventKind::Press {
                            continue;
                        }
                        app.handle_key(store, key.code, key.modifiers);
                    }
                }
            }
        }

        if let Some(request) = app.pending_share.take() {
            match open::that(&request.url) {
                Ok(()) => app.set_status(format!("Shared to {}", request.target)),
                Err(e) => app.set_status(format!("Could not open {}: {}", request.target, e)),
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
