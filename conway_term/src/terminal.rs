// terminal.rs - Raw mode and alternate screen, undone on drop

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use tokio::sync::mpsc;
use tracing::{error, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Puts the terminal into full-screen raw mode for as long as it lives.
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn enter() -> Result<Self> {
        enable_raw_mode().context("failed to enable raw mode")?;
        // from here on Drop restores raw mode even if the screen switch fails
        let guard = TerminalGuard;
        execute!(io::stdout(), EnterAlternateScreen, Hide).context("failed to enter alternate screen")?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(err) = execute!(io::stdout(), Show, LeaveAlternateScreen) {
            error!(?err, "failed to leave alternate screen");
        }
        if let Err(err) = disable_raw_mode() {
            error!(?err, "failed to disable raw mode");
        }
    }
}

/// Events forwarded from the terminal to the main loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermEvent {
    Key(event::KeyEvent),
    Resize(u16, u16),
}

/// Blocking reader: forwards key and resize events until the receiver goes
/// away or the terminal stops delivering events.
pub fn forward_events(tx: mpsc::Sender<TermEvent>) {
    while !tx.is_closed() {
        match event::poll(POLL_INTERVAL) {
            Ok(false) => continue,
            Ok(true) => {}
            Err(err) => {
                warn!(%err, "terminal event poll failed");
                return;
            }
        }
        let forwarded = match event::read() {
            Ok(Event::Key(key)) => TermEvent::Key(key),
            Ok(Event::Resize(columns, rows)) => TermEvent::Resize(columns, rows),
            Ok(_) => continue,
            Err(err) => {
                warn!(%err, "terminal event read failed");
                return;
            }
        };
        if tx.blocking_send(forwarded).is_err() {
            return;
        }
    }
}
