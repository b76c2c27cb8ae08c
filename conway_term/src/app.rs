// app.rs - Event loop: ticks, keys, resizes and signals feed one simulation

use std::io::{self, Write};
use std::ops::ControlFlow;

use anyhow::{Context, Result};
use conway::{Board, FrameDiff, FrameDiffer, RecoverableError, Simulation, TickOutcome};
use grid_display::{Painter, Palette, StatusBar, board_size_for_terminal};
use tokio::sync::mpsc;
use tokio::time::{self, MissedTickBehavior};
use tracing::{info, warn};

use crate::cli::AppConfig;
use crate::fetch::WikiLoader;
use crate::input::Command;
use crate::terminal::{TermEvent, TerminalGuard, forward_events};

const EVENT_QUEUE: usize = 16;
const HEADLESS_SIZE: (usize, usize) = (20, 10);

pub struct App {
    sim               : Simulation,
    source            : String,
    pattern_url       : Option<String>,
    loader            : Option<WikiLoader>,
    help_visible      : bool,
    notice            : String,
    previous          : Option<Board>,  // last frame actually painted
    differ            : FrameDiffer,
    needs_full_redraw : bool,
    dirty             : bool,
}

impl App {
    pub fn new(sim: Simulation, config: &AppConfig, loader: Option<WikiLoader>) -> Self {
        Self {
            sim,
            source: config.source().to_string(),
            pattern_url: config.pattern_url.clone(),
            loader,
            help_visible: false,
            notice: String::new(),
            previous: None,
            differ: FrameDiffer::new(),
            needs_full_redraw: true,
            dirty: true,
        }
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn notice(&self) -> &str {
        &self.notice
    }

    pub fn help_visible(&self) -> bool {
        self.help_visible
    }

    pub fn on_tick(&mut self) {
        match self.sim.tick() {
            TickOutcome::Paused => return,
            TickOutcome::Restarted => info!("board stopped changing, restarted"),
            TickOutcome::Advanced | TickOutcome::Stable { .. } => {}
        }
        self.dirty = true;
    }

    pub fn on_resize(&mut self, columns: u16, rows: u16) {
        let (width, height) = board_size_for_terminal(columns, rows);
        self.sim.resize(width, height);
        self.previous = None;
        self.needs_full_redraw = true;
        self.dirty = true;
    }

    pub async fn handle_command(&mut self, command: Command) -> ControlFlow<()> {
        match command {
            Command::TogglePause => {
                if self.sim.is_paused() {
                    self.sim.resume();
                } else {
                    self.sim.pause();
                }
            }
            Command::ToggleHelp => {
                self.help_visible = !self.help_visible;
                self.needs_full_redraw = true;
            }
            Command::Restart => self.sim.restart(),
            Command::Reload => self.reload_pattern().await,
            Command::Quit => return ControlFlow::Break(()),
        }
        self.dirty = true;
        ControlFlow::Continue(())
    }

    /// Fetches the configured pattern again. Without a configured source this
    /// only leaves a notice.
    pub async fn reload_pattern(&mut self) {
        let fetched = match (&self.pattern_url, &self.loader) {
            (Some(url), Some(loader)) => loader.load(url).await.map_err(RecoverableError::from),
            _ => {
                self.notice = "no-pattern-url-configured".to_string();
                self.dirty = true;
                return;
            }
        };
        self.apply_pattern(fetched);
    }

    /// Loads fetched page content; any failure leaves the board as it was.
    pub fn apply_pattern(&mut self, fetched: Result<String, RecoverableError>) {
        match fetched.and_then(|content| self.sim.load_pattern_from_wiki_content(&content)) {
            Ok(()) => {
                info!(source = %self.source, population = self.sim.board().population(), "pattern loaded");
                self.notice = "pattern-loaded".to_string();
                self.previous = None;
                self.needs_full_redraw = true;
            }
            Err(err) => {
                warn!(%err, source = %self.source, "pattern load failed");
                self.notice = format!("pattern-load-failed: {err}");
            }
        }
        self.dirty = true;
    }

    /// Paints whatever changed since the last call.
    pub fn draw<W: Write>(&mut self, painter: &mut Painter<W>) -> io::Result<()> {
        if !self.dirty {
            return Ok(());
        }

        let board = self.sim.board();
        let status = StatusBar {
            generation: self.sim.generation(),
            paused: self.sim.is_paused(),
            source: &self.source,
            notice: &self.notice,
        };
        let diff = if self.needs_full_redraw {
            FrameDiff::FullRedraw
        } else {
            self.differ.diff(self.previous.as_ref(), board)
        };
        match diff {
            FrameDiff::FullRedraw => {
                painter.full_frame(board, self.previous.as_ref(), &status, self.help_visible)?;
                self.differ.reset();
            }
            FrameDiff::Cells(updates) => {
                painter.cell_updates(&updates, board.height(), &status, self.help_visible)?;
            }
        }

        self.previous = Some(board.clone());
        self.needs_full_redraw = false;
        self.dirty = false;
        Ok(())
    }
}

/// Status line printed instead of the board when stdout is not a terminal.
pub fn headless_status(config: &AppConfig) -> String {
    let (width, height) = HEADLESS_SIZE;
    let sim = config.simulation(width, height);
    StatusBar {
        generation: sim.generation(),
        paused: false,
        source: config.source(),
        notice: "",
    }
    .render()
}

pub async fn run(config: AppConfig) -> Result<()> {
    let loader = match config.pattern_url {
        Some(_) => Some(
            WikiLoader::new(config.fetch_timeout, config.max_pattern_bytes)
                .context("failed to build HTTP client")?,
        ),
        None => None,
    };

    let _terminal = TerminalGuard::enter()?;
    let (columns, rows) = crossterm::terminal::size().context("failed to read terminal size")?;
    let (width, height) = board_size_for_terminal(columns, rows);
    let mut app = App::new(config.simulation(width, height), &config, loader);
    info!(width, height, source = app.source(), "starting simulation");
    if config.pattern_url.is_some() {
        app.reload_pattern().await;
    }

    let mut painter = Painter::new(io::stdout(), Palette::detect(), columns);
    let (tx, mut events) = mpsc::channel(EVENT_QUEUE);
    tokio::task::spawn_blocking(move || forward_events(tx));

    let mut ticker = time::interval(config.tick_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        app.draw(&mut painter).context("failed to draw frame")?;
        tokio::select! {
            _ = ticker.tick() => app.on_tick(),
            event = events.recv() => match event {
                Some(TermEvent::Key(key)) => {
                    if let Some(command) = Command::from_key(&key)
                        && app.handle_command(command).await.is_break()
                    {
                        break;
                    }
                }
                Some(TermEvent::Resize(columns, rows)) => {
                    painter.set_columns(columns);
                    app.on_resize(columns, rows);
                }
                None => break,
            },
            _ = &mut shutdown => {
                info!("shutdown signal received");
                break;
            }
        }
    }

    info!(generation = app.simulation().generation(), "simulation stopped");
    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM. A handler that cannot be installed never
/// fires.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = ctrl_c() => {}
                    _ = terminate.recv() => {}
                }
            }
            Err(err) => {
                warn!(%err, "failed to install SIGTERM handler");
                ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c().await;
    }
}

async fn ctrl_c() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(%err, "failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
}
