//! Conway's Game of Life on a wrapping board.
//!
//! The crate is free of I/O: it steps boards, decodes wiki patterns, runs the
//! pause/restart policy and works out which cells a renderer has to repaint.

pub mod board;
pub mod diff;
pub mod error;
pub mod pattern;
pub mod seed;
pub mod simulation;

pub use board::Board;
pub use diff::{CellUpdate, CellVisual, FrameDiff, FrameDiffer};
pub use error::{BoardError, PatternError, RecoverableError};
pub use pattern::{Format, Pattern, load_board_from_wiki_content, parse_to_board, select_preferred_pattern};
pub use seed::{BoardFactory, SeedPolicy, random_factory};
pub use simulation::{Simulation, TickOutcome, DEFAULT_STABILITY_THRESHOLD};
