// simulation.rs - The live game: board, generation counter, pause and restart policy

use tracing::debug;

use crate::board::Board;
use crate::error::RecoverableError;
use crate::pattern;
use crate::seed::{random_factory, BoardFactory, SeedPolicy};

/// Identical generations in a row before the board is reseeded.
pub const DEFAULT_STABILITY_THRESHOLD: u32 = 100;

/// What a single [`Simulation::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Paused,
    Advanced,
    Stable { repeats: u32 },
    Restarted,
}

pub struct Simulation {
    board               : Board,
    generation          : u64,
    paused              : bool,
    stable_ticks        : u32,
    stability_threshold : u32,
    width               : usize,
    height              : usize,
    factory             : BoardFactory,
}

impl Simulation {
    /// Randomly seeded simulation; the same seed gives the same boards.
    pub fn new(width: usize, height: usize, seed: u64) -> Self {
        Self::with_factory(width, height, random_factory(seed, SeedPolicy::default()))
    }

    pub fn with_factory(width: usize, height: usize, mut factory: BoardFactory) -> Self {
        Self {
            board: factory(width, height),
            generation: 0,
            paused: false,
            stable_ticks: 0,
            stability_threshold: DEFAULT_STABILITY_THRESHOLD,
            width,
            height,
            factory,
        }
    }

    pub fn with_stability_threshold(mut self, threshold: u32) -> Self {
        self.stability_threshold = threshold.max(1);
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn stable_ticks(&self) -> u32 {
        self.stable_ticks
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Advances one generation unless paused.
    ///
    /// A board that keeps reproducing itself for `stability_threshold` ticks
    /// is considered dead and gets reseeded instead of advanced.
    pub fn tick(&mut self) -> TickOutcome {
        if self.paused {
            return TickOutcome::Paused;
        }

        let next = self.board.next_generation();
        if next == self.board {
            self.stable_ticks += 1;
        } else {
            self.stable_ticks = 0;
        }

        if self.stable_ticks >= self.stability_threshold {
            debug!(generation = self.generation, "board stable, reseeding");
            self.restart();
            return TickOutcome::Restarted;
        }

        self.board = next;
        self.generation += 1;
        match self.stable_ticks {
            0 => TickOutcome::Advanced,
            repeats => TickOutcome::Stable { repeats },
        }
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Reseeds from the factory.
    pub fn restart(&mut self) {
        self.board = (self.factory)(self.width, self.height);
        self.generation = 0;
        self.stable_ticks = 0;
    }

    /// Keeps the overlapping top-left part of the board. Generation survives.
    pub fn resize(&mut self, width: usize, height: usize) {
        if (width, height) != (self.width, self.height) {
            debug!(width, height, "resizing board");
        }
        self.board = self.board.resized(width, height);
        self.width = width;
        self.height = height;
        self.stable_ticks = 0;
    }

    /// Replaces the board with a pattern decoded from wiki page content.
    ///
    /// On error nothing changes.
    pub fn load_pattern_from_wiki_content(&mut self, content: &str) -> Result<(), RecoverableError> {
        let board = pattern::load_board_from_wiki_content(content, self.width, self.height)?;
        debug!(population = board.population(), "pattern loaded");
        self.board = board;
        self.generation = 0;
        self.stable_ticks = 0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn blank_factory() -> BoardFactory {
        Box::new(|w, h| Board::new(w, h))
    }

    fn blinker_factory() -> BoardFactory {
        Box::new(|w, h| {
            let mut board = Board::new(w, h);
            for x in 1..4 {
                board.set_alive(x, 2, true);
            }
            board
        })
    }

    #[test]
    fn starts_at_generation_zero_with_requested_size() {
        let sim = Simulation::new(12, 8, 42);
        assert_eq!(sim.generation(), 0);
        assert_eq!((sim.board().width(), sim.board().height()), (12, 8));
    }

    #[test]
    fn same_seed_same_initial_board() {
        assert_eq!(Simulation::new(10, 6, 1234).board(), Simulation::new(10, 6, 1234).board());
    }

    #[test]
    fn tick_advances_and_counts() {
        let mut sim = Simulation::with_factory(5, 5, blinker_factory());
        assert_eq!(sim.tick(), TickOutcome::Advanced);
        assert_eq!(sim.generation(), 1);
        assert!(sim.board().is_alive(2, 1));
    }

    #[test]
    fn ticks_while_paused_do_nothing() {
        let mut sim = Simulation::with_factory(5, 5, blinker_factory());
        sim.pause();
        let before = sim.board().clone();
        assert_eq!(sim.tick(), TickOutcome::Paused);
        assert_eq!(sim.generation(), 0);
        assert_eq!(sim.board(), &before);

        sim.resume();
        sim.tick();
        assert_eq!(sim.generation(), 1);
    }

    #[test]
    fn restart_reseeds_and_resets_counters() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let factory: BoardFactory = Box::new(move |w, h| {
            let call = counter.fetch_add(1, Ordering::SeqCst);
            let mut board = Board::new(w, h);
            if call == 0 {
                board.set_alive(0, 0, true);
            } else {
                board.set_alive(2, 2, true);
            }
            board
        });

        let mut sim = Simulation::with_factory(3, 3, factory);
        sim.tick();
        assert_eq!(sim.generation(), 1);

        sim.restart();
        assert_eq!(sim.generation(), 0);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(sim.board().is_alive(2, 2));
    }

    #[test]
    fn dead_board_restarts_after_threshold() {
        let mut sim = Simulation::with_factory(4, 4, blank_factory());
        for tick in 1..100 {
            assert_eq!(sim.tick(), TickOutcome::Stable { repeats: tick });
        }
        assert_eq!(sim.generation(), 99);
        assert_eq!(sim.stable_ticks(), 99);

        assert_eq!(sim.tick(), TickOutcome::Restarted);
        assert_eq!(sim.generation(), 0);
        assert_eq!(sim.stable_ticks(), 0);
    }

    #[test]
    fn custom_threshold() {
        let mut sim = Simulation::with_factory(4, 4, blank_factory()).with_stability_threshold(3);
        sim.tick();
        sim.tick();
        assert_eq!(sim.tick(), TickOutcome::Restarted);
    }

    #[test]
    fn resize_resets_stability_but_not_generation() {
        let mut sim = Simulation::with_factory(4, 4, blank_factory());
        for _ in 0..5 {
            sim.tick();
        }
        sim.resize(8, 2);
        assert_eq!(sim.stable_ticks(), 0);
        assert_eq!(sim.generation(), 5);
        assert_eq!((sim.width(), sim.height()), (8, 2));
        assert_eq!((sim.board().width(), sim.board().height()), (8, 2));
    }

    #[test]
    fn successful_pattern_load_replaces_board() {
        let mut sim = Simulation::with_factory(6, 6, blinker_factory());
        sim.tick();
        sim.load_pattern_from_wiki_content("x = 3, y = 3\nbo$2bo$3o!").unwrap();
        assert_eq!(sim.generation(), 0);
        assert_eq!(sim.board().population(), 5);
    }

    #[test]
    fn failed_pattern_load_keeps_state() {
        let mut sim = Simulation::with_factory(5, 5, blinker_factory());
        sim.tick();
        let before = sim.board().clone();

        let err = sim.load_pattern_from_wiki_content("#Life 1.06\ninvalid").unwrap_err();
        assert!(matches!(err, RecoverableError::PatternInvalid(_)));
        assert_eq!(sim.board(), &before);
        assert_eq!(sim.generation(), 1);
    }
}
