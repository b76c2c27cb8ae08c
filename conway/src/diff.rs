//! Cell-level differences between consecutive frames.
//!
//! The renderer highlights cells for one frame after they change (newborn,
//! recently dead). [`FrameDiffer`] remembers which cells changed last time so
//! the following frame repaints them once more in their settled colour, even
//! though their state did not change again.

use std::collections::HashSet;

use crate::board::Board;

/// How a cell should look this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellVisual {
    Alive,
    Newborn,
    RecentlyDead,
    Dead,
}

impl CellVisual {
    pub fn from_states(was_alive: bool, is_alive: bool) -> Self {
        match (was_alive, is_alive) {
            (true, true)   => CellVisual::Alive,
            (false, true)  => CellVisual::Newborn,
            (true, false)  => CellVisual::RecentlyDead,
            (false, false) => CellVisual::Dead,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellUpdate {
    pub x         : usize,
    pub y         : usize,
    pub was_alive : bool,
    pub is_alive  : bool,
}

impl CellUpdate {
    pub fn visual(&self) -> CellVisual {
        CellVisual::from_states(self.was_alive, self.is_alive)
    }

    pub fn changed(&self) -> bool {
        self.was_alive != self.is_alive
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameDiff {
    /// No usable previous frame; repaint everything.
    FullRedraw,
    /// Cells to repaint, in row-major order.
    Cells(Vec<CellUpdate>),
}

#[derive(Debug, Default)]
pub struct FrameDiffer {
    transient: HashSet<(usize, usize)>,
}

impl FrameDiffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget pending highlights, e.g. after a full repaint.
    pub fn reset(&mut self) {
        self.transient.clear();
    }

    /// Cells still owed one more repaint.
    pub fn transient(&self) -> &HashSet<(usize, usize)> {
        &self.transient
    }

    pub fn diff(&mut self, previous: Option<&Board>, current: &Board) -> FrameDiff {
        let previous = match previous {
            Some(prev) if prev.width() == current.width() && prev.height() == current.height() => prev,
            _ => {
                self.transient.clear();
                return FrameDiff::FullRedraw;
            }
        };

        let mut updates = Vec::new();
        let mut next_transient = HashSet::new();
        for y in 0..current.height() {
            for x in 0..current.width() {
                let update = CellUpdate {
                    x,
                    y,
                    was_alive: previous.is_alive(x as i64, y as i64),
                    is_alive: current.is_alive(x as i64, y as i64),
                };
                if update.changed() {
                    next_transient.insert((x, y));
                    updates.push(update);
                } else if self.transient.contains(&(x, y)) {
                    updates.push(update);
                }
            }
        }
        self.transient = next_transient;
        FrameDiff::Cells(updates)
    }
}
