// seed.rs - Random starting boards

use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;

use crate::board::Board;

/// Produces a fresh board of the requested size on every call.
pub type BoardFactory = Box<dyn FnMut(usize, usize) -> Board + Send>;

/// Where random live cells go.
///
/// Cells are scattered inside a centered square window rather than across the
/// whole board, so a large terminal starts from a small soup in the middle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedPolicy {
    pub window : usize,  // side of the centered window, clipped to the board
    pub cells  : usize,  // live cells to place, capped by the window area
}

impl Default for SeedPolicy {
    fn default() -> Self {
        Self { window: 10, cells: 16 }
    }
}

impl SeedPolicy {
    pub fn random_board(&self, rng: &mut StdRng, width: usize, height: usize) -> Board {
        let mut board = Board::new(width, height);
        let win_w = self.window.min(width);
        let win_h = self.window.min(height);
        let area = win_w * win_h;
        if area == 0 {
            return board;
        }

        let left = (width - win_w) / 2;
        let top = (height - win_h) / 2;
        for cell in index::sample(rng, area, self.cells.min(area)) {
            let x = left + cell % win_w;
            let y = top + cell / win_w;
            board.set_alive(x as i64, y as i64, true);
        }
        board
    }
}

/// Factory drawing from a generator seeded with `seed`.
///
/// Two factories built from the same seed and policy hand out the same
/// sequence of boards.
pub fn random_factory(seed: u64, policy: SeedPolicy) -> BoardFactory {
    let mut rng = StdRng::seed_from_u64(seed);
    Box::new(move |width, height| policy.random_board(&mut rng, width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_board() {
        let mut left = random_factory(1234, SeedPolicy::default());
        let mut right = random_factory(1234, SeedPolicy::default());
        assert_eq!(left(40, 20), right(40, 20));
        assert_eq!(left(40, 20), right(40, 20));
    }

    #[test]
    fn live_cells_stay_inside_the_centered_window() {
        let mut factory = random_factory(7, SeedPolicy::default());
        let board = factory(30, 20);
        assert_eq!(board.population(), 16);
        for (x, y) in board.live_cells() {
            assert!((10..20).contains(&x), "x={x}");
            assert!((5..15).contains(&y), "y={y}");
        }
    }

    #[test]
    fn small_boards_fill_their_whole_area() {
        let mut factory = random_factory(3, SeedPolicy::default());
        assert_eq!(factory(3, 4).population(), 12);
        assert_eq!(factory(0, 4).population(), 0);
    }

    #[test]
    fn policy_is_configurable() {
        let policy = SeedPolicy { window: 4, cells: 5 };
        let mut factory = random_factory(11, policy);
        let board = factory(8, 8);
        assert_eq!(board.population(), 5);
        assert!(board.live_cells().all(|(x, y)| (2..6).contains(&x) && (2..6).contains(&y)));
    }
}
