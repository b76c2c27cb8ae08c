// board.rs - Toroidal board for Conway's Game of Life

use crate::error::BoardError;

pub type Row = Vec<bool>;

/// A finite grid of alive/dead cells whose edges wrap around.
///
/// Boards are plain values: `next_generation` and `resized` hand back a new
/// board and leave `self` alone, so a caller can keep the previous frame
/// around for comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Board {
    width  : usize,
    height : usize,
    cells  : Vec<Row>,  // always `height` rows of `width` cells
}

impl Board {
    /// All-dead board. A zero dimension gives an empty board.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![false; width]; height],
        }
    }

    /// Like [`Board::new`], but refuses non-positive dimensions.
    pub fn validated(width: i64, height: i64) -> Result<Self, BoardError> {
        match (usize::try_from(width), usize::try_from(height)) {
            (Ok(w), Ok(h)) if w > 0 && h > 0 => Ok(Self::new(w, h)),
            _ => Err(BoardError::InvalidDimension { width, height }),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Out-of-range coordinates read as dead.
    pub fn is_alive(&self, x: i64, y: i64) -> bool {
        match self.index(x, y) {
            Some((col, row)) => self.cells[row][col],
            None => false,
        }
    }

    /// Out-of-range writes are dropped.
    pub fn set_alive(&mut self, x: i64, y: i64, alive: bool) {
        if let Some((col, row)) = self.index(x, y) {
            self.cells[row][col] = alive;
        }
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells
            .iter()
            .map(|row| row.iter().filter(|&&alive| alive).count())
            .sum()
    }

    /// Coordinates of every live cell in row-major order.
    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, alive)| **alive)
                .map(move |(x, _)| (x, y))
        })
    }

    /// Applies B3/S23 to every cell at once. Every read sees `self` only.
    pub fn next_generation(&self) -> Board {
        let cells = (0..self.height).map(|row| self.next_row(row)).collect();
        Board {
            width: self.width,
            height: self.height,
            cells,
        }
    }

    /// New board of the requested size holding the overlapping top-left
    /// rectangle of this one.
    pub fn resized(&self, width: usize, height: usize) -> Board {
        let mut next = Board::new(width, height);
        let keep_w = width.min(self.width);
        for (row, src) in self.cells.iter().take(height).enumerate() {
            next.cells[row][..keep_w].copy_from_slice(&src[..keep_w]);
        }
        next
    }

    fn next_row(&self, row: usize) -> Row {
        (0..self.width)
            .map(|col| {
                let count = self.live_neighbours(col, row);
                match (self.cells[row][col], count) {
                    (true, 2) | (true, 3) => true,   // Survival
                    (false, 3)            => true,   // Birth
                    _                     => false,  // Death or stays dead
                }
            })
            .collect()
    }

    fn live_neighbours(&self, col: usize, row: usize) -> usize {
        const OFFSETS: [(i64, i64); 8] = [
            (-1, -1), (0, -1), (1, -1),
            (-1,  0),          (1,  0),
            (-1,  1), (0,  1), (1,  1),
        ];
        let (w, h) = (self.width as i64, self.height as i64);
        OFFSETS
            .iter()
            .filter(|&&(dx, dy)| {
                let nc = (col as i64 + dx).rem_euclid(w) as usize;
                let nr = (row as i64 + dy).rem_euclid(h) as usize;
                self.cells[nr][nc]
            })
            .count()
    }

    fn index(&self, x: i64, y: i64) -> Option<(usize, usize)> {
        let col = usize::try_from(x).ok().filter(|&col| col < self.width)?;
        let row = usize::try_from(y).ok().filter(|&row| row < self.height)?;
        Some((col, row))
    }
}
