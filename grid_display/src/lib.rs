//! Terminal drawing for the Game of Life: palette, status line and a painter
//! that turns boards or per-cell diffs into crossterm commands.

pub mod painter;
pub mod palette;
pub mod status;

pub use painter::Painter;
pub use palette::{Palette, PaletteMode};
pub use status::StatusBar;

/// Board size that fits a `columns`x`rows` terminal.
///
/// One row is kept for the status line, then a small margin is taken off
/// each axis when there is room for it. Never smaller than 1x1.
pub fn board_size_for_terminal(columns: u16, rows: u16) -> (usize, usize) {
    const MARGIN_COLS: usize = 6;
    const MARGIN_ROWS: usize = 4;

    let mut width = usize::from(columns);
    let mut height = usize::from(rows);
    if height > 1 {
        height -= 1;
    }
    if width > MARGIN_COLS {
        width -= MARGIN_COLS;
    }
    if height > MARGIN_ROWS {
        height -= MARGIN_ROWS;
    }
    (width.max(1), height.max(1))
}
