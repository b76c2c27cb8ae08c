// painter.rs - Queues crossterm commands for full frames and per-cell updates

use std::io::{self, Write};

use conway::{Board, CellUpdate, CellVisual};
use crossterm::cursor::MoveTo;
use crossterm::style::{Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::queue;

use crate::palette::Palette;
use crate::status::{HELP_LINES, StatusBar};

/// Paints boards onto any writer; nothing reaches the terminal until the
/// frame is flushed at the end of each call.
pub struct Painter<W: Write> {
    out     : W,
    palette : Palette,
    columns : u16,  // status line is cut to this width
}

impl<W: Write> Painter<W> {
    pub fn new(out: W, palette: Palette, columns: u16) -> Self {
        Self { out, palette, columns }
    }

    pub fn set_columns(&mut self, columns: u16) {
        self.columns = columns;
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Clears the screen and repaints every cell.
    pub fn full_frame(
        &mut self,
        board: &Board,
        previous: Option<&Board>,
        status: &StatusBar<'_>,
        help: bool,
    ) -> io::Result<()> {
        queue!(self.out, ResetColor, Clear(ClearType::All))?;
        for y in 0..board.height() {
            let Ok(row) = u16::try_from(y) else { break };
            queue!(self.out, MoveTo(0, row))?;
            for x in 0..board.width() {
                let (xi, yi) = (x as i64, y as i64);
                let was_alive = previous.is_some_and(|prev| prev.is_alive(xi, yi));
                let (glyph, color) = self.palette.style(CellVisual::from_states(was_alive, board.is_alive(xi, yi)));
                queue!(self.out, SetForegroundColor(color), Print(glyph))?;
            }
        }
        self.finish(board.height(), status, help)
    }

    /// Repaints only the listed cells.
    pub fn cell_updates(
        &mut self,
        updates: &[CellUpdate],
        status_row: usize,
        status: &StatusBar<'_>,
        help: bool,
    ) -> io::Result<()> {
        for update in updates {
            let (Ok(col), Ok(row)) = (u16::try_from(update.x), u16::try_from(update.y)) else {
                continue;
            };
            let (glyph, color) = self.palette.style(update.visual());
            queue!(self.out, MoveTo(col, row), SetForegroundColor(color), Print(glyph))?;
        }
        self.finish(status_row, status, help)
    }

    fn finish(&mut self, status_row: usize, status: &StatusBar<'_>, help: bool) -> io::Result<()> {
        queue!(self.out, ResetColor)?;
        if help {
            self.help_overlay()?;
        }
        self.status_line(status_row, status)?;
        self.out.flush()
    }

    fn status_line(&mut self, row: usize, status: &StatusBar<'_>) -> io::Result<()> {
        let row = u16::try_from(row).unwrap_or(u16::MAX);
        let text: String = status.render().chars().take(usize::from(self.columns)).collect();
        queue!(self.out, MoveTo(0, row), Clear(ClearType::CurrentLine), Print(text))
    }

    fn help_overlay(&mut self) -> io::Result<()> {
        let inner = HELP_LINES.iter().map(|line| line.chars().count()).max().unwrap_or(0) + 2;
        let rule = "─".repeat(inner);
        queue!(self.out, MoveTo(1, 1), Print(format!("┌{rule}┐")))?;
        for (i, line) in HELP_LINES.iter().enumerate() {
            let row = 2 + i as u16;
            queue!(self.out, MoveTo(1, row), Print(format!("│ {line:<width$} │", width = inner - 2)))?;
        }
        let bottom = 2 + HELP_LINES.len() as u16;
        queue!(self.out, MoveTo(1, bottom), Print(format!("└{rule}┘")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status() -> StatusBar<'static> {
        StatusBar { generation: 2, paused: false, source: "random", notice: "" }
    }

    fn painted(f: impl FnOnce(&mut Painter<Vec<u8>>) -> io::Result<()>) -> String {
        let mut painter = Painter::new(Vec::new(), Palette::select(true), 80);
        f(&mut painter).unwrap();
        String::from_utf8(painter.into_inner()).unwrap()
    }

    #[test]
    fn full_frame_paints_cells_and_status() {
        let mut board = Board::new(3, 2);
        board.set_alive(1, 0, true);
        let out = painted(|p| p.full_frame(&board, Some(&board), &status(), false));

        assert!(out.contains("\x1b[2J"));
        assert!(out.contains("\x1b[38;2;255;215;0m█"));
        assert!(out.contains("gen:2 | state:running | source:random"));
    }

    #[test]
    fn newborn_and_recently_dead_are_highlighted() {
        let updates = [
            CellUpdate { x: 0, y: 0, was_alive: false, is_alive: true },
            CellUpdate { x: 1, y: 0, was_alive: true, is_alive: false },
        ];
        let out = painted(|p| p.cell_updates(&updates, 1, &status(), false));

        assert!(out.contains("\x1b[1;1H\x1b[38;2;0;255;135m█"));
        assert!(out.contains("\x1b[1;2H\x1b[38;2;255;99;71m·"));
        assert!(!out.contains("\x1b[2J"));
    }

    #[test]
    fn status_is_cut_to_the_terminal_width() {
        let mut painter = Painter::new(Vec::new(), Palette::select(false), 10);
        painter.cell_updates(&[], 0, &status(), false).unwrap();
        let out = String::from_utf8(painter.into_inner()).unwrap();
        assert!(out.contains("gen:2 | st"));
        assert!(!out.contains("state"));
    }

    #[test]
    fn help_overlay_lists_keys() {
        let out = painted(|p| p.cell_updates(&[], 4, &status(), true));
        assert!(out.contains("toggle this help"));
        assert!(out.contains('┌'));
    }
}
