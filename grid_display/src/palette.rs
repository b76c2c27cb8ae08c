// palette.rs - Cell colours for truecolor and 256-colour terminals

use conway::CellVisual;
use crossterm::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteMode {
    TrueColor,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub mode          : PaletteMode,
    pub alive         : Color,
    pub newborn       : Color,
    pub recently_dead : Color,
    pub dead          : Color,
}

impl Palette {
    pub fn select(supports_truecolor: bool) -> Self {
        if supports_truecolor {
            Self {
                mode: PaletteMode::TrueColor,
                alive: Color::Rgb { r: 255, g: 215, b: 0 },
                newborn: Color::Rgb { r: 0, g: 255, b: 135 },
                recently_dead: Color::Rgb { r: 255, g: 99, b: 71 },
                dead: Color::Rgb { r: 31, g: 41, b: 55 },
            }
        } else {
            Self {
                mode: PaletteMode::Fallback,
                alive: Color::AnsiValue(220),
                newborn: Color::AnsiValue(48),
                recently_dead: Color::AnsiValue(203),
                dead: Color::AnsiValue(236),
            }
        }
    }

    /// Truecolor when `COLORTERM` advertises it.
    pub fn detect() -> Self {
        let colorterm = std::env::var("COLORTERM").unwrap_or_default();
        Self::select(supports_truecolor(&colorterm))
    }

    /// Glyph and foreground colour for a cell.
    pub fn style(&self, visual: CellVisual) -> (char, Color) {
        match visual {
            CellVisual::Alive        => ('█', self.alive),
            CellVisual::Newborn      => ('█', self.newborn),
            CellVisual::RecentlyDead => ('·', self.recently_dead),
            CellVisual::Dead         => (' ', self.dead),
        }
    }
}

fn supports_truecolor(colorterm: &str) -> bool {
    let value = colorterm.to_ascii_lowercase();
    value.contains("truecolor") || value.contains("24bit")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truecolor_when_supported() {
        assert_eq!(Palette::select(true).mode, PaletteMode::TrueColor);
        assert_eq!(Palette::select(false).mode, PaletteMode::Fallback);
    }

    #[test]
    fn alive_and_dead_differ() {
        for palette in [Palette::select(true), Palette::select(false)] {
            assert_ne!(palette.alive, palette.dead);
            assert_ne!(palette.newborn, palette.alive);
        }
    }

    #[test]
    fn colorterm_detection() {
        assert!(supports_truecolor("truecolor"));
        assert!(supports_truecolor("24BIT"));
        assert!(!supports_truecolor(""));
        assert!(!supports_truecolor("xterm-256color"));
    }
}
