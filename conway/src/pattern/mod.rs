//! Pattern decoding for text scraped from the ConwayLife wiki.
//!
//! A wiki page embeds a pattern in one of three encodings somewhere in its
//! markup. [`select_preferred_pattern`] pulls the first recognised block out
//! of the page (RLE, then PlainText, then Life 1.06) and [`parse_to_board`]
//! rasterizes it onto a board of the caller's size. Cells that land outside
//! the board are dropped.

mod life106;
mod plaintext;
mod rle;

use std::fmt;

use tracing::debug;

use crate::board::Board;
use crate::error::{PatternError, RecoverableError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Rle,
    PlainText,
    Life106,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Format::Rle       => "RLE",
            Format::PlainText => "PlainText",
            Format::Life106   => "Life1.06",
        })
    }
}

/// An extracted pattern block, free of the surrounding page text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub format : Format,
    pub body   : String,
}

type DetectFn = fn(&[&str]) -> Option<String>;
type ParseFn  = fn(&str, usize, usize) -> Result<Board, PatternError>;

struct Codec {
    format : Format,
    detect : DetectFn,
    parse  : ParseFn,
}

// Priority order: first detector to match wins.
static CODECS: [Codec; 3] = [
    Codec { format: Format::Rle,       detect: rle::detect,       parse: rle::parse },
    Codec { format: Format::PlainText, detect: plaintext::detect, parse: plaintext::parse },
    Codec { format: Format::Life106,   detect: life106::detect,   parse: life106::parse },
];

fn codec(format: Format) -> &'static Codec {
    match format {
        Format::Rle       => &CODECS[0],
        Format::PlainText => &CODECS[1],
        Format::Life106   => &CODECS[2],
    }
}

/// Finds the preferred pattern block inside arbitrary page content.
pub fn select_preferred_pattern(content: &str) -> Result<Pattern, PatternError> {
    let lines: Vec<&str> = content.lines().map(str::trim).collect();
    CODECS
        .iter()
        .find_map(|codec| {
            (codec.detect)(&lines).map(|body| Pattern { format: codec.format, body })
        })
        .ok_or(PatternError::NoSupportedFormat)
}

/// Rasterizes `body` onto a `width`x`height` board.
pub fn parse_to_board(format: Format, body: &str, width: usize, height: usize) -> Result<Board, PatternError> {
    (codec(format).parse)(body, width, height)
}

/// Selection plus parsing; every failure comes back as a [`RecoverableError`].
pub fn load_board_from_wiki_content(content: &str, width: usize, height: usize) -> Result<Board, RecoverableError> {
    let pattern = select_preferred_pattern(content)?;
    debug!(format = %pattern.format, bytes = pattern.body.len(), "pattern block selected");
    let board = parse_to_board(pattern.format, &pattern.body, width, height)?;
    Ok(board)
}
