// error.rs - Error types shared by the engine, decoder and simulation

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("invalid board size {width}x{height}: width and height must be greater than zero")]
    InvalidDimension { width: i64, height: i64 },
}

/// Why a pattern body could not be rasterized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("no supported pattern format found")]
    NoSupportedFormat,
    #[error("invalid RLE token: {0:?}")]
    InvalidToken(char),
    #[error("invalid RLE: missing terminator")]
    MissingTerminator,
    #[error("invalid RLE: run length overflows")]
    Overflow,
    #[error("invalid PlainText row: {0:?}")]
    InvalidRow(String),
    #[error("invalid Life 1.06 header")]
    InvalidHeader,
    #[error("invalid Life 1.06 coordinate: {0:?}")]
    InvalidCoordinate(String),
}

/// Failures that must leave the running simulation untouched.
///
/// Callers keep their current board and show the message as a notice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecoverableError {
    #[error("no supported pattern format found")]
    NotFound,
    #[error("pattern invalid: {0}")]
    PatternInvalid(#[source] PatternError),
    #[error("pattern fetch failed: {0}")]
    Fetch(String),
}

impl From<PatternError> for RecoverableError {
    fn from(err: PatternError) -> Self {
        match err {
            PatternError::NoSupportedFormat => Self::NotFound,
            other => Self::PatternInvalid(other),
        }
    }
}
