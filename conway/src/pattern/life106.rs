// life106.rs - Life 1.06 patterns (header line, then one "x y" pair per line)

use crate::board::Board;
use crate::error::PatternError;

const HEADER: &str = "#Life 1.06";

pub(super) fn detect(lines: &[&str]) -> Option<String> {
    let start = lines.iter().position(|&line| line == HEADER)?;
    let mut collected = vec![HEADER];
    collected.extend(lines[start + 1..].iter().copied().take_while(|line| !line.is_empty()));
    Some(collected.join("\n"))
}

pub(super) fn parse(body: &str, width: usize, height: usize) -> Result<Board, PatternError> {
    let mut lines = body.lines();
    if lines.next().map(str::trim) != Some(HEADER) {
        return Err(PatternError::InvalidHeader);
    }

    let mut board = Board::new(width, height);
    for line in lines {
        let (x, y) = coordinate(line).ok_or_else(|| PatternError::InvalidCoordinate(line.to_string()))?;
        board.set_alive(x, y, true);
    }
    Ok(board)
}

fn coordinate(line: &str) -> Option<(i64, i64)> {
    let mut fields = line.split_whitespace();
    let x = fields.next()?.parse().ok()?;
    let y = fields.next()?.parse().ok()?;
    fields.next().is_none().then_some((x, y))
}
