// rle.rs - Run Length Encoded patterns ("x = 3, y = 3\nbo$2bo$3o!")

use crate::board::Board;
use crate::error::PatternError;

fn is_header(line: &str) -> bool {
    line.starts_with('x') && line.contains('=') && line.contains('y')
}

/// Header line plus the following non-blank lines, up to the one holding `!`.
pub(super) fn detect(lines: &[&str]) -> Option<String> {
    let start = lines.iter().position(|line| is_header(line))?;
    let mut collected = vec![lines[start]];
    for &line in &lines[start + 1..] {
        if line.is_empty() {
            break;
        }
        collected.push(line);
        if line.contains('!') {
            break;
        }
    }
    Some(collected.join("\n"))
}

pub(super) fn parse(body: &str, width: usize, height: usize) -> Result<Board, PatternError> {
    let mut board = Board::new(width, height);
    let (mut col, mut row) = (0usize, 0usize);
    let mut run: i64 = 0;

    // header carries nothing the board needs
    for ch in body.lines().skip(1).flat_map(|line| line.trim().chars()) {
        match ch {
            '0'..='9' => {
                let digit = i64::from(ch as u8 - b'0');
                run = run
                    .checked_mul(10)
                    .and_then(|n| n.checked_add(digit))
                    .ok_or(PatternError::Overflow)?;
            }
            'b' | 'o' => {
                let count = run_length(run);
                if ch == 'o' {
                    let end = col.saturating_add(count).min(width);
                    for x in col..end {
                        board.set_alive(x as i64, row as i64, true);
                    }
                }
                col = col.saturating_add(count);
                run = 0;
            }
            '$' => {
                row = row.saturating_add(run_length(run));
                col = 0;
                run = 0;
            }
            '!' => return Ok(board),
            other => return Err(PatternError::InvalidToken(other)),
        }
    }
    Err(PatternError::MissingTerminator)
}

// A missing or zero count means one.
fn run_length(run: i64) -> usize {
    usize::try_from(run.max(1)).unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_stops_at_terminator_line() {
        let lines = ["#N Glider", "x = 3, y = 3", "bo$2bo$", "3o!", "trailing"];
        assert_eq!(detect(&lines).as_deref(), Some("x = 3, y = 3\nbo$2bo$\n3o!"));
    }

    #[test]
    fn detect_stops_at_blank_line() {
        let lines = ["x = 2, y = 1", "2o", "", "!"];
        assert_eq!(detect(&lines).as_deref(), Some("x = 2, y = 1\n2o"));
    }

    #[test]
    fn glider_lands_at_expected_offsets() {
        let board = parse("x = 3, y = 3\nbo$2bo$3o!", 3, 3).unwrap();
        assert_eq!(board.population(), 5);
        assert_eq!(
            board.live_cells().collect::<Vec<_>>(),
            vec![(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)]
        );
    }

    #[test]
    fn body_may_span_lines_and_skip_rows() {
        let board = parse("x = 2, y = 4\n2o2$\no!", 4, 4).unwrap();
        assert_eq!(board.live_cells().collect::<Vec<_>>(), vec![(0, 0), (1, 0), (0, 2)]);
    }

    #[test]
    fn cells_outside_the_board_are_dropped() {
        let board = parse("x = 10, y = 1\n4b6o!", 6, 1).unwrap();
        assert_eq!(board.live_cells().collect::<Vec<_>>(), vec![(4, 0), (5, 0)]);
    }

    #[test]
    fn huge_runs_do_not_loop_forever() {
        let board = parse("x = 1, y = 1\n9223372036854775807o!", 3, 3).unwrap();
        assert_eq!(board.population(), 3);
    }

    #[test]
    fn run_length_overflow_is_an_error() {
        assert_eq!(
            parse("x = 1, y = 1\n9223372036854775808o!", 3, 3),
            Err(PatternError::Overflow)
        );
    }

    #[test]
    fn unknown_token_is_rejected() {
        assert_eq!(parse("x = 1, y = 1\n2z!", 3, 3), Err(PatternError::InvalidToken('z')));
    }

    #[test]
    fn missing_terminator_is_rejected() {
        assert_eq!(parse("x = 1, y = 1\n3o$", 3, 3), Err(PatternError::MissingTerminator));
        assert_eq!(parse("x = 1, y = 1", 3, 3), Err(PatternError::MissingTerminator));
    }
}
