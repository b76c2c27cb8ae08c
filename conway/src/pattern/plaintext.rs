// plaintext.rs - PlainText patterns (rows of '.' and 'O', '!' comments)

use crate::board::Board;
use crate::error::PatternError;

fn is_row(line: &str) -> bool {
    !line.is_empty() && line.chars().all(|ch| ch == '.' || ch == 'O')
}

pub(super) fn detect(lines: &[&str]) -> Option<String> {
    let mut collected: Vec<&str> = Vec::new();
    for &line in lines {
        let collecting = !collected.is_empty();
        if line.starts_with('!') {
            if collecting {
                break;
            }
            continue;
        }
        if is_row(line) {
            collected.push(line);
        } else if collecting {
            break;
        }
    }
    (!collected.is_empty()).then(|| collected.join("\n"))
}

pub(super) fn parse(body: &str, width: usize, height: usize) -> Result<Board, PatternError> {
    let mut board = Board::new(width, height);
    for (y, line) in body.lines().enumerate() {
        if !is_row(line) {
            return Err(PatternError::InvalidRow(line.to_string()));
        }
        for (x, _) in line.char_indices().filter(|&(_, ch)| ch == 'O') {
            board.set_alive(x as i64, y as i64, true);
        }
    }
    Ok(board)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_comments_are_skipped() {
        let lines = ["!Name: Blinker", "!", "OOO", "", "..."];
        assert_eq!(detect(&lines).as_deref(), Some("OOO"));
    }

    #[test]
    fn comment_after_rows_ends_the_block() {
        let lines = [".O", "O.", "!trailing", "OO"];
        assert_eq!(detect(&lines).as_deref(), Some(".O\nO."));
    }

    #[test]
    fn prose_is_not_a_row() {
        assert_eq!(detect(&["Oops.", "", "O.O!"]), None);
    }

    #[test]
    fn marks_each_o() {
        let board = parse(".O.\nO.O", 4, 4).unwrap();
        assert_eq!(board.live_cells().collect::<Vec<_>>(), vec![(1, 0), (0, 1), (2, 1)]);
    }

    #[test]
    fn rows_beyond_the_board_are_ignored() {
        let board = parse("OOOO\nOOOO", 2, 1).unwrap();
        assert_eq!(board.population(), 2);
    }

    #[test]
    fn malformed_row_is_rejected() {
        assert_eq!(parse(".O.\n.X.", 3, 3), Err(PatternError::InvalidRow(".X.".into())));
    }
}
