//! Win detection logic for tic-tac-toe.

use crate::{Board, Mark, Square};

/// The eight winning lines: three rows, three columns, two diagonals.
pub const LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Checks if there is a winner on the board.
///
/// Returns `Some(mark)` if a mark fills one of the [`LINES`],
/// `None` otherwise.
pub fn check_winner(board: &Board) -> Option<Mark> {
    let squares = board.squares();
    for [a, b, c] in LINES {
        if let Square::Occupied(mark) = squares[a]
            && squares[b] == squares[a]
            && squares[c] == squares[a]
        {
            return Some(mark);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(layout: &str) -> Board {
        Board::parse(layout).unwrap()
    }

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(check_winner(&Board::new()), None);
    }

    #[test]
    fn test_winner_top_row() {
        assert_eq!(check_winner(&board("XXX OO_ ___")), Some(Mark::X));
    }

    #[test]
    fn test_winner_column() {
        assert_eq!(check_winner(&board("XO_ XO_ _OX")), Some(Mark::O));
    }

    #[test]
    fn test_winner_diagonal() {
        assert_eq!(check_winner(&board("O_X _OX X_O")), Some(Mark::O));
        assert_eq!(check_winner(&board("O_X _XO X__")), Some(Mark::X));
    }

    #[test]
    fn test_no_winner_incomplete() {
        assert_eq!(check_winner(&board("XX_ O__ O__")), None);
    }
}
