//! Core domain types for tic-tac-toe.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{IllegalMoveReason, MoveError};
use crate::rules;

/// Number of cells on the board.
pub const CELL_COUNT: usize = 9;

/// A player's mark.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Mark {
    /// Mark X (always moves first).
    X,
    /// Mark O (moves second).
    O,
}

impl Mark {
    /// Returns the other mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a mark.
    Occupied(Mark),
}

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; CELL_COUNT],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; CELL_COUNT],
        }
    }

    /// Creates a board from squares in row-major order.
    pub fn from_squares(squares: [Square; CELL_COUNT]) -> Self {
        Self { squares }
    }

    /// Parses a board from nine cell characters.
    ///
    /// `X` and `O` (either case) are marks, `_`, `.` and `-` are empty.
    /// Whitespace and `|` separators are ignored. Returns `None` unless
    /// exactly nine cells are given.
    pub fn parse(layout: &str) -> Option<Self> {
        let mut squares = Vec::with_capacity(CELL_COUNT);
        for ch in layout.chars() {
            match ch {
                'X' | 'x' => squares.push(Square::Occupied(Mark::X)),
                'O' | 'o' => squares.push(Square::Occupied(Mark::O)),
                '_' | '.' | '-' => squares.push(Square::Empty),
                c if c.is_whitespace() || c == '|' => {}
                _ => return None,
            }
        }
        let squares: [Square; CELL_COUNT] = squares.try_into().ok()?;
        Some(Self { squares })
    }

    /// Gets the square at the given cell (0-8).
    pub fn get(&self, cell: usize) -> Option<Square> {
        self.squares.get(cell).copied()
    }

    /// Checks if a cell is on the board and empty.
    pub fn is_empty(&self, cell: usize) -> bool {
        matches!(self.get(cell), Some(Square::Empty))
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; CELL_COUNT] {
        &self.squares
    }

    /// Counts the squares holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.squares
            .iter()
            .filter(|&&s| s == Square::Occupied(mark))
            .count()
    }

    fn place(&mut self, cell: usize, mark: Mark) {
        self.squares[cell] = Square::Occupied(mark);
    }

    /// Formats the board as a human-readable string.
    ///
    /// Empty squares show their 1-based cell number.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.squares[pos] {
                    Square::Empty => (pos + 1).to_string(),
                    Square::Occupied(mark) => mark.to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// A board together with the mark whose turn it is.
///
/// X always moves first, so a reachable state has either as many X marks as
/// O marks (X to move) or exactly one more (O to move). States are only
/// advanced through [`GameState::apply_move`], which keeps that invariant
/// and never clears a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    to_move: Mark,
}

impl GameState {
    /// Creates a new game: empty board, X to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            to_move: Mark::X,
        }
    }

    /// Builds a state from an arbitrary board.
    ///
    /// The mark to move is derived from the mark counts. Returns `None` when
    /// the counts could not arise from alternating play starting with X.
    pub fn from_board(board: Board) -> Option<Self> {
        let xs = board.count(Mark::X);
        let os = board.count(Mark::O);
        let to_move = if xs == os {
            Mark::X
        } else if xs == os + 1 {
            Mark::O
        } else {
            return None;
        };
        Some(Self { board, to_move })
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the mark that plays next.
    pub fn to_move(&self) -> Mark {
        self.to_move
    }

    /// Returns every empty cell in ascending order.
    pub fn legal_moves(&self) -> Vec<usize> {
        rules::legal_moves(&self.board)
    }

    /// Returns the mark holding a complete line, if any.
    pub fn winner(&self) -> Option<Mark> {
        rules::check_winner(&self.board)
    }

    /// True when the game has a winner or no empty cells remain.
    pub fn is_terminal(&self) -> bool {
        rules::is_terminal(&self.board)
    }

    /// Places `mark` on `cell` and returns the resulting state.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::IllegalMove`] when the cell is outside 0-8, already
    /// occupied, the game is over, or it is not `mark`'s turn.
    #[instrument(skip(self), fields(to_move = %self.to_move))]
    pub fn apply_move(&self, cell: usize, mark: Mark) -> Result<Self, MoveError> {
        let reason = if cell >= CELL_COUNT {
            Some(IllegalMoveReason::OutOfRange)
        } else if !self.board.is_empty(cell) {
            Some(IllegalMoveReason::Occupied)
        } else if self.winner().is_some() {
            Some(IllegalMoveReason::GameOver)
        } else if mark != self.to_move {
            Some(IllegalMoveReason::WrongTurn)
        } else {
            None
        };

        match reason {
            Some(reason) => Err(MoveError::IllegalMove { cell, reason }),
            None => Ok(self.play(cell)),
        }
    }

    /// Plays the side to move on `cell` without validation.
    ///
    /// Callers must pass a cell from [`GameState::legal_moves`].
    pub(crate) fn play(&self, cell: usize) -> Self {
        let mut board = self.board;
        board.place(cell, self.to_move);
        Self {
            board,
            to_move: self.to_move.opponent(),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_is_empty_with_x_to_move() {
        let state = GameState::new();
        assert_eq!(state.to_move(), Mark::X);
        assert_eq!(state.legal_moves(), (0..9).collect::<Vec<_>>());
        assert!(!state.is_terminal());
    }

    #[test]
    fn test_apply_move_advances_turn() {
        let state = GameState::new().apply_move(4, Mark::X).unwrap();
        assert_eq!(state.board().get(4), Some(Square::Occupied(Mark::X)));
        assert_eq!(state.to_move(), Mark::O);
        assert_eq!(state.legal_moves().len(), 8);
    }

    #[test]
    fn test_apply_move_rejects_occupied_cell() {
        let state = GameState::new().apply_move(0, Mark::X).unwrap();
        let err = state.apply_move(0, Mark::O).unwrap_err();
        assert_eq!(
            err,
            MoveError::IllegalMove {
                cell: 0,
                reason: IllegalMoveReason::Occupied
            }
        );
    }

    #[test]
    fn test_apply_move_rejects_out_of_range() {
        let err = GameState::new().apply_move(9, Mark::X).unwrap_err();
        assert_eq!(
            err,
            MoveError::IllegalMove {
                cell: 9,
                reason: IllegalMoveReason::OutOfRange
            }
        );
    }

    #[test]
    fn test_apply_move_rejects_wrong_mark() {
        let err = GameState::new().apply_move(3, Mark::O).unwrap_err();
        assert_eq!(
            err,
            MoveError::IllegalMove {
                cell: 3,
                reason: IllegalMoveReason::WrongTurn
            }
        );
    }

    #[test]
    fn test_apply_move_rejects_after_win() {
        let board = Board::parse("XXX OO_ ___").unwrap();
        let state = GameState::from_board(board).unwrap();
        let err = state.apply_move(5, Mark::O).unwrap_err();
        assert!(matches!(
            err,
            MoveError::IllegalMove {
                reason: IllegalMoveReason::GameOver,
                ..
            }
        ));
    }

    #[test]
    fn test_from_board_derives_turn() {
        let state = GameState::from_board(Board::parse("X__ ___ ___").unwrap()).unwrap();
        assert_eq!(state.to_move(), Mark::O);
        let state = GameState::from_board(Board::parse("XO_ ___ ___").unwrap()).unwrap();
        assert_eq!(state.to_move(), Mark::X);
    }

    #[test]
    fn test_from_board_rejects_unreachable_counts() {
        assert!(GameState::from_board(Board::parse("XX_ ___ ___").unwrap()).is_none());
        assert!(GameState::from_board(Board::parse("O__ ___ ___").unwrap()).is_none());
    }

    #[test]
    fn test_parse_requires_nine_cells() {
        assert!(Board::parse("XO").is_none());
        assert!(Board::parse("XOX|OXO|XOX|X").is_none());
        assert!(Board::parse("XOZ ___ ___").is_none());
    }

    #[test]
    fn test_display_numbers_empty_cells() {
        let board = Board::parse("X__ _O_ ___").unwrap();
        assert_eq!(board.display(), "X|2|3\n-+-+-\n4|O|6\n-+-+-\n7|8|9");
    }
}
