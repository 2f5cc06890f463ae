//! Move errors.

/// Why a move was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum IllegalMoveReason {
    /// The cell index is outside 0-8.
    #[display("cell is out of range")]
    OutOfRange,
    /// The cell already holds a mark.
    #[display("cell is already occupied")]
    Occupied,
    /// Someone has already won.
    #[display("game is already over")]
    GameOver,
    /// The mark placed is not the mark to move.
    #[display("it is not that mark's turn")]
    WrongTurn,
}

/// Error that can occur when validating or choosing a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The move targets a cell that cannot be played.
    #[display("Illegal move at cell {cell}: {reason}")]
    IllegalMove {
        /// Requested cell index.
        cell: usize,
        /// Why it was rejected.
        reason: IllegalMoveReason,
    },

    /// A move was requested from a finished game.
    ///
    /// Callers check [`GameState::is_terminal`](crate::GameState::is_terminal)
    /// before asking for a move, so this signals an ordering bug.
    #[display("No legal move: the game is already over")]
    NoLegalMove,
}

impl std::error::Error for MoveError {}
