//! Exhaustive minimax search.
//!
//! The board is small enough that plain depth-first recursion over every
//! continuation finishes well inside interactive latency, so there is no
//! pruning and no transposition table. Values are not scaled by depth: a win
//! in five is worth the same as a win in one. Rewarding quick wins is the
//! score calculator's job.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{GameState, Mark};

/// Value of a position the maximizing mark wins.
pub const WIN_VALUE: i32 = 10;
/// Value of a drawn position.
pub const DRAW_VALUE: i32 = 0;
/// Value of a position the maximizing mark loses.
pub const LOSS_VALUE: i32 = -10;

/// Outcome of a search: the game-theoretic value and the move achieving it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchResult {
    /// One of [`WIN_VALUE`], [`DRAW_VALUE`], [`LOSS_VALUE`], from the
    /// maximizing mark's point of view.
    pub value: i32,
    /// Chosen cell, `None` when the searched state was terminal.
    pub cell: Option<usize>,
}

impl SearchResult {
    fn terminal(value: i32) -> Self {
        Self { value, cell: None }
    }
}

/// Finds the best move for the side to move, scored for `maximizing`.
///
/// When the side to move is `maximizing` the highest value is chosen,
/// otherwise the lowest. Among equally valued moves the lowest cell index
/// wins, so results are fully deterministic.
///
/// On a non-terminal state the returned cell is always legal.
#[instrument(skip(state), fields(to_move = %state.to_move()))]
pub fn best_move(state: &GameState, maximizing: Mark) -> SearchResult {
    let result = minimax(state, maximizing);
    debug!(value = result.value, cell = ?result.cell, "Search complete");
    result
}

fn minimax(state: &GameState, maximizing: Mark) -> SearchResult {
    if let Some(winner) = state.winner() {
        return SearchResult::terminal(if winner == maximizing {
            WIN_VALUE
        } else {
            LOSS_VALUE
        });
    }

    let moves = state.legal_moves();
    if moves.is_empty() {
        return SearchResult::terminal(DRAW_VALUE);
    }

    let maximize = state.to_move() == maximizing;
    let mut best: Option<(i32, usize)> = None;

    // Ascending order plus strict comparison keeps the first of equal moves.
    for cell in moves {
        let value = minimax(&state.play(cell), maximizing).value;
        let improves = match best {
            None => true,
            Some((best_value, _)) if maximize => value > best_value,
            Some((best_value, _)) => value < best_value,
        };
        if improves {
            best = Some((value, cell));
        }
    }

    match best {
        Some((value, cell)) => SearchResult {
            value,
            cell: Some(cell),
        },
        None => SearchResult::terminal(DRAW_VALUE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Board;

    fn state(layout: &str) -> GameState {
        GameState::from_board(Board::parse(layout).unwrap()).unwrap()
    }

    #[test]
    fn test_terminal_state_has_no_move() {
        let won = state("XXX OO_ ___");
        assert_eq!(best_move(&won, Mark::X), SearchResult::terminal(WIN_VALUE));
        assert_eq!(best_move(&won, Mark::O), SearchResult::terminal(LOSS_VALUE));

        let drawn = state("XOX OXX OXO");
        assert_eq!(best_move(&drawn, Mark::O), SearchResult::terminal(DRAW_VALUE));
    }

    #[test]
    fn test_takes_immediate_win() {
        // O to move with 3 and 4 held; 5 completes the middle row. Blocking
        // at 2 only draws.
        let result = best_move(&state("XX_ OO_ X__"), Mark::O);
        assert_eq!(result.value, WIN_VALUE);
        assert_eq!(result.cell, Some(5));
    }

    #[test]
    fn test_value_is_from_maximizing_perspective() {
        let s = state("XX_ OO_ X__");
        assert_eq!(best_move(&s, Mark::O).value, WIN_VALUE);
        assert_eq!(best_move(&s, Mark::X).value, LOSS_VALUE);
    }
}
