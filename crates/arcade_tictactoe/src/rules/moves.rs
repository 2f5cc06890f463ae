//! Move enumeration and terminal detection.

use super::{check_winner, is_full};
use crate::{Board, Square};

/// Returns every empty cell in ascending index order.
///
/// Empty exactly when the board is full.
pub fn legal_moves(board: &Board) -> Vec<usize> {
    board
        .squares()
        .iter()
        .enumerate()
        .filter_map(|(cell, square)| (*square == Square::Empty).then_some(cell))
        .collect()
}

/// True when someone has won or no empty cells remain.
pub fn is_terminal(board: &Board) -> bool {
    check_winner(board).is_some() || is_full(board)
}
