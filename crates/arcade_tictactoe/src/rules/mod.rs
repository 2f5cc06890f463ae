//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](crate::Board). Rules are kept apart from
//! board storage so the search can evaluate positions without a game wrapper.

mod draw;
mod moves;
mod win;

pub use draw::is_full;
pub use moves::{is_terminal, legal_moves};
pub use win::{LINES, check_winner};
