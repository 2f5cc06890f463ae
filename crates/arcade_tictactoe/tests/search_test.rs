//! Tests for minimax search and difficulty blending.

use std::collections::{HashMap, HashSet};

use arcade_tictactoe::{
    Board, DifficultyTier, GameState, LOSS_VALUE, Mark, WIN_VALUE, best_move, select_move,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn state(layout: &str) -> GameState {
    GameState::from_board(Board::parse(layout).expect("Bad layout")).expect("Unreachable layout")
}

fn play(state: &GameState, cell: usize) -> GameState {
    state
        .apply_move(cell, state.to_move())
        .expect("Legal move rejected")
}

/// Memoized game value from `maximizing`'s point of view.
fn reference_value(
    state: &GameState,
    maximizing: Mark,
    memo: &mut HashMap<(GameState, Mark), i32>,
) -> i32 {
    if let Some(value) = memo.get(&(*state, maximizing)) {
        return *value;
    }
    let value = match state.winner() {
        Some(mark) if mark == maximizing => WIN_VALUE,
        Some(_) => LOSS_VALUE,
        None if state.is_terminal() => 0,
        None => {
            let values = state
                .legal_moves()
                .into_iter()
                .map(|cell| reference_value(&play(state, cell), maximizing, memo));
            if state.to_move() == maximizing {
                values.max().expect("Non-terminal state has moves")
            } else {
                values.min().expect("Non-terminal state has moves")
            }
        }
    };
    memo.insert((*state, maximizing), value);
    value
}

fn reachable_states() -> Vec<GameState> {
    let mut seen = HashSet::new();
    let mut stack = vec![GameState::new()];
    while let Some(state) = stack.pop() {
        if state.is_terminal() || !seen.insert(state) {
            continue;
        }
        for cell in state.legal_moves() {
            stack.push(play(&state, cell));
        }
    }
    seen.into_iter().collect()
}

#[test]
fn test_empty_board_is_a_draw_and_opens_in_first_cell() {
    let result = best_move(&GameState::new(), Mark::X);
    assert_eq!(result.value, 0);
    assert_eq!(result.cell, Some(0));
}

#[test]
fn test_blocks_open_two_in_a_row() {
    // X holds 0 and 3, O holds the centre: only 6 stops the column.
    let result = best_move(&state("X__ XO_ ___"), Mark::O);
    assert_eq!(result.value, 0);
    assert_eq!(result.cell, Some(6));

    // X holds 0 and 1: only 2 stops the top row.
    let result = best_move(&state("XX_ _O_ ___"), Mark::O);
    assert_eq!(result.cell, Some(2));
}

#[test]
fn test_winning_line_is_terminal() {
    // Main diagonal 0-4-8.
    let won = state("XOX OXO __X");
    assert_eq!(won.winner(), Some(Mark::X));
    assert!(won.is_terminal());
}

#[test]
fn test_board_without_complete_line_has_no_winner() {
    let open = state("XOX XOO __X");
    assert_eq!(open.winner(), None);
    assert!(!open.is_terminal());
}

#[test]
fn test_full_board_without_line_is_draw() {
    let drawn = state("XOX XOO OXX");
    assert_eq!(drawn.winner(), None);
    assert!(drawn.legal_moves().is_empty());
    assert!(drawn.is_terminal());
}

#[test]
fn test_best_move_is_deterministic() {
    let s = state("X__ _O_ __X");
    let first = best_move(&s, Mark::O);
    for _ in 0..5 {
        assert_eq!(best_move(&s, Mark::O), first);
    }
}

#[test]
fn test_best_move_is_optimal_in_every_reachable_state() {
    let mut memo = HashMap::new();
    let states = reachable_states();
    assert_eq!(states.len(), 4520);

    for s in states {
        let mover = s.to_move();
        let result = best_move(&s, mover);
        let expected = reference_value(&s, mover, &mut memo);
        assert_eq!(result.value, expected, "Wrong value for {s:?}");

        let cell = result.cell.expect("Non-terminal state must yield a move");
        assert!(s.board().is_empty(cell));
        let achieved = reference_value(&play(&s, cell), mover, &mut memo);
        assert_eq!(achieved, expected, "Suboptimal move {cell} for {s:?}");

        // Lowest-index tie-break.
        let first_optimal = s
            .legal_moves()
            .into_iter()
            .find(|&c| reference_value(&play(&s, c), mover, &mut memo) == expected);
        assert_eq!(Some(cell), first_optimal);
    }
}

/// Plays every possible opponent line against the search and counts losses.
fn count_search_losses(state: &GameState, ai: Mark) -> usize {
    if state.is_terminal() {
        return usize::from(state.winner() == Some(ai.opponent()));
    }
    if state.to_move() == ai {
        let cell = best_move(state, ai).cell.expect("Search returned no move");
        return count_search_losses(&play(state, cell), ai);
    }
    state
        .legal_moves()
        .into_iter()
        .map(|cell| count_search_losses(&play(state, cell), ai))
        .sum()
}

#[test]
fn test_full_search_never_loses_as_o() {
    assert_eq!(count_search_losses(&GameState::new(), Mark::O), 0);
}

#[test]
fn test_full_search_never_loses_as_x() {
    assert_eq!(count_search_losses(&GameState::new(), Mark::X), 0);
}

#[test]
fn test_hard_tier_always_matches_search() {
    let mut rng = StdRng::seed_from_u64(1);
    for layout in ["X__ _O_ __X", "XX_ _O_ ___", "XO_ _X_ ___"] {
        let s = state(layout);
        let expected = best_move(&s, s.to_move()).cell;
        for _ in 0..10 {
            let cell = select_move(&s, &DifficultyTier::HARD, &mut rng).expect("Select failed");
            assert_eq!(Some(cell), expected);
        }
    }
}

#[test]
fn test_medium_tier_blends_search_and_random() {
    // Only 2 stops the top row; six cells are open.
    let s = state("XX_ _O_ ___");
    let mut rng = StdRng::seed_from_u64(2024);
    let trials = 4000;
    let blocks = (0..trials)
        .filter(|_| select_move(&s, &DifficultyTier::MEDIUM, &mut rng).expect("Select failed") == 2)
        .count();

    // 0.7 from search plus 0.3 / 6 from random picks.
    let frequency = blocks as f64 / trials as f64;
    assert!(
        (frequency - 0.75).abs() < 0.05,
        "Block chosen {frequency:.3} of the time"
    );
}

#[test]
fn test_random_tier_covers_every_legal_move() {
    let s = state("X__ _O_ ___");
    let tier = DifficultyTier::new("Random", 0.0, 1);
    let mut rng = StdRng::seed_from_u64(99);
    let mut chosen = HashSet::new();
    for _ in 0..500 {
        chosen.insert(select_move(&s, &tier, &mut rng).expect("Select failed"));
    }
    let legal: HashSet<usize> = s.legal_moves().into_iter().collect();
    assert_eq!(chosen, legal);
}
