//! Human player reading cells from a text stream.

use std::io::{BufRead, Write};

use anyhow::Result;
use arcade_tictactoe::GameState;

use super::Player;

/// Reads cells 1-9 line by line; `q` or end of input abandons the game.
///
/// The board is printed before every prompt. Input that is not a free cell
/// is reported and asked for again.
#[derive(Debug)]
pub struct ConsolePlayer<I, O> {
    name: String,
    input: I,
    output: O,
}

impl<I: BufRead, O: Write> ConsolePlayer<I, O> {
    /// Creates a console player.
    pub fn new(name: impl Into<String>, input: I, output: O) -> Self {
        Self {
            name: name.into(),
            input,
            output,
        }
    }

    /// Returns the output stream.
    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }
}

impl<I: BufRead, O: Write> Player for ConsolePlayer<I, O> {
    fn get_move(&mut self, state: &GameState) -> Result<Option<usize>> {
        let legal = state.legal_moves();
        writeln!(self.output, "\n{}", state.board().display())?;

        loop {
            write!(
                self.output,
                "{} ({}), choose a cell 1-9 or q to quit: ",
                self.name,
                state.to_move()
            )?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            let line = line.trim();
            if line.eq_ignore_ascii_case("q") {
                return Ok(None);
            }

            match line.parse::<usize>() {
                Ok(n) if (1..=9).contains(&n) && legal.contains(&(n - 1)) => {
                    return Ok(Some(n - 1));
                }
                Ok(n) if (1..=9).contains(&n) => writeln!(self.output, "Cell {} is taken.", n)?,
                _ => writeln!(self.output, "Enter a number from 1 to 9.")?,
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcade_tictactoe::Mark;

    #[test]
    fn test_reprompts_until_free_cell() {
        let state = GameState::new().apply_move(0, Mark::X).unwrap();
        let input = "abc\n1\n10\n5\n".as_bytes();
        let mut player = ConsolePlayer::new("Amy", input, Vec::new());

        assert_eq!(player.get_move(&state).unwrap(), Some(4));
        let printed = String::from_utf8(player.output_mut().clone()).unwrap();
        assert!(printed.contains("Cell 1 is taken."));
        assert_eq!(printed.matches("Enter a number from 1 to 9.").count(), 2);
    }

    #[test]
    fn test_quit_and_end_of_input_cancel() {
        let state = GameState::new();
        let mut quitting = ConsolePlayer::new("Amy", "Q\n".as_bytes(), Vec::new());
        assert_eq!(quitting.get_move(&state).unwrap(), None);

        let mut closed = ConsolePlayer::new("Amy", "".as_bytes(), Vec::new());
        assert_eq!(closed.get_move(&state).unwrap(), None);
    }
}
