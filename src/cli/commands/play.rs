//! Play command - a human against the engine on the terminal

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Parser;

use crate::{
    Error,
    agents::{Agent, MinimaxAgent},
    arena::play_game,
    cli::output::{describe_outcome, render_board},
    tictactoe::{Action, Board, Player, rules},
};

#[derive(Parser, Debug)]
#[command(about = "Play a game against the engine")]
pub struct PlayArgs {
    /// Which side you play (`x` moves first)
    #[arg(long, default_value = "x")]
    pub human: Player,
}

/// Reads moves as `row,col` lines and echoes the board before each prompt
pub struct HumanAgent<R, W> {
    name: String,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> HumanAgent<R, W> {
    pub fn new(name: impl Into<String>, input: R, output: W) -> Self {
        Self {
            name: name.into(),
            input,
            output,
        }
    }
}

impl<R: BufRead, W: Write> Agent for HumanAgent<R, W> {
    fn select_action(&mut self, board: &Board) -> crate::Result<Action> {
        if rules::is_terminal(board) {
            return Err(Error::NoValidMoves);
        }

        writeln!(self.output, "\n{}", render_board(board))?;
        loop {
            write!(
                self.output,
                "{} to move, enter row,col: ",
                rules::active_player(board)
            )?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(Error::Io {
                    operation: "read move".to_string(),
                    source: io::Error::from(io::ErrorKind::UnexpectedEof),
                });
            }

            match line.trim().parse::<Action>() {
                Ok(action) if board.get(action) == crate::Cell::Empty => return Ok(action),
                Ok(action) => writeln!(self.output, "Cell {action} is taken.")?,
                Err(err) => writeln!(self.output, "{err}")?,
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let stdin = io::stdin();
    let mut human = HumanAgent::new("You", stdin.lock(), io::stdout());
    let mut engine = MinimaxAgent::new("Engine");

    let game = match args.human {
        Player::X => play_game(&mut human, &mut engine)?,
        Player::O => play_game(&mut engine, &mut human)?,
    };

    let last = game.current_state()?;
    println!("\n{}", render_board(&last));
    let verdict = match game.outcome.and_then(|o| o.winner()) {
        Some(winner) if winner == args.human => "You win!",
        Some(_) => "The engine wins.",
        None => "Draw.",
    };
    println!(
        "{} ({})",
        verdict,
        describe_outcome(&last).unwrap_or_default()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::tictactoe::GameResult;

    #[test]
    fn test_human_agent_retries_bad_input() {
        let board = Board::from_string("X...O....").unwrap();
        let input = Cursor::new("9,9\nnonsense\n0,0\n2,2\n");
        let mut output = Vec::new();

        let action = HumanAgent::new("h", input, &mut output)
            .select_action(&board)
            .unwrap();
        assert_eq!(action, Action::new(2, 2).unwrap());

        let printed = String::from_utf8(output).unwrap();
        assert!(printed.contains("out of range"));
        assert!(printed.contains("invalid action 'nonsense'"));
        assert!(printed.contains("Cell (0, 0) is taken."));
    }

    #[test]
    fn test_human_agent_eof_is_an_error() {
        let board = Board::initial();
        let err = HumanAgent::new("h", Cursor::new(""), Vec::new())
            .select_action(&board)
            .unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_scripted_human_cannot_beat_engine() {
        // Corners first; the engine answers every threat.
        let script = "0,0\n0,2\n2,0\n2,2\n1,0\n1,2\n0,1\n2,1\n1,1\n";
        let mut human = HumanAgent::new("h", Cursor::new(script), Vec::new());
        let mut engine = MinimaxAgent::new("engine");

        // Lines naming cells the engine already took are skipped, and every
        // cell appears once, so the script never runs dry.
        let game = play_game(&mut human, &mut engine).unwrap();
        assert_ne!(game.outcome, Some(GameResult::Win(Player::X)));
    }
}
