//! Playing games between agents

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    Result,
    agents::Agent,
    tictactoe::{Game, GameResult, Player, rules},
};

/// Play one game from the empty board, `x` moving first.
///
/// # Examples
///
/// ```
/// use tictactoe_minimax::{GameResult, MinimaxAgent, play_game};
///
/// let mut x = MinimaxAgent::new("X");
/// let mut o = MinimaxAgent::new("O");
/// let game = play_game(&mut x, &mut o).unwrap();
/// assert_eq!(game.outcome, Some(GameResult::Draw));
/// ```
pub fn play_game(x: &mut dyn Agent, o: &mut dyn Agent) -> Result<Game> {
    let mut game = Game::new();
    let mut board = game.current_state()?;

    while !game.is_over() {
        let action = match rules::active_player(&board) {
            Player::X => x.select_action(&board)?,
            Player::O => o.select_action(&board)?,
        };
        game.play(action)?;
        board = rules::result(&board, action)?;
    }

    debug!(
        x = x.name(),
        o = o.name(),
        moves = game.moves.len(),
        outcome = ?game.outcome,
        "game finished"
    );
    Ok(game)
}

/// Tally of a series of games
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub x_agent: String,
    pub o_agent: String,
    pub games: usize,
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
}

impl MatchSummary {
    fn record(&mut self, outcome: GameResult) {
        self.games += 1;
        match outcome {
            GameResult::Win(Player::X) => self.x_wins += 1,
            GameResult::Win(Player::O) => self.o_wins += 1,
            GameResult::Draw => self.draws += 1,
        }
    }

    /// Fraction of games that ended in a draw
    pub fn draw_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.draws as f64 / self.games as f64
        }
    }
}

/// Play `games` games with the same seating, calling `on_game` after each one.
pub fn run_match(
    x: &mut dyn Agent,
    o: &mut dyn Agent,
    games: usize,
    mut on_game: impl FnMut(&Game),
) -> Result<MatchSummary> {
    let mut summary = MatchSummary {
        x_agent: x.name().to_string(),
        o_agent: o.name().to_string(),
        ..MatchSummary::default()
    };

    for _ in 0..games {
        let game = play_game(x, o)?;
        if let Some(outcome) = game.outcome {
            summary.record(outcome);
        }
        on_game(&game);
    }

    info!(
        x = %summary.x_agent,
        o = %summary.o_agent,
        games = summary.games,
        x_wins = summary.x_wins,
        o_wins = summary.o_wins,
        draws = summary.draws,
        "match finished"
    );
    Ok(summary)
}
