//! High-level game management

use serde::{Deserialize, Serialize};

use super::{
    board::{Action, Board, Player},
    rules,
};
use crate::{Error, Result};

/// A move in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub action: Action,
    pub player: Player,
}

/// Outcome of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    Win(Player),
    Draw,
}

impl GameResult {
    /// Score from X's perspective
    pub fn utility(self) -> i8 {
        match self {
            GameResult::Win(Player::X) => 1,
            GameResult::Win(Player::O) => -1,
            GameResult::Draw => 0,
        }
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            GameResult::Win(player) => Some(player),
            GameResult::Draw => None,
        }
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::Win(player) => write!(f, "{player} wins"),
            GameResult::Draw => write!(f, "draw"),
        }
    }
}

/// A complete game with history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub moves: Vec<Move>,
    pub outcome: Option<GameResult>,
}

impl Game {
    /// Create a new game from the initial board
    pub fn new() -> Self {
        Game {
            moves: Vec::new(),
            outcome: None,
        }
    }

    /// Play a move for whichever player is to move
    pub fn play(&mut self, action: Action) -> Result<()> {
        if self.outcome.is_some() {
            return Err(Error::GameOver);
        }

        let current = self.current_state()?;
        let player = rules::active_player(&current);
        let next = rules::result(&current, action)?;

        self.moves.push(Move { action, player });
        self.outcome = rules::outcome(&next);

        Ok(())
    }

    /// Replay moves up to a given index (exclusive)
    ///
    /// # Errors
    ///
    /// Returns error if any move in the history is invalid for the state it
    /// was applied to. This indicates corrupted game data.
    fn replay_moves_until(&self, end_index: usize) -> Result<Board> {
        let mut board = Board::initial();
        for m in self.moves.iter().take(end_index) {
            board = board.apply(m.action, m.player)?;
        }
        Ok(board)
    }

    /// Get current board
    ///
    /// # Errors
    ///
    /// Returns error if the move history is corrupted.
    pub fn current_state(&self) -> Result<Board> {
        self.replay_moves_until(self.moves.len())
    }

    /// Get the sequence of boards, starting with the initial board
    ///
    /// # Errors
    ///
    /// Returns error if the move history is corrupted.
    pub fn state_sequence(&self) -> Result<Vec<Board>> {
        let mut board = Board::initial();
        let mut states = Vec::with_capacity(self.moves.len() + 1);
        states.push(board);

        for m in &self.moves {
            board = board.apply(m.action, m.player)?;
            states.push(board);
        }

        Ok(states)
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
