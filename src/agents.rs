//! Agent port and its adapters
//!
//! An [`Agent`] picks an action for whichever player is to move. The arena
//! and the CLI drive games through this trait, so the engine, a random
//! baseline and a human at the terminal are interchangeable.

use rand::{Rng, SeedableRng, random, rngs::StdRng};
use tracing::trace;

use crate::{
    Error, Result,
    search::Minimax,
    tictactoe::{Action, Board, rules},
};

/// Unified interface for anything that can choose a move
pub trait Agent {
    /// Select an action for the player to move on `board`.
    ///
    /// # Errors
    ///
    /// Returns `NoValidMoves` if the board is terminal.
    fn select_action(&mut self, board: &Board) -> Result<Action>;

    /// Display name used in logs and summaries
    fn name(&self) -> &str;
}

/// Plays the minimax-optimal action
#[derive(Debug)]
pub struct MinimaxAgent {
    name: String,
    search: Minimax,
}

impl MinimaxAgent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            search: Minimax::new(),
        }
    }

    /// Total positions searched across every move this agent has made
    pub fn nodes_visited(&self) -> u64 {
        self.search.nodes_visited()
    }
}

impl Agent for MinimaxAgent {
    fn select_action(&mut self, board: &Board) -> Result<Action> {
        let action = self
            .search
            .optimal_action(board)
            .ok_or(Error::NoValidMoves)?;
        trace!(agent = %self.name, %action, "minimax move");
        Ok(action)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Uniform random baseline
#[derive(Debug)]
pub struct RandomAgent {
    name: String,
    rng: StdRng,
}

impl RandomAgent {
    /// Create a random agent seeded from entropy
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_seed(name, random())
    }

    /// Create a random agent with a deterministic seed
    pub fn with_seed(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn select_action(&mut self, board: &Board) -> Result<Action> {
        if rules::is_terminal(board) {
            return Err(Error::NoValidMoves);
        }

        // Sort first so a given seed always yields the same game.
        let mut actions: Vec<Action> = rules::actions(board).into_iter().collect();
        actions.sort_unstable();
        let action = actions[self.rng.random_range(0..actions.len())];
        trace!(agent = %self.name, %action, "random move");
        Ok(action)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
