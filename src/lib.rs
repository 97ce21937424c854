//! Minimax tic-tac-toe engine
//!
//! This crate provides:
//! - An immutable 3x3 board with coordinate-based actions
//! - Pure rule functions (turn order, wins, terminal utility)
//! - An exhaustive minimax search with a reproducible tie-break
//! - Agents and an arena for playing engine games
//! - A command-line front end (`tictactoe` binary)

pub mod agents;
pub mod arena;
pub mod cli;
pub mod error;
pub mod search;
pub mod tictactoe;

pub use agents::{Agent, MinimaxAgent, RandomAgent};
pub use arena::{MatchSummary, play_game, run_match};
pub use error::{Error, Result};
pub use search::{
    Minimax, best_action, evaluate_actions, max_value, min_value, optimal_action,
};
pub use tictactoe::{Action, Board, Cell, Game, GameResult, Move, Player};
