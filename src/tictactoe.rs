//! Tic-Tac-Toe game implementation

pub mod board;
pub mod game;
pub mod lines;
pub mod rules;

pub use board::{Action, BOARD_SIZE, Board, Cell, Player};
pub use game::{Game, GameResult, Move};
pub use lines::{LineAnalyzer, WINNING_LINES};
