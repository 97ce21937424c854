//! Game rules as pure functions over a [`Board`]
//!
//! Nothing here holds state: turn order, wins and utility are all derived
//! from the marks on the board.

use super::{Action, Board, GameResult, LineAnalyzer, Player};
use crate::{Error, Result};

/// The player to move: X when both sides have placed the same number of marks.
///
/// # Examples
///
/// ```
/// use tictactoe_minimax::{Board, Player, tictactoe::rules};
///
/// assert_eq!(rules::active_player(&Board::initial()), Player::X);
/// let board = Board::from_string("X........").unwrap();
/// assert_eq!(rules::active_player(&board), Player::O);
/// ```
pub fn active_player(board: &Board) -> Player {
    if board.count(Player::X) == board.count(Player::O) {
        Player::X
    } else {
        Player::O
    }
}

/// The legal actions on this board (every empty cell), in no particular order
pub fn actions(board: &Board) -> std::collections::HashSet<Action> {
    board.legal_actions()
}

/// The board after the active player marks `action`.
///
/// # Errors
///
/// Returns `IllegalMove` if the cell is already occupied.
pub fn result(board: &Board, action: Action) -> Result<Board> {
    board.apply(action, active_player(board))
}

/// True when any row, column or diagonal is entirely `player`'s marks
pub fn is_win(board: &Board, player: Player) -> bool {
    LineAnalyzer::has_won(board.cells(), player)
}

/// The winner, checking X before O
pub fn winner(board: &Board) -> Option<Player> {
    if is_win(board, Player::X) {
        Some(Player::X)
    } else if is_win(board, Player::O) {
        Some(Player::O)
    } else {
        None
    }
}

pub fn is_full(board: &Board) -> bool {
    board.is_full()
}

/// True once somebody has won or no empty cell remains
pub fn is_terminal(board: &Board) -> bool {
    winner(board).is_some() || is_full(board)
}

/// The final result of a terminal board, `None` while the game is in progress
pub fn outcome(board: &Board) -> Option<GameResult> {
    match winner(board) {
        Some(player) => Some(GameResult::Win(player)),
        None if is_full(board) => Some(GameResult::Draw),
        None => None,
    }
}

/// Terminal score from X's perspective: +1, -1 or 0.
///
/// # Errors
///
/// Returns `NotTerminal` when the game is still in progress.
pub fn utility(board: &Board) -> Result<i8> {
    outcome(board)
        .map(GameResult::utility)
        .ok_or(Error::NotTerminal)
}
