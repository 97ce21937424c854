//! Exhaustive minimax search
//!
//! Every legal continuation is explored down to a terminal board: no pruning,
//! no transposition table. The tree from the empty board is small enough that
//! full enumeration finishes in well under a second.
//!
//! When several actions share the best value the engine resolves the tie by
//! coordinate: X picks the largest `(row, col)`, O the smallest.

use tracing::{debug, instrument};

use crate::tictactoe::{Action, Board, Player, rules};

/// Minimax searcher that counts the positions it visits.
#[derive(Debug, Default)]
pub struct Minimax {
    nodes_visited: u64,
}

impl Minimax {
    pub fn new() -> Self {
        Self::default()
    }

    /// Positions visited since construction (terminal leaves included)
    pub fn nodes_visited(&self) -> u64 {
        self.nodes_visited
    }

    /// Successors of a non-terminal board in `(row, col)` order, paired with
    /// the action leading to them.
    fn successors(board: &Board) -> impl Iterator<Item = (Action, Board)> + '_ {
        board.children(rules::active_player(board))
    }

    /// Best value X can force from this board.
    pub fn max_value(&mut self, board: &Board) -> i8 {
        self.nodes_visited += 1;
        if let Some(result) = rules::outcome(board) {
            return result.utility();
        }

        let mut best = i8::MIN;
        for (_, next) in Self::successors(board) {
            best = best.max(self.min_value(&next));
        }
        best
    }

    /// Best value O can force from this board.
    pub fn min_value(&mut self, board: &Board) -> i8 {
        self.nodes_visited += 1;
        if let Some(result) = rules::outcome(board) {
            return result.utility();
        }

        let mut best = i8::MAX;
        for (_, next) in Self::successors(board) {
            best = best.min(self.max_value(&next));
        }
        best
    }

    /// Every legal action with the value the opponent can hold it to,
    /// sorted by `(row, col)`. Empty for terminal boards.
    pub fn evaluate_actions(&mut self, board: &Board) -> Vec<(Action, i8)> {
        if rules::is_terminal(board) {
            return Vec::new();
        }

        let player = rules::active_player(board);
        Self::successors(board)
            .map(|(action, next)| {
                let value = match player {
                    Player::X => self.min_value(&next),
                    Player::O => self.max_value(&next),
                };
                (action, value)
            })
            .collect()
    }

    /// The optimal action for the player to move, `None` on a terminal board.
    #[instrument(level = "debug", skip(self, board), fields(board = %board.encode()))]
    pub fn optimal_action(&mut self, board: &Board) -> Option<Action> {
        let start = self.nodes_visited;
        let evaluated = self.evaluate_actions(board);
        let best = best_action(rules::active_player(board), &evaluated);

        debug!(
            nodes = self.nodes_visited - start,
            action = ?best.map(|(action, _)| action),
            value = ?best.map(|(_, value)| value),
            "search finished"
        );
        best.map(|(action, _)| action)
    }
}

/// Pick `player`'s choice from evaluated actions: X maximizes, O minimizes,
/// and ties go to the largest (X) or smallest (O) coordinate.
pub fn best_action(player: Player, evaluated: &[(Action, i8)]) -> Option<(Action, i8)> {
    // Keys are unique because actions are, so the tie-break is total.
    let key = |&&(action, value): &&(Action, i8)| (value, action);
    match player {
        Player::X => evaluated.iter().max_by_key(key).copied(),
        Player::O => evaluated.iter().min_by_key(key).copied(),
    }
}

/// The optimal action for the player to move, `None` on a terminal board.
///
/// # Examples
///
/// ```
/// use tictactoe_minimax::{Action, Board, optimal_action};
///
/// // X threatens the top row; O must take (0, 2).
/// let board = Board::from_string("XX. O.. ...").unwrap();
/// assert_eq!(optimal_action(&board), Some(Action::new(0, 2).unwrap()));
///
/// let finished = Board::from_string("XXX OO. ...").unwrap();
/// assert_eq!(optimal_action(&finished), None);
/// ```
pub fn optimal_action(board: &Board) -> Option<Action> {
    Minimax::new().optimal_action(board)
}

/// Best value X can force from this board, in `{-1, 0, 1}`
pub fn max_value(board: &Board) -> i8 {
    Minimax::new().max_value(board)
}

/// Best value O can force from this board, in `{-1, 0, 1}`
pub fn min_value(board: &Board) -> i8 {
    Minimax::new().min_value(board)
}

/// Every legal action with its minimax value, sorted by `(row, col)`
pub fn evaluate_actions(board: &Board) -> Vec<(Action, i8)> {
    Minimax::new().evaluate_actions(board)
}
