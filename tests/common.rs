//! Common test utilities for the tictactoe-minimax test suite.
//!
//! Enumerates the reachable positions so properties can be checked against
//! every board that real play can produce.

use std::collections::HashSet;

use tictactoe_minimax::{Board, tictactoe::rules};

/// Every board reachable from the empty board by legal play, in discovery order.
///
/// Play stops at terminal boards, so positions "after" a win never appear.
/// There are 5,478 of them.
#[allow(dead_code)]
pub fn reachable_boards() -> Vec<Board> {
    let mut seen = HashSet::new();
    let mut order = Vec::new();
    let mut stack = vec![Board::initial()];

    while let Some(board) = stack.pop() {
        if !seen.insert(board) {
            continue;
        }
        order.push(board);
        if rules::is_terminal(&board) {
            continue;
        }
        let mut actions: Vec<_> = rules::actions(&board).into_iter().collect();
        actions.sort_unstable();
        for action in actions {
            let next = rules::result(&board, action).expect("legal action");
            stack.push(next);
        }
    }

    order
}

/// Parse a board literal, panicking on malformed test input
#[allow(dead_code)]
pub fn board(s: &str) -> Board {
    Board::from_string(s).unwrap_or_else(|e| panic!("bad test board '{s}': {e}"))
}
