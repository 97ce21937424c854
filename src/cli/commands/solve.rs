//! Solve command - minimax analysis of a single position

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use crate::{
    cli::output::{describe_outcome, print_kv, print_section, render_board, value_label},
    search::{Minimax, best_action},
    tictactoe::{Action, Board, GameResult, Player, rules},
};

#[derive(Parser, Debug)]
#[command(about = "Compute the optimal move for a position")]
pub struct SolveArgs {
    /// Board as 9 row-major cells ('.' empty, X, O); whitespace is ignored
    #[arg(long, short = 'b', default_value = ".........")]
    pub board: String,

    /// Print the analysis as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
pub struct ActionValue {
    pub action: Action,
    pub value: i8,
}

/// Full analysis of one position
#[derive(Debug, Serialize)]
pub struct SolveReport {
    pub board: Board,
    pub active_player: Player,
    pub outcome: Option<GameResult>,
    pub values: Vec<ActionValue>,
    pub optimal_action: Option<Action>,
    /// Positions visited while evaluating the actions
    pub nodes_visited: u64,
}

/// Analyze `board` without printing anything
pub fn solve(board: &Board) -> SolveReport {
    let mut search = Minimax::new();
    let evaluated = search.evaluate_actions(board);
    let optimal_action =
        best_action(rules::active_player(board), &evaluated).map(|(action, _)| action);
    let values = evaluated
        .into_iter()
        .map(|(action, value)| ActionValue { action, value })
        .collect();

    SolveReport {
        board: *board,
        active_player: rules::active_player(board),
        outcome: rules::outcome(board),
        values,
        optimal_action,
        nodes_visited: search.nodes_visited(),
    }
}

pub fn execute(args: SolveArgs) -> Result<()> {
    let board = Board::from_string(&args.board)
        .with_context(|| format!("could not parse board '{}'", args.board))?;
    let report = solve(&board);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_section("Position");
    print!("{}", render_board(&board));

    if let Some(description) = describe_outcome(&board) {
        println!("\nGame over: {description}");
        return Ok(());
    }

    print_kv("To move", &report.active_player.to_string());

    print_section("Action values");
    for entry in &report.values {
        println!(
            "  {}  value {:>2}  ({} for {})",
            entry.action,
            entry.value,
            value_label(entry.value, report.active_player),
            report.active_player
        );
    }

    println!();
    if let Some(action) = report.optimal_action {
        print_kv("Optimal action", &action.to_string());
    }
    print_kv("Nodes searched", &report.nodes_visited.to_string());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solve_blocking_position() {
        let board = Board::from_string("XX.O.....").unwrap();
        let report = solve(&board);

        assert_eq!(report.active_player, Player::O);
        assert_eq!(report.outcome, None);
        assert_eq!(report.values.len(), 6);
        assert_eq!(report.optimal_action, Some(Action::new(0, 2).unwrap()));
        assert!(report.nodes_visited > 0);
    }

    #[test]
    fn test_solve_terminal_position() {
        let board = Board::from_string("XXXOO....").unwrap();
        let report = solve(&board);

        assert_eq!(report.outcome, Some(GameResult::Win(Player::X)));
        assert!(report.values.is_empty());
        assert_eq!(report.optimal_action, None);
    }

    #[test]
    fn test_solve_searches_the_tree_once() {
        let report = solve(&Board::initial());

        assert_eq!(report.values.len(), 9);
        assert!(report.values.iter().all(|entry| entry.value == 0));
        assert_eq!(report.optimal_action, Some(Action::new(2, 2).unwrap()));
        // the full tree minus the root, which evaluation does not score
        assert_eq!(report.nodes_visited, 549_945);
    }

    #[test]
    fn test_report_serializes() {
        let report = solve(&Board::from_string("XOXOXO...").unwrap());
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["board"], "XOXOXO...");
        assert_eq!(json["active_player"], "X");
        assert_eq!(json["optimal_action"]["row"], 2);
        assert_eq!(json["optimal_action"]["col"], 2);
        assert_eq!(json["values"].as_array().unwrap().len(), 3);
    }
}
