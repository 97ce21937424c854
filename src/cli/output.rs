//! Output formatting and progress bars for CLI

use indicatif::{ProgressBar, ProgressStyle};

use crate::tictactoe::{Action, Board, LineAnalyzer, Player, rules};

/// Create a progress bar counting played games
pub fn create_game_progress(total_games: u64) -> anyhow::Result<ProgressBar> {
    let pb = ProgressBar::new(total_games);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games ({msg})")?
            .progress_chars("=>-"),
    );
    Ok(pb)
}

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Render a board with row and column labels.
///
/// ```text
///     0 1 2
///   0 X . .
///   1 . O .
///   2 . . .
/// ```
pub fn render_board(board: &Board) -> String {
    let mut out = String::from("    0 1 2\n");
    for (row, chunk) in board.cells().chunks(3).enumerate() {
        let marks: Vec<String> = chunk.iter().map(|c| c.to_char().to_string()).collect();
        out.push_str(&format!("  {row} {}\n", marks.join(" ")));
    }
    out
}

/// Describe why a terminal board ended, e.g. `X wins on (0, 0) (0, 1) (0, 2)`
pub fn describe_outcome(board: &Board) -> Option<String> {
    let outcome = rules::outcome(board)?;
    let Some(winner) = outcome.winner() else {
        return Some("draw".to_string());
    };

    let line = LineAnalyzer::completed_lines(board.cells(), winner)
        .first()
        .map(|cells| {
            cells
                .iter()
                .filter_map(|&i| Action::from_index(i).ok())
                .map(|a| a.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .unwrap_or_default();
    Some(format!("{winner} wins on {line}"))
}

/// Human-readable name for a minimax value from `player`'s point of view
pub fn value_label(value: i8, player: Player) -> &'static str {
    let signed = match player {
        Player::X => value,
        Player::O => -value,
    };
    match signed {
        1 => "win",
        -1 => "loss",
        _ => "draw",
    }
}
