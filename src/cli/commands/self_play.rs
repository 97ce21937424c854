//! Self-play command - the engine plays both sides

use anyhow::Result;
use clap::Parser;

use crate::{
    agents::MinimaxAgent,
    arena::play_game,
    cli::output::{describe_outcome, print_kv, print_section, render_board},
};

#[derive(Parser, Debug)]
#[command(about = "Let the engine play against itself")]
pub struct SelfPlayArgs {
    /// Print the finished game as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: SelfPlayArgs) -> Result<()> {
    let mut x = MinimaxAgent::new("Minimax X");
    let mut o = MinimaxAgent::new("Minimax O");
    let game = play_game(&mut x, &mut o)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&game)?);
        return Ok(());
    }

    let states = game.state_sequence()?;
    for (ply, (mv, board)) in game.moves.iter().zip(states.iter().skip(1)).enumerate() {
        print_section(&format!("Ply {}: {} plays {}", ply + 1, mv.player, mv.action));
        print!("{}", render_board(board));
    }

    let last = states.last().copied().unwrap_or_default();
    println!();
    print_kv(
        "Result",
        &describe_outcome(&last).unwrap_or_else(|| "unfinished".to_string()),
    );
    print_kv(
        "Nodes searched",
        &(x.nodes_visited() + o.nodes_visited()).to_string(),
    );

    Ok(())
}
