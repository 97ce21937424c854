//! Evaluate command - the engine against a random baseline in both seats

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::ProgressBar;
use serde::{Deserialize, Serialize};

use crate::{
    agents::{MinimaxAgent, RandomAgent},
    arena::{MatchSummary, run_match},
    cli::{
        config::CommonConfig,
        output::{create_game_progress, print_kv, print_section},
    },
};

#[derive(Parser, Debug)]
#[command(about = "Measure the engine against a random opponent")]
pub struct EvaluateArgs {
    /// Number of games per seat
    #[arg(long, short = 'g', default_value_t = 100)]
    pub games: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Export results to a JSON file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

/// Results of both seatings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub seed: Option<u64>,
    pub games_per_seat: usize,
    pub engine_as_x: MatchSummary,
    pub engine_as_o: MatchSummary,
}

impl EvaluationReport {
    /// Games the engine lost, over both seatings
    pub fn engine_losses(&self) -> usize {
        self.engine_as_x.o_wins + self.engine_as_o.x_wins
    }
}

fn random_agent(name: &str, seed: Option<u64>) -> RandomAgent {
    match seed {
        Some(seed) => RandomAgent::with_seed(name, seed),
        None => RandomAgent::new(name),
    }
}

/// Play `games` games with the engine as X, then `games` with it as O.
pub fn run(games: usize, seed: Option<u64>, progress: Option<&ProgressBar>) -> Result<EvaluationReport> {
    let mut engine = MinimaxAgent::new("Minimax");
    let tick = |_: &crate::tictactoe::Game| {
        if let Some(pb) = progress {
            pb.inc(1);
        }
    };

    let mut random_o = random_agent("Random", seed);
    let engine_as_x = run_match(&mut engine, &mut random_o, games, tick)?;

    let mut random_x = random_agent("Random", seed.map(|s| s.wrapping_add(1)));
    let engine_as_o = run_match(&mut random_x, &mut engine, games, tick)?;

    Ok(EvaluationReport {
        seed,
        games_per_seat: games,
        engine_as_x,
        engine_as_o,
    })
}

fn print_summary(title: &str, summary: &MatchSummary) {
    print_section(title);
    print_kv("Games", &summary.games.to_string());
    print_kv(&format!("{} (X) wins", summary.x_agent), &summary.x_wins.to_string());
    print_kv(&format!("{} (O) wins", summary.o_agent), &summary.o_wins.to_string());
    print_kv(
        "Draws",
        &format!("{} ({:.1}%)", summary.draws, summary.draw_rate() * 100.0),
    );
}

pub fn execute(args: EvaluateArgs, config: &CommonConfig) -> Result<()> {
    let seed = args.seed.or(config.seed);

    println!("=== Evaluation Configuration ===");
    println!("Opponent: random");
    println!("Games per seat: {}", args.games);
    if let Some(seed) = seed {
        println!("Seed: {seed}");
    }

    let pb = if config.progress {
        let pb = create_game_progress(2 * args.games as u64)?;
        pb.set_message("minimax vs random");
        Some(pb)
    } else {
        None
    };

    let report = run(args.games, seed, pb.as_ref())?;
    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    print_summary("Engine as X", &report.engine_as_x);
    print_summary("Engine as O", &report.engine_as_o);
    println!();
    print_kv("Engine losses", &report.engine_losses().to_string());

    if let Some(path) = &args.export {
        let file = std::fs::File::create(path)
            .with_context(|| format!("could not create '{}'", path.display()))?;
        serde_json::to_writer_pretty(file, &report)?;
        println!("\nResults exported to: {}", path.display());
    }

    Ok(())
}
