//! tictactoe CLI - play and analyze 3x3 tic-tac-toe with an exhaustive minimax engine
//!
//! This CLI provides a unified interface for:
//! - Solving a position and listing every action's value
//! - Watching the engine play itself
//! - Playing against the engine
//! - Measuring the engine against a random opponent

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tictactoe_minimax::cli::{commands, config::CommonConfig, init_tracing};

#[derive(Parser)]
#[command(name = "tictactoe")]
#[command(version, about = "Exhaustive minimax engine for tic-tac-toe", long_about = None)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Hide progress bars
    #[arg(long, global = true)]
    no_progress: bool,

    /// JSON file with shared settings (seed, progress, verbose)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the optimal move for a position
    Solve(commands::solve::SolveArgs),

    /// Let the engine play against itself
    SelfPlay(commands::self_play::SelfPlayArgs),

    /// Play a game against the engine
    Play(commands::play::PlayArgs),

    /// Measure the engine against a random opponent
    Evaluate(commands::evaluate::EvaluateArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CommonConfig::load_or_default(cli.config.as_deref())?
        .with_flags(cli.verbose, cli.no_progress);
    init_tracing(config.verbose);

    match cli.command {
        Commands::Solve(args) => commands::solve::execute(args),
        Commands::SelfPlay(args) => commands::self_play::execute(args),
        Commands::Play(args) => commands::play::execute(args),
        Commands::Evaluate(args) => commands::evaluate::execute(args, &config),
    }
}
