//! tictac CLI - train and inspect Tic-Tac-Toe value learners
//!
//! Logs go to stderr and are filtered by `RUST_LOG` (default `tictac=info`);
//! reports go to stdout.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tictac")]
#[command(version, about = "Self-play value learning for Tic-Tac-Toe", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a value learner against a scripted opponent
    Train(Box<tictac::cli::commands::train::TrainArgs>),

    /// Show the symmetry orbit and canonical key of a board
    Orbit(tictac::cli::commands::orbit::OrbitArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tictac=info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => tictac::cli::commands::train::execute(*args),
        Commands::Orbit(args) => tictac::cli::commands::orbit::execute(args),
    }
}
