//! Throne CLI - Command-line interface
//!
//! Commands:
//! - play: Hot-seat match in the terminal
//! - serve: Start the online relay server

mod play;
mod serve;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "throne")]
#[command(about = "Throne: a 5x5 strategy game of kings and sacrifices")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a hot-seat match in the terminal
    Play,
    /// Start the online relay server
    Serve(serve::ServeArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play => play::run(),
        Commands::Serve(args) => serve::run(args),
    }
}
