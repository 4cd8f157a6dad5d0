//! `tower` command-line client.
//!
//! Validates content packs, plays scripted games into save slots and
//! inspects saved games by replaying them.
//!
//! ```bash
//! tower check ./gamedata
//! tower play --slot 1 --moves "RRDDL"
//! tower show --slot 1 --format json
//! ```

mod commands;
mod logging;

use anyhow::Result;
use clap::Parser;
use commands::{Check, Delete, List, Play, Show};

#[derive(Parser)]
#[command(name = "tower")]
#[command(about = "Headless driver for the tower game engine", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Validate a content directory and print monster balance
    Check(Check),

    /// Play a sequence of moves and save the result
    Play(Play),

    /// Replay a save slot and print the resulting state
    Show(Show),

    /// List save slots
    List(List),

    /// Delete a save slot
    Delete(Delete),
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    logging::setup_logging()?;

    let cli = Cli::parse();

    match cli.command {
        Command::Check(cmd) => cmd.execute(),
        Command::Play(cmd) => cmd.execute().await,
        Command::Show(cmd) => cmd.execute().await,
        Command::List(cmd) => cmd.execute().await,
        Command::Delete(cmd) => cmd.execute().await,
    }
}
