//! Scripted play into a save slot.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use runtime::{EventBus, GameEvent, InitialStateSeed, ScriptedProvider, Session, Topic};
use tokio::sync::broadcast::Receiver;
use tokio::sync::broadcast::error::TryRecvError;
use tracing::{info, warn};

use super::show::print_summary;
use super::{Locations, open_saves};

/// Play a sequence of moves and save the result
#[derive(Parser)]
pub struct Play {
    /// Save slot to continue from and write back to
    #[arg(short, long, value_name = "SLOT")]
    slot: String,

    /// Moves as arrow letters, e.g. "RRDL" (L, R, U, D)
    #[arg(short, long, value_name = "MOVES", default_value = "")]
    moves: String,

    /// Start a new game even if the slot holds one
    #[arg(long)]
    new: bool,

    /// Print every event published while playing
    #[arg(short, long)]
    verbose: bool,

    #[command(flatten)]
    locations: Locations,
}

impl Play {
    pub async fn execute(self) -> Result<()> {
        let provider = ScriptedProvider::from_moves(&self.moves)?;

        let config = self.locations.config();
        let (content, manager) = open_saves(&config).await?;

        let bus = EventBus::with_capacity(config.event_buffer_size);
        let mut receivers = bus.subscribe_multiple(&Topic::ALL);

        let existing = if self.new {
            None
        } else {
            manager.load_session(&self.slot, bus.clone()).await
        };
        let mut session = match existing {
            Some(session) => {
                info!(slot = %self.slot, actions = session.history().len(), "continuing game");
                session
            }
            None => Session::new(
                Arc::clone(&content),
                InitialStateSeed {
                    floor: config.start_floor,
                },
                bus,
            )
            .context("Failed to start a new game")?,
        };

        let before = session.history().len();
        let taken = session.run(&provider).await?;
        let record = manager.save_game(&self.slot, &session).await?;

        println!(
            "{} {} moves, {} actions applied",
            style("Played:").bold().cyan(),
            taken,
            session.history().len() - before
        );
        println!(
            "{} slot '{}' ({} actions)",
            style("Saved:").bold().cyan(),
            self.slot,
            record.actions.len()
        );
        println!();

        if self.verbose {
            println!("{}", style("=== Events ===").bold().green());
            for topic in Topic::ALL {
                if let Some(receiver) = receivers.get_mut(&topic) {
                    for event in drain(receiver) {
                        println!("  [{topic:?}] {}", describe(&event));
                    }
                }
            }
            println!();
        }

        print_summary(session.state());
        Ok(())
    }
}

fn drain(receiver: &mut Receiver<GameEvent>) -> Vec<GameEvent> {
    let mut events = Vec::new();
    loop {
        match receiver.try_recv() {
            Ok(event) => events.push(event),
            Err(TryRecvError::Lagged(skipped)) => {
                warn!(skipped, "event buffer overflowed; oldest events dropped");
            }
            Err(_) => return events,
        }
    }
}

fn describe(event: &GameEvent) -> String {
    serde_json::to_string(event).unwrap_or_else(|_| format!("{event:?}"))
}
