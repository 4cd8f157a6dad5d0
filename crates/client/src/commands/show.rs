//! Replay a save slot and inspect the resulting state.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use console::style;
use game_core::{GameState, InteractionState, PlacedObject, calculate_final_stats};
use runtime::EventBus;

use super::{Locations, open_saves};

/// Replay a save slot and print the resulting state
#[derive(Parser)]
pub struct Show {
    /// Save slot to replay
    #[arg(short, long, value_name = "SLOT")]
    slot: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,

    #[command(flatten)]
    locations: Locations,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Player, floor and interaction overview
    Summary,
    /// Full JSON state
    Json,
    /// Pretty-printed debug format
    Debug,
}

impl Show {
    pub async fn execute(self) -> Result<()> {
        let config = self.locations.config();
        let (_content, manager) = open_saves(&config).await?;

        let record = manager
            .read_record(&self.slot)
            .await
            .with_context(|| format!("Failed to read slot '{}'", self.slot))?
            .ok_or_else(|| anyhow!("Slot '{}' is empty", self.slot))?;

        let session = manager
            .load_session(&self.slot, EventBus::new())
            .await
            .ok_or_else(|| anyhow!("Slot '{}' could not be replayed", self.slot))?;
        let state = session.state();

        if matches!(self.format, OutputFormat::Json) {
            println!("{}", serde_json::to_string_pretty(state)?);
            return Ok(());
        }

        println!("{} {}", style("Slot:").bold().cyan(), self.slot);
        println!("{} {}", style("Saved:").bold().cyan(), record.timestamp);
        println!(
            "{} {}",
            style("Data version:").bold().cyan(),
            record.data_version
        );
        println!(
            "{} {} recorded, {} replayed",
            style("Actions:").bold().cyan(),
            record.actions.len(),
            session.history().len()
        );
        println!();

        match self.format {
            OutputFormat::Summary => print_summary(state),
            OutputFormat::Debug => println!("{state:#?}"),
            OutputFormat::Json => {}
        }
        Ok(())
    }
}

pub fn print_summary(state: &GameState) {
    let player = &state.player;
    let character = &player.character;
    let stats = calculate_final_stats(character);

    println!("{}", style("=== Game State Summary ===").bold().green());
    println!();

    println!("{}", style("Player:").bold().yellow());
    println!("  Name: {} ({})", character.name, state.player_key);
    println!("  Level: {} (exp {})", character.level, player.exp);
    println!("  HP: {}/{}", character.hp, stats.maxhp);
    println!(
        "  ATK {} / DEF {} / SPD {}",
        stats.attack, stats.defense, stats.speed
    );
    let position = state.player_position();
    println!(
        "  Position: floor {} at ({}, {}) facing {}",
        state.floor, position.x, position.y, character.facing
    );
    println!(
        "  Keys: yellow {} / blue {} / red {}",
        player.keys.yellow, player.keys.blue, player.keys.red
    );
    if !player.special_items.is_empty() {
        println!("  Items: {}", player.special_items.join(", "));
    }
    if player.has_monster_manual {
        println!("  Monster manual: yes");
    }
    println!();

    if !character.equipment.is_empty() {
        println!("{}", style("Equipment:").bold().yellow());
        for (slot, equipment) in &character.equipment {
            println!("  {slot}: {} ({})", equipment.name, equipment.id);
        }
        println!();
    }

    if !character.buffs.is_empty() {
        println!("{}", style("Buffs:").bold().yellow());
        for buff in &character.buffs {
            println!("  {} (charges {})", buff.name, buff.charges);
        }
        println!();
    }

    let monsters = state
        .entities
        .iter()
        .filter(|(_, placement)| matches!(placement.object, PlacedObject::Monster(_)))
        .count();
    println!("{}", style("Floor:").bold().yellow());
    println!("  Placements: {}", state.entities.len());
    println!("  Monsters left: {monsters}");
    println!("  Interaction: {}", describe(&state.interaction));

    if character.hp <= 0 {
        println!();
        println!("{}", style("The player has fallen.").bold().red());
    }
}

fn describe(interaction: &InteractionState) -> String {
    match interaction {
        InteractionState::None => "none".to_string(),
        InteractionState::Battle(battle) => format!(
            "battle with {} (round {}, {} to act)",
            battle.monster_id, battle.round, battle.turn
        ),
        InteractionState::ItemPickup { item_id } => format!("item pickup '{item_id}'"),
        InteractionState::EquipmentPickup { equipment_id } => {
            format!("equipment pickup '{equipment_id}'")
        }
        InteractionState::FloorChange { stair_id } => format!("floor change via '{stair_id}'"),
    }
}
