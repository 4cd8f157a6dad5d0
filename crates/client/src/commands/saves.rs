//! Save slot housekeeping.

use anyhow::Result;
use clap::Parser;
use console::style;

use super::{Locations, open_saves};

/// List save slots
#[derive(Parser)]
pub struct List {
    #[command(flatten)]
    locations: Locations,
}

impl List {
    pub async fn execute(self) -> Result<()> {
        let config = self.locations.config();
        let (_content, manager) = open_saves(&config).await?;

        let saves = manager.list_saves().await?;
        println!(
            "{} {}",
            style("Save directory:").bold().cyan(),
            config.save_dir.display()
        );
        if saves.is_empty() {
            println!("  (no saves)");
            return Ok(());
        }

        for save in saves {
            println!(
                "  {} {}  {} actions  data {}",
                style(&save.slot).bold(),
                save.timestamp.format("%Y-%m-%d %H:%M:%S"),
                save.actions,
                save.data_version
            );
        }
        Ok(())
    }
}

/// Delete a save slot
#[derive(Parser)]
pub struct Delete {
    /// Save slot to delete
    #[arg(short, long, value_name = "SLOT")]
    slot: String,

    #[command(flatten)]
    locations: Locations,
}

impl Delete {
    pub async fn execute(self) -> Result<()> {
        let config = self.locations.config();
        let (_content, manager) = open_saves(&config).await?;

        manager.delete_save(&self.slot).await?;
        println!("{} slot '{}'", style("Deleted").bold().green(), self.slot);
        Ok(())
    }
}
