//! Subcommand implementations.

mod check;
mod play;
mod saves;
mod show;

pub use check::Check;
pub use play::Play;
pub use saves::{Delete, List};
pub use show::Show;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use game_content::ContentFactory;
use game_core::{ContentOracle, ContentSnapshot};
use runtime::{FileSaveRepository, RuntimeConfig, SaveManager};

/// Directory overrides shared by the commands that open save slots.
#[derive(Args, Clone, Debug, Default)]
pub struct Locations {
    /// Content pack directory (defaults to `TOWER_CONTENT_DIR` or `./gamedata`)
    #[arg(long, value_name = "DIR")]
    content_dir: Option<PathBuf>,

    /// Save slot directory (defaults to `TOWER_SAVE_DIR` or the platform data dir)
    #[arg(long, value_name = "DIR")]
    save_dir: Option<PathBuf>,
}

impl Locations {
    /// Environment configuration with command-line overrides applied.
    pub fn config(&self) -> RuntimeConfig {
        let mut config = RuntimeConfig::from_env();
        if let Some(dir) = &self.content_dir {
            config.content_dir = dir.clone();
        }
        if let Some(dir) = &self.save_dir {
            config.save_dir = dir.clone();
        }
        config
    }
}

pub fn load_content(dir: &Path) -> Result<ContentSnapshot> {
    ContentFactory::new(dir)
        .build()
        .with_context(|| format!("Failed to load content from {}", dir.display()))
}

/// Content pack and save manager for `config`.
pub async fn open_saves(config: &RuntimeConfig) -> Result<(Arc<dyn ContentOracle>, SaveManager)> {
    let content: Arc<dyn ContentOracle> = Arc::new(load_content(&config.content_dir)?);
    let repository = FileSaveRepository::new(&config.save_dir)
        .await
        .with_context(|| format!("Failed to open save directory {}", config.save_dir.display()))?;
    let manager = SaveManager::new(Arc::new(repository), Arc::clone(&content));
    Ok((content, manager))
}
