//! Runtime configuration structures and loaders.
use std::env;
use std::path::PathBuf;

/// Configuration required to open a session against a content pack.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    /// Directory holding the content pack.
    pub content_dir: PathBuf,
    /// Directory holding save slots.
    pub save_dir: PathBuf,
    /// Floor a new game starts on.
    pub start_floor: i32,
    /// Capacity of each event bus channel.
    pub event_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("gamedata"),
            save_dir: default_save_dir(),
            start_floor: 1,
            event_buffer_size: 100,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `TOWER_CONTENT_DIR` - Content pack directory (default: `./gamedata`)
    /// - `TOWER_SAVE_DIR` - Save slot directory (default: platform data dir)
    /// - `TOWER_START_FLOOR` - Floor for new games (default: 1)
    /// - `TOWER_EVENT_BUFFER` - Event channel capacity (default: 100)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("TOWER_CONTENT_DIR") {
            config.content_dir = PathBuf::from(dir);
        }

        if let Ok(dir) = env::var("TOWER_SAVE_DIR") {
            config.save_dir = PathBuf::from(dir);
        }

        if let Some(floor) = read_env::<i32>("TOWER_START_FLOOR") {
            config.start_floor = floor;
        }

        if let Some(capacity) = read_env::<usize>("TOWER_EVENT_BUFFER") {
            config.event_buffer_size = capacity.max(1);
        }

        config
    }
}

/// Platform-specific save directory.
///
/// - macOS: `~/Library/Application Support/tower/saves`
/// - Linux: `~/.local/share/tower/saves` (or `$XDG_DATA_HOME/tower/saves`)
/// - Windows: `%APPDATA%\tower\saves`
/// - Fallback: `./save_data`
pub fn default_save_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "tower")
        .map(|dirs| dirs.data_dir().join("saves"))
        .unwrap_or_else(|| PathBuf::from("./save_data"))
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
