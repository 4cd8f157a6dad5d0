//! Event-sourced save slots.
//!
//! A slot stores the seed a game started from and every accepted action.
//! Loading rebuilds the starting floor from content and replays the actions
//! through the same dispatch path used live, so a save is only as large as
//! the player's input.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use game_core::{ContentOracle, GameState};
use tracing::{error, info, warn};

use crate::events::EventBus;
use crate::repository::{SaveRecord, SaveRepository};
use crate::session::Session;
use crate::{Result, RuntimeError};

/// Metadata of one stored slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveSummary {
    pub slot: String,
    pub timestamp: DateTime<Utc>,
    pub data_version: String,
    pub actions: usize,
}

pub struct SaveManager {
    repository: Arc<dyn SaveRepository>,
    content: Arc<dyn ContentOracle>,
}

impl SaveManager {
    pub const KEY_PREFIX: &'static str = "save_slot_";

    pub fn new(repository: Arc<dyn SaveRepository>, content: Arc<dyn ContentOracle>) -> Self {
        Self {
            repository,
            content,
        }
    }

    /// Storage key of `slot`.
    pub fn slot_key(slot: &str) -> String {
        format!("{}{slot}", Self::KEY_PREFIX)
    }

    /// Records the session's seed and history under `slot`.
    pub async fn save_game(&self, slot: &str, session: &Session) -> Result<SaveRecord> {
        let record = SaveRecord {
            save_version: SaveRecord::CURRENT_VERSION,
            data_version: self.content.data_version().to_string(),
            timestamp: Utc::now(),
            initial_state_seed: session.seed(),
            actions: session.history().to_vec(),
            state_hash: Some(hex::encode(session.state().compute_hash())),
        };

        let blob = serde_json::to_string(&record).map_err(RuntimeError::Encode)?;
        self.repository.write(&Self::slot_key(slot), &blob).await?;

        info!(slot, actions = record.actions.len(), "game saved");
        Ok(record)
    }

    /// Reads the raw record stored under `slot`.
    pub async fn read_record(&self, slot: &str) -> Result<Option<SaveRecord>> {
        let Some(blob) = self.repository.read(&Self::slot_key(slot)).await? else {
            return Ok(None);
        };
        serde_json::from_str(&blob)
            .map(Some)
            .map_err(RuntimeError::Decode)
    }

    /// Restores the game in `slot` as a live session.
    ///
    /// Every failure (unreadable blob, malformed record, replay hitting
    /// missing content) is logged and reported as `None`.
    pub async fn load_session(&self, slot: &str, bus: EventBus) -> Option<Session> {
        let record = match self.read_record(slot).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                info!(slot, "no save in slot");
                return None;
            }
            Err(err) => {
                error!(slot, "failed to read save: {err}");
                return None;
            }
        };

        if record.save_version != SaveRecord::CURRENT_VERSION {
            warn!(
                slot,
                saved = record.save_version,
                current = SaveRecord::CURRENT_VERSION,
                "save version mismatch, loading anyway"
            );
        }
        if record.data_version != self.content.data_version() {
            warn!(
                slot,
                saved = %record.data_version,
                current = %self.content.data_version(),
                "content version mismatch, loading anyway"
            );
        }

        let session = match Session::replay(
            Arc::clone(&self.content),
            record.initial_state_seed,
            &record.actions,
            bus,
        ) {
            Ok(session) => session,
            Err(err) => {
                error!(slot, "failed to replay save: {err}");
                return None;
            }
        };

        if let Some(expected) = &record.state_hash {
            let actual = hex::encode(session.state().compute_hash());
            if &actual != expected {
                warn!(slot, %expected, %actual, "replayed state differs from saved state");
            }
        }

        info!(slot, actions = record.actions.len(), "game loaded");
        Some(session)
    }

    /// Restores only the state of the game in `slot`.
    pub async fn load_game(&self, slot: &str) -> Option<GameState> {
        self.load_session(slot, EventBus::new())
            .await
            .map(|session| session.state().clone())
    }

    /// Lists stored slots. Unreadable slots are skipped with a warning.
    pub async fn list_saves(&self) -> Result<Vec<SaveSummary>> {
        let mut summaries = Vec::new();
        for key in self.repository.keys().await? {
            let Some(slot) = key.strip_prefix(Self::KEY_PREFIX) else {
                continue;
            };
            match self.read_record(slot).await {
                Ok(Some(record)) => summaries.push(SaveSummary {
                    slot: slot.to_string(),
                    timestamp: record.timestamp,
                    data_version: record.data_version,
                    actions: record.actions.len(),
                }),
                Ok(None) => {}
                Err(err) => warn!(slot, "skipping unreadable save: {err}"),
            }
        }
        Ok(summaries)
    }

    pub async fn delete_save(&self, slot: &str) -> Result<()> {
        self.repository.remove(&Self::slot_key(slot)).await?;
        info!(slot, "save deleted");
        Ok(())
    }
}
