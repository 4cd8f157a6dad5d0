//! Persisted save record.

use chrono::{DateTime, Utc};
use game_core::Action;
use serde::{Deserialize, Serialize};

/// Everything needed to rebuild a game: where it started and what happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRecord {
    pub save_version: u32,
    pub data_version: String,
    pub timestamp: DateTime<Utc>,
    pub initial_state_seed: InitialStateSeed,
    pub actions: Vec<Action>,
    /// Hex SHA-256 of the final state, checked after replay.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_hash: Option<String>,
}

impl SaveRecord {
    /// Format version written by this build.
    pub const CURRENT_VERSION: u32 = 1;
}

/// Inputs from which the starting state is rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitialStateSeed {
    pub floor: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_are_camel_case() {
        let record = SaveRecord {
            save_version: SaveRecord::CURRENT_VERSION,
            data_version: "0".into(),
            timestamp: DateTime::<Utc>::UNIX_EPOCH,
            initial_state_seed: InitialStateSeed { floor: 1 },
            actions: vec![Action::step(1, 0), Action::UsePotion],
            state_hash: None,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["saveVersion"], 1);
        assert_eq!(json["initialStateSeed"]["floor"], 1);
        assert_eq!(json["actions"][0]["type"], "MOVE");
        assert!(json.get("stateHash").is_none());

        let back: SaveRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
