//! Interaction state machine shared by movement and combat.

/// Whose move it is inside a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum BattleTurn {
    Player,
    Monster,
    BattleEnd,
}

/// Why a battle ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum BattleEndReason {
    HpDepleted,
    Timeout,
}

/// Running battle. Hp values are battle-local until the battle ends.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Battle {
    /// Placement key of the monster.
    pub monster_id: String,
    pub turn: BattleTurn,
    pub player_hp: i32,
    pub monster_hp: i32,
    pub round: u32,
}

impl Battle {
    pub fn is_over(&self) -> bool {
        self.turn == BattleTurn::BattleEnd
    }
}

/// What the player is currently engaged with. Exactly one variant is active.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum InteractionState {
    #[default]
    None,
    ItemPickup {
        #[cfg_attr(feature = "serde", serde(rename = "itemId"))]
        item_id: String,
    },
    EquipmentPickup {
        #[cfg_attr(feature = "serde", serde(rename = "equipmentId"))]
        equipment_id: String,
    },
    FloorChange {
        #[cfg_attr(feature = "serde", serde(rename = "stairId"))]
        stair_id: String,
    },
    Battle(Battle),
}

impl InteractionState {
    pub fn battle(&self) -> Option<&Battle> {
        match self {
            InteractionState::Battle(battle) => Some(battle),
            _ => None,
        }
    }

    pub fn battle_mut(&mut self) -> Option<&mut Battle> {
        match self {
            InteractionState::Battle(battle) => Some(battle),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, InteractionState::None)
    }
}
