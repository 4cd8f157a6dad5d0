use tracing::debug;

use crate::action::ActionTransition;
use crate::config::GameConfig;
use crate::env::GameEnv;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{
    Buff, BuffTrigger, GameState, InteractionState, Item, ItemKind, PlacedObject, Player,
    SpecialKind,
};
use crate::stats::calculate_final_stats;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemError {
    #[error("no item at placement '{0}'")]
    ItemNotFound(String),

    #[error("no bomb in inventory")]
    NoBomb,

    #[error("cannot use or pick up items during a battle")]
    BattleInProgress,

    #[error("potion '{0}' is not held")]
    PotionNotHeld(String),

    #[error("potion '{0}' is not defined in content")]
    PotionUndefined(String),
}

impl GameError for ItemError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ItemError::ItemNotFound(_) | ItemError::PotionUndefined(_) => {
                ErrorSeverity::Validation
            }
            _ => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ItemError::ItemNotFound(_) => "ITEM_NOT_FOUND",
            ItemError::NoBomb => "ITEM_NO_BOMB",
            ItemError::BattleInProgress => "ITEM_BATTLE_IN_PROGRESS",
            ItemError::PotionNotHeld(_) => "ITEM_POTION_NOT_HELD",
            ItemError::PotionUndefined(_) => "ITEM_POTION_UNDEFINED",
        }
    }
}

/// Steps onto an item, applies it and removes it from the floor.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PickUpItemAction {
    /// Placement key of the item.
    pub item_id: String,
}

impl PickUpItemAction {
    pub fn new(item_id: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
        }
    }
}

impl ActionTransition for PickUpItemAction {
    type Error = ItemError;
    type Result = Item;

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        if state.battle().is_some() {
            return Err(ItemError::BattleInProgress);
        }
        state
            .entities
            .item(&self.item_id)
            .map(|_| ())
            .ok_or_else(|| ItemError::ItemNotFound(self.item_id.clone()))
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Item, ItemError> {
        let (position, item) = state
            .entities
            .get(&self.item_id)
            .and_then(|placement| match &placement.object {
                PlacedObject::Item(item) => Some((placement.position, item.clone())),
                _ => None,
            })
            .ok_or_else(|| ItemError::ItemNotFound(self.item_id.clone()))?;

        state.set_player_position(position);
        apply_item(&mut state.player, &item, env.config());
        state.remove_placement(&self.item_id);
        state.interaction = InteractionState::None;

        debug!(item = %item.id, kind = %item.kind, "item picked up");
        Ok(item)
    }
}

fn apply_item(player: &mut Player, item: &Item, config: &GameConfig) {
    match item.kind {
        ItemKind::Key => {
            if let Some(color) = item.color {
                player.keys.add(color);
            }
        }
        ItemKind::Potion => player.special_items.push(item.id.clone()),
        ItemKind::Special => match item.special_type {
            Some(SpecialKind::MonsterManual) => player.has_monster_manual = true,
            Some(SpecialKind::Cross) => {
                player.character.attack += config.cross_bonus;
                player.character.defense += config.cross_bonus;
            }
            Some(SpecialKind::Snowflake) => grant_first_strike(player, config),
            Some(SpecialKind::Bomb) => {
                player.special_items.push(GameConfig::BOMB_ITEM.to_string())
            }
            None => {}
        },
    }
}

/// Adds the first-strike buff, or refills its charges if already held.
fn grant_first_strike(player: &mut Player, config: &GameConfig) {
    let buffs = &mut player.character.buffs;
    match buffs
        .iter_mut()
        .find(|buff| buff.id == GameConfig::FIRST_STRIKE_BUFF)
    {
        Some(buff) => buff.charges = buff.charges.max(config.first_strike_charges),
        None => buffs.push(Buff {
            id: GameConfig::FIRST_STRIKE_BUFF.to_string(),
            name: "First Strike".to_string(),
            duration: Buff::PERMANENT,
            charges: config.first_strike_charges,
            triggers: vec![BuffTrigger::OnBattleStart],
        }),
    }
}

/// Spends one bomb to clear every monster with a given name.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct UseBombAction {
    /// Exact monster name to match.
    pub monster_type: String,
}

impl UseBombAction {
    pub fn new(monster_type: impl Into<String>) -> Self {
        Self {
            monster_type: monster_type.into(),
        }
    }
}

impl ActionTransition for UseBombAction {
    type Error = ItemError;
    type Result = Vec<String>;

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        if state.battle().is_some() {
            return Err(ItemError::BattleInProgress);
        }
        if !state.player.holds(GameConfig::BOMB_ITEM) {
            return Err(ItemError::NoBomb);
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<Vec<String>, ItemError> {
        if !state.player.take_item(GameConfig::BOMB_ITEM) {
            return Err(ItemError::NoBomb);
        }

        let targets: Vec<String> = state
            .entities
            .monsters()
            .filter(|(_, monster)| monster.name == self.monster_type)
            .map(|(key, _)| key.to_string())
            .collect();
        for key in &targets {
            state.remove_placement(key);
        }

        debug!(monster_type = %self.monster_type, removed = targets.len(), "bomb used");
        Ok(targets)
    }
}

/// Drinks one of the configured default potion, if held.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UsePotionAction;

impl ActionTransition for UsePotionAction {
    type Error = ItemError;
    /// Hp actually restored.
    type Result = i32;

    fn pre_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let potion_id = &env.config().default_potion_id;
        if !state.player.holds(potion_id) {
            return Err(ItemError::PotionNotHeld(potion_id.clone()));
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<i32, ItemError> {
        let potion_id = &env.config().default_potion_id;
        let potion = env
            .content()
            .item(potion_id)
            .ok_or_else(|| ItemError::PotionUndefined(potion_id.clone()))?;
        if !state.player.take_item(potion_id) {
            return Err(ItemError::PotionNotHeld(potion_id.clone()));
        }

        let character = &mut state.player.character;
        let maxhp = calculate_final_stats(character).maxhp;
        let before = character.hp;
        character.hp = before
            .saturating_add(potion.value.unwrap_or(0))
            .min(maxhp)
            .max(before);
        Ok(character.hp - before)
    }
}
