//! Event extraction from state deltas.
//!
//! This module converts a [`StateDelta`] plus the states on both sides of it
//! into [`GameEvent`]s.

use game_core::state::{PlayerFields, StatLine};
use game_core::{Action, GameState, StateDelta, calculate_final_stats};

use super::game_event::GameEvent;

/// Extract high-level game events from a state delta.
///
/// # Event Ordering
///
/// 1. Floor change
/// 2. Battle lifecycle and battle-local hp
/// 3. Player record changes
/// 4. Removed placements
pub fn extract_events(delta: &StateDelta, before: &GameState, after: &GameState) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if delta.is_empty() {
        return events;
    }

    if delta.floor_changed {
        events.push(GameEvent::FloorChanged { floor: after.floor });
    }

    battle_events(delta, before, after, &mut events);
    player_events(delta.player, before, after, &mut events);

    events.extend(
        delta
            .removed
            .iter()
            .map(|key| GameEvent::EntityRemoved { key: key.clone() }),
    );

    events
}

fn battle_events(
    delta: &StateDelta,
    before: &GameState,
    after: &GameState,
    events: &mut Vec<GameEvent>,
) {
    match (before.battle(), after.battle()) {
        (None, Some(started)) => events.push(GameEvent::BattleStarted {
            monster_id: started.monster_id.clone(),
            turn: started.turn,
        }),
        (Some(old), Some(new)) => {
            if old.player_hp != new.player_hp {
                events.push(GameEvent::HpChanged {
                    entity: after.player_key.clone(),
                    old: old.player_hp,
                    new: new.player_hp,
                    max: calculate_final_stats(&after.player.character).maxhp,
                });
            }
            if old.monster_hp != new.monster_hp {
                let max = after
                    .entities
                    .monster(&new.monster_id)
                    .map(|monster| calculate_final_stats(monster).maxhp)
                    .unwrap_or(old.monster_hp);
                events.push(GameEvent::HpChanged {
                    entity: new.monster_id.clone(),
                    old: old.monster_hp,
                    new: new.monster_hp,
                    max,
                });
            }
        }
        (Some(_), None) => {
            let (winner_id, reason) = match &delta.action {
                Action::EndBattle(end) => (end.winner_id.clone(), end.reason),
                _ => return,
            };
            events.push(GameEvent::BattleEnded {
                winner_id,
                reason,
                player_hp: after.player.character.hp,
            });
        }
        (None, None) => {}
    }
}

fn player_events(
    fields: PlayerFields,
    before: &GameState,
    after: &GameState,
    events: &mut Vec<GameEvent>,
) {
    let (old, new) = (&before.player, &after.player);
    let (b, a) = (&old.character, &new.character);

    if fields.contains(PlayerFields::HP) && b.hp != a.hp {
        events.push(GameEvent::HpChanged {
            entity: after.player_key.clone(),
            old: b.hp,
            new: a.hp,
            max: calculate_final_stats(a).maxhp,
        });
    }

    if fields.contains(PlayerFields::LEVEL) {
        events.push(GameEvent::PlayerLeveledUp {
            new_level: a.level,
            stat_gains: StatLine::new(
                a.maxhp - b.maxhp,
                a.attack - b.attack,
                a.defense - b.defense,
                a.speed - b.speed,
            ),
        });
    }

    if fields.contains(PlayerFields::POSITION) {
        events.push(GameEvent::PlayerMoved {
            from: b.position,
            to: a.position,
        });
    }

    if fields.contains(PlayerFields::FACING) {
        events.push(GameEvent::FacingChanged { facing: a.facing });
    }

    if fields.contains(PlayerFields::KEYS) {
        events.push(GameEvent::KeysChanged { keys: new.keys });
    }

    if fields.contains(PlayerFields::INVENTORY) {
        events.push(GameEvent::InventoryChanged {
            items: new.special_items.clone(),
        });
    }

    if fields.contains(PlayerFields::EQUIPMENT) {
        events.push(GameEvent::EquipmentChanged);
    }
}
