//! Equipment comparison and slot swapping.

use super::snapshot::calculate_final_stats;
use crate::state::{Character, Equipment, EquipmentSlot, StatLine};

/// What to do with a candidate piece of equipment.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum EquipmentDecision {
    /// Equip without asking. `old_items` are the displaced pieces, if any.
    AutoEquip {
        #[cfg_attr(feature = "serde", serde(rename = "oldItems"))]
        old_items: Vec<Equipment>,
    },
    /// Strictly worse or no better: leave it.
    AutoDiscard,
    /// Trade-offs or a change of hand topology; needs a decision.
    PromptSwap {
        #[cfg_attr(feature = "serde", serde(rename = "statChanges"))]
        stat_changes: StatLine,
        #[cfg_attr(feature = "serde", serde(rename = "oldItems"))]
        old_items: Vec<Equipment>,
    },
}

/// Decides between auto-equip, auto-discard and prompting for `candidate`.
pub fn compare_equipment(character: &Character, candidate: &Equipment) -> EquipmentDecision {
    let before = calculate_final_stats(character).as_line();

    let mut trial = character.clone();
    let old_items = swap_in(&mut trial, candidate);
    let stat_changes = calculate_final_stats(&trial).as_line() - before;

    if changes_hand_topology(character, candidate) {
        return EquipmentDecision::PromptSwap {
            stat_changes,
            old_items,
        };
    }

    if old_items.is_empty() {
        return EquipmentDecision::AutoEquip { old_items };
    }

    match (stat_changes.increases(), stat_changes.decreases()) {
        (up, 0) if up > 0 => EquipmentDecision::AutoEquip { old_items },
        (up, down) if up > 0 && down > 0 => EquipmentDecision::PromptSwap {
            stat_changes,
            old_items,
        },
        _ => EquipmentDecision::AutoDiscard,
    }
}

/// Puts `equipment` into all of its slots.
///
/// Anything already occupying one of those slots is taken off entirely,
/// including from other slots it spans. Returns the removed pieces, each once.
pub fn swap_in(character: &mut Character, equipment: &Equipment) -> Vec<Equipment> {
    let mut removed: Vec<Equipment> = Vec::new();
    for slot in equipment.slots() {
        if let Some(old) = character.equipment.get(slot).cloned() {
            character.equipment.retain(|_, worn| worn.id != old.id);
            if !removed.iter().any(|item| item.id == old.id) {
                removed.push(old);
            }
        }
    }
    for slot in equipment.slots() {
        character.equipment.insert(*slot, equipment.clone());
    }
    removed
}

/// True for 1H→2H with either hand in use, or 2H→1H.
fn changes_hand_topology(character: &Character, candidate: &Equipment) -> bool {
    let hand = |slot| character.equipment.get(&slot);
    let left = hand(EquipmentSlot::LeftHand);
    let right = hand(EquipmentSlot::RightHand);
    let two_handed_now = [left, right]
        .into_iter()
        .flatten()
        .any(Equipment::is_two_handed);

    if candidate.is_two_handed() {
        (left.is_some() || right.is_some()) && !two_handed_now
    } else {
        candidate.is_weapon() && two_handed_now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::WeaponType;

    fn hero() -> Character {
        Character::new("hero", "Hero").with_stats(100, 10, 5, 8)
    }

    fn sword(id: &str, attack: i32) -> Equipment {
        Equipment::new(id, "Sword", EquipmentSlot::RightHand)
            .with_weapon_type(WeaponType::OneHanded)
            .with_stat_mods(StatLine::new(0, attack, 0, 0))
    }

    fn wear(character: &mut Character, equipment: Equipment) {
        swap_in(character, &equipment);
    }

    #[test]
    fn empty_slot_auto_equips() {
        let decision = compare_equipment(&hero(), &sword("sword", 5));
        assert_eq!(decision, EquipmentDecision::AutoEquip { old_items: vec![] });
    }

    #[test]
    fn pure_upgrade_returns_old_item() {
        let mut hero = hero();
        wear(&mut hero, sword("old", 2));

        match compare_equipment(&hero, &sword("new", 6)) {
            EquipmentDecision::AutoEquip { old_items } => {
                assert_eq!(old_items.len(), 1);
                assert_eq!(old_items[0].id, "old");
            }
            other => panic!("unexpected decision {other:?}"),
        }
    }

    #[test]
    fn pure_downgrade_and_equal_swap_discard() {
        let mut hero = hero();
        wear(&mut hero, sword("old", 6));

        assert_eq!(
            compare_equipment(&hero, &sword("worse", 2)),
            EquipmentDecision::AutoDiscard
        );
        assert_eq!(
            compare_equipment(&hero, &sword("same", 6)),
            EquipmentDecision::AutoDiscard
        );
    }

    #[test]
    fn mixed_deltas_prompt() {
        let mut hero = hero();
        wear(&mut hero, sword("old", 6));
        let glass = sword("glass", 10).with_stat_mods(StatLine::new(0, 10, -2, 0));

        match compare_equipment(&hero, &glass) {
            EquipmentDecision::PromptSwap { stat_changes, old_items } => {
                assert_eq!(stat_changes, StatLine::new(0, 4, -2, 0));
                assert_eq!(old_items[0].id, "old");
            }
            other => panic!("unexpected decision {other:?}"),
        }
    }

    #[test]
    fn two_handed_over_one_handed_always_prompts() {
        let mut hero = hero();
        wear(&mut hero, sword("dagger", 1));
        let greatsword = Equipment::two_handed("greatsword", "Greatsword")
            .with_stat_mods(StatLine::new(50, 50, 50, 50));

        match compare_equipment(&hero, &greatsword) {
            EquipmentDecision::PromptSwap { stat_changes, old_items } => {
                assert_eq!(stat_changes.decreases(), 0);
                assert_eq!(old_items.len(), 1);
                assert_eq!(old_items[0].id, "dagger");
            }
            other => panic!("unexpected decision {other:?}"),
        }
    }

    #[test]
    fn one_handed_over_two_handed_prompts() {
        let mut hero = hero();
        wear(
            &mut hero,
            Equipment::two_handed("axe", "Axe").with_stat_mods(StatLine::new(0, 3, 0, 0)),
        );

        match compare_equipment(&hero, &sword("sword", 10)) {
            EquipmentDecision::PromptSwap { old_items, .. } => {
                assert_eq!(old_items.len(), 1);
                assert_eq!(old_items[0].id, "axe");
            }
            other => panic!("unexpected decision {other:?}"),
        }
    }

    #[test]
    fn swap_in_frees_every_slot_of_removed_item() {
        let mut hero = hero();
        wear(&mut hero, Equipment::two_handed("axe", "Axe"));
        assert_eq!(hero.equipment.len(), 2);

        let removed = swap_in(&mut hero, &sword("sword", 1));
        assert_eq!(removed.len(), 1);
        assert!(hero.equipment.get(&EquipmentSlot::LeftHand).is_none());
        assert_eq!(hero.equipment[&EquipmentSlot::RightHand].id, "sword");
    }
}
