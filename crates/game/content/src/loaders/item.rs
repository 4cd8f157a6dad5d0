//! Item, equipment and buff catalog loaders.

use std::path::Path;

use game_core::state::{
    Buff, BuffTrigger, Equipment, Item, ItemKind, KeyColor, PercentLine, SlotSpec, SpecialKind,
    StatLine, WeaponType,
};
use serde::Deserialize;

use crate::loaders::{Document, LoadResult, load_documents, usable_id};

/// Item definition as authored. `type` may be omitted.
#[derive(Debug, Clone, Deserialize)]
struct ItemDocument {
    id: Option<String>,
    name: Option<String>,
    #[serde(rename = "type")]
    kind: Option<ItemKind>,
    color: Option<KeyColor>,
    value: Option<i32>,
    #[serde(rename = "specialType")]
    special_type: Option<SpecialKind>,
}

impl ItemDocument {
    fn into_item(self) -> Option<Item> {
        let id = usable_id(self.id)?;
        Some(Item {
            name: self.name.unwrap_or_else(|| id.clone()),
            kind: self.kind.unwrap_or_else(|| ItemKind::infer_from_id(&id)),
            color: self.color,
            value: self.value,
            special_type: self.special_type,
            id,
        })
    }
}

/// Loader for the `items/` directory.
pub struct ItemLoader;

impl ItemLoader {
    pub fn load_dir(dir: &Path) -> LoadResult<Vec<Document<Item>>> {
        load_documents(dir, ItemDocument::into_item)
    }
}

/// Equipment definition as authored.
///
/// Older files carry flat `attackBonus`/`defenseBonus` fields; they are added
/// onto `stat_mods`.
#[derive(Debug, Clone, Deserialize)]
struct EquipmentDocument {
    id: Option<String>,
    name: Option<String>,
    slot: SlotSpec,
    #[serde(rename = "weaponType")]
    weapon_type: Option<WeaponType>,
    #[serde(default)]
    stat_mods: StatLine,
    #[serde(default)]
    percent_mods: PercentLine,
    #[serde(default, rename = "attackBonus")]
    attack_bonus: i32,
    #[serde(default, rename = "defenseBonus")]
    defense_bonus: i32,
}

impl EquipmentDocument {
    fn into_equipment(self) -> Option<Equipment> {
        let id = usable_id(self.id)?;
        let mut stat_mods = self.stat_mods;
        stat_mods.attack += self.attack_bonus;
        stat_mods.defense += self.defense_bonus;
        Some(Equipment {
            name: self.name.unwrap_or_else(|| id.clone()),
            slot: self.slot,
            weapon_type: self.weapon_type,
            stat_mods,
            percent_mods: self.percent_mods,
            id,
        })
    }
}

/// Loader for the `equipments/` directory.
pub struct EquipmentLoader;

impl EquipmentLoader {
    pub fn load_dir(dir: &Path) -> LoadResult<Vec<Document<Equipment>>> {
        load_documents(dir, EquipmentDocument::into_equipment)
    }
}

#[derive(Debug, Clone, Deserialize)]
struct BuffDocument {
    id: Option<String>,
    name: Option<String>,
    #[serde(default = "permanent")]
    duration: i32,
    #[serde(default = "unlimited")]
    charges: i32,
    #[serde(default)]
    triggers: Vec<BuffTrigger>,
}

fn permanent() -> i32 {
    Buff::PERMANENT
}

fn unlimited() -> i32 {
    Buff::UNLIMITED
}

impl BuffDocument {
    fn into_buff(self) -> Option<Buff> {
        let id = usable_id(self.id)?;
        Some(Buff {
            name: self.name.unwrap_or_else(|| id.clone()),
            duration: self.duration,
            charges: self.charges,
            triggers: self.triggers,
            id,
        })
    }
}

/// Loader for the `buffs/` directory.
pub struct BuffLoader;

impl BuffLoader {
    pub fn load_dir(dir: &Path) -> LoadResult<Vec<Document<Buff>>> {
        load_documents(dir, BuffDocument::into_buff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::state::EquipmentSlot;

    fn write(dir: &Path, name: &str, body: &str) {
        std::fs::write(dir.join(name), body).unwrap();
    }

    #[test]
    fn item_type_is_inferred_from_id() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "yellow_key.json",
            r#"{"id": "yellow_key", "name": "Yellow Key", "color": "yellow"}"#,
        );
        write(
            dir.path(),
            "small_potion.json",
            r#"{"id": "small_potion", "name": "Potion", "value": 50}"#,
        );
        write(dir.path(), "cross.json", r#"{"id": "cross", "specialType": "cross"}"#);
        write(dir.path(), "typed.json", r#"{"id": "red_thing", "type": "key", "color": "red"}"#);

        let items = ItemLoader::load_dir(dir.path()).unwrap();
        let kinds: Vec<(&str, ItemKind)> = items
            .iter()
            .map(|doc| (doc.value.id.as_str(), doc.value.kind))
            .collect();
        assert_eq!(
            kinds,
            vec![
                ("cross", ItemKind::Special),
                ("small_potion", ItemKind::Potion),
                ("red_thing", ItemKind::Key),
                ("yellow_key", ItemKind::Key),
            ]
        );
        assert_eq!(items[0].value.special_type, Some(SpecialKind::Cross));
        assert_eq!(items[1].value.value, Some(50));
    }

    #[test]
    fn equipment_folds_flat_bonuses() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "greatsword.json",
            r#"{"id": "greatsword", "name": "Greatsword", "slot": ["left_hand", "right_hand"],
                "weaponType": "two_handed", "attackBonus": 12, "stat_mods": {"attack": 3}}"#,
        );

        let equipments = EquipmentLoader::load_dir(dir.path()).unwrap();
        let sword = &equipments[0].value;
        assert!(sword.is_two_handed());
        assert_eq!(
            sword.slots(),
            &[EquipmentSlot::LeftHand, EquipmentSlot::RightHand]
        );
        assert_eq!(sword.stat_mods.attack, 15);
        assert_eq!(sword.stat_mods.defense, 0);
    }

    #[test]
    fn buffs_default_to_permanent_unlimited() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "first_strike.json",
            r#"{"id": "first_strike", "name": "First Strike", "charges": 3, "triggers": ["on_battle_start"]}"#,
        );
        write(dir.path(), "nameless.json", r#"{"name": "ghost"}"#);

        let buffs = BuffLoader::load_dir(dir.path()).unwrap();
        assert_eq!(buffs.len(), 1);
        let buff = &buffs[0].value;
        assert_eq!(buff.duration, Buff::PERMANENT);
        assert_eq!(buff.charges, 3);
        assert!(buff.triggers_on(BuffTrigger::OnBattleStart));
    }
}
