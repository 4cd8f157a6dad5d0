//! Final stats of a character after equipment.

use super::bonus::EquipmentBonuses;
use crate::state::{Character, StatKind, StatLine};

/// Stats used by combat. `maxhp` is the hp channel; `hp` is the current hp
/// capped to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FinalStats {
    pub hp: i32,
    pub maxhp: i32,
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
}

impl FinalStats {
    /// The four calculated stats, with maxhp reported as hp.
    pub fn as_line(&self) -> StatLine {
        StatLine::new(self.maxhp, self.attack, self.defense, self.speed)
    }
}

/// Applies every equipped modifier to `character`'s base stats.
pub fn calculate_final_stats(character: &Character) -> FinalStats {
    let bonuses = EquipmentBonuses::of(character);
    let maxhp = bonuses.apply(StatKind::Hp, character.maxhp);
    FinalStats {
        hp: character.hp.min(maxhp),
        maxhp,
        attack: bonuses.apply(StatKind::Attack, character.attack),
        defense: bonuses.apply(StatKind::Defense, character.defense),
        speed: bonuses.apply(StatKind::Speed, character.speed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Equipment, EquipmentSlot, PercentLine};

    #[test]
    fn unequipped_character_keeps_base_stats() {
        let hero = Character::new("hero", "Hero").with_stats(100, 10, 5, 8);
        let stats = calculate_final_stats(&hero);
        assert_eq!(stats.as_line(), StatLine::new(100, 10, 5, 8));
        assert_eq!(stats.hp, 100);
    }

    #[test]
    fn hp_channel_raises_maxhp_and_caps_current() {
        let mut hero = Character::new("hero", "Hero").with_stats(100, 10, 5, 8);
        hero.hp = 80;
        hero.equipment.insert(
            EquipmentSlot::Body,
            Equipment::new("mail", "Mail", EquipmentSlot::Body)
                .with_stat_mods(StatLine::new(20, 0, 0, 0))
                .with_percent_mods(PercentLine {
                    hp: 0.1,
                    ..PercentLine::default()
                }),
        );

        let stats = calculate_final_stats(&hero);
        assert_eq!(stats.maxhp, 130);
        assert_eq!(stats.hp, 80);

        hero.equipment.clear();
        hero.equipment.insert(
            EquipmentSlot::Body,
            Equipment::new("curse", "Curse", EquipmentSlot::Body)
                .with_stat_mods(StatLine::new(-50, 0, 0, 0)),
        );
        let stats = calculate_final_stats(&hero);
        assert_eq!(stats.maxhp, 50);
        assert_eq!(stats.hp, 50);
    }

    #[test]
    fn two_handed_weapon_counts_once() {
        let mut hero = Character::new("hero", "Hero").with_stats(100, 10, 5, 8);
        let axe = Equipment::two_handed("axe", "Axe").with_stat_mods(StatLine::new(0, 12, 0, 0));
        hero.equipment.insert(EquipmentSlot::LeftHand, axe.clone());
        hero.equipment.insert(EquipmentSlot::RightHand, axe);

        assert_eq!(calculate_final_stats(&hero).attack, 22);
    }
}
