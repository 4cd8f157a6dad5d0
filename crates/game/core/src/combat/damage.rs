//! Damage formula.

use crate::state::Character;
use crate::stats::calculate_final_stats;

/// Every hit lands for at least this much.
pub const MIN_DAMAGE: i32 = 1;

/// `attack - defense`, never below [`MIN_DAMAGE`].
pub fn calculate_damage(attack: i32, defense: i32) -> i32 {
    attack.saturating_sub(defense).max(MIN_DAMAGE)
}

/// Damage `attacker` deals to `defender` using both sides' final stats.
pub fn damage_between(attacker: &Character, defender: &Character) -> i32 {
    calculate_damage(
        calculate_final_stats(attacker).attack,
        calculate_final_stats(defender).defense,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Equipment, EquipmentSlot, StatLine};

    #[test]
    fn damage_is_difference_when_positive() {
        assert_eq!(calculate_damage(10, 2), 8);
        assert_eq!(calculate_damage(3, 2), 1);
    }

    #[test]
    fn non_positive_difference_deals_one() {
        for (attack, defense) in [(5, 5), (1, 10), (0, 0), (-3, 4)] {
            assert_eq!(calculate_damage(attack, defense), 1);
        }
    }

    #[test]
    fn equipment_feeds_into_damage() {
        let mut hero = Character::new("hero", "Hero").with_stats(100, 10, 5, 10);
        let slime = Character::new("slime", "Slime").with_stats(30, 8, 2, 5);
        assert_eq!(damage_between(&hero, &slime), 8);

        hero.equipment.insert(
            EquipmentSlot::RightHand,
            Equipment::new("sword", "Sword", EquipmentSlot::RightHand)
                .with_stat_mods(StatLine::new(0, 4, 0, 0)),
        );
        assert_eq!(damage_between(&hero, &slime), 12);
        assert_eq!(damage_between(&slime, &hero), 3);
    }
}
