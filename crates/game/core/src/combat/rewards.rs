//! Experience rewards and the leveling curve.

use tracing::info;

use crate::env::LevelTable;
use crate::state::{Character, Player, StatLine};

/// One level gained, with base-stat gains (`hp` is the maxhp gain).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct LevelUp {
    pub new_level: u32,
    pub stat_gains: StatLine,
}

/// `floor(maxhp / 10) + attack + defense + speed` of the monster's base stats.
pub fn experience_reward(monster: &Character) -> u32 {
    let total = monster.maxhp.div_euclid(10) + monster.attack + monster.defense + monster.speed;
    u32::try_from(total).unwrap_or(0)
}

/// Advances the player through every threshold its experience has crossed.
///
/// Each step adopts the next row's base stats and restores hp to the new
/// maxhp. Stops at the first missing row.
pub fn apply_level_ups(player: &mut Player, levels: &LevelTable) -> Vec<LevelUp> {
    let mut gained = Vec::new();

    while let Some(row) = levels.row(player.character.level + 1) {
        if player.exp < row.exp_needed {
            break;
        }

        let character = &mut player.character;
        let before = character.base_stats();
        character.level = row.level;
        character.maxhp = row.maxhp;
        character.attack = row.attack;
        character.defense = row.defense;
        character.speed = row.speed;
        character.hp = character.maxhp;

        let stat_gains = character.base_stats() - before;
        info!(level = row.level, exp = player.exp, "player leveled up");
        gained.push(LevelUp {
            new_level: row.level,
            stat_gains,
        });
    }

    gained
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::fixtures;

    fn hero() -> Player {
        let mut character = Character::new("hero", "Hero").with_stats(100, 10, 5, 10);
        character.hp = 40;
        Player::new(character)
    }

    #[test]
    fn reward_formula() {
        let slime = Character::new("slime", "Slime").with_stats(35, 8, 2, 5);
        assert_eq!(experience_reward(&slime), 3 + 8 + 2 + 5);
    }

    #[test]
    fn crossing_two_thresholds_levels_twice() {
        let levels = LevelTable::new(fixtures::levels());
        let mut player = hero();
        player.exp = 60;

        let gained = apply_level_ups(&mut player, &levels);

        assert_eq!(gained.len(), 2);
        assert_eq!(gained[0].new_level, 2);
        assert_eq!(gained[0].stat_gains, StatLine::new(50, 5, 3, 1));
        assert_eq!(player.character.level, 3);
        assert_eq!(player.character.maxhp, 200);
        assert_eq!(player.character.hp, 200);
    }

    #[test]
    fn below_threshold_changes_nothing() {
        let levels = LevelTable::new(fixtures::levels());
        let mut player = hero();
        player.exp = 19;

        assert!(apply_level_ups(&mut player, &levels).is_empty());
        assert_eq!(player.character.level, 1);
        assert_eq!(player.character.hp, 40);
    }

    #[test]
    fn top_of_table_stops() {
        let levels = LevelTable::new(fixtures::levels());
        let mut player = hero();
        player.exp = u32::MAX;

        assert_eq!(apply_level_ups(&mut player, &levels).len(), 3);
        assert_eq!(player.character.level, 4);
    }
}
