//! Turn order and the battle driver.

use crate::action::{Action, AttackAction, EndBattleAction};
use crate::config::GameConfig;
use crate::state::{BattleEndReason, BuffTrigger, BattleTurn, Character, GameState};
use crate::stats::calculate_final_stats;

/// Who acts first and whether a first-strike charge pays for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Opening {
    pub turn: BattleTurn,
    pub first_strike: bool,
}

/// The player opens on ties. A charged first-strike buff overrides speed.
pub fn opening_turn(player: &Character, monster: &Character) -> Opening {
    let first_strike = player
        .buff(GameConfig::FIRST_STRIKE_BUFF)
        .is_some_and(|buff| buff.has_charges() && buff.triggers_on(BuffTrigger::OnBattleStart));
    if first_strike {
        return Opening {
            turn: BattleTurn::Player,
            first_strike,
        };
    }

    let turn = if calculate_final_stats(player).speed >= calculate_final_stats(monster).speed {
        BattleTurn::Player
    } else {
        BattleTurn::Monster
    };
    Opening {
        turn,
        first_strike: false,
    }
}

/// The action a front end would dispatch next for the active battle.
///
/// Returns `None` outside of battle. At `battle_end` the winner is derived
/// from round count and battle-local hp.
pub fn next_battle_action(state: &GameState, config: &GameConfig) -> Option<Action> {
    let battle = state.battle()?;
    let player = state.player_key.clone();
    let monster = battle.monster_id.clone();

    let action = match battle.turn {
        BattleTurn::Player => Action::Attack(AttackAction::new(player, monster)),
        BattleTurn::Monster => Action::Attack(AttackAction::new(monster, player)),
        BattleTurn::BattleEnd if battle.round > config.max_combat_rounds => {
            Action::EndBattle(EndBattleAction::new(None, BattleEndReason::Timeout))
        }
        BattleTurn::BattleEnd => {
            let winner = if battle.player_hp > 0 { player } else { monster };
            Action::EndBattle(EndBattleAction::new(
                Some(winner),
                BattleEndReason::HpDepleted,
            ))
        }
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Battle, Buff, InteractionState, fixtures};

    fn hero(speed: i32) -> Character {
        Character::new("hero", "Hero").with_stats(100, 10, 5, speed)
    }

    fn snowflake(charges: i32) -> Buff {
        Buff {
            id: GameConfig::FIRST_STRIKE_BUFF.into(),
            name: "First Strike".into(),
            duration: Buff::PERMANENT,
            charges,
            triggers: vec![BuffTrigger::OnBattleStart],
        }
    }

    #[test]
    fn faster_monster_opens() {
        let bat = Character::new("bat", "Bat").with_stats(20, 5, 1, 20);
        assert_eq!(opening_turn(&hero(10), &bat).turn, BattleTurn::Monster);
    }

    #[test]
    fn ties_go_to_the_player() {
        let slime = Character::new("slime", "Slime").with_stats(20, 5, 1, 10);
        assert_eq!(opening_turn(&hero(10), &slime).turn, BattleTurn::Player);
    }

    #[test]
    fn first_strike_beats_speed_only_with_charges() {
        let bat = Character::new("bat", "Bat").with_stats(20, 5, 1, 20);
        let mut player = hero(1);

        player.buffs.push(snowflake(2));
        let opening = opening_turn(&player, &bat);
        assert_eq!(opening.turn, BattleTurn::Player);
        assert!(opening.first_strike);

        player.buffs[0].charges = 0;
        assert_eq!(opening_turn(&player, &bat).turn, BattleTurn::Monster);
    }

    #[test]
    fn driver_follows_turn_and_outcome() {
        let content = fixtures::content(fixtures::room());
        let mut state = fixtures::state(&content);
        let config = GameConfig::default();
        assert!(next_battle_action(&state, &config).is_none());

        let mut battle = Battle {
            monster_id: "slime1".into(),
            turn: BattleTurn::Monster,
            player_hp: 50,
            monster_hp: 10,
            round: 3,
        };
        state.interaction = InteractionState::Battle(battle.clone());
        assert_eq!(
            next_battle_action(&state, &config),
            Some(Action::Attack(AttackAction::new("slime1", "start")))
        );

        battle.turn = BattleTurn::BattleEnd;
        battle.monster_hp = 0;
        state.interaction = InteractionState::Battle(battle.clone());
        assert_eq!(
            next_battle_action(&state, &config),
            Some(Action::EndBattle(EndBattleAction::new(
                Some("start".into()),
                BattleEndReason::HpDepleted
            )))
        );

        battle.monster_hp = 10;
        battle.round = config.max_combat_rounds + 1;
        state.interaction = InteractionState::Battle(battle);
        assert_eq!(
            next_battle_action(&state, &config),
            Some(Action::EndBattle(EndBattleAction::new(None, BattleEndReason::Timeout)))
        );
    }
}
