use tracing::info;

use crate::action::ActionTransition;
use crate::combat::{LevelUp, apply_level_ups, damage_between, experience_reward, opening_turn};
use crate::config::GameConfig;
use crate::env::GameEnv;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{
    Battle, BattleEndReason, BattleTurn, Character, GameState, InteractionState, PlacedObject,
};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatError {
    #[error("no battle is active")]
    NotInBattle,

    #[error("a battle is already active")]
    AlreadyInBattle,

    #[error("the battle has ended; dispatch END_BATTLE")]
    BattleOver,

    #[error("monster '{0}' not found")]
    MonsterNotFound(String),

    #[error("'{0}' is not part of this battle")]
    NotACombatant(String),

    #[error("it is the {expected} turn")]
    OutOfTurn { expected: BattleTurn },
}

impl GameError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            CombatError::MonsterNotFound(_) | CombatError::NotACombatant(_) => {
                ErrorSeverity::Validation
            }
            _ => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            CombatError::NotInBattle => "COMBAT_NOT_IN_BATTLE",
            CombatError::AlreadyInBattle => "COMBAT_ALREADY_IN_BATTLE",
            CombatError::BattleOver => "COMBAT_BATTLE_OVER",
            CombatError::MonsterNotFound(_) => "COMBAT_MONSTER_NOT_FOUND",
            CombatError::NotACombatant(_) => "COMBAT_NOT_A_COMBATANT",
            CombatError::OutOfTurn { .. } => "COMBAT_OUT_OF_TURN",
        }
    }
}

/// Opens a battle against the monster at placement `monster_key`.
///
/// Battle-local hp starts from both sides' canonical hp. A charged
/// first-strike buff is spent here.
pub(crate) fn begin_battle(
    state: &mut GameState,
    monster_key: &str,
) -> Result<BattleTurn, CombatError> {
    let monster = state
        .entities
        .monster(monster_key)
        .ok_or_else(|| CombatError::MonsterNotFound(monster_key.to_string()))?;
    let opening = opening_turn(&state.player.character, monster);
    let monster_hp = monster.hp;

    if opening.first_strike {
        spend_first_strike(&mut state.player.character);
    }

    state.interaction = InteractionState::Battle(Battle {
        monster_id: monster_key.to_string(),
        turn: opening.turn,
        player_hp: state.player.character.hp,
        monster_hp,
        round: 1,
    });
    Ok(opening.turn)
}

fn spend_first_strike(character: &mut Character) {
    let exhausted = character
        .buffs
        .iter_mut()
        .find(|buff| buff.id == GameConfig::FIRST_STRIKE_BUFF)
        .is_some_and(|buff| buff.consume_charge());
    if exhausted {
        character
            .buffs
            .retain(|buff| buff.id != GameConfig::FIRST_STRIKE_BUFF);
    }
}

/// Starts a battle with a monster directly, without walking into it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct StartBattleAction {
    /// Placement key of the monster.
    pub monster_id: String,
}

impl StartBattleAction {
    pub fn new(monster_id: impl Into<String>) -> Self {
        Self {
            monster_id: monster_id.into(),
        }
    }
}

impl ActionTransition for StartBattleAction {
    type Error = CombatError;
    type Result = BattleTurn;

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        if state.battle().is_some() {
            return Err(CombatError::AlreadyInBattle);
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<BattleTurn, CombatError> {
        begin_battle(state, &self.monster_id)
    }
}

/// One hit inside the active battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct AttackAction {
    pub attacker_id: String,
    pub defender_id: String,
}

impl AttackAction {
    pub fn new(attacker_id: impl Into<String>, defender_id: impl Into<String>) -> Self {
        Self {
            attacker_id: attacker_id.into(),
            defender_id: defender_id.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttackOutcome {
    pub damage: i32,
    /// Defender's battle-local hp before and after the hit.
    pub defender_hp: (i32, i32),
    pub next_turn: BattleTurn,
}

impl AttackAction {
    /// Resolves which side is attacking. Returns `Player` when the player
    /// attacks the battle's monster and `Monster` for the reverse.
    fn side(&self, state: &GameState, battle: &Battle) -> Result<BattleTurn, CombatError> {
        let player = state.player_key.as_str();
        let monster = battle.monster_id.as_str();
        match (self.attacker_id.as_str(), self.defender_id.as_str()) {
            (a, d) if a == player && d == monster => Ok(BattleTurn::Player),
            (a, d) if a == monster && d == player => Ok(BattleTurn::Monster),
            (a, d) if a == player || a == monster => {
                Err(CombatError::NotACombatant(d.to_string()))
            }
            (a, _) => Err(CombatError::NotACombatant(a.to_string())),
        }
    }
}

impl ActionTransition for AttackAction {
    type Error = CombatError;
    type Result = AttackOutcome;

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let battle = state.battle().ok_or(CombatError::NotInBattle)?;
        if battle.is_over() {
            return Err(CombatError::BattleOver);
        }
        let side = self.side(state, battle)?;
        if side != battle.turn {
            return Err(CombatError::OutOfTurn {
                expected: battle.turn,
            });
        }
        if state.entities.monster(&battle.monster_id).is_none() {
            return Err(CombatError::MonsterNotFound(battle.monster_id.clone()));
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        env: &GameEnv<'_>,
    ) -> Result<AttackOutcome, CombatError> {
        let battle = state.battle().ok_or(CombatError::NotInBattle)?;
        let side = self.side(state, battle)?;
        let monster = state
            .entities
            .monster(&battle.monster_id)
            .ok_or_else(|| CombatError::MonsterNotFound(battle.monster_id.clone()))?;
        let player = &state.player.character;

        let damage = match side {
            BattleTurn::Player => damage_between(player, monster),
            _ => damage_between(monster, player),
        };

        let max_rounds = env.config().max_combat_rounds;
        let battle = state
            .interaction
            .battle_mut()
            .ok_or(CombatError::NotInBattle)?;
        let defender_hp = match side {
            BattleTurn::Player => &mut battle.monster_hp,
            _ => &mut battle.player_hp,
        };
        let before = *defender_hp;
        *defender_hp -= damage;
        let after = *defender_hp;

        battle.turn = if battle.player_hp <= 0 || battle.monster_hp <= 0 {
            BattleTurn::BattleEnd
        } else {
            if side == BattleTurn::Monster {
                battle.round += 1;
            }
            if battle.round > max_rounds {
                BattleTurn::BattleEnd
            } else if side == BattleTurn::Player {
                BattleTurn::Monster
            } else {
                BattleTurn::Player
            }
        };

        Ok(AttackOutcome {
            damage,
            defender_hp: (before, after),
            next_turn: battle.turn,
        })
    }

    fn post_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let battle = state.battle().ok_or(CombatError::NotInBattle)?;
        if battle.round > env.config().max_combat_rounds && !battle.is_over() {
            return Err(CombatError::OutOfTurn {
                expected: BattleTurn::BattleEnd,
            });
        }
        Ok(())
    }
}

/// Closes the active battle and settles its outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct EndBattleAction {
    /// Placement key of the winner; `None` on timeout.
    pub winner_id: Option<String>,
    pub reason: BattleEndReason,
}

impl EndBattleAction {
    pub fn new(winner_id: Option<String>, reason: BattleEndReason) -> Self {
        Self { winner_id, reason }
    }
}

/// Settlement of a finished battle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BattleReport {
    pub player_won: bool,
    pub experience: u32,
    pub level_ups: Vec<LevelUp>,
    /// Door placement keys removed because their condition was met.
    pub opened_doors: Vec<String>,
}

impl ActionTransition for EndBattleAction {
    type Error = CombatError;
    type Result = BattleReport;

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        state.battle().map(|_| ()).ok_or(CombatError::NotInBattle)
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<BattleReport, CombatError> {
        let battle = state.battle().cloned().ok_or(CombatError::NotInBattle)?;
        let winner = self.winner_id.as_deref();
        let mut report = BattleReport::default();

        state.player.character.hp = battle.player_hp.max(0);

        if self.reason == BattleEndReason::HpDepleted {
            if winner == Some(state.player_key.as_str()) {
                let monster = state
                    .remove_placement(&battle.monster_id)
                    .and_then(|placement| match placement.object {
                        PlacedObject::Monster(monster) => Some(monster),
                        _ => None,
                    })
                    .ok_or_else(|| CombatError::MonsterNotFound(battle.monster_id.clone()))?;

                report.player_won = true;
                report.opened_doors = open_conditional_doors(state, &monster.id);
                report.experience = experience_reward(&monster);
                state.player.exp = state.player.exp.saturating_add(report.experience);
                report.level_ups = apply_level_ups(&mut state.player, env.levels());
            } else if winner == Some(battle.monster_id.as_str()) {
                state.player.character.hp = 0;
            }
        }

        info!(
            monster = %battle.monster_id,
            reason = %self.reason,
            player_won = report.player_won,
            exp = report.experience,
            "battle ended"
        );

        state.interaction = InteractionState::None;
        Ok(report)
    }
}

/// Removes doors waiting on the defeat of `monster_id` (a content id).
fn open_conditional_doors(state: &mut GameState, monster_id: &str) -> Vec<String> {
    let doors: Vec<String> = state
        .entities
        .doors()
        .filter(|(_, door)| door.required_defeat() == Some(monster_id))
        .map(|(key, _)| key.to_string())
        .collect();
    for key in &doors {
        state.remove_placement(key);
    }
    doors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::Door;
    use crate::state::fixtures::*;
    use crate::state::{Buff, BuffTrigger, KeyColor, Placement, Position};

    fn run<T: ActionTransition>(
        action: &T,
        state: &mut GameState,
        env: &GameEnv<'_>,
    ) -> Result<T::Result, T::Error> {
        action.pre_validate(state, env)?;
        let result = action.apply(state, env)?;
        action.post_validate(state, env)?;
        Ok(result)
    }

    fn slime() -> Character {
        Character::new("slime", "Slime").with_stats(30, 8, 2, 5)
    }

    #[test]
    fn player_hit_reduces_battle_local_hp_only() {
        let content = content(room());
        let env = GameEnv::new(&content);
        let mut state = state(&content);
        place_monster(&mut state, "slime1", slime(), Position::new(3, 2));

        assert_eq!(
            run(&StartBattleAction::new("slime1"), &mut state, &env).unwrap(),
            BattleTurn::Player
        );
        let outcome = run(&AttackAction::new("start", "slime1"), &mut state, &env).unwrap();

        assert_eq!(outcome.damage, 8);
        assert_eq!(outcome.defender_hp, (30, 22));
        assert_eq!(outcome.next_turn, BattleTurn::Monster);
        assert_eq!(state.entities.monster("slime1").unwrap().hp, 30);
        assert_eq!(state.battle().unwrap().round, 1);
    }

    #[test]
    fn round_advances_after_monster_and_caps_at_limit() {
        let content = content(room());
        let env = GameEnv::new(&content);
        let mut state = state(&content);
        let wall = Character::new("golem", "Golem").with_stats(1000, 6, 100, 1);
        place_monster(&mut state, "golem1", wall, Position::new(3, 2));
        run(&StartBattleAction::new("golem1"), &mut state, &env).unwrap();

        let mut attacks = 0;
        while !state.battle().unwrap().is_over() {
            let action = match state.battle().unwrap().turn {
                BattleTurn::Player => AttackAction::new("start", "golem1"),
                _ => AttackAction::new("golem1", "start"),
            };
            run(&action, &mut state, &env).unwrap();
            attacks += 1;
        }

        let battle = state.battle().unwrap();
        assert_eq!(attacks, 16);
        assert_eq!(battle.round, 9);
        assert_eq!(battle.player_hp, 100 - 8);
    }

    #[test]
    fn attacks_are_rejected_out_of_turn_or_outside_battle() {
        let content = content(room());
        let env = GameEnv::new(&content);
        let mut state = state(&content);
        place_monster(&mut state, "slime1", slime(), Position::new(3, 2));

        let attack = AttackAction::new("start", "slime1");
        assert_eq!(
            attack.pre_validate(&state, &env),
            Err(CombatError::NotInBattle)
        );

        run(&StartBattleAction::new("slime1"), &mut state, &env).unwrap();
        assert_eq!(
            AttackAction::new("slime1", "start").pre_validate(&state, &env),
            Err(CombatError::OutOfTurn {
                expected: BattleTurn::Player
            })
        );
        assert_eq!(
            AttackAction::new("start", "ghost").pre_validate(&state, &env),
            Err(CombatError::NotACombatant("ghost".into()))
        );
    }

    #[test]
    fn victory_removes_monster_opens_doors_and_rewards() {
        let content = content(room());
        let env = GameEnv::new(&content);
        let mut state = state(&content);
        place_monster(&mut state, "slime1", slime(), Position::new(3, 2));
        state.entities.insert(
            "gate",
            Placement::new(
                Position::new(0, 0),
                PlacedObject::Door(Door::new("gate", KeyColor::Red).unlocked_by_defeating("slime")),
            ),
        );
        state.entities.insert(
            "plain",
            Placement::new(
                Position::new(4, 0),
                PlacedObject::Door(Door::new("plain", KeyColor::Yellow)),
            ),
        );
        run(&StartBattleAction::new("slime1"), &mut state, &env).unwrap();
        state.interaction.battle_mut().unwrap().player_hp = 70;
        state.interaction.battle_mut().unwrap().monster_hp = 0;
        state.interaction.battle_mut().unwrap().turn = BattleTurn::BattleEnd;

        let report = run(
            &EndBattleAction::new(Some("start".into()), BattleEndReason::HpDepleted),
            &mut state,
            &env,
        )
        .unwrap();

        assert!(report.player_won);
        assert_eq!(report.experience, 3 + 8 + 2 + 5);
        assert_eq!(report.opened_doors, vec!["gate".to_string()]);
        assert!(state.entities.monster("slime1").is_none());
        assert!(state.entities.door("plain").is_some());
        assert_eq!(state.player.exp, 18);
        assert_eq!(state.player.character.hp, 70);
        assert!(state.interaction.is_none());
    }

    #[test]
    fn defeat_zeroes_hp_and_timeout_keeps_monster() {
        let content = content(room());
        let env = GameEnv::new(&content);
        let mut state = state(&content);
        place_monster(&mut state, "slime1", slime(), Position::new(3, 2));

        let mut lost = state.clone();
        run(&StartBattleAction::new("slime1"), &mut lost, &env).unwrap();
        lost.interaction.battle_mut().unwrap().player_hp = -4;
        run(
            &EndBattleAction::new(Some("slime1".into()), BattleEndReason::HpDepleted),
            &mut lost,
            &env,
        )
        .unwrap();
        assert_eq!(lost.player.character.hp, 0);
        assert!(lost.entities.monster("slime1").is_some());

        run(&StartBattleAction::new("slime1"), &mut state, &env).unwrap();
        state.interaction.battle_mut().unwrap().player_hp = 55;
        let report = run(
            &EndBattleAction::new(None, BattleEndReason::Timeout),
            &mut state,
            &env,
        )
        .unwrap();
        assert!(!report.player_won);
        assert_eq!(state.player.character.hp, 55);
        assert!(state.entities.monster("slime1").is_some());
        assert_eq!(state.player.exp, 0);
    }

    #[test]
    fn first_strike_is_spent_on_battle_start() {
        let content = content(room());
        let env = GameEnv::new(&content);
        let mut state = state(&content);
        let bat = Character::new("bat", "Bat").with_stats(20, 5, 1, 50);
        place_monster(&mut state, "bat1", bat, Position::new(3, 2));
        state.player.character.buffs.push(Buff {
            id: GameConfig::FIRST_STRIKE_BUFF.into(),
            name: "First Strike".into(),
            duration: Buff::PERMANENT,
            charges: 1,
            triggers: vec![BuffTrigger::OnBattleStart],
        });

        let turn = run(&StartBattleAction::new("bat1"), &mut state, &env).unwrap();

        assert_eq!(turn, BattleTurn::Player);
        assert!(state.player.character.buffs.is_empty());
    }
}
