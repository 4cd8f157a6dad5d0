//! Builds a floor's initial state from its layout and the content pack.

use tracing::{debug, info};

use super::{
    Character, EntitiesState, Facing, GameState, InitializationError, InteractionState,
    PlacedObject, Placement, Player,
};
use crate::env::{GameEnv, OracleError};
use crate::map::{EntityKind, EntitySpec, MapLayout};

impl GameState {
    /// Creates the state for `floor`.
    ///
    /// `carried` is the player arriving by stairs; it keeps its stats and
    /// inventory and is placed on the floor's `player_start` marker, or at
    /// its own position under the fallback key when the floor has none.
    pub fn initialize(
        floor: i32,
        carried: Option<Player>,
        env: &GameEnv<'_>,
    ) -> Result<Self, InitializationError> {
        let content = env.content();
        let map = content
            .map_layout(floor)
            .ok_or(OracleError::MapNotFound(floor))?;

        let mut entities = EntitiesState::new();
        let mut player: Option<(String, Player)> = None;

        for (key, spec) in &map.entities {
            let object = match &spec.kind {
                EntityKind::PlayerStart => {
                    let placed = match &carried {
                        Some(template) => carried_player(template, spec),
                        None => fresh_player(spec, env)?,
                    };
                    // Only the chosen spawn gets a mirror, inserted below.
                    player = Some((key.clone(), placed));
                    continue;
                }
                EntityKind::Monster => PlacedObject::Monster(monster(spec, env)?),
                EntityKind::Item => {
                    let item = content
                        .item(&spec.id)
                        .ok_or_else(|| OracleError::ItemNotFound(spec.id.clone()))?;
                    PlacedObject::Item(item.clone())
                }
                EntityKind::Equipment => {
                    let equipment = map
                        .equipments
                        .get(&spec.id)
                        .or_else(|| content.equipment(&spec.id))
                        .ok_or_else(|| OracleError::EquipmentNotFound(spec.id.clone()))?;
                    PlacedObject::Equipment(equipment.clone())
                }
                EntityKind::Door => {
                    let door = lookup(&map, key, spec, |m, id| m.doors.get(id))
                        .ok_or_else(|| OracleError::DoorNotFound(key.clone()))?;
                    PlacedObject::Door(door.clone())
                }
                EntityKind::Stair => {
                    let stair = lookup(&map, key, spec, |m, id| m.stairs.get(id))
                        .ok_or_else(|| OracleError::StairNotFound(key.clone()))?;
                    PlacedObject::Stair(stair.clone())
                }
                EntityKind::Other(kind) => PlacedObject::Other {
                    kind: kind.clone(),
                    id: spec.id.clone(),
                },
            };
            entities.insert(key.clone(), Placement::new(spec.position(), object));
        }

        let (player_key, player) = match (player, carried) {
            (Some(found), _) => found,
            (None, Some(template)) => {
                let key = env.config().fallback_player_key.clone();
                debug!(floor, key = %key, "floor has no player_start; using fallback key");
                (key, template)
            }
            (None, None) => return Err(InitializationError::PlayerNotPlaced { floor }),
        };
        entities.insert(
            player_key.clone(),
            Placement::new(player.position(), PlacedObject::Player),
        );

        info!(
            floor,
            entities = entities.len(),
            player = %player_key,
            "floor initialized"
        );

        Ok(GameState {
            floor,
            map,
            player_key,
            player,
            entities,
            interaction: InteractionState::None,
        })
    }
}

/// Door and stair tables are keyed like the placement; fall back to the
/// authored content id when they are not.
fn lookup<'m, T>(
    map: &'m MapLayout,
    key: &str,
    spec: &EntitySpec,
    table: impl Fn(&'m MapLayout, &str) -> Option<&'m T>,
) -> Option<&'m T> {
    table(map, key).or_else(|| table(map, &spec.id))
}

fn carried_player(template: &Player, spec: &EntitySpec) -> Player {
    let mut player = template.clone();
    player.character.position = spec.position();
    player
}

fn fresh_player(spec: &EntitySpec, env: &GameEnv<'_>) -> Result<Player, InitializationError> {
    let data = env
        .content()
        .player()
        .ok_or(OracleError::PlayerDataMissing)?;
    let row = env
        .levels()
        .row(data.level)
        .ok_or(OracleError::LevelNotFound(data.level))?;

    let mut character = Character::new(data.id.clone(), data.name.clone()).with_stats(
        row.maxhp,
        row.attack,
        row.defense,
        row.speed,
    );
    character.level = data.level;
    character.position = spec.position();
    character.facing = Facing::Right;

    let mut player = Player::new(character);
    player.exp = data.exp;
    player.keys = data.keys;
    Ok(player)
}

fn monster(spec: &EntitySpec, env: &GameEnv<'_>) -> Result<Character, InitializationError> {
    let template = env
        .content()
        .monster(&spec.id)
        .ok_or_else(|| OracleError::MonsterNotFound(spec.id.clone()))?;

    let mut monster = template.clone();
    monster.position = spec.position();
    monster.facing = Facing::Right;
    monster.equipment.clear();
    monster.buffs.clear();
    Ok(monster)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{ContentSnapshot, LevelRow, PlayerTemplate};
    use crate::map::{Door, Stair, StairTarget};
    use crate::state::{Item, KeyColor, KeyRing, Position};

    fn content(map: MapLayout) -> ContentSnapshot {
        ContentSnapshot::new()
            .with_map(map)
            .with_player(PlayerTemplate {
                id: "hero".into(),
                name: "Hero".into(),
                level: 1,
                exp: 0,
                hp: None,
                keys: KeyRing {
                    yellow: 1,
                    ..KeyRing::default()
                },
            })
            .with_levels(vec![LevelRow {
                level: 1,
                exp_needed: 0,
                maxhp: 100,
                attack: 10,
                defense: 5,
                speed: 10,
            }])
            .with_monster(Character::new("slime", "Slime").with_stats(30, 8, 2, 5))
            .with_item(Item::key("yellow_key", "Yellow Key", KeyColor::Yellow))
    }

    fn floor_one() -> MapLayout {
        MapLayout::from_codes(1, &[[0, 0, 0], [0, 0, 0]])
            .with_entity("start", EntitySpec::new(EntityKind::PlayerStart, "hero", 0, 0))
            .with_entity("slime1", EntitySpec::new(EntityKind::Monster, "slime", 2, 0))
            .with_entity("slime2", EntitySpec::new(EntityKind::Monster, "slime", 2, 1))
            .with_entity("key1", EntitySpec::new(EntityKind::Item, "yellow_key", 1, 1))
            .with_entity("door_1", EntitySpec::new(EntityKind::Door, "door_1", 1, 0))
            .with_door(Door::new("door_1", KeyColor::Yellow))
            .with_entity("torch", EntitySpec::new(EntityKind::Other("torch".into()), "t", 0, 1))
    }

    #[test]
    fn fresh_player_uses_level_row() {
        let content = content(floor_one());
        let state = GameState::initialize(1, None, &GameEnv::new(&content)).unwrap();

        let hero = &state.player.character;
        assert_eq!(state.player_key, "start");
        assert_eq!((hero.hp, hero.maxhp, hero.attack), (100, 100, 10));
        assert_eq!(hero.facing, Facing::Right);
        assert_eq!(state.player.keys.yellow, 1);
        assert!(state.interaction.is_none());
        assert_eq!(state.entities.get("start").unwrap().position, Position::new(0, 0));
    }

    #[test]
    fn placements_share_content_but_not_keys() {
        let content = content(floor_one());
        let state = GameState::initialize(1, None, &GameEnv::new(&content)).unwrap();

        assert_eq!(state.entities.monsters().count(), 2);
        let slime2 = state.entities.monster("slime2").unwrap();
        assert_eq!(slime2.id, "slime");
        assert_eq!(slime2.position, Position::new(2, 1));
        assert!(state.entities.door("door_1").is_some());
        assert_eq!(
            state.entities.get("torch").unwrap().object.kind_name(),
            "torch"
        );
    }

    #[test]
    fn carried_player_keeps_progress() {
        let content = content(floor_one());
        let env = GameEnv::new(&content);
        let mut carried = GameState::initialize(1, None, &env).unwrap().player;
        carried.exp = 42;
        carried.special_items.push("bomb".into());

        let state = GameState::initialize(1, Some(carried), &env).unwrap();
        assert_eq!(state.player.exp, 42);
        assert!(state.player.holds("bomb"));
        assert_eq!(state.player.position(), Position::new(0, 0));
    }

    #[test]
    fn missing_spawn_uses_fallback_key_for_carried_player() {
        let map = MapLayout::from_codes(2, &[[0, 0]]).with_stair(Stair {
            id: "down".into(),
            target: StairTarget { floor: 1, x: 0, y: 0 },
        });
        let content = content(floor_one()).with_map(map);
        let env = GameEnv::new(&content);
        let mut carried = GameState::initialize(1, None, &env).unwrap().player;
        carried.character.position = Position::new(1, 0);

        let state = GameState::initialize(2, Some(carried), &env).unwrap();
        assert_eq!(state.player_key, "player");
        assert_eq!(state.entities.get("player").unwrap().position, Position::new(1, 0));
    }

    #[test]
    fn duplicate_spawns_leave_a_single_mirror() {
        let map = MapLayout::from_codes(1, &[[0, 0, 0]])
            .with_entity("a_start", EntitySpec::new(EntityKind::PlayerStart, "hero", 0, 0))
            .with_entity("b_start", EntitySpec::new(EntityKind::PlayerStart, "hero", 2, 0));
        let content = content(map);
        let state = GameState::initialize(1, None, &GameEnv::new(&content)).unwrap();

        let mirrors: Vec<_> = state
            .entities
            .iter()
            .filter(|(_, placement)| matches!(placement.object, PlacedObject::Player))
            .map(|(key, _)| key.to_string())
            .collect();
        assert_eq!(mirrors, vec![state.player_key.clone()]);
        assert_eq!(
            state.entities.get(&state.player_key).unwrap().position,
            state.player_position()
        );
    }

    #[test]
    fn missing_spawn_without_template_fails() {
        let content = content(MapLayout::from_codes(3, &[[0]]));
        let err = GameState::initialize(3, None, &GameEnv::new(&content)).unwrap_err();
        assert_eq!(err, InitializationError::PlayerNotPlaced { floor: 3 });
    }

    #[test]
    fn unknown_monster_is_a_content_error() {
        let map = MapLayout::from_codes(1, &[[0, 0]])
            .with_entity("start", EntitySpec::new(EntityKind::PlayerStart, "hero", 0, 0))
            .with_entity("m", EntitySpec::new(EntityKind::Monster, "dragon", 1, 0));
        let content = content(map);

        let err = GameState::initialize(1, None, &GameEnv::new(&content)).unwrap_err();
        assert_eq!(
            err,
            InitializationError::Content(OracleError::MonsterNotFound("dragon".into()))
        );
    }

    #[test]
    fn missing_floor_is_a_content_error() {
        let content = content(floor_one());
        let err = GameState::initialize(9, None, &GameEnv::new(&content)).unwrap_err();
        assert_eq!(err, InitializationError::Content(OracleError::MapNotFound(9)));
    }
}
