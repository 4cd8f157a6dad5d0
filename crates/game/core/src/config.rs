/// Game configuration constants and tunable parameters.
///
/// Every field has a default so a content pack may override only the values it
/// cares about in `config.toml`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Rounds after which a battle is forced to end with a timeout.
    pub max_combat_rounds: u32,
    /// Placement key used for the player when a floor has no `player_start`.
    pub fallback_player_key: String,
    /// Content id of the potion consumed by `USE_POTION`.
    pub default_potion_id: String,
    /// Permanent attack and defense granted by the cross.
    pub cross_bonus: i32,
    /// Charges on the first-strike buff granted by the snowflake.
    pub first_strike_charges: i32,
    /// Numeric tile code that blocks movement.
    pub wall_tile: i64,
}

impl GameConfig {
    pub const DEFAULT_MAX_COMBAT_ROUNDS: u32 = 8;
    pub const DEFAULT_FALLBACK_PLAYER_KEY: &'static str = "player";
    pub const DEFAULT_POTION_ID: &'static str = "small_potion";
    pub const DEFAULT_CROSS_BONUS: i32 = 10;
    pub const DEFAULT_FIRST_STRIKE_CHARGES: i32 = 3;
    pub const DEFAULT_WALL_TILE: i64 = 1;

    /// Buff id granted by the snowflake.
    pub const FIRST_STRIKE_BUFF: &'static str = "first_strike";
    /// Inventory token pushed when a bomb is picked up.
    pub const BOMB_ITEM: &'static str = "bomb";

    pub fn new() -> Self {
        Self {
            max_combat_rounds: Self::DEFAULT_MAX_COMBAT_ROUNDS,
            fallback_player_key: Self::DEFAULT_FALLBACK_PLAYER_KEY.to_string(),
            default_potion_id: Self::DEFAULT_POTION_ID.to_string(),
            cross_bonus: Self::DEFAULT_CROSS_BONUS,
            first_strike_charges: Self::DEFAULT_FIRST_STRIKE_CHARGES,
            wall_tile: Self::DEFAULT_WALL_TILE,
        }
    }

    pub fn with_max_combat_rounds(mut self, rounds: u32) -> Self {
        self.max_combat_rounds = rounds;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
