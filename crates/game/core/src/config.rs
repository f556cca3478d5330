/// Game configuration constants and tunable parameters.
///
/// Every field has a compile-time default exposed as an associated constant so
/// callers that only need the default (tests, fallbacks) never construct a
/// config just to read one number.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Width (and height) of one grid cell in world units.
    pub cell_size: f32,

    /// Distance at which an enemy counts as having reached its next waypoint.
    pub waypoint_proximity: f32,

    /// Interval between full path replans for an enemy.
    pub path_update_interval_ms: u32,

    /// Interval between waypoint direction reevaluations for an enemy.
    pub direction_update_interval_ms: u32,

    /// How far ahead (in movement time) enemies test for collisions.
    pub collision_lookahead_ms: u32,

    /// Cooldown forced after a failed ability/consumable attempt.
    ///
    /// Individual abilities may override this through
    /// `AbilityDefinition::punitive_cooldown_ms`.
    pub punitive_cooldown_ms: u32,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_INVENTORY_SLOTS: usize = 8;
    pub const MAX_UNLOCKED_ABILITIES: usize = 12;
    pub const MAX_BUFFS: usize = 12;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_CELL_SIZE: f32 = 32.0;
    pub const DEFAULT_WAYPOINT_PROXIMITY: f32 = 50.0;
    pub const DEFAULT_PATH_UPDATE_INTERVAL_MS: u32 = 900;
    pub const DEFAULT_DIRECTION_UPDATE_INTERVAL_MS: u32 = 1000;
    pub const DEFAULT_COLLISION_LOOKAHEAD_MS: u32 = 100;
    pub const DEFAULT_PUNITIVE_COOLDOWN_MS: u32 = 500;

    pub fn new() -> Self {
        Self {
            cell_size: Self::DEFAULT_CELL_SIZE,
            waypoint_proximity: Self::DEFAULT_WAYPOINT_PROXIMITY,
            path_update_interval_ms: Self::DEFAULT_PATH_UPDATE_INTERVAL_MS,
            direction_update_interval_ms: Self::DEFAULT_DIRECTION_UPDATE_INTERVAL_MS,
            collision_lookahead_ms: Self::DEFAULT_COLLISION_LOOKAHEAD_MS,
            punitive_cooldown_ms: Self::DEFAULT_PUNITIVE_COOLDOWN_MS,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
