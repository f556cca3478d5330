use crate::mind::MindKind;
use crate::state::{Size, SpriteId};

/// Static data of one enemy type.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyDefinition {
    pub sprite: SpriteId,
    pub size: Size,
    pub health: u32,
    /// World units per millisecond.
    pub speed: f32,
    pub mind: MindKind,
    /// Contact damage per attack for melee minds, ignored by others.
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage: u32,
}
