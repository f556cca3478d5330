use crate::consumable::ConsumableCategory;
use crate::state::{SoundId, SpriteId};

/// Static data of one consumable type.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConsumableDefinition {
    pub icon: String,
    /// Sprite used when the item lies on the ground.
    pub sprite: SpriteId,
    pub description: String,
    pub sound: SoundId,
    pub category: ConsumableCategory,
}
