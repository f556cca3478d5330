use crate::state::SoundId;

/// Static data of one ability type.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityDefinition {
    pub mana_cost: u32,
    pub cooldown_ms: u32,
    /// Icon shown in the ability bar.
    pub icon: String,
    /// Played on successful use. Missing sounds are logged, not fatal.
    #[cfg_attr(feature = "serde", serde(default))]
    pub sound: Option<SoundId>,
    /// Overrides [`GameConfig::punitive_cooldown_ms`](crate::GameConfig) for this ability.
    #[cfg_attr(feature = "serde", serde(default))]
    pub punitive_cooldown_ms: Option<u32>,
}

impl AbilityDefinition {
    pub fn new(mana_cost: u32, cooldown_ms: u32, icon: impl Into<String>) -> Self {
        Self {
            mana_cost,
            cooldown_ms,
            icon: icon.into(),
            sound: None,
            punitive_cooldown_ms: None,
        }
    }
}
