//! Consumable inventory slots.

use crate::config::GameConfig;
use crate::consumable::ConsumableKind;

/// Fixed number of consumable slots, each holding at most one item.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    slots: [Option<ConsumableKind>; GameConfig::MAX_INVENTORY_SLOTS],
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Item in `slot`; `None` for an empty slot. Out-of-range slots are `None` too,
    /// use [`Inventory::contains_slot`] to tell the two apart.
    pub fn get(&self, slot: usize) -> Option<ConsumableKind> {
        self.slots.get(slot).copied().flatten()
    }

    pub fn contains_slot(&self, slot: usize) -> bool {
        slot < self.slots.len()
    }

    /// Puts an item into the first free slot, returning its index.
    pub fn add(&mut self, kind: ConsumableKind) -> Option<usize> {
        let index = self.slots.iter().position(Option::is_none)?;
        self.slots[index] = Some(kind);
        Some(index)
    }

    /// Puts an item into a specific slot, replacing whatever was there.
    pub fn set(&mut self, slot: usize, kind: Option<ConsumableKind>) {
        if let Some(entry) = self.slots.get_mut(slot) {
            *entry = kind;
        }
    }

    pub fn take(&mut self, slot: usize) -> Option<ConsumableKind> {
        self.slots.get_mut(slot).and_then(Option::take)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, ConsumableKind)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.map(|kind| (index, kind)))
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }
}
