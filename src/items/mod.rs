//! Item system

pub mod equipment;
pub mod loot;

pub use equipment::{BonusTarget, EquipSlot, Equipment, Gear, PercentBonus, Weapon};
pub use loot::{roll_loot, roll_rarity, LootDrop, LootQuality, LootTable, Rarity};
