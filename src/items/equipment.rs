//! Equipment system
//!
//! Weapons, worn gear, and the percentage bonuses they feed into the
//! damage pipeline.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::combat::DamageType;

/// A wielded weapon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    /// Flat damage added to every attack
    pub flat_damage: f64,
    /// Added to the wielder's crit chance (0.05 = +5 percentage points)
    pub crit_bonus: f64,
    /// Added to the 1.5x crit multiplier
    pub crit_multiplier_bonus: f64,
}

impl Weapon {
    pub fn new(name: impl Into<String>, flat_damage: f64) -> Self {
        Self {
            name: name.into(),
            flat_damage,
            crit_bonus: 0.0,
            crit_multiplier_bonus: 0.0,
        }
    }

    pub fn with_crit(mut self, crit_bonus: f64, crit_multiplier_bonus: f64) -> Self {
        self.crit_bonus = crit_bonus;
        self.crit_multiplier_bonus = crit_multiplier_bonus;
        self
    }
}

/// Worn equipment slots (the weapon is held separately)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipSlot {
    Head,
    Body,
    Hands,
    Feet,
    Amulet,
    Ring,
}

impl EquipSlot {
    pub fn name(&self) -> &'static str {
        match self {
            EquipSlot::Head => "Head",
            EquipSlot::Body => "Body",
            EquipSlot::Hands => "Hands",
            EquipSlot::Feet => "Feet",
            EquipSlot::Amulet => "Amulet",
            EquipSlot::Ring => "Ring",
        }
    }
}

/// Which attacks a percentage bonus applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BonusTarget {
    All,
    Type(DamageType),
}

impl BonusTarget {
    pub fn matches(&self, damage_type: DamageType) -> bool {
        match self {
            BonusTarget::All => true,
            BonusTarget::Type(t) => *t == damage_type,
        }
    }
}

/// Percentage damage bonus on a piece of gear (0.10 = +10%)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentBonus {
    pub target: BonusTarget,
    pub percent: f64,
}

/// A worn item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gear {
    pub name: String,
    pub slot: EquipSlot,
    #[serde(default)]
    pub defense: f64,
    #[serde(default)]
    pub bonuses: Vec<PercentBonus>,
}

impl Gear {
    pub fn new(name: impl Into<String>, slot: EquipSlot) -> Self {
        Self {
            name: name.into(),
            slot,
            defense: 0.0,
            bonuses: Vec::new(),
        }
    }

    pub fn with_defense(mut self, defense: f64) -> Self {
        self.defense = defense;
        self
    }

    pub fn with_bonus(mut self, target: BonusTarget, percent: f64) -> Self {
        self.bonuses.push(PercentBonus { target, percent });
        self
    }
}

/// Player equipment slots
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    slots: HashMap<EquipSlot, Gear>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Equip gear, returning whatever occupied the slot
    pub fn equip(&mut self, gear: Gear) -> Option<Gear> {
        self.slots.insert(gear.slot, gear)
    }

    pub fn total_defense(&self) -> f64 {
        self.slots.values().map(|g| g.defense).sum()
    }

    /// Sum of every percentage bonus that applies to `damage_type`
    pub fn percent_bonus(&self, damage_type: DamageType) -> f64 {
        self.slots
            .values()
            .flat_map(|g| g.bonuses.iter())
            .filter(|b| b.target.matches(damage_type))
            .map(|b| b.percent)
            .sum()
    }
}
