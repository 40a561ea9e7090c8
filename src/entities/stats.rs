//! Shared stat records
//!
//! Resource pools, attributes, and derived combat stats.

use serde::{Deserialize, Serialize};

/// A bounded resource (health, mana, stamina).
/// `current` is clamped to `[0, max]` by every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pool {
    pub current: f64,
    pub max: f64,
}

impl Pool {
    pub fn new(max: f64) -> Self {
        let max = max.max(0.0);
        Self { current: max, max }
    }

    /// Remove up to `amount`, returning what was actually removed
    pub fn take_damage(&mut self, amount: f64) -> f64 {
        let actual = amount.max(0.0).min(self.current);
        self.current -= actual;
        actual
    }

    /// Restore up to `amount`, returning what was actually restored
    pub fn heal(&mut self, amount: f64) -> f64 {
        let actual = amount.max(0.0).min(self.max - self.current);
        self.current += actual;
        actual
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }

    pub fn fraction(&self) -> f64 {
        if self.max <= 0.0 {
            0.0
        } else {
            self.current / self.max
        }
    }

    pub fn refill(&mut self) {
        self.current = self.max;
    }
}

/// Core character attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Attributes {
    /// Raw damage scaling
    pub power: u32,
    /// Health and defense
    pub toughness: u32,
    /// Crit, dodge, stamina
    pub agility: u32,
    /// Accuracy, mana
    pub intellect: u32,
}

/// Attribute names for point allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
    Power,
    Toughness,
    Agility,
    Intellect,
}

impl Attributes {
    pub fn new(power: u32, toughness: u32, agility: u32, intellect: u32) -> Self {
        Self { power, toughness, agility, intellect }
    }

    pub fn get(&self, attribute: Attribute) -> u32 {
        match attribute {
            Attribute::Power => self.power,
            Attribute::Toughness => self.toughness,
            Attribute::Agility => self.agility,
            Attribute::Intellect => self.intellect,
        }
    }

    pub fn raise(&mut self, attribute: Attribute, amount: u32) {
        match attribute {
            Attribute::Power => self.power += amount,
            Attribute::Toughness => self.toughness += amount,
            Attribute::Agility => self.agility += amount,
            Attribute::Intellect => self.intellect += amount,
        }
    }

    pub fn total(&self) -> u32 {
        self.power + self.toughness + self.agility + self.intellect
    }

    /// Field-wise sum
    pub fn plus(&self, other: &Attributes) -> Attributes {
        Attributes {
            power: self.power + other.power,
            toughness: self.toughness + other.toughness,
            agility: self.agility + other.agility,
            intellect: self.intellect + other.intellect,
        }
    }
}

/// Derived combat stats
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombatStats {
    /// Probability in `[0, 1]`
    pub crit_chance: f64,
    /// Informational crit multiplier; the pipeline uses 1.5 + weapon bonus
    pub crit_damage: f64,
    pub accuracy: f64,
    pub dodge: f64,
}

impl Default for CombatStats {
    fn default() -> Self {
        Self {
            crit_chance: 0.05,
            crit_damage: 1.5,
            accuracy: 0.9,
            dodge: 0.05,
        }
    }
}
