//! Loot generation
//!
//! Boss and chest drops: a quality tier decides how many items drop and how
//! rare they can be.

use serde::{Deserialize, Serialize};

use crate::rng::RandomSource;

/// Item rarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        }
    }

    /// Gold value multiplier
    pub fn value_multiplier(&self) -> u64 {
        match self {
            Rarity::Common => 1,
            Rarity::Uncommon => 2,
            Rarity::Rare => 4,
            Rarity::Epic => 8,
            Rarity::Legendary => 20,
        }
    }

    fn step_up(self) -> Self {
        match self {
            Rarity::Common => Rarity::Uncommon,
            Rarity::Uncommon => Rarity::Rare,
            Rarity::Rare => Rarity::Epic,
            Rarity::Epic | Rarity::Legendary => Rarity::Legendary,
        }
    }
}

/// Quality tier of a loot table
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum LootQuality {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl LootQuality {
    /// Lowest rarity this tier can drop
    pub fn min_rarity(&self) -> Rarity {
        match self {
            LootQuality::Common => Rarity::Common,
            LootQuality::Uncommon => Rarity::Common,
            LootQuality::Rare => Rarity::Uncommon,
            LootQuality::Epic => Rarity::Rare,
            LootQuality::Legendary => Rarity::Epic,
        }
    }

    /// Inclusive item count range
    pub fn item_count(&self) -> (u32, u32) {
        match self {
            LootQuality::Common => (1, 2),
            LootQuality::Uncommon => (1, 3),
            LootQuality::Rare => (2, 3),
            LootQuality::Epic => (2, 4),
            LootQuality::Legendary => (3, 5),
        }
    }

    /// Chance (per item) of rolling one rarity step above the minimum,
    /// rolled repeatedly
    fn upgrade_chance(&self) -> f64 {
        match self {
            LootQuality::Common => 0.15,
            LootQuality::Uncommon => 0.25,
            LootQuality::Rare => 0.30,
            LootQuality::Epic => 0.35,
            LootQuality::Legendary => 0.40,
        }
    }
}

/// One dropped item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootDrop {
    pub name: String,
    pub rarity: Rarity,
    pub value: u64,
}

/// Names that can drop, grouped by rarity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootTable {
    pub common: Vec<String>,
    pub uncommon: Vec<String>,
    pub rare: Vec<String>,
    pub epic: Vec<String>,
    pub legendary: Vec<String>,
}

impl LootTable {
    pub fn names(&self, rarity: Rarity) -> &[String] {
        match rarity {
            Rarity::Common => &self.common,
            Rarity::Uncommon => &self.uncommon,
            Rarity::Rare => &self.rare,
            Rarity::Epic => &self.epic,
            Rarity::Legendary => &self.legendary,
        }
    }
}

impl Default for LootTable {
    fn default() -> Self {
        let names = |list: &[&str]| -> Vec<String> { list.iter().map(|s| s.to_string()).collect() };
        Self {
            common: names(&["Cracked Whetstone", "Frayed Bandage", "Tarnished Coin Purse", "Rusted Buckle"]),
            uncommon: names(&["Ashwood Charm", "Tempered Greaves", "Hunter's Quiver", "Scribe's Focus"]),
            rare: names(&["Ember-Forged Blade", "Runed Vambraces", "Stormglass Lens"]),
            epic: names(&["Crown of the Drowned District", "Wyrmscale Mantle", "Oathbreaker's Edge"]),
            legendary: names(&["Heart of Ruin", "The Last Lantern"]),
        }
    }
}

/// Roll a rarity for one item of the given quality
pub fn roll_rarity(quality: LootQuality, rng: &mut impl RandomSource) -> Rarity {
    let mut rarity = quality.min_rarity();
    while rarity != Rarity::Legendary && rng.roll() < quality.upgrade_chance() {
        rarity = rarity.step_up();
    }
    rarity
}

/// Roll the full drop for a loot tier
pub fn roll_loot(quality: LootQuality, level: u32, table: &LootTable, rng: &mut impl RandomSource) -> Vec<LootDrop> {
    let (min, max) = quality.item_count();
    let count = rng.range(min, max);
    let base_value = 5 + level as u64 * 3;

    (0..count)
        .filter_map(|_| {
            let rarity = roll_rarity(quality, rng);
            let names = table.names(rarity);
            if names.is_empty() {
                return None;
            }
            let name = names[rng.pick(names.len())].clone();
            Some(LootDrop {
                name,
                rarity,
                value: base_value * rarity.value_multiplier(),
            })
        })
        .collect()
}
