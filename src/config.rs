//! Game configuration
//!
//! Tuning knobs for combat, rewards, and spawning. Loaded from a RON file,
//! with compiled-in defaults when the file is missing or broken.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Combat formula tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatTuning {
    /// Multiplier on attacker power in base damage
    pub power_scaling: f64,
    /// Triangle advantage swing
    pub triangle_bonus: f64,
    /// Extra multiplier against a wild target of the attacker's archetype
    pub wild_affinity_bonus: f64,
    /// Crit multiplier before weapon bonus
    pub crit_multiplier: f64,
    /// Lowest damage any hit can deal
    pub damage_floor: f64,
    /// Status chance used when the target has no resistance profile
    pub default_status_chance: f64,
    /// Monster attacks use `damage * monster_skill_scaling` as skill damage
    pub monster_skill_scaling: f64,
    /// Share of a hit's final damage dealt per DoT tick
    pub dot_intensity: f64,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            power_scaling: 0.4,
            triangle_bonus: 0.20,
            wild_affinity_bonus: 0.35,
            crit_multiplier: 1.5,
            damage_floor: 1.0,
            default_status_chance: 0.7,
            monster_skill_scaling: 0.5,
            dot_intensity: 0.2,
        }
    }
}

/// Reward tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardTuning {
    /// Gold per monster level for regular monsters
    pub gold_per_level: u64,
    pub boss_xp_multiplier: u64,
    pub boss_gold_multiplier: u64,
    /// Damage factor for boss-fight actions other than a plain attack
    pub reduced_action_factor: f64,
}

impl Default for RewardTuning {
    fn default() -> Self {
        Self {
            gold_per_level: 10,
            boss_xp_multiplier: 3,
            boss_gold_multiplier: 5,
            reduced_action_factor: 0.5,
        }
    }
}

/// Monster spawn tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    /// Chance a generated monster is unique
    pub unique_chance: f64,
    /// Chance a generated monster is wild (checked after unique)
    pub wild_chance: f64,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            unique_chance: 0.05,
            wild_chance: 0.15,
        }
    }
}

/// Settings for automated simulations driving the core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Round cap for automated fights. The state machines never enforce it.
    pub max_rounds: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self { max_rounds: 50 }
    }
}

/// Full configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub combat: CombatTuning,
    pub rewards: RewardTuning,
    pub spawning: SpawnTuning,
    pub simulation: SimulationConfig,
}

impl GameConfig {
    /// Load from a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        let config = ron::from_str(&content)?;
        Ok(config)
    }

    /// Load from a RON file, falling back to defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        Self::load(path).unwrap_or_else(|e| {
            log::warn!("Failed to load config {}: {}. Using defaults.", path.display(), e);
            Self::default()
        })
    }

    /// Serialize to pretty RON
    pub fn to_ron(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }
}
