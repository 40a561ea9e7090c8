//! Resistance and immunity evaluation
//!
//! Percent resistances mitigate damage and status chances:
//! `multiplier = (100 - resistance) / 100`. Negative values amplify.
//! Bosses carry hard-coded immunities that no profile value can override.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Lowest resistance any profile may hold
pub const MIN_RESISTANCE: i32 = -99;
/// Highest resistance for non-boss entities
pub const MAX_RESISTANCE: i32 = 99;
/// Bosses may reach full immunity through a resistance slot
pub const MAX_BOSS_RESISTANCE: i32 = 100;
/// Chance factor applied when slowing a boss
pub const BOSS_SLOW_FACTOR: f64 = 0.3;
/// Damage never drops below this after resistance
pub const MIN_DAMAGE: f64 = 1.0;

/// Damage types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DamageType {
    #[default]
    Physical,
    Fire,
    Ice,
    Lightning,
    Poison,
    Dark,
    Holy,
}

impl DamageType {
    pub fn name(&self) -> &'static str {
        match self {
            DamageType::Physical => "physical",
            DamageType::Fire => "fire",
            DamageType::Ice => "ice",
            DamageType::Lightning => "lightning",
            DamageType::Poison => "poison",
            DamageType::Dark => "dark",
            DamageType::Holy => "holy",
        }
    }
}

/// Status effects that attacks can inflict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusKind {
    Stun,
    Freeze,
    Slow,
    Poison,
    Burn,
    Bleed,
    Weakness,
}

impl StatusKind {
    pub fn name(&self) -> &'static str {
        match self {
            StatusKind::Stun => "stun",
            StatusKind::Freeze => "freeze",
            StatusKind::Slow => "slow",
            StatusKind::Poison => "poison",
            StatusKind::Burn => "burn",
            StatusKind::Bleed => "bleed",
            StatusKind::Weakness => "weakness",
        }
    }

    /// Statuses a boss can never receive
    pub fn is_boss_immune(&self) -> bool {
        matches!(self, StatusKind::Stun | StatusKind::Freeze)
    }
}

/// What kind of entity a profile belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EntityKind {
    #[default]
    RegularMonster,
    Boss,
    Player,
    Npc,
}

/// Per-entity mitigation table
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResistanceProfile {
    pub kind: EntityKind,
    #[serde(default)]
    pub damage: HashMap<DamageType, i32>,
    #[serde(default)]
    pub status: HashMap<StatusKind, i32>,
    #[serde(default)]
    pub immunities: Vec<StatusKind>,
    #[serde(default)]
    pub vulnerabilities: Vec<DamageType>,
}

impl ResistanceProfile {
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Baseline profile for regular monsters
    pub fn regular_monster() -> Self {
        Self::new(EntityKind::RegularMonster)
    }

    /// Baseline profile for bosses: stun and freeze are always blocked
    pub fn boss() -> Self {
        Self::new(EntityKind::Boss)
            .with_immunity(StatusKind::Stun)
            .with_immunity(StatusKind::Freeze)
            .with_status(StatusKind::Poison, 25)
            .with_status(StatusKind::Bleed, 25)
    }

    pub fn player() -> Self {
        Self::new(EntityKind::Player)
    }

    fn max_percent(&self) -> i32 {
        if self.kind == EntityKind::Boss {
            MAX_BOSS_RESISTANCE
        } else {
            MAX_RESISTANCE
        }
    }

    /// Set a damage resistance, clamped to the entity's allowed range.
    /// Negative values also record a vulnerability.
    pub fn with_damage(mut self, damage_type: DamageType, percent: i32) -> Self {
        let clamped = percent.clamp(MIN_RESISTANCE, self.max_percent());
        self.damage.insert(damage_type, clamped);
        if clamped < 0 && !self.vulnerabilities.contains(&damage_type) {
            self.vulnerabilities.push(damage_type);
        }
        self
    }

    /// Set a status resistance, clamped to the entity's allowed range
    pub fn with_status(mut self, status: StatusKind, percent: i32) -> Self {
        let clamped = percent.clamp(MIN_RESISTANCE, self.max_percent());
        self.status.insert(status, clamped);
        self
    }

    pub fn with_immunity(mut self, status: StatusKind) -> Self {
        if !self.immunities.contains(&status) {
            self.immunities.push(status);
        }
        self
    }

    pub fn damage_resistance(&self, damage_type: DamageType) -> i32 {
        self.damage.get(&damage_type).copied().unwrap_or(0)
    }

    pub fn status_resistance(&self, status: StatusKind) -> i32 {
        self.status.get(&status).copied().unwrap_or(0)
    }

    pub fn is_vulnerable(&self, damage_type: DamageType) -> bool {
        self.vulnerabilities.contains(&damage_type)
    }

    /// Copy of this profile with temporary modifiers layered on top.
    /// The base profile is never changed.
    pub fn with_modifiers<'a>(&self, modifiers: impl IntoIterator<Item = &'a ResistanceModifier>) -> Self {
        let mut profile = self.clone();
        for modifier in modifiers {
            profile = match modifier.target {
                ResistanceTarget::Damage(damage_type) => {
                    let current = profile.damage_resistance(damage_type);
                    profile.with_damage(damage_type, current + modifier.amount)
                }
                ResistanceTarget::Status(status) => {
                    let current = profile.status_resistance(status);
                    profile.with_status(status, current + modifier.amount)
                }
            };
        }
        profile
    }
}

/// What a temporary modifier adjusts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResistanceTarget {
    Damage(DamageType),
    Status(StatusKind),
}

/// Temporary resistance change (buff when positive, debuff when negative)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResistanceModifier {
    pub target: ResistanceTarget,
    pub amount: i32,
}

/// Damage after resistance, never below [`MIN_DAMAGE`]
pub fn apply_resistance(base_damage: f64, damage_type: DamageType, profile: &ResistanceProfile) -> f64 {
    let resistance = profile.damage_resistance(damage_type) as f64;
    let multiplier = (100.0 - resistance) / 100.0;
    (base_damage * multiplier).max(MIN_DAMAGE)
}

/// Whether a status can land at all
pub fn can_apply_status(status: StatusKind, profile: &ResistanceProfile) -> bool {
    if profile.kind == EntityKind::Boss && status.is_boss_immune() {
        return false;
    }
    if profile.immunities.contains(&status) {
        return false;
    }
    profile.status_resistance(status) < 100
}

/// Probability that a status lands, in `[0, 1]`
pub fn status_apply_chance(status: StatusKind, profile: &ResistanceProfile, base_chance: f64) -> f64 {
    if !can_apply_status(status, profile) {
        return 0.0;
    }
    let resistance = profile.status_resistance(status) as f64;
    let mut chance = base_chance * (100.0 - resistance) / 100.0;
    if profile.kind == EntityKind::Boss && status == StatusKind::Slow {
        chance *= BOSS_SLOW_FACTOR;
    }
    chance.clamp(0.0, 1.0)
}
