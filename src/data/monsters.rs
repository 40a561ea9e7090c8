//! Monster templates for data-driven monster creation
//!
//! These templates are loaded from RON files and scaled by area level when
//! an encounter needs a monster.

use serde::{Deserialize, Serialize};

use crate::combat::{Archetype, DamageType, ResistanceProfile, StatusKind};

/// A template for creating monsters from external data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterTemplate {
    /// Unique template ID for reference
    pub id: String,
    /// Display name
    pub name: String,
    pub archetype: Archetype,
    /// Health at level 1
    pub base_health: f64,
    pub health_per_level: f64,
    /// Flat damage at level 1
    pub base_damage: f64,
    pub damage_per_level: f64,
    pub power_per_level: f64,
    pub base_defense: f64,
    pub defense_per_level: f64,
    pub crit_chance: f64,
    pub dodge: f64,
    pub resistances: ResistanceProfile,
    /// Optional description/lore
    #[serde(default)]
    pub description: Option<String>,
}

impl MonsterTemplate {
    fn per_level(base: f64, growth: f64, level: u32) -> f64 {
        base + growth * level.saturating_sub(1) as f64
    }

    pub fn health_at(&self, level: u32) -> f64 {
        Self::per_level(self.base_health, self.health_per_level, level)
    }

    pub fn damage_at(&self, level: u32) -> f64 {
        Self::per_level(self.base_damage, self.damage_per_level, level)
    }

    pub fn defense_at(&self, level: u32) -> f64 {
        Self::per_level(self.base_defense, self.defense_per_level, level)
    }

    pub fn power_at(&self, level: u32) -> f64 {
        self.power_per_level * level.max(1) as f64
    }
}

/// Collection of monster templates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonsterTemplates {
    pub templates: Vec<MonsterTemplate>,
}

impl MonsterTemplates {
    /// Find a template by ID
    pub fn find(&self, id: &str) -> Option<&MonsterTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// All templates of one archetype
    pub fn for_archetype(&self, archetype: Archetype) -> Vec<&MonsterTemplate> {
        self.templates.iter().filter(|t| t.archetype == archetype).collect()
    }
}

#[allow(clippy::too_many_arguments)]
fn template(
    id: &str,
    name: &str,
    archetype: Archetype,
    health: (f64, f64),
    damage: (f64, f64),
    power_per_level: f64,
    defense: (f64, f64),
    resistances: ResistanceProfile,
    description: &str,
) -> MonsterTemplate {
    MonsterTemplate {
        id: id.to_string(),
        name: name.to_string(),
        archetype,
        base_health: health.0,
        health_per_level: health.1,
        base_damage: damage.0,
        damage_per_level: damage.1,
        power_per_level,
        base_defense: defense.0,
        defense_per_level: defense.1,
        crit_chance: 0.05,
        dodge: 0.05,
        resistances,
        description: Some(description.to_string()),
    }
}

/// Create default monster templates (hardcoded fallback)
pub fn default_monster_templates() -> MonsterTemplates {
    let regular = ResistanceProfile::regular_monster;
    MonsterTemplates {
        templates: vec![
            // === MELEE ===
            template(
                "rubble_brute",
                "Rubble Brute",
                Archetype::Melee,
                (40.0, 8.0),
                (6.0, 1.5),
                1.5,
                (3.0, 0.5),
                regular().with_damage(DamageType::Physical, 15).with_damage(DamageType::Lightning, -20),
                "Scavenger grown thick on the ruins of the old market.",
            ),
            template(
                "ashen_knight",
                "Ashen Knight",
                Archetype::Melee,
                (55.0, 9.0),
                (7.0, 1.6),
                1.8,
                (5.0, 0.8),
                regular().with_damage(DamageType::Fire, 30).with_damage(DamageType::Holy, -25),
                "A sworn guard who never stopped patrolling the burned keep.",
            ),
            // === RANGED ===
            template(
                "rooftop_stalker",
                "Rooftop Stalker",
                Archetype::Ranged,
                (30.0, 6.0),
                (5.0, 1.4),
                1.4,
                (2.0, 0.4),
                regular().with_damage(DamageType::Poison, 20).with_status(StatusKind::Slow, 40),
                "Picks off travelers from the broken skyline.",
            ),
            template(
                "bone_archer",
                "Bone Archer",
                Archetype::Ranged,
                (28.0, 5.5),
                (6.0, 1.3),
                1.3,
                (1.5, 0.3),
                regular()
                    .with_damage(DamageType::Poison, 50)
                    .with_damage(DamageType::Holy, -40)
                    .with_immunity(StatusKind::Bleed),
                "Its quiver never empties.",
            ),
            // === MAGIC ===
            template(
                "cinder_adept",
                "Cinder Adept",
                Archetype::Magic,
                (26.0, 5.0),
                (7.0, 1.7),
                2.0,
                (1.0, 0.3),
                regular().with_damage(DamageType::Fire, 50).with_damage(DamageType::Ice, -30),
                "An apprentice who kept studying after the academy burned.",
            ),
            template(
                "hollow_seer",
                "Hollow Seer",
                Archetype::Magic,
                (32.0, 5.5),
                (6.5, 1.5),
                2.2,
                (1.5, 0.3),
                regular().with_damage(DamageType::Dark, 40).with_status(StatusKind::Weakness, 50),
                "Speaks in the voices of the district's dead.",
            ),
        ],
    }
}
