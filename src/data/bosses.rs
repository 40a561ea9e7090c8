//! District boss templates
//!
//! One boss guards each district. Templates carry stats, the ability list
//! the phase controller draws from, and the loot tier paid out on defeat.

use serde::{Deserialize, Serialize};

use crate::combat::{Archetype, BossAbility, DamageType, ResistanceProfile, StatusKind};
use crate::items::LootQuality;

/// A template for creating a district boss
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossTemplate {
    pub id: String,
    pub name: String,
    /// District this boss rules
    pub district: String,
    pub archetype: Archetype,
    /// Level used when none is requested
    pub default_level: u32,
    pub base_health: f64,
    pub health_per_level: f64,
    pub base_damage: f64,
    pub damage_per_level: f64,
    pub power_per_level: f64,
    pub defense: f64,
    pub crit_chance: f64,
    pub abilities: Vec<BossAbility>,
    pub loot_quality: LootQuality,
    pub resistances: ResistanceProfile,
    /// Line logged when the fight starts
    #[serde(default)]
    pub intro: Option<String>,
}

/// Collection of boss templates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BossTemplates {
    pub templates: Vec<BossTemplate>,
}

impl BossTemplates {
    /// Find a template by ID
    pub fn find(&self, id: &str) -> Option<&BossTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }
}

/// Create default boss templates (hardcoded fallback)
pub fn default_boss_templates() -> BossTemplates {
    BossTemplates {
        templates: vec![
            BossTemplate {
                id: "iron_warden".to_string(),
                name: "The Iron Warden".to_string(),
                district: "Forge Quarter".to_string(),
                archetype: Archetype::Melee,
                default_level: 5,
                base_health: 260.0,
                health_per_level: 30.0,
                base_damage: 12.0,
                damage_per_level: 2.0,
                power_per_level: 3.0,
                defense: 10.0,
                crit_chance: 0.08,
                abilities: vec![BossAbility::Shield, BossAbility::AoeAttack, BossAbility::Enrage],
                loot_quality: LootQuality::Rare,
                resistances: ResistanceProfile::boss()
                    .with_damage(DamageType::Physical, 30)
                    .with_damage(DamageType::Lightning, -25),
                intro: Some("Gears grind as the Iron Warden lowers its halberd.".to_string()),
            },
            BossTemplate {
                id: "plague_matron".to_string(),
                name: "The Plague Matron".to_string(),
                district: "Sunken Wards".to_string(),
                archetype: Archetype::Magic,
                default_level: 10,
                base_health: 220.0,
                health_per_level: 28.0,
                base_damage: 14.0,
                damage_per_level: 2.2,
                power_per_level: 3.5,
                defense: 6.0,
                crit_chance: 0.06,
                abilities: vec![
                    BossAbility::SummonMinions,
                    BossAbility::Heal,
                    BossAbility::Teleport,
                    BossAbility::AoeAttack,
                ],
                loot_quality: LootQuality::Epic,
                resistances: ResistanceProfile::boss()
                    .with_damage(DamageType::Poison, 100)
                    .with_damage(DamageType::Fire, -20)
                    .with_immunity(StatusKind::Poison),
                intro: Some("The air thickens with spores.".to_string()),
            },
            BossTemplate {
                id: "gallows_hunter".to_string(),
                name: "The Gallows Hunter".to_string(),
                district: "Old Gallows".to_string(),
                archetype: Archetype::Ranged,
                default_level: 15,
                base_health: 240.0,
                health_per_level: 26.0,
                base_damage: 15.0,
                damage_per_level: 2.4,
                power_per_level: 3.2,
                defense: 7.0,
                crit_chance: 0.12,
                abilities: vec![
                    BossAbility::Teleport,
                    BossAbility::SummonMinions,
                    BossAbility::Enrage,
                    BossAbility::Shield,
                ],
                loot_quality: LootQuality::Epic,
                resistances: ResistanceProfile::boss()
                    .with_damage(DamageType::Dark, 40)
                    .with_damage(DamageType::Holy, -30),
                intro: Some("A noose sways in a wind you cannot feel.".to_string()),
            },
            BossTemplate {
                id: "ruin_sovereign".to_string(),
                name: "The Ruin Sovereign".to_string(),
                district: "Crown Heights".to_string(),
                archetype: Archetype::Wild,
                default_level: 25,
                base_health: 400.0,
                health_per_level: 40.0,
                base_damage: 18.0,
                damage_per_level: 3.0,
                power_per_level: 4.0,
                defense: 12.0,
                crit_chance: 0.10,
                abilities: vec![
                    BossAbility::SummonMinions,
                    BossAbility::Heal,
                    BossAbility::AoeAttack,
                    BossAbility::Teleport,
                    BossAbility::Shield,
                    BossAbility::Enrage,
                ],
                loot_quality: LootQuality::Legendary,
                resistances: ResistanceProfile::boss()
                    .with_damage(DamageType::Dark, 50)
                    .with_damage(DamageType::Holy, 50)
                    .with_status(StatusKind::Slow, 20),
                intro: Some("The crown of the fallen city turns to face you.".to_string()),
            },
        ],
    }
}
